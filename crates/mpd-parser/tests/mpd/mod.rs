mod live;
mod mutation;
mod on_demand;
