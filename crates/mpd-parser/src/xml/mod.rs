//! Arena-backed XML element tree built on `quick-xml` events.

mod document;
mod navigate;
mod writer;

pub use document::{Attribute, Content, Document, Element, ElementId};
pub use navigate::local_name;
