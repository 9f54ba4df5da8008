//! Typed views over manifest elements.
//!
//! Every type here is a thin wrapper around a [`Node`](crate::node::Node). Accessors are
//! generated from short declarations pairing a property with its attribute name. Names not
//! declared here go through [`Tag::attribute_name`](crate::node::Tag::attribute_name).

/// Declares a wrapper struct and its [`Tag`](crate::node::Tag) implementation.
macro_rules! tag {
    (
        $(#[$meta:meta])*
        $name:ident
        $(, overrides = [$(($property:literal, $attribute:literal)),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            node: $crate::node::Node,
        }

        impl $crate::node::Tag for $name {
            $(
                const ATTRIBUTE_OVERRIDES: &'static [(&'static str, &'static str)] =
                    &[$(($property, $attribute)),*];
            )?

            fn from_node(node: $crate::node::Node) -> Self {
                Self { node }
            }

            fn node(&self) -> &$crate::node::Node {
                &self.node
            }
        }
    };
}

/// Attribute getter and setter pairs, each bound to its attribute name.
///
/// - `text`: raw attribute text
/// - `flag`: `true`/`false`, anything else reads as absent
/// - `number(T)`: integer or float, malformed text fails on read
/// - `list(T)`: comma or space separated values, an empty list removes the attribute
///
/// Use `pub;` inside an inherent impl and `trait;` inside a trait definition. The getter name
/// is the memo key.
macro_rules! attributes {
    (pub; $($body:tt)*) => {
        attributes!(@items [pub] $($body)*);
    };
    (trait; $($body:tt)*) => {
        attributes!(@items [] $($body)*);
    };

    (@items [$($vis:tt)*]) => {};

    (@items [$($vis:tt)*] $(#[$meta:meta])* $get:ident, $set:ident: text = $attr:literal; $($rest:tt)*) => {
        $(#[$meta])*
        $($vis)* fn $get(&self) -> Option<String> {
            $crate::node::Tag::node(self).text_property(stringify!($get), $attr)
        }

        $($vis)* fn $set(&self, value: Option<&str>) {
            $crate::node::Tag::node(self).set_attribute($attr, value)
        }

        attributes!(@items [$($vis)*] $($rest)*);
    };

    (@items [$($vis:tt)*] $(#[$meta:meta])* $get:ident, $set:ident: flag = $attr:literal; $($rest:tt)*) => {
        $(#[$meta])*
        $($vis)* fn $get(&self) -> Option<bool> {
            $crate::node::Tag::node(self).flag_property(stringify!($get), $attr)
        }

        $($vis)* fn $set(&self, value: Option<bool>) {
            $crate::node::Tag::node(self).set_property($attr, &value)
        }

        attributes!(@items [$($vis)*] $($rest)*);
    };

    (@items [$($vis:tt)*] $(#[$meta:meta])* $get:ident, $set:ident: number($ty:ty) = $attr:literal; $($rest:tt)*) => {
        $(#[$meta])*
        $($vis)* fn $get(&self) -> $crate::error::MpdResult<Option<$ty>> {
            $crate::node::Tag::node(self).property(stringify!($get), $attr)
        }

        $($vis)* fn $set(&self, value: Option<$ty>) {
            $crate::node::Tag::node(self).set_property($attr, &value)
        }

        attributes!(@items [$($vis)*] $($rest)*);
    };

    (@items [$($vis:tt)*] $(#[$meta:meta])* $get:ident, $set:ident: list($ty:ty) = $attr:literal; $($rest:tt)*) => {
        $(#[$meta])*
        $($vis)* fn $get(&self) -> $crate::error::MpdResult<Vec<$ty>> {
            $crate::node::Tag::node(self).property(stringify!($get), $attr)
        }

        $($vis)* fn $set(&self, values: Vec<$ty>) {
            $crate::node::Tag::node(self).set_property($attr, &values)
        }

        attributes!(@items [$($vis)*] $($rest)*);
    };
}

/// Child collections, looked up by local element name.
macro_rules! children {
    (pub; $($body:tt)*) => {
        children!(@items [pub] $($body)*);
    };
    (trait; $($body:tt)*) => {
        children!(@items [] $($body)*);
    };

    (@items [$($vis:tt)*]) => {};

    (@items [$($vis:tt)*] $(#[$meta:meta])* $name:ident: $ty:ty = $tag:literal; $($rest:tt)*) => {
        $(#[$meta])*
        $($vis)* fn $name(&self) -> Vec<$ty> {
            $crate::node::Tag::node(self).memoized_children(stringify!($name), $tag)
        }

        children!(@items [$($vis)*] $($rest)*);
    };
}

mod base;
mod mpd;
mod period;
mod representation;
mod segment;

pub use base::*;
pub use mpd::{Mpd, DEFAULT_ENCODING, DEFAULT_NAMESPACE_PREFIX};
pub use period::Period;
pub use representation::*;
pub use segment::*;
