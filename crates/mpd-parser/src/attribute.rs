//! Coercion of raw attribute text into typed values.
//!
//! Every function here maps an absent attribute to an absent value (`None` or an empty list),
//! never to zero. Only text that is present but can not be read as the requested number type
//! fails, with [`MpdError::MalformedNumber`].

use std::{fmt::Display, str::FromStr};

use crate::error::{MpdError, MpdResult};

const INFINITY: &str = "INF";

pub fn to_float(value: Option<&str>) -> MpdResult<Option<f64>> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value == INFINITY {
        return Ok(Some(f64::INFINITY));
    }
    value
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| MpdError::MalformedNumber(value.to_string()))
}

/// Only the exact tokens `true` and `false` are recognized.
pub fn to_bool(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

pub fn to_int<T>(value: Option<&str>) -> MpdResult<Option<T>>
where
    T: FromStr,
{
    let Some(value) = value else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| MpdError::MalformedNumber(value.to_string()))
}

/// Splits on commas and spaces. Empty tokens produced by adjacent separators are skipped.
pub fn to_list<T>(value: Option<&str>) -> MpdResult<Vec<T>>
where
    T: FromStr,
{
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    value
        .split([',', ' '])
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|_| MpdError::MalformedNumber(token.to_string()))
        })
        .collect()
}

pub fn from_float(value: f64) -> String {
    if value == f64::INFINITY {
        INFINITY.to_string()
    } else {
        value.to_string()
    }
}

pub fn from_list<T: Display>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// A value that can be read from, and written back to, an attribute.
///
/// `to_attribute` returning `None` means the attribute is removed.
pub trait AttributeValue: Clone + 'static {
    fn from_attribute(raw: Option<&str>) -> MpdResult<Self>;

    fn to_attribute(&self) -> Option<String>;
}

impl AttributeValue for Option<String> {
    fn from_attribute(raw: Option<&str>) -> MpdResult<Self> {
        Ok(raw.map(str::to_string))
    }

    fn to_attribute(&self) -> Option<String> {
        self.clone()
    }
}

impl AttributeValue for Option<bool> {
    fn from_attribute(raw: Option<&str>) -> MpdResult<Self> {
        Ok(to_bool(raw))
    }

    fn to_attribute(&self) -> Option<String> {
        self.map(|value| value.to_string())
    }
}

impl AttributeValue for Option<f64> {
    fn from_attribute(raw: Option<&str>) -> MpdResult<Self> {
        to_float(raw)
    }

    fn to_attribute(&self) -> Option<String> {
        self.map(from_float)
    }
}

macro_rules! integer_attribute {
    ($($ty:ty),*) => {
        $(
            impl AttributeValue for Option<$ty> {
                fn from_attribute(raw: Option<&str>) -> MpdResult<Self> {
                    to_int(raw)
                }

                fn to_attribute(&self) -> Option<String> {
                    self.map(|value| value.to_string())
                }
            }
        )*
    };
}

integer_attribute!(u32, u64, i64);

impl<T> AttributeValue for Vec<T>
where
    T: FromStr + Display + Clone + 'static,
{
    fn from_attribute(raw: Option<&str>) -> MpdResult<Self> {
        to_list(raw)
    }

    fn to_attribute(&self) -> Option<String> {
        from_list(self)
    }
}
