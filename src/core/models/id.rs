use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a column or a task.
///
/// Ids only need to be unique within their own collection. Integer-style ids are
/// stored as their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, when the id was issued as an integer.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

macro_rules! id_from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Id {
            fn from(value: $t) -> Self {
                Self(value.to_string())
            }
        })*
    };
}

id_from_integer!(u32, u64, usize, i32, i64);

impl From<&Id> for Id {
    fn from(value: &Id) -> Self {
        value.clone()
    }
}
