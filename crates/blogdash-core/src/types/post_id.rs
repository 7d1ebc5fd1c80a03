//! Post identifier type.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated post identifier.
///
/// Services hand out either numeric ids (`3`) or string ids (`"a1b2"`).
/// Identity is the textual form, so `3` and `"3"` are the same post; the
/// JSON kind is remembered only so the id serializes back the way it came.
///
/// # Example
///
/// ```
/// use blogdash_core::PostId;
///
/// let typed = PostId::new("3").unwrap();
/// let fetched: PostId = serde_json::from_str("3").unwrap();
/// assert_eq!(typed, fetched);
/// ```
#[derive(Clone, Debug)]
pub struct PostId {
    value: String,
    numeric: bool,
}

impl PostId {
    /// Create a new post id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or cannot be used as a path segment.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let value = s.into();
        Self::validate(&value)?;
        Ok(Self {
            value,
            numeric: false,
        })
    }

    /// Create a post id from a numeric identifier.
    pub fn from_number(n: i64) -> Self {
        Self {
            value: n.to_string(),
            numeric: true,
        }
    }

    /// Read the id out of a raw JSON value, if it holds a usable one.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::from_number),
            serde_json::Value::String(s) => Self::new(s.as_str()).ok(),
            _ => None,
        }
    }

    /// Returns the textual form of the id.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns true if the id arrived as a JSON number.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::PostId {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if s == "." || s == ".." {
            return Err(InvalidInputError::PostId {
                value: s.to_string(),
                reason: "cannot be a dot segment".to_string(),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control())
        {
            return Err(InvalidInputError::PostId {
                value: s.to_string(),
                reason: format!("contains invalid character '{}'", c.escape_default()),
            }
            .into());
        }

        Ok(())
    }
}

impl PartialEq for PostId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PostId {}

impl Hash for PostId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for PostId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PostId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Serialize for PostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.parse::<i64>() {
            Ok(n) if self.numeric => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.value),
        }
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PostIdVisitor;

        impl Visitor<'_> for PostIdVisitor {
            type Value = PostId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or string post id")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PostId, E> {
                Ok(PostId::from_number(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PostId, E> {
                i64::try_from(v)
                    .map(PostId::from_number)
                    .map_err(|_| E::custom(format!("post id {} is out of range", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PostId, E> {
                PostId::new(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(PostIdVisitor)
    }
}
