//! Participant identifiers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// User id as seen on the wire.
///
/// The server emits ids either as strings or as integer primary keys; both
/// normalize to the same textual form so `42` and `"42"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(d: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(d)? {
            Raw::Text(s) => UserId(s),
            Raw::Signed(n) => UserId(n.to_string()),
            Raw::Unsigned(n) => UserId(n.to_string()),
        })
    }
}
