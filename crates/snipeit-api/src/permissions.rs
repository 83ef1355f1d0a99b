// Snipe-IT permission maps
//
// Users and groups carry a `permissions` object keyed by `"entity.action"`
// (plus bare role flags such as `"superuser"`). Across API revisions the
// values have been emitted as `"1"`, `1`, and back to `"1"`, so decoding
// accepts either encoding and normalizes to `Permission`. Anything outside
// the known codes is kept verbatim as `Other` and never counts as granted.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

/// Tri-state grant value of a single permission entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `"1"` / `1`
    Granted,
    /// `"-1"` / `-1`
    Denied,
    /// `"0"` / `0`
    Inherited,
    /// Any other value (`""`, `"2"`, `true`, ...), as sent.
    Other(String),
}

/// Permission map, ordered by key so iteration is deterministic.
pub type Permissions = BTreeMap<String, Permission>;

impl Permission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Granted),
            -1 => Some(Self::Denied),
            0 => Some(Self::Inherited),
            _ => None,
        }
    }

    fn code(&self) -> &str {
        match self {
            Self::Granted => "1",
            Self::Denied => "-1",
            Self::Inherited => "0",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPermission {
    Number(i64),
    Text(String),
    Any(serde_json::Value),
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let permission = match RawPermission::deserialize(deserializer)? {
            RawPermission::Number(n) => {
                Self::from_code(n).unwrap_or_else(|| Self::Other(n.to_string()))
            }
            RawPermission::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(Self::from_code)
                .unwrap_or(Self::Other(s)),
            RawPermission::Any(value) => Self::Other(value.to_string()),
        };

        if let Self::Other(ref raw) = permission {
            debug!(value = %raw, "unrecognized permission value; treating as not granted");
        }
        Ok(permission)
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
