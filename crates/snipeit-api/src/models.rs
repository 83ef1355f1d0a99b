// Snipe-IT response types
//
// Only the fields the connector reads are modeled. Snipe-IT emits `null` for
// empty strings, empty group lists, and empty permission maps depending on
// version, so most fields decode through `null_default`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::permissions::Permissions;

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Users ────────────────────────────────────────────────────────────

/// A row from `GET /api/v1/users` or `GET /api/v1/users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_default")]
    pub vip: bool,
    #[serde(
        default,
        rename = "employee_num",
        deserialize_with = "null_default"
    )]
    pub employee_number: String,
    #[serde(default, deserialize_with = "null_default")]
    pub activated: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub groups: GroupsResponse,
    #[serde(default, deserialize_with = "null_default")]
    pub permissions: Permissions,
}

impl User {
    /// `"first last"`, trimmed when either half is missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Group ids the user currently belongs to, in API order.
    pub fn group_ids(&self) -> Vec<u64> {
        self.groups.rows.iter().map(|g| g.id).collect()
    }
}

/// `{ total, rows }` envelope of the users listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub rows: Vec<User>,
}

/// Body of `PATCH /api/v1/users/{id}`: the complete group-id list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchUserBody {
    pub groups: Vec<u64>,
}

impl PatchUserBody {
    /// Membership list with `group_id` prepended to `current`.
    pub fn with_group(group_id: u64, current: &[u64]) -> Self {
        let mut groups = Vec::with_capacity(current.len() + 1);
        groups.push(group_id);
        groups.extend(current.iter().copied().filter(|id| *id != group_id));
        Self { groups }
    }

    /// Membership list with every occurrence of `group_id` dropped.
    pub fn without_group(group_id: u64, current: &[u64]) -> Self {
        Self {
            groups: current
                .iter()
                .copied()
                .filter(|id| *id != group_id)
                .collect(),
        }
    }
}

// ── Groups ───────────────────────────────────────────────────────────

/// A row from `GET /api/v1/groups`, or an entry embedded in a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub permissions: Permissions,
}

/// `{ total, rows }` envelope of the groups listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub rows: Vec<Group>,
}

impl GroupsResponse {
    /// `true` iff some row has the given id.
    pub fn contains_group(&self, id: u64) -> bool {
        self.rows.iter().any(|g| g.id == id)
    }
}

// ── Mutation envelope ────────────────────────────────────────────────

/// Status envelope Snipe-IT wraps mutation responses in.
///
/// Validation failures come back as HTTP 200 with `"status": "error"`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusEnvelope {
    pub status: String,
    #[serde(default)]
    pub messages: serde_json::Value,
}

impl StatusEnvelope {
    pub(crate) fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }

    /// Flatten `messages` (string, list, or field → list map) into one line.
    pub(crate) fn message(&self) -> String {
        fn collect(value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::String(s) => out.push(s.clone()),
                serde_json::Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
                serde_json::Value::Object(map) => map.values().for_each(|v| collect(v, out)),
                serde_json::Value::Null => {}
                other => out.push(other.to_string()),
            }
        }

        let mut parts = Vec::new();
        collect(&self.messages, &mut parts);
        if parts.is_empty() {
            self.status.clone()
        } else {
            parts.join("; ")
        }
    }
}
