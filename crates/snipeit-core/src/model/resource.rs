// Resource types and resources
//
// A resource is anything the host governs: a Snipe-IT user, a Snipe-IT
// group, or one of the synthetic roles. Each carries exactly one trait
// payload matching its resource type.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::annotations::Annotations;

/// Free-form profile attributes shown by the host.
pub type Profile = serde_json::Map<String, Value>;

// ── Resource types ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    User,
    Group,
    Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceType {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub traits: Vec<ResourceTrait>,
    #[serde(skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl ResourceType {
    pub fn new(id: &str, display_name: &str, description: &str, kind: ResourceTrait) -> Self {
        Self {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
            description: description.to_owned(),
            traits: vec![kind],
            annotations: Annotations::new(),
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }
}

// ── Resource identity ────────────────────────────────────────────────

/// `(resource type id, resource id)` pair identifying one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceId {
    pub resource_type: String,
    pub resource: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

// ── Trait payloads ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Enabled,
    Disabled,
}

impl UserStatus {
    pub fn from_activated(activated: bool) -> Self {
        if activated {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub address: String,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTrait {
    pub profile: Profile,
    pub emails: Vec<Email>,
    pub login: String,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTrait {
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleTrait {
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "trait", rename_all = "snake_case")]
pub enum TraitData {
    User(UserTrait),
    Group(GroupTrait),
    Role(RoleTrait),
}

impl TraitData {
    pub fn profile(&self) -> &Profile {
        match self {
            Self::User(t) => &t.profile,
            Self::Group(t) => &t.profile,
            Self::Role(t) => &t.profile,
        }
    }
}

// ── Resource ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    #[serde(flatten)]
    pub data: TraitData,
}

impl Resource {
    pub fn new(id: ResourceId, display_name: impl Into<String>, data: TraitData) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            data,
        }
    }

    pub fn profile(&self) -> &Profile {
        self.data.profile()
    }

    pub fn user_trait(&self) -> Option<&UserTrait> {
        match &self.data {
            TraitData::User(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resource_id_displays_as_pair() {
        assert_eq!(ResourceId::new("group", "10").to_string(), "group:10");
    }

    #[test]
    fn resource_serializes_trait_inline() {
        let mut profile = Profile::new();
        profile.insert("name".into(), json!("IT"));
        let resource = Resource::new(
            ResourceId::new("group", "10"),
            "IT",
            TraitData::Group(GroupTrait { profile }),
        );

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["trait"], "group");
        assert_eq!(value["profile"]["name"], "IT");
        assert_eq!(value["id"]["resource"], "10");
        assert!(resource.user_trait().is_none());
    }
}
