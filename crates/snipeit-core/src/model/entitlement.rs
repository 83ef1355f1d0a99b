// Entitlements and grants
//
// Both are computed on every sync from the latest API responses; nothing
// here is persisted. Identifiers follow the host's colon-joined format:
// entitlement `"<type>:<resource>:<slug>"`, grant
// `"<entitlement id>:<principal type>:<principal id>"`.

use serde::Serialize;

use super::resource::{Resource, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Membership-style entitlement (group member, role assigned).
    Assignment,
    /// Capability derived from a permission map entry.
    Permission,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entitlement {
    pub id: String,
    pub resource: Resource,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    pub purpose: Purpose,
    /// Resource-type ids that may hold this entitlement.
    pub grantable_to: Vec<String>,
}

impl Entitlement {
    pub fn assignment(resource: &Resource, slug: &str) -> Self {
        Self::build(resource, slug, Purpose::Assignment)
    }

    pub fn permission(resource: &Resource, slug: &str) -> Self {
        Self::build(resource, slug, Purpose::Permission)
    }

    fn build(resource: &Resource, slug: &str, purpose: Purpose) -> Self {
        Self {
            id: entitlement_id(&resource.id, slug),
            resource: resource.clone(),
            slug: slug.to_owned(),
            display_name: slug.to_owned(),
            description: String::new(),
            purpose,
            grantable_to: Vec::new(),
        }
    }

    #[must_use]
    pub fn grantable_to(mut self, resource_type_id: &str) -> Self {
        self.grantable_to.push(resource_type_id.to_owned());
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

pub fn entitlement_id(resource: &ResourceId, slug: &str) -> String {
    format!("{}:{}:{slug}", resource.resource_type, resource.resource)
}

/// The parts of an entitlement a grant needs to point back at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntitlementRef {
    pub id: String,
    pub resource: ResourceId,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grant {
    pub id: String,
    pub entitlement: EntitlementRef,
    pub principal: ResourceId,
}

impl Grant {
    /// Grant of `slug` on `resource` to `principal`.
    pub fn new(resource: &ResourceId, slug: &str, principal: ResourceId) -> Self {
        let entitlement = EntitlementRef {
            id: entitlement_id(resource, slug),
            resource: resource.clone(),
            slug: slug.to_owned(),
        };
        Self {
            id: format!(
                "{}:{}:{}",
                entitlement.id, principal.resource_type, principal.resource
            ),
            entitlement,
            principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupTrait, Profile, TraitData};

    fn group() -> Resource {
        Resource::new(
            ResourceId::new("group", "10"),
            "IT",
            TraitData::Group(GroupTrait {
                profile: Profile::new(),
            }),
        )
    }

    #[test]
    fn entitlement_id_joins_resource_and_slug() {
        let ent = Entitlement::assignment(&group(), "member")
            .grantable_to("user")
            .with_display_name("IT group member");

        assert_eq!(ent.id, "group:10:member");
        assert_eq!(ent.purpose, Purpose::Assignment);
        assert_eq!(ent.grantable_to, vec!["user".to_owned()]);
        assert_eq!(ent.resource.id, ResourceId::new("group", "10"));
    }

    #[test]
    fn grant_id_appends_principal() {
        let grant = Grant::new(
            &ResourceId::new("group", "10"),
            "member",
            ResourceId::new("user", "1"),
        );
        assert_eq!(grant.id, "group:10:member:user:1");
        assert_eq!(grant.entitlement.id, "group:10:member");
    }
}
