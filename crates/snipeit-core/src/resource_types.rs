// Resource types exposed to the host

use crate::model::{Annotation, Annotations, ResourceTrait, ResourceType};

pub const USER: &str = "user";
pub const GROUP: &str = "group";
pub const ROLE: &str = "role";

/// Users are principals only; they own no entitlements.
pub fn user() -> ResourceType {
    ResourceType::new(USER, "User", "A user in Snipe-IT", ResourceTrait::User)
        .with_annotations(Annotation::SkipEntitlementsAndGrants.into())
}

pub fn group() -> ResourceType {
    ResourceType::new(GROUP, "Group", "A group in Snipe-IT", ResourceTrait::Group)
}

pub fn role() -> ResourceType {
    ResourceType::new(ROLE, "Role", "A role in Snipe-IT", ResourceTrait::Role)
}
