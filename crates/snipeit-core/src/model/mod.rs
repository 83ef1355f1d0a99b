//! Host-side data model.
//!
//! A small, typed rendition of the identity-governance contract the connector
//! answers to: resource types and resources, entitlements, grants, response
//! annotations, and opaque page tokens.

mod annotations;
mod entitlement;
mod page;
mod resource;
mod role;

pub use annotations::{Annotation, Annotations};
pub use entitlement::{Entitlement, EntitlementRef, Grant, Purpose};
pub use page::{Page, PageToken};
pub use resource::{
    Email, GroupTrait, Profile, Resource, ResourceId, ResourceTrait, ResourceType, RoleTrait,
    TraitData, UserStatus, UserTrait,
};
pub use role::Role;
