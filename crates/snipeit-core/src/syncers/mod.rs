//! Per-resource-type syncers.
//!
//! The host drives each resource type through [`ResourceSyncer`]: list the
//! resources, then list entitlements and grants of every resource, following
//! page tokens until they come back empty. Types that support provisioning
//! also implement [`ResourceProvisioner`].

pub mod group;
pub mod role;
pub mod user;

use async_trait::async_trait;

use crate::error::ConnectorError;
use crate::model::{Annotations, Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceType};

pub use group::GroupSyncer;
pub use role::RoleSyncer;
pub use user::UserSyncer;

#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    fn resource_type(&self) -> ResourceType;

    /// One page of resources of this type.
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<Page<Resource>, ConnectorError>;

    /// One page of entitlements offered by `resource`.
    async fn entitlements(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Entitlement>, ConnectorError>;

    /// One page of grants of `resource`'s entitlements.
    async fn grants(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Grant>, ConnectorError>;
}

#[async_trait]
pub trait ResourceProvisioner: ResourceSyncer {
    /// Give `principal` the entitlement.
    async fn grant(
        &self,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Annotations, ConnectorError>;

    /// Take the granted entitlement away from its principal.
    async fn revoke(&self, grant: &Grant) -> Result<Annotations, ConnectorError>;
}

/// Numeric Snipe-IT id from a resource id string.
pub(crate) fn parse_id(kind: &'static str, id: &str) -> Result<u64, ConnectorError> {
    id.parse()
        .map_err(|source| ConnectorError::invalid_id(kind, id, source))
}
