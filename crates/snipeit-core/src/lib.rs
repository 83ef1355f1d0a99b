//! Snipe-IT identity connector.
//!
//! Projects Snipe-IT users, groups, and permission maps onto a resource /
//! entitlement / grant model:
//!
//! - [`syncers`]: one [`ResourceSyncer`] per resource type (user, group,
//!   role); groups also implement [`ResourceProvisioner`].
//! - [`permissions`]: the permission-map → entitlement/grant mapping,
//!   including the admin-role special case.
//! - [`pagination`]: opaque JSON page tokens.
//! - [`SnipeIt`]: the connector facade; [`sync::sync_all`] drives a full sync.

pub mod config;
pub mod connector;
pub mod error;
pub mod model;
pub mod pagination;
pub mod permissions;
pub mod resource_types;
pub mod sync;
pub mod syncers;

pub use config::ConnectorConfig;
pub use connector::{ConnectorMetadata, SnipeIt};
pub use error::{ConnectorError, Context};
pub use sync::{SyncReport, sync_all};
pub use syncers::{ResourceProvisioner, ResourceSyncer};

// Re-exported so downstream crates need not depend on `snipeit-api` directly.
pub use snipeit_api::{RateLimitInfo, TlsMode};
