// snipeit-api: Async Rust client for the Snipe-IT REST API
//
// Bearer-token authenticated access to the users and groups endpoints,
// typed status errors, rate-limit header capture, and tolerant decoding of
// Snipe-IT's shifting permission encodings.

pub mod client;
pub mod error;
pub mod groups;
pub mod models;
pub mod permissions;
pub mod query;
pub mod rate_limit;
pub mod transport;
pub mod users;

pub use client::{ApiResponse, Client};
pub use error::Error;
pub use models::{Group, GroupsResponse, PatchUserBody, User, UsersResponse};
pub use permissions::{Permission, Permissions};
pub use query::{Query, QueryParam};
pub use rate_limit::RateLimitInfo;
pub use transport::{TlsMode, TransportConfig};
