// Snipe-IT user endpoints
//
// `GET /api/v1/users` is offset/limit paginated and accepts extra filters
// (e.g. `group_id`). `GET /api/v1/users/{id}` backs the group-membership
// mutations in `groups.rs`.

use tracing::{debug, error};

use crate::client::{ApiResponse, Client};
use crate::error::Error;
use crate::models::{User, UsersResponse};
use crate::query::{Query, QueryParam};

impl Client {
    /// Fetch one page of users.
    ///
    /// `filters` are appended before `offset` and `limit`, in order.
    pub async fn get_users(
        &self,
        offset: u64,
        limit: u64,
        filters: &[QueryParam],
    ) -> Result<ApiResponse<UsersResponse>, Error> {
        let query = Query::new()
            .extend(filters.iter().cloned())
            .offset(offset)
            .limit(limit);

        let resp = self.get("users", &query).await;
        if let Err(ref err) = resp {
            error!(
                error = %err,
                base_url = %self.base_url(),
                offset,
                limit,
                "failed to get users"
            );
        }
        resp
    }

    /// Fetch a single user by id.
    pub async fn get_user(&self, id: u64) -> Result<User, Error> {
        debug!(user_id = id, "fetching user");
        let resp = self.get(&format!("users/{id}"), &Query::new()).await?;
        Ok(resp.data)
    }
}
