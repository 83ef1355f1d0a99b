// Snipe-IT group endpoints
//
// The groups listing has no pagination; one call returns every group.
// Membership lives on the user record, so adding or removing a member is a
// read-modify-write of the user's complete group list via PATCH. Two
// concurrent mutations on the same user can lose an update.

use tracing::debug;

use crate::client::{ApiResponse, Client};
use crate::error::Error;
use crate::models::{GroupsResponse, PatchUserBody};
use crate::query::Query;
use crate::rate_limit::RateLimitInfo;

impl Client {
    /// Fetch every group.
    pub async fn get_all_groups(&self) -> Result<ApiResponse<GroupsResponse>, Error> {
        debug!("listing groups");
        self.get("groups", &Query::new()).await
    }

    /// Add `user_id` to `group_id`, keeping the user's other groups.
    ///
    /// The new group goes first in the patched list, followed by the
    /// existing memberships.
    pub async fn add_user_to_group(
        &self,
        group_id: u64,
        user_id: u64,
    ) -> Result<Option<RateLimitInfo>, Error> {
        let user = self.get_user(user_id).await?;
        let body = PatchUserBody::with_group(group_id, &user.group_ids());

        debug!(group_id, user_id, groups = ?body.groups, "adding user to group");
        self.patch(&format!("users/{user_id}"), &body).await
    }

    /// Remove `user_id` from `group_id`, keeping the user's other groups.
    pub async fn remove_user_from_group(
        &self,
        group_id: u64,
        user_id: u64,
    ) -> Result<Option<RateLimitInfo>, Error> {
        let user = self.get_user(user_id).await?;
        let body = PatchUserBody::without_group(group_id, &user.group_ids());

        debug!(group_id, user_id, groups = ?body.groups, "removing user from group");
        self.patch(&format!("users/{user_id}"), &body).await
    }
}
