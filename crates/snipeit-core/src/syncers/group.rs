// Group syncer
//
// Groups are listed in one unpaginated call. Membership is exposed as a
// single `member` entitlement and is the only thing the connector can
// provision: grant/revoke rewrite the user's group list upstream.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, warn};

use snipeit_api::{Client, Group, QueryParam};

use super::user::user_id;
use super::{ResourceProvisioner, ResourceSyncer, parse_id};
use crate::error::{ConnectorError, Context};
use crate::model::{
    Annotations, Entitlement, Grant, GroupTrait, Page, PageToken, Profile, Resource, ResourceId,
    ResourceType, TraitData,
};
use crate::pagination::{self, RESOURCE_PAGE_SIZE};
use crate::resource_types;

/// Slug of the group membership entitlement.
pub const MEMBER: &str = "member";

pub struct GroupSyncer {
    client: Arc<Client>,
}

impl GroupSyncer {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

pub fn group_id(group: &Group) -> ResourceId {
    ResourceId::new(resource_types::GROUP, group.id.to_string())
}

pub fn group_resource(group: &Group) -> Resource {
    let mut profile = Profile::new();
    profile.insert("name".into(), json!(group.name));
    profile.insert("group_id".into(), json!(group.id));

    Resource::new(
        group_id(group),
        group.name.clone(),
        TraitData::Group(GroupTrait { profile }),
    )
}

pub fn member_entitlement(group: &Resource) -> Entitlement {
    Entitlement::assignment(group, MEMBER)
        .grantable_to(resource_types::USER)
        .with_description(format!("Member of {} group", group.display_name))
        .with_display_name(format!("{} group {MEMBER}", group.display_name))
}

/// Validate a membership change and pull out `(group_id, user_id)`.
fn membership_ids(
    action: &'static str,
    group: &ResourceId,
    principal: &ResourceId,
) -> Result<(u64, u64), ConnectorError> {
    if principal.resource_type != resource_types::USER {
        warn!(
            principal_type = %principal.resource_type,
            principal_id = %principal.resource,
            "only users can be {action} groups"
        );
        return Err(ConnectorError::UnsupportedPrincipal {
            action,
            principal_type: principal.resource_type.clone(),
            principal_id: principal.resource.clone(),
        });
    }

    let group_id = parse_id("group", &group.resource)
        .inspect_err(|err| error!(group_id = %group.resource, "{err}"))?;
    let user_id = parse_id("user", &principal.resource)
        .inspect_err(|err| error!(user_id = %principal.resource, "{err}"))?;

    Ok((group_id, user_id))
}

#[async_trait]
impl ResourceSyncer for GroupSyncer {
    fn resource_type(&self) -> ResourceType {
        resource_types::group()
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        _token: &PageToken,
    ) -> Result<Page<Resource>, ConnectorError> {
        let resp = self
            .client
            .get_all_groups()
            .await
            .context("Failed to get groups")?;

        let mut annotations = Annotations::new();
        annotations.push_rate_limit(resp.rate_limit);

        let items = resp.data.rows.iter().map(group_resource).collect();
        Ok(Page::terminal(items, annotations))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> Result<Page<Entitlement>, ConnectorError> {
        Ok(Page::terminal(
            vec![member_entitlement(resource)],
            Annotations::new(),
        ))
    }

    async fn grants(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Grant>, ConnectorError> {
        let offset = pagination::decode(token, resource_types::USER)?;
        let group_id = parse_id("group", &resource.id.resource)?;

        let resp = self
            .client
            .get_users(offset, RESOURCE_PAGE_SIZE, &[QueryParam::group_id(group_id)])
            .await
            .context("Failed to get users")?;

        let mut annotations = Annotations::new();
        annotations.push_rate_limit(resp.rate_limit);

        let users = resp.data.rows;
        let grants = users
            .iter()
            .filter(|user| user.groups.contains_group(group_id))
            .map(|user| Grant::new(&resource.id, MEMBER, user_id(user)))
            .collect();

        let next = pagination::after_page(resource_types::USER, offset, users.len())?;
        Ok(Page::new(grants, next, annotations))
    }
}

#[async_trait]
impl ResourceProvisioner for GroupSyncer {
    async fn grant(
        &self,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Annotations, ConnectorError> {
        let (group_id, user_id) =
            membership_ids("granted to", &entitlement.resource.id, &principal.id)?;

        let rate_limit = self
            .client
            .add_user_to_group(group_id, user_id)
            .await
            .context("failed to add user to group")
            .inspect_err(|err| error!(group_id, user_id, "{err}"))?;

        let mut annotations = Annotations::new();
        annotations.push_rate_limit(rate_limit);
        Ok(annotations)
    }

    async fn revoke(&self, grant: &Grant) -> Result<Annotations, ConnectorError> {
        let (group_id, user_id) =
            membership_ids("revoked from", &grant.entitlement.resource, &grant.principal)?;

        let rate_limit = self
            .client
            .remove_user_from_group(group_id, user_id)
            .await
            .context("failed to remove user from group")
            .inspect_err(|err| error!(group_id, user_id, "{err}"))?;

        let mut annotations = Annotations::new();
        annotations.push_rate_limit(rate_limit);
        Ok(annotations)
    }
}
