// Role syncer
//
// Roles are synthetic: the three of them are listed without touching the
// API. Their entitlements and grants are projected from the permission maps
// of every group (fetched once, on the first page) and every user (paged).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use strum::IntoEnumIterator;

use snipeit_api::{Client, Group, User};

use super::ResourceSyncer;
use super::group::group_id;
use super::user::user_id;
use crate::error::{ConnectorError, Context};
use crate::model::{
    Annotations, Entitlement, Grant, Page, PageToken, Profile, Resource, ResourceId, ResourceType,
    Role, RoleTrait, TraitData,
};
use crate::pagination::{self, RESOURCE_PAGE_SIZE};
use crate::permissions::{
    admin_entitlements, dedup_entitlements, is_admin_role, permission_entitlements,
    permission_grants,
};
use crate::resource_types;

pub struct RoleSyncer {
    client: Arc<Client>,
}

pub fn role_resource(role: Role) -> Resource {
    let name = role.to_string();
    let mut profile = Profile::new();
    profile.insert("name".into(), json!(name));

    Resource::new(
        ResourceId::new(resource_types::ROLE, name.clone()),
        name,
        TraitData::Role(RoleTrait { profile }),
    )
}

/// Permission maps backing one page of role entitlements or grants.
struct PermissionSources {
    groups: Vec<Group>,
    users: Vec<User>,
    next: PageToken,
    annotations: Annotations,
}

impl RoleSyncer {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    async fn permission_sources(&self, token: &PageToken) -> Result<PermissionSources, ConnectorError> {
        let offset = pagination::decode(token, resource_types::USER)?;
        let mut annotations = Annotations::new();

        // Groups are unpaginated, so only the first page reads them.
        let groups = if offset == 0 {
            let resp = self
                .client
                .get_all_groups()
                .await
                .context("Failed to get groups")?;
            annotations.push_rate_limit(resp.rate_limit);
            resp.data.rows
        } else {
            Vec::new()
        };

        let resp = self
            .client
            .get_users(offset, RESOURCE_PAGE_SIZE, &[])
            .await
            .context("Failed to get users")?;
        annotations.push_rate_limit(resp.rate_limit);

        let users = resp.data.rows;
        let next = pagination::after_page(resource_types::USER, offset, users.len())?;

        Ok(PermissionSources {
            groups,
            users,
            next,
            annotations,
        })
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_type(&self) -> ResourceType {
        resource_types::role()
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        _token: &PageToken,
    ) -> Result<Page<Resource>, ConnectorError> {
        let items = Role::iter().map(role_resource).collect();
        Ok(Page::terminal(items, Annotations::new()))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Entitlement>, ConnectorError> {
        if is_admin_role(&resource.id.resource) {
            pagination::decode(token, resource_types::USER)?;
            return Ok(Page::terminal(
                admin_entitlements(resource),
                Annotations::new(),
            ));
        }

        let sources = self.permission_sources(token).await?;
        let mut entitlements = Vec::new();

        for group in &sources.groups {
            entitlements.extend(permission_entitlements(
                &group.permissions,
                resource,
                resource_types::GROUP,
            )?);
        }
        for user in &sources.users {
            entitlements.extend(permission_entitlements(
                &user.permissions,
                resource,
                resource_types::USER,
            )?);
        }

        Ok(Page::new(
            dedup_entitlements(entitlements),
            sources.next,
            sources.annotations,
        ))
    }

    async fn grants(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Grant>, ConnectorError> {
        let sources = self.permission_sources(token).await?;
        let mut grants = Vec::new();

        for group in &sources.groups {
            grants.extend(permission_grants(
                &group.permissions,
                resource,
                &group_id(group),
            )?);
        }
        for user in &sources.users {
            grants.extend(permission_grants(
                &user.permissions,
                resource,
                &user_id(user),
            )?);
        }

        Ok(Page::new(grants, sources.next, sources.annotations))
    }
}
