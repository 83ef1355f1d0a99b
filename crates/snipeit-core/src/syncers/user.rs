// User syncer
//
// Snipe-IT users become user resources. They are principals only, so
// entitlements and grants are always empty.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use snipeit_api::{Client, User};

use super::ResourceSyncer;
use crate::error::{ConnectorError, Context};
use crate::model::{
    Annotations, Email, Entitlement, Grant, Page, PageToken, Profile, Resource, ResourceId,
    ResourceType, TraitData, UserStatus, UserTrait,
};
use crate::pagination::{self, RESOURCE_PAGE_SIZE};
use crate::resource_types;

pub struct UserSyncer {
    client: Arc<Client>,
}

impl UserSyncer {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

pub fn user_id(user: &User) -> ResourceId {
    ResourceId::new(resource_types::USER, user.id.to_string())
}

pub fn user_resource(user: &User) -> Resource {
    let mut profile = Profile::new();
    profile.insert("first_name".into(), json!(user.first_name));
    profile.insert("last_name".into(), json!(user.last_name));
    profile.insert("email".into(), json!(user.email));
    profile.insert("login".into(), json!(user.username));
    profile.insert("user_id".into(), json!(user.id.to_string()));
    profile.insert("vip".into(), json!(user.vip.to_string()));
    profile.insert("activated".into(), json!(user.activated.to_string()));
    profile.insert("employee_number".into(), json!(user.employee_number));

    let data = TraitData::User(UserTrait {
        profile,
        emails: vec![Email {
            address: user.email.clone(),
            primary: true,
        }],
        login: user.username.clone(),
        status: UserStatus::from_activated(user.activated),
    });

    Resource::new(user_id(user), user.full_name(), data)
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> ResourceType {
        resource_types::user()
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<Page<Resource>, ConnectorError> {
        let offset = pagination::decode(token, resource_types::USER)?;

        let resp = self
            .client
            .get_users(offset, RESOURCE_PAGE_SIZE, &[])
            .await
            .context("Failed to get users")?;

        let mut annotations = Annotations::new();
        annotations.push_rate_limit(resp.rate_limit);

        let users = resp.data.rows;
        let next = pagination::after_page(resource_types::USER, offset, users.len())?;
        let items = users.iter().map(user_resource).collect();

        Ok(Page::new(items, next, annotations))
    }

    async fn entitlements(
        &self,
        _resource: &Resource,
        _token: &PageToken,
    ) -> Result<Page<Entitlement>, ConnectorError> {
        Ok(Page::empty())
    }

    async fn grants(
        &self,
        _resource: &Resource,
        _token: &PageToken,
    ) -> Result<Page<Grant>, ConnectorError> {
        Ok(Page::empty())
    }
}
