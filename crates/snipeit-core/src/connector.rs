// Connector facade
//
// Owns the shared API client and the three resource syncers. Everything the
// host can ask of the connector starts here.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use snipeit_api::Client;

use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, Context};
use crate::model::Annotations;
use crate::resource_types;
use crate::syncers::{GroupSyncer, ResourceProvisioner, ResourceSyncer, RoleSyncer, UserSyncer};

/// Static description shown by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}

pub struct SnipeIt {
    client: Arc<Client>,
    users: UserSyncer,
    groups: GroupSyncer,
    roles: RoleSyncer,
}

impl SnipeIt {
    pub fn new(config: &ConnectorConfig) -> Result<Self, ConnectorError> {
        let client = Client::new(
            config.base_url.as_str(),
            &config.access_token,
            &config.transport(),
        )
        .context("failed to create client")?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        let client = Arc::new(client);
        Self {
            users: UserSyncer::new(Arc::clone(&client)),
            groups: GroupSyncer::new(Arc::clone(&client)),
            roles: RoleSyncer::new(Arc::clone(&client)),
            client,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Snipe-IT".into(),
            description: "Syncs Snipe-IT users, groups, and roles with their permissions".into(),
        }
    }

    /// Confirm the configured URL and token can read users.
    ///
    /// May rewrite the client's base URL (see [`Client::validate`]).
    pub async fn validate(&self) -> Result<Annotations, ConnectorError> {
        self.client
            .validate()
            .await
            .context("Not enough permissions to get users")?;
        debug!(base_url = %self.client.base_url(), "credentials validated");
        Ok(Annotations::new())
    }

    /// User, group, and role syncers, in sync order.
    pub fn resource_syncers(&self) -> Vec<&dyn ResourceSyncer> {
        vec![&self.users, &self.groups, &self.roles]
    }

    pub fn syncer(&self, resource_type_id: &str) -> Result<&dyn ResourceSyncer, ConnectorError> {
        match resource_type_id {
            resource_types::USER => Ok(&self.users),
            resource_types::GROUP => Ok(&self.groups),
            resource_types::ROLE => Ok(&self.roles),
            other => Err(ConnectorError::UnknownResourceType(other.to_owned())),
        }
    }

    /// Only group membership can be granted or revoked.
    pub fn provisioner(
        &self,
        resource_type_id: &str,
    ) -> Result<&dyn ResourceProvisioner, ConnectorError> {
        match resource_type_id {
            resource_types::GROUP => Ok(&self.groups),
            resource_types::USER | resource_types::ROLE => {
                Err(ConnectorError::NotProvisionable(resource_type_id.to_owned()))
            }
            other => Err(ConnectorError::UnknownResourceType(other.to_owned())),
        }
    }
}
