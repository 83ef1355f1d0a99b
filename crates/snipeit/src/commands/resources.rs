//! `snipeit resources|entitlements|grants`

use tabled::Tabled;

use snipeit_core::SnipeIt;
use snipeit_core::model::{Entitlement, Grant, Purpose, Resource, TraitData, UserStatus};
use snipeit_core::sync::{entitlements_all, grants_all, list_all};

use crate::cli::{GlobalOpts, ResourceTypeArg};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ResourceRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Login")]
    login: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Resource> for ResourceRow {
    fn from(r: &Resource) -> Self {
        let (login, status) = match &r.data {
            TraitData::User(user) => (
                user.login.clone(),
                output::status_cell(
                    &user.status.to_string(),
                    user.status == UserStatus::Enabled,
                ),
            ),
            TraitData::Group(_) | TraitData::Role(_) => (String::new(), String::new()),
        };
        Self {
            kind: r.id.resource_type.clone(),
            id: r.id.resource.clone(),
            name: r.display_name.clone(),
            login,
            status,
        }
    }
}

#[derive(Tabled)]
pub struct EntitlementRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Purpose")]
    purpose: &'static str,
    #[tabled(rename = "Grantable To")]
    grantable_to: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Entitlement> for EntitlementRow {
    fn from(e: &Entitlement) -> Self {
        Self {
            id: e.id.clone(),
            name: e.display_name.clone(),
            purpose: match e.purpose {
                Purpose::Assignment => "assignment",
                Purpose::Permission => "permission",
            },
            grantable_to: e.grantable_to.join(", "),
            description: e.description.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct GrantRow {
    #[tabled(rename = "Entitlement")]
    entitlement: String,
    #[tabled(rename = "Principal")]
    principal: String,
}

impl From<&Grant> for GrantRow {
    fn from(g: &Grant) -> Self {
        Self {
            entitlement: g.entitlement.id.clone(),
            principal: g.principal.to_string(),
        }
    }
}

// ── Lookup ──────────────────────────────────────────────────────────

/// Find one resource by id (role names match case-insensitively).
pub async fn find_resource(
    connector: &SnipeIt,
    resource_type: ResourceTypeArg,
    id: &str,
) -> Result<Resource, CliError> {
    let syncer = connector.syncer(resource_type.id())?;
    let all = list_all(syncer).await?;

    all.items
        .into_iter()
        .find(|r| r.id.resource.eq_ignore_ascii_case(id))
        .ok_or_else(|| CliError::NotFound {
            resource_type: resource_type.id().into(),
            identifier: id.into(),
        })
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(
    connector: &SnipeIt,
    resource_type: ResourceTypeArg,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let syncer = connector.syncer(resource_type.id())?;
    let page = list_all(syncer).await?;

    let out = output::render_list(
        &global.output,
        &page.items,
        |r| ResourceRow::from(r),
        |r| r.id.resource.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn entitlements(
    connector: &SnipeIt,
    resource_type: ResourceTypeArg,
    id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resource = find_resource(connector, resource_type, id).await?;
    let syncer = connector.syncer(resource_type.id())?;
    let page = entitlements_all(syncer, &resource).await?;

    let out = output::render_list(
        &global.output,
        &page.items,
        |e| EntitlementRow::from(e),
        |e| e.id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn grants(
    connector: &SnipeIt,
    resource_type: ResourceTypeArg,
    id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resource = find_resource(connector, resource_type, id).await?;
    let syncer = connector.syncer(resource_type.id())?;
    let page = grants_all(syncer, &resource).await?;

    let out = output::render_list(
        &global.output,
        &page.items,
        |g| GrantRow::from(g),
        |g| g.id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
