// Full-sync driver
//
// Walks resource types the way the host does: every page of resources, then
// every page of entitlements and grants for each resource, skipping types
// annotated with `SkipEntitlementsAndGrants`.

use serde::Serialize;
use tracing::{debug, info};

use crate::connector::SnipeIt;
use crate::error::ConnectorError;
use crate::model::{Annotations, Entitlement, Grant, Page, PageToken, Resource, ResourceType};
use crate::syncers::ResourceSyncer;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub resource_types: Vec<ResourceType>,
    pub resources: Vec<Resource>,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
    pub annotations: Annotations,
}

pub async fn sync_all(connector: &SnipeIt) -> Result<SyncReport, ConnectorError> {
    let mut report = SyncReport::default();

    for syncer in connector.resource_syncers() {
        let resource_type = syncer.resource_type();
        let resources = list_all(syncer).await?;
        report.annotations.extend(resources.annotations);

        if !resource_type.annotations.skips_entitlements_and_grants() {
            for resource in &resources.items {
                let entitlements = entitlements_all(syncer, resource).await?;
                report.entitlements.extend(entitlements.items);
                report.annotations.extend(entitlements.annotations);

                let grants = grants_all(syncer, resource).await?;
                report.grants.extend(grants.items);
                report.annotations.extend(grants.annotations);
            }
        }

        info!(
            resource_type = %resource_type.id,
            resources = resources.items.len(),
            "synced resource type"
        );
        report.resources.extend(resources.items);
        report.resource_types.push(resource_type);
    }

    Ok(report)
}

// ── Page walkers ─────────────────────────────────────────────────────
//
// Each follows next-page tokens until one comes back empty and returns
// everything as a single terminal page.

pub async fn list_all(syncer: &dyn ResourceSyncer) -> Result<Page<Resource>, ConnectorError> {
    let mut all = Page::empty();
    let mut token = PageToken::empty();
    loop {
        let page = syncer.list(None, &token).await?;
        debug!(items = page.items.len(), next = %page.next_token, "resources page");
        if accumulate(&mut all, page, &mut token) {
            return Ok(all);
        }
    }
}

pub async fn entitlements_all(
    syncer: &dyn ResourceSyncer,
    resource: &Resource,
) -> Result<Page<Entitlement>, ConnectorError> {
    let mut all = Page::empty();
    let mut token = PageToken::empty();
    loop {
        let page = syncer.entitlements(resource, &token).await?;
        debug!(resource = %resource.id, items = page.items.len(), "entitlements page");
        if accumulate(&mut all, page, &mut token) {
            return Ok(all);
        }
    }
}

pub async fn grants_all(
    syncer: &dyn ResourceSyncer,
    resource: &Resource,
) -> Result<Page<Grant>, ConnectorError> {
    let mut all = Page::empty();
    let mut token = PageToken::empty();
    loop {
        let page = syncer.grants(resource, &token).await?;
        debug!(resource = %resource.id, items = page.items.len(), "grants page");
        if accumulate(&mut all, page, &mut token) {
            return Ok(all);
        }
    }
}

/// Fold `page` into `all`; returns `true` once the last page is in.
fn accumulate<T>(all: &mut Page<T>, page: Page<T>, token: &mut PageToken) -> bool {
    all.items.extend(page.items);
    all.annotations.extend(page.annotations);
    *token = page.next_token;
    token.is_empty()
}
