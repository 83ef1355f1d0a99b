//! Permission map → entitlement/grant projection.
//!
//! Snipe-IT permission keys look like `"users.view"` and are exposed as
//! entitlements named `"view users"` on the synthetic `Other` role. The bare
//! `superuser` and `admin` flags instead decide membership of the matching
//! admin role, which carries a single `assigned` entitlement.

use std::collections::HashSet;
use std::str::FromStr;

use snipeit_api::{Permission, Permissions};

use crate::error::ConnectorError;
use crate::model::{Entitlement, Grant, Resource, ResourceId, Role};
use crate::resource_types;

/// Slug of the entitlement an admin role hands out.
pub const ASSIGNED: &str = "assigned";

/// Split `"entity.action[.more]"` into `(entity, action)`.
pub fn parse_permission(permission: &str) -> Result<(&str, &str), ConnectorError> {
    let mut parts = permission.split('.');
    match (parts.next(), parts.next()) {
        (Some(entity), Some(action)) => Ok((entity, action)),
        _ => Err(ConnectorError::InvalidPermission {
            permission: permission.to_owned(),
        }),
    }
}

/// `"users.view"` → `"view users"`.
pub fn permission_entitlement_name(permission: &str) -> Result<String, ConnectorError> {
    let (entity, action) = parse_permission(permission)?;
    Ok(format!("{action} {entity}"))
}

pub fn is_role(key: &str) -> bool {
    Role::from_str(key).is_ok()
}

pub fn is_admin_role(name: &str) -> bool {
    Role::from_str(name).is_ok_and(Role::is_admin)
}

/// Granted, non-role permission keys in map order.
fn granted_permissions(permissions: &Permissions) -> impl Iterator<Item = &str> {
    permissions
        .iter()
        .filter(|(key, value)| value.is_granted() && !is_role(key))
        .map(|(key, _)| key.as_str())
}

// ── Entitlements ─────────────────────────────────────────────────────

/// Permission entitlements of a non-admin role, grantable to
/// `grantable_to`. Admin roles yield nothing here.
pub fn permission_entitlements(
    permissions: &Permissions,
    role: &Resource,
    grantable_to: &str,
) -> Result<Vec<Entitlement>, ConnectorError> {
    if is_admin_role(&role.id.resource) {
        return Ok(Vec::new());
    }

    granted_permissions(permissions)
        .map(|permission| {
            let name = permission_entitlement_name(permission)?;
            Ok(Entitlement::permission(role, &name)
                .grantable_to(grantable_to)
                .with_description(format!("can {name}"))
                .with_display_name(format!("{} {name}", role.display_name)))
        })
        .collect()
}

/// The two `assigned` entitlements of an admin role: one grantable to
/// users, one to groups.
pub fn admin_entitlements(role: &Resource) -> Vec<Entitlement> {
    [resource_types::USER, resource_types::GROUP]
        .into_iter()
        .map(|grantable_to| {
            Entitlement::assignment(role, ASSIGNED)
                .grantable_to(grantable_to)
                .with_description(format!("Appointed to {} role", role.display_name))
                .with_display_name(format!("{} role {ASSIGNED}", role.display_name))
        })
        .collect()
}

/// Drop repeats of the same `(slug, grantable_to)` pair, keeping the first.
pub fn dedup_entitlements(entitlements: Vec<Entitlement>) -> Vec<Entitlement> {
    let mut seen = HashSet::new();
    entitlements
        .into_iter()
        .filter(|e| seen.insert((e.slug.clone(), e.grantable_to.clone())))
        .collect()
}

// ── Grants ───────────────────────────────────────────────────────────

/// Grants of `role` held by `principal` according to its permission map.
///
/// Admin roles are granted wholesale when the map holds the lowercase role
/// name as `Granted`; other roles get one grant per granted permission.
pub fn permission_grants(
    permissions: &Permissions,
    role: &Resource,
    principal: &ResourceId,
) -> Result<Vec<Grant>, ConnectorError> {
    if is_admin_role(&role.id.resource) {
        return Ok(admin_role_grant(permissions, role, principal)
            .into_iter()
            .collect());
    }

    granted_permissions(permissions)
        .map(|permission| {
            let name = permission_entitlement_name(permission)?;
            Ok(Grant::new(&role.id, &name, principal.clone()))
        })
        .collect()
}

fn admin_role_grant(
    permissions: &Permissions,
    role: &Resource,
    principal: &ResourceId,
) -> Option<Grant> {
    let key = Role::from_str(&role.id.resource).ok()?.permission_key();
    permissions
        .get(&key)
        .is_some_and(Permission::is_granted)
        .then(|| Grant::new(&role.id, ASSIGNED, principal.clone()))
}
