//! `snipeit grant|revoke`: group membership provisioning.

use tracing::debug;

use snipeit_core::model::{Annotations, Grant, ResourceId};
use snipeit_core::resource_types::{GROUP, USER};
use snipeit_core::syncers::group::{MEMBER, member_entitlement};
use snipeit_core::syncers::user::user_resource;
use snipeit_core::{Context, SnipeIt};

use crate::cli::{GlobalOpts, MembershipArgs, ResourceTypeArg};
use crate::error::CliError;

use super::resources::find_resource;

fn report(annotations: &Annotations, message: &str, global: &GlobalOpts) {
    if let Some(rl) = annotations.rate_limit() {
        debug!(remaining = ?rl.remaining, limit = ?rl.limit, "rate limit after mutation");
    }
    if !global.quiet {
        eprintln!("{message}");
    }
}

pub async fn grant(
    connector: &SnipeIt,
    args: &MembershipArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let group = find_resource(connector, ResourceTypeArg::Group, &args.group.to_string()).await?;

    let user = connector
        .client()
        .get_user(args.user)
        .await
        .context("Failed to get user")
        .map_err(|err| match err.status() {
            Some(404) => CliError::NotFound {
                resource_type: USER.into(),
                identifier: args.user.to_string(),
            },
            _ => err.into(),
        })?;

    let annotations = connector
        .provisioner(GROUP)?
        .grant(&user_resource(&user), &member_entitlement(&group))
        .await?;

    report(
        &annotations,
        &format!("User {} added to group '{}'", args.user, group.display_name),
        global,
    );
    Ok(())
}

pub async fn revoke(
    connector: &SnipeIt,
    args: &MembershipArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let grant = Grant::new(
        &ResourceId::new(GROUP, args.group.to_string()),
        MEMBER,
        ResourceId::new(USER, args.user.to_string()),
    );

    let annotations = connector.provisioner(GROUP)?.revoke(&grant).await?;

    report(
        &annotations,
        &format!("User {} removed from group {}", args.user, args.group),
        global,
    );
    Ok(())
}
