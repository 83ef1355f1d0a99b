//! CLI configuration: thin wrapper around `snipeit_config`.
//!
//! Adds the flag-aware resolution step (`--base-url`, `--access-token`,
//! `--insecure`, `--timeout`) on top of the shared profile chain.

use std::time::Duration;

use secrecy::SecretString;

use snipeit_core::ConnectorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use snipeit_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_access_token,
};

pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Build a `ConnectorConfig` from the config file, profile, and CLI flags.
///
/// Flags win over profile values; without a profile, flags alone must
/// supply both the base URL and the token.
pub fn build_connector_config(global: &GlobalOpts) -> Result<ConnectorConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, &cfg.defaults);
    }

    let base_url = global.base_url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let token = global
        .access_token
        .clone()
        .ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;

    Ok(snipeit_config::validate_config(base_url, SecretString::from(token))?
        .with_tls(snipeit_config::tls_mode(global.insecure, None))
        .with_timeout(Duration::from_secs(global.timeout)))
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &snipeit_config::Defaults,
) -> Result<ConnectorConfig, CliError> {
    let base_url = global.base_url.as_deref().unwrap_or(&profile.base_url);

    let token = match global.access_token {
        Some(ref token) => SecretString::from(token.clone()),
        None => snipeit_config::resolve_access_token(profile, profile_name)?,
    };

    let insecure = global.insecure || profile.insecure.unwrap_or(defaults.insecure);
    let tls = snipeit_config::tls_mode(insecure, profile.ca_cert.as_deref());
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(global.timeout));

    Ok(snipeit_config::validate_config(base_url, token)?
        .with_tls(tls)
        .with_timeout(timeout))
}
