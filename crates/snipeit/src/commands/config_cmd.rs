//! Config subcommand handlers.

use std::fmt::Write;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Render config as TOML-ish text with the plaintext token masked.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "base_url = \"{}\"", p.base_url);
        if p.access_token.is_some() {
            let _ = writeln!(out, "access_token = \"****\"");
        }
        if let Some(ref env) = p.access_token_env {
            let _ = writeln!(out, "access_token_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

fn read_token(from_env: Option<&str>) -> Result<String, CliError> {
    let token = match from_env {
        Some(var) => std::env::var(var).map_err(|_| CliError::Validation {
            field: "from-env".into(),
            reason: format!("environment variable {var} is not set"),
        })?,
        None => rpassword::prompt_password("Access token: ")?,
    };

    let token = token.trim().to_owned();
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "access token".into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(token)
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetToken { from_env } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let token = read_token(from_env.as_deref())?;

            config::store_access_token(&profile_name, &token)?;

            // The keyring holds the token now; drop the plaintext copy.
            if let Some(profile) = cfg.profiles.get_mut(&profile_name) {
                if profile.access_token.take().is_some() {
                    config::save_config(&cfg)?;
                }
            }

            if !global.quiet {
                eprintln!("Access token for profile '{profile_name}' stored in system keyring");
            }
            Ok(())
        }
    }
}
