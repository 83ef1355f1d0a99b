//! Clap derive structures for the `snipeit` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// snipeit -- sync Snipe-IT identities, groups, and role permissions
#[derive(Debug, Parser)]
#[command(
    name = "snipeit",
    version,
    about = "Inspect and provision Snipe-IT users, groups, and roles",
    long_about = "Drives the Snipe-IT identity connector from the command line.\n\n\
        Lists users, groups, and the synthetic Superuser/Admin/Other roles,\n\
        their entitlements and grants, and manages group membership.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "SNIPEIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Snipe-IT base URL (overrides profile)
    #[arg(long, env = "SNIPEIT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Personal access token
    #[arg(long, env = "SNIPEIT_ACCESS_TOKEN", global = true, hide = true, hide_env = true)]
    pub access_token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SNIPEIT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "SNIPEIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SNIPEIT_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ResourceTypeArg {
    User,
    Group,
    Role,
}

impl ResourceTypeArg {
    pub fn id(self) -> &'static str {
        match self {
            Self::User => snipeit_core::resource_types::USER,
            Self::Group => snipeit_core::resource_types::GROUP,
            Self::Role => snipeit_core::resource_types::ROLE,
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the base URL and access token can read users
    Validate,

    /// List every resource of a type
    #[command(alias = "ls")]
    Resources {
        #[arg(value_enum)]
        resource_type: ResourceTypeArg,
    },

    /// List entitlements offered by one resource
    #[command(alias = "ent")]
    Entitlements {
        #[arg(value_enum)]
        resource_type: ResourceTypeArg,
        /// Resource id (user/group id, or role name)
        id: String,
    },

    /// List grants of one resource's entitlements
    Grants {
        #[arg(value_enum)]
        resource_type: ResourceTypeArg,
        /// Resource id (user/group id, or role name)
        id: String,
    },

    /// Run a full sync and print everything found
    Sync,

    /// Add a user to a group
    Grant(MembershipArgs),

    /// Remove a user from a group
    Revoke(MembershipArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct MembershipArgs {
    /// Group id
    #[arg(long, short = 'g')]
    pub group: u64,

    /// User id
    #[arg(long, short = 'u')]
    pub user: u64,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Store the access token in the system keyring
    SetToken {
        /// Read the token from this env var instead of prompting
        #[arg(long)]
        from_env: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
