//! Command-line interface.

pub mod build;
pub mod completions;
pub mod identity;
pub mod init;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::resolve_home;
use crate::core::constants;
use crate::core::tool::Tool;
use crate::error::Result;

/// chef-identity - Chef and Cinc identities for CI build workspaces.
#[derive(Parser)]
#[command(
    name = "chef-identity",
    about = "Chef and Cinc identities for CI build workspaces",
    version
)]
pub struct Cli {
    /// Directory holding the catalog and controller key
    #[arg(long, global = true, env = constants::HOME_ENV)]
    pub home: Option<PathBuf>,

    /// Enable debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Diagnostic log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Format of `tracing` diagnostics on stderr.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the home directory, controller key and empty catalog
    Init,

    /// Manage the identity catalog
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },

    /// Materialize an identity into a workspace
    Setup(Target),

    /// Run the Chef install script in a workspace
    Run {
        #[command(flatten)]
        workspace: WorkspaceArg,
        /// Extra environment for the script (KEY=VALUE)
        #[arg(long = "env", value_parser = parse_env)]
        env: Vec<(String, String)>,
    },

    /// Remove an identity's secrets from a workspace
    Cleanup {
        /// Provisioning tool
        #[arg(long, value_enum, default_value_t = Tool::Chef)]
        tool: Tool,
        #[command(flatten)]
        workspace: WorkspaceArg,
    },

    /// Setup, run (Chef only) and cleanup in one go
    Build {
        #[command(flatten)]
        target: Target,
        /// Extra environment for the script (KEY=VALUE)
        #[arg(long = "env", value_parser = parse_env)]
        env: Vec<(String, String)>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Workspace root, defaulting to the CI job's `WORKSPACE`.
#[derive(Args, Clone, Debug)]
pub struct WorkspaceArg {
    /// Build workspace directory
    #[arg(long, env = "WORKSPACE")]
    pub workspace: Option<PathBuf>,
}

/// An identity applied to a workspace.
#[derive(Args, Clone, Debug)]
pub struct Target {
    /// Provisioning tool
    #[arg(long, value_enum, default_value_t = Tool::Chef)]
    pub tool: Tool,
    /// Identity name
    #[arg(long)]
    pub identity: String,
    #[command(flatten)]
    pub workspace: WorkspaceArg,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Identity subcommands.
#[derive(Subcommand)]
pub enum IdentityAction {
    /// Add or replace an identity
    Add(identity::add::AddArgs),

    /// Replace the whole catalog from a plaintext TOML file
    Import {
        /// Path to the import file
        path: PathBuf,
    },

    /// List identities
    List {
        /// Only this tool
        #[arg(long, value_enum)]
        tool: Option<Tool>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one identity (secrets as fingerprints only)
    Show {
        /// Identity name
        name: String,
        /// Provisioning tool
        #[arg(long, value_enum, default_value_t = Tool::Chef)]
        tool: Tool,
    },

    /// Remove an identity
    Rm {
        /// Identity name
        name: String,
        /// Provisioning tool
        #[arg(long, value_enum, default_value_t = Tool::Chef)]
        tool: Tool,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Parse a `KEY=VALUE` pair.
fn parse_env(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let home = resolve_home(cli.home)?;

    match cli.command {
        Command::Init => init::execute(&home),
        Command::Identity { action } => match action {
            IdentityAction::Add(args) => identity::add::execute(&home, args),
            IdentityAction::Import { path } => identity::import::execute(&home, &path),
            IdentityAction::List { tool, json } => identity::list::execute(&home, tool, json),
            IdentityAction::Show { name, tool } => identity::show::execute(&home, tool, &name),
            IdentityAction::Rm { name, tool, yes } => identity::rm::execute(&home, tool, &name, yes),
        },
        Command::Setup(target) => build::setup(&home, &target),
        Command::Run { workspace, env } => build::run(workspace.workspace, env),
        Command::Cleanup { tool, workspace } => build::cleanup(tool, workspace.workspace),
        Command::Build { target, env } => build::build(&home, &target, env),
        Command::Completions { shell } => completions::execute(shell),
    }
}
