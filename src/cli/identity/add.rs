//! Identity add command.
//!
//! Reads the private key and configuration from files, seals them for the
//! controller key and stores the identity.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::domain::{BootstrapTarget, Catalog, ChefIdentity, CincIdentity};
use crate::core::registry::Registry;
use crate::core::tool::Tool;
use crate::error::Result;

/// Arguments for `identity add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Provisioning tool
    #[arg(value_enum)]
    pub tool: Tool,
    /// Identity name
    pub name: String,
    /// PEM private key file
    #[arg(long)]
    pub key_file: PathBuf,
    /// knife.rb / client configuration file
    #[arg(long)]
    pub config_file: PathBuf,
    /// Cookbook directory on the build agent (Chef)
    #[arg(long, default_value = "")]
    pub cookbook_path: String,
    /// Run list applied on bootstrap (Chef)
    #[arg(long, default_value = "")]
    pub run_list: String,
    /// Host to bootstrap (Chef)
    #[arg(long, default_value = "")]
    pub host: String,
    /// SSH account on the host (Chef); defaults to the local user
    #[arg(long)]
    pub user: Option<String>,
    /// Replace an identity with the same name
    #[arg(short, long)]
    pub force: bool,
}

/// Add an identity to the catalog.
pub fn execute(home: &Path, args: AddArgs) -> Result<()> {
    info!(tool = %args.tool, name = %args.name, "adding identity");

    let registry = Registry::open(home)?;
    let recipient = registry.key().recipient();
    let current = registry.snapshot();

    let private_key = read_secret(&args.key_file)?;
    let config_file = read_secret(&args.config_file)?;

    let catalog = match args.tool {
        Tool::Chef => {
            let target = BootstrapTarget {
                cookbook_path: args.cookbook_path,
                run_list: args.run_list,
                remote_host: args.host,
                remote_account: args.user.unwrap_or_else(whoami::username),
            };
            let identity =
                ChefIdentity::seal(args.name.as_str(), &private_key, &config_file, target, &recipient)?;
            Catalog {
                chef: current.chef.with(identity, args.force)?,
                cinc: current.cinc.clone(),
            }
        }
        Tool::Cinc => {
            if !args.host.is_empty() || !args.run_list.is_empty() || !args.cookbook_path.is_empty() {
                output::warn("bootstrap options only apply to chef identities, ignoring them");
            }
            let identity =
                CincIdentity::seal(args.name.as_str(), &private_key, &config_file, &recipient)?;
            Catalog {
                chef: current.chef.clone(),
                cinc: current.cinc.with(identity, args.force)?,
            }
        }
    };

    registry.replace(catalog)?;
    output::success(&format!("added {} identity {}", args.tool.as_str(), output::name(&args.name)));
    Ok(())
}

fn read_secret(path: &Path) -> Result<Zeroizing<String>> {
    Ok(Zeroizing::new(std::fs::read_to_string(path)?))
}
