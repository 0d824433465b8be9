//! Identity show command.
//!
//! Secrets are shown as short fingerprints so two identities can be told
//! apart without printing key material.

use std::path::Path;

use crate::cli::output;
use crate::core::domain::ToolIdentity;
use crate::core::registry::Registry;
use crate::core::resolve::resolve;
use crate::core::secret::fingerprint;
use crate::core::tool::Tool;
use crate::error::Result;

/// Show one identity.
pub fn execute(home: &Path, tool: Tool, name: &str) -> Result<()> {
    let registry = Registry::open(home)?;
    let catalog = registry.snapshot();
    let key = registry.key().as_age();

    match tool {
        Tool::Chef => {
            let identity = resolve(&catalog.chef, name)?;
            print_common(tool, identity, key)?;
            output::kv("cookbook path:", identity.cookbook_path());
            output::kv("run list:     ", identity.run_list());
            output::kv("remote host:  ", identity.remote_host());
            output::kv("account:      ", identity.remote_account());
        }
        Tool::Cinc => {
            let identity = resolve(&catalog.cinc, name)?;
            print_common(tool, identity, key)?;
        }
    }
    Ok(())
}

fn print_common<I: ToolIdentity>(tool: Tool, identity: &I, key: &age::x25519::Identity) -> Result<()> {
    let materials = identity.unseal(key)?;
    output::section(&format!("{} identity {}", tool.as_str(), output::name(identity.name())));
    output::kv("private key:  ", format!("sha256:{}", fingerprint(&materials.private_key)));
    output::kv("config file:  ", format!("sha256:{}", fingerprint(&materials.config_file)));
    Ok(())
}
