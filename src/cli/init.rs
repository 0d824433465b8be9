//! Init command - create the identity home.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::registry::Registry;
use crate::error::Result;

/// Create the home directory, controller key and an empty catalog.
pub fn execute(home: &Path) -> Result<()> {
    info!(home = %home.display(), "initializing");

    let registry = Registry::init(home)?;

    output::success(&format!("initialized {}", output::path(home.display())));
    output::kv("recipient:", registry.key().public_key());
    output::kv("key:", registry.key().path().display());
    output::hint(&format!(
        "add an identity: {}",
        output::cmd("chef-identity identity add chef NAME --key-file ... --config-file ...")
    ));
    Ok(())
}
