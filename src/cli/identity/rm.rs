//! Identity remove command.

use std::path::Path;

use dialoguer::Confirm;
use tracing::info;

use crate::cli::output;
use crate::core::domain::Catalog;
use crate::core::registry::Registry;
use crate::core::tool::Tool;
use crate::error::Result;

/// Remove an identity, asking first unless `yes` is set.
pub fn execute(home: &Path, tool: Tool, name: &str, yes: bool) -> Result<()> {
    let registry = Registry::open(home)?;
    let current = registry.snapshot();

    let catalog = match tool {
        Tool::Chef => Catalog {
            chef: current.chef.without(name)?,
            cinc: current.cinc.clone(),
        },
        Tool::Cinc => Catalog {
            chef: current.chef.clone(),
            cinc: current.cinc.without(name)?,
        },
    };

    if !yes && !confirm(tool, name)? {
        output::dimmed("cancelled");
        return Ok(());
    }

    registry.replace(catalog)?;
    info!(tool = %tool, name = %name, "identity removed");
    output::success(&format!("removed {} identity {}", tool.as_str(), output::name(name)));
    Ok(())
}

fn confirm(tool: Tool, name: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Remove {} identity '{}'?", tool.as_str(), name))
        .default(false)
        .interact()
        .map_err(Into::into)
}
