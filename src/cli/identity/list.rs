//! Identity list command.

use std::path::Path;

use crate::cli::output;
use crate::core::domain::{IdentityStore, ToolIdentity};
use crate::core::registry::Registry;
use crate::core::tool::Tool;
use crate::error::Result;

/// List identities, optionally for one tool.
pub fn execute(home: &Path, tool: Option<Tool>, json: bool) -> Result<()> {
    let registry = Registry::open(home)?;
    let catalog = registry.snapshot();
    let wanted = |t: Tool| tool.map_or(true, |only| only == t);

    if json {
        let mut entries = Vec::new();
        if wanted(Tool::Chef) {
            entries.extend(catalog.chef.iter().map(|i| {
                serde_json::json!({
                    "tool": Tool::Chef.as_str(),
                    "name": i.name(),
                    "remote_host": i.remote_host(),
                    "remote_account": i.remote_account(),
                    "run_list": i.run_list(),
                })
            }));
        }
        if wanted(Tool::Cinc) {
            entries.extend(catalog.cinc.iter().map(|i| {
                serde_json::json!({
                    "tool": Tool::Cinc.as_str(),
                    "name": i.name(),
                })
            }));
        }
        let result = serde_json::json!({
            "count": entries.len(),
            "identities": entries,
        });
        output::data(&serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if catalog.is_empty() {
        output::dimmed("no identities");
        return Ok(());
    }
    if wanted(Tool::Chef) {
        print_store(Tool::Chef, &catalog.chef);
    }
    if wanted(Tool::Cinc) {
        print_store(Tool::Cinc, &catalog.cinc);
    }
    Ok(())
}

fn print_store<I: ToolIdentity>(tool: Tool, store: &IdentityStore<I>) {
    output::section(&format!("{} {} identities", output::count(store.len()), tool.as_str()));
    for name in store.names() {
        output::list_item(name);
    }
}
