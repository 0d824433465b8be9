//! Identity import command.
//!
//! Replaces the entire catalog with the identities described in a plaintext
//! TOML file. Identities missing from the file are gone afterwards.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::import::ImportFile;
use crate::core::registry::Registry;
use crate::error::Result;

/// Import a plaintext catalog.
pub fn execute(home: &Path, path: &Path) -> Result<()> {
    let registry = Registry::open(home)?;
    let file = ImportFile::load(path)?;
    info!(path = %path.display(), identities = file.len(), "importing catalog");

    let catalog = file.seal(&registry.key().recipient())?;
    let (chef, cinc) = (catalog.chef.len(), catalog.cinc.len());
    registry.replace(catalog)?;

    output::success(&format!(
        "imported {} chef and {} cinc identities",
        output::count(chef),
        output::count(cinc)
    ));
    output::hint(&format!(
        "{} still holds plaintext secrets; delete it when done",
        output::path(path.display())
    ));
    Ok(())
}
