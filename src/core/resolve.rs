//! Identity lookup.

use tracing::debug;

use crate::core::domain::{IdentityStore, ToolIdentity};
use crate::error::{IdentityError, Result};

/// Find the identity called `name` in `store`.
///
/// Matching is exact and case-sensitive; an empty name never matches.
///
/// # Errors
///
/// Returns `IdentityError::NotFound` when nothing matches. The build driver
/// treats this as an abort, since the identity may have been removed from
/// the catalog while the job still references it.
pub fn resolve<'a, I: ToolIdentity>(store: &'a IdentityStore<I>, name: &str) -> Result<&'a I> {
    debug!(tool = %I::TOOL, name = %name, "resolving identity");

    store
        .iter()
        .find(|identity| !name.is_empty() && identity.name() == name)
        .ok_or_else(|| {
            IdentityError::NotFound {
                tool: I::TOOL,
                name: name.to_string(),
            }
            .into()
        })
}
