//! Identity catalog commands.
//!
//! Every change loads the current catalog, builds a new one and replaces
//! the old one wholesale through the registry.

pub mod add;
pub mod import;
pub mod list;
pub mod rm;
pub mod show;
