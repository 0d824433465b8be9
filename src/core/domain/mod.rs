//! Domain types.

mod catalog;
mod identity;
mod store;

pub use catalog::Catalog;
pub use identity::{BootstrapTarget, ChefIdentity, CincIdentity, Materials, ToolIdentity};
pub use store::IdentityStore;
