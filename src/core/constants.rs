//! Constants used throughout chef-identity.
//!
//! Centralizes file names and environment variable names.

/// Catalog file name inside the home directory.
pub const CATALOG_FILE: &str = "identities.toml";

/// Controller key file name inside the home directory.
pub const KEY_FILE: &str = "identity.key";

/// Home directory relative to the user's HOME (`~/.chef-identity`).
pub const HOME_DIR: &str = ".chef-identity";

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "CHEF_IDENTITY_HOME";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "CHEF_IDENTITY_LOG";

/// Private key file name inside the tool directory.
pub const PRIVATE_KEY_FILE: &str = "user.pem";

/// Knife configuration file name inside the tool directory.
pub const CONFIG_FILE: &str = "knife.rb";

/// Chef bootstrap script written to the workspace root.
pub const SCRIPT_FILE: &str = "install-chef-cookbook.sh";
