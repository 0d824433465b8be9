//! chef-identity - Chef and Cinc identities for CI build workspaces.
//!
//! An administrator keeps a catalog of named identities (a private key, a
//! knife/client configuration and, for Chef, a bootstrap target). A build
//! picks one by name; its secrets are written into the build workspace for
//! the duration of the build and removed afterwards.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Create home, controller key, empty catalog
//! │   ├── identity/     # add, import, list, show, rm
//! │   ├── build         # setup, run, cleanup, build
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # identities.toml management
//!     ├── keys          # Controller key (age x25519)
//!     ├── secret        # Sealed secrets
//!     ├── domain/       # Identities, stores, catalog
//!     ├── registry      # Process-wide catalog with atomic replace
//!     ├── resolve       # Name lookup
//!     ├── workspace/    # Reconcile, install script, cleanup
//!     ├── launch        # Script launcher
//!     └── build         # Setup, perform, teardown
//! ```
//!
//! # Features
//!
//! - Secrets sealed at rest with age x25519
//! - Marker-driven, idempotent workspace provisioning
//! - Guaranteed cleanup with abort on leftover key material
//! - Whole-catalog replacement, safe against concurrent builds

pub mod cli;
pub mod core;
pub mod error;
