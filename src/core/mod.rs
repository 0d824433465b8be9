//! Core library components.
//!
//! Identity catalog, controller key, workspace materialization and the
//! build driver. Nothing in here prints; human-facing output lives in
//! [`crate::cli`].

pub mod build;
pub mod config;
pub mod constants;
pub mod domain;
pub mod import;
pub mod keys;
pub mod launch;
pub mod log;
pub mod registry;
pub mod resolve;
pub mod secret;
pub mod tool;
pub mod types;
pub mod validation;
pub mod workspace;
