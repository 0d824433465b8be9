//! Provisioning tool flavors.
//!
//! Chef and Cinc share the same workspace layout; only the directory and
//! marker names differ, and only Chef ships a bootstrap script.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::constants;

/// Which provisioning tool an identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Chef,
    Cinc,
}

impl Tool {
    /// Secret directory inside the workspace (`.chef` / `.cinc`).
    pub fn dir_name(self) -> &'static str {
        match self {
            Tool::Chef => ".chef",
            Tool::Cinc => ".cinc",
        }
    }

    /// Marker file name inside the secret directory.
    pub fn marker_name(self) -> &'static str {
        match self {
            Tool::Chef => ".jenkinsChefIdentity",
            Tool::Cinc => ".jenkinsCincIdentity",
        }
    }

    /// Bootstrap script written to the workspace root, if the tool has one.
    pub fn script_name(self) -> Option<&'static str> {
        match self {
            Tool::Chef => Some(constants::SCRIPT_FILE),
            Tool::Cinc => None,
        }
    }

    /// Lowercase key used in the catalog file and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Chef => "chef",
            Tool::Cinc => "cinc",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Chef => f.write_str("Chef"),
            Tool::Cinc => f.write_str("Cinc"),
        }
    }
}
