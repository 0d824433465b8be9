//! chef-identity - Chef and Cinc identities for CI build workspaces.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chef_identity::cli::output;
use chef_identity::cli::{execute, Cli, LogFormat};
use chef_identity::core::constants;
use chef_identity::error::{ConfigError, Error, IdentityError, StoreError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("chef_identity=debug")
        } else {
            EnvFilter::new("chef_identity=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    if let Err(e) = execute(cli) {
        let suggestion = match e.underlying() {
            Error::Config(ConfigError::NotInitialized) => Some("run: chef-identity init"),
            Error::Store(StoreError::NoPrivateKey(_)) => Some("run: chef-identity init"),
            Error::Identity(IdentityError::NotFound { .. }) => {
                Some("run: chef-identity identity list")
            }
            _ => None,
        };

        // the build log already printed these
        if !matches!(e, Error::Reported(_)) {
            output::error(&e.to_string());
        }
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
