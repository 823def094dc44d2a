// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `run`: start the API server
//! - `validate`: validate the configuration file
//! - `version`: show version information
//! - `hash-password`: hash a password for the bootstrap admin

mod hash_password;
mod run;
mod validate;
mod version;

pub use hash_password::hash_password;
pub use run::run;
pub use validate::validate;
pub use version::version;

use crate::cli::{Cli, Commands};
use crate::error::BinResult;

/// Executes the command selected on the command line.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Run(args) => run::run(&cli, args).await,
        Commands::Validate(args) => validate::validate(&cli, args),
        Commands::Version => version::version(&cli),
        Commands::HashPassword(args) => hash_password::hash_password(&cli, args),
    }
}
