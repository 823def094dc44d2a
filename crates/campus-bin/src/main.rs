// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Campus records service.
//!
//! Main binary entry point.

use campus_bin::cli::{Cli, Commands, LogFormat};
use campus_bin::error::report_error_and_exit;
use campus_bin::{commands, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let (level, format) = logging_settings(&cli);
    if let Err(e) = init_logging(&level, format) {
        report_error_and_exit(e);
    }

    if let Err(e) = commands::execute(cli).await {
        tracing::error!(error = %e, "Command failed");
        report_error_and_exit(e);
    }
}

/// Resolves the log level and format.
///
/// Command-line flags win. Otherwise the `logging` section of the
/// configuration file is used when the command reads one.
fn logging_settings(cli: &Cli) -> (String, LogFormat) {
    let reads_config = matches!(
        cli.effective_command(),
        Commands::Run(_) | Commands::Validate(_)
    );
    let needs_file = cli.log_level.is_none() || cli.log_format.is_none();

    let logging = if reads_config && needs_file && cli.config.exists() {
        campus_config::load_config(&cli.config)
            .map(|config| config.logging)
            .unwrap_or_default()
    } else {
        campus_config::LoggingSettings::default()
    };

    (
        cli.effective_log_level(logging.level.as_str()),
        cli.effective_log_format(logging.format.into()),
    )
}
