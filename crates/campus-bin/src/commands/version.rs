// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Prints version information.
pub fn version(cli: &Cli) -> BinResult<()> {
    println!("campus {}", crate::VERSION);
    if cli.quiet {
        return Ok(());
    }

    println!();
    println!("Components:");
    println!("  campus-bin:    {}", crate::VERSION);
    println!("  campus-api:    {}", campus_api::VERSION);
    println!("  campus-core:   {}", campus_core::VERSION);
    println!("  campus-config: {}", campus_config::VERSION);
    println!();
    println!("Target: {}-{}", std::env::consts::ARCH, std::env::consts::OS);

    Ok(())
}
