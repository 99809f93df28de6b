// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Sends diagnostics to stderr so stdout carries only the report.
///
/// Each `-v` raises the default level one step from WARN; `RUST_LOG`
/// directives still take precedence.
pub fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .with_writer(std::io::stderr)
        .init();
}
