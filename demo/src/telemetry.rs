// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to stderr, so stdout carries only program output.
///
/// `RUST_LOG` takes precedence; otherwise `debug` raises the default level.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with_writer(std::io::stderr)
        // remove the name of the function from every log entry
        .with_target(false)
        .init();
}
