// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use iam_auth_demo::backoff::RetryPolicy;
use iam_auth_demo::configuration::DemoOptions;
use iam_auth_demo::supervisor::{ConnectionSupervisor, StopReason};
use iam_auth_demo::telemetry;
use iam_authtoken::TokenProvider;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("[demo] unable to listen for ctrl-c: {:?}", err);
        std::future::pending::<()>().await;
    }
}

async fn run(options: DemoOptions) -> Result<()> {
    let provider = TokenProvider::from_env(options.token.provider_options())
        .await
        .context("unable to create token provider")?;

    tracing::info!(
        "[demo] using credentials for {} on {}",
        provider.user(),
        provider.target().cluster_name
    );

    let mut supervisor =
        ConnectionSupervisor::new(options.connector(), Arc::new(provider), RetryPolicy::default());

    let summary = supervisor
        .run(
            Duration::from_secs(options.connect_sleep_time),
            shutdown_signal(),
        )
        .await?;

    if summary.stopped == StopReason::Interrupted {
        println!("Program execution was interrupted and exited");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let options = DemoOptions::parse();

    telemetry::init(options.token.debug);

    // redis uses the process-wide rustls provider for TLS connections
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    tracing::debug!("[demo] {:?}", &options);

    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
