// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use iam_auth_demo::configuration::GeneratorOptions;
use iam_auth_demo::telemetry;
use iam_authtoken::TokenProvider;

async fn run(options: GeneratorOptions) -> Result<()> {
    let provider = TokenProvider::from_env(options.token.provider_options()).await?;
    let credentials = provider.get_credentials().await?;

    if options.json {
        println!("{}", serde_json::to_string(&credentials)?);
    } else {
        println!("{}", credentials.token);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let options = GeneratorOptions::parse();

    telemetry::init(options.token.debug);

    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
