// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::SharedCredentialsProvider;

use crate::errors::AuthTokenError;

/// Loads the ambient AWS configuration (environment, profile, SSO, instance role)
/// pinned to `region`.
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

/// Returns the credentials provider from the loaded configuration.
pub fn credentials_provider(config: &SdkConfig) -> Result<SharedCredentialsProvider, AuthTokenError> {
    config.credentials_provider().ok_or_else(|| {
        AuthTokenError::CredentialsUnavailable("no credentials provider configured".to_string())
    })
}

/// Logs the ARN the ambient credentials resolve to.
///
/// Diagnostic only: failures are logged and never returned.
pub async fn log_caller_identity(config: &SdkConfig) {
    let client = aws_sdk_sts::Client::new(config);
    match client.get_caller_identity().send().await {
        Ok(identity) => {
            tracing::info!(
                "[authtoken] current role/user ARN: {}",
                identity.arn().unwrap_or("<unknown>")
            );
        }
        Err(err) => {
            tracing::warn!("[authtoken] error in getting caller identity: {:?}", err);
        }
    }
}
