// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # IAM Auth Token
//!
//! IAM authentication tokens for ElastiCache and MemoryDB (Redis OSS / Valkey).
//!
//! A token is a SigV4 presigned `connect` request for a cluster, presented
//! without its `https://` scheme as the AUTH password:
//!
//! ```text
//! my-cluster/?Action=connect&User=alice&X-Amz-Algorithm=AWS4-HMAC-SHA256&...&X-Amz-Signature=...
//! ```
//!
//! ## Modules
//!
//! - [`constants`]: Token validity window, signing names and validation limits
//! - [`errors`]: Error types distinguishing missing credentials from signing failures
//! - [`identity`]: Ambient AWS configuration and caller identity diagnostics
//! - [`models`]: Service kind, target cluster, provider options and credentials
//! - [`provider`]: [`TokenProvider`] with its time-bounded cache and the
//!   [`CredentialProvider`] trait consumed by transports
//! - [`signer`]: SigV4 presigning of the `connect` request
//!
//! ## Usage
//!
//! ```no_run
//! # async fn example() -> Result<(), iam_authtoken::errors::AuthTokenError> {
//! use iam_authtoken::{ProviderOptions, ServiceKind, TokenProvider};
//!
//! let provider = TokenProvider::from_env(ProviderOptions {
//!     user_id: "alice".to_string(),
//!     cluster_name: "my-cluster".to_string(),
//!     region: "us-east-1".to_string(),
//!     service: ServiceKind::ElastiCache,
//!     debug: false,
//! })
//! .await?;
//!
//! let credentials = provider.get_credentials().await?;
//! let (username, password) = credentials.as_pair();
//! # let _ = (username, password);
//! # Ok(())
//! # }
//! ```
//!
//! ## Security Considerations
//!
//! - Tokens are valid for 15 minutes and are regenerated on the first call after expiry
//! - Credentials are zeroized on drop and redacted from `Debug` output
//! - Secret keys are never logged

pub mod constants;
pub mod errors;
pub mod identity;
pub mod models;
pub mod provider;
pub mod signer;

pub use errors::AuthTokenError;
pub use models::{IamCredentials, ProviderOptions, ServiceKind, TargetCluster};
pub use provider::{CredentialProvider, TokenProvider};
pub use signer::{PresignRequest, SigV4Presigner};
