// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # IAM Auth Demo
//!
//! Connects to an ElastiCache or MemoryDB cluster with IAM authentication
//! and keeps the connection busy so that token refresh is exercised.
//!
//! ```text
//! ConnectionSupervisor -> CredentialProvider (iam-authtoken) -> AUTH user token
//!          |
//!          +-> RedisConnector -> cluster
//! ```
//!
//! ## Modules
//!
//! - [`backoff`]: Bounded exponential backoff policy
//! - [`configuration`]: CLI argument parsing with clap
//! - [`constants`]: Retry, re-authentication and failure limits
//! - [`errors`]: Supervisor error types
//! - [`redis_transport`]: Redis client adapter and error classification
//! - [`supervisor`]: Connection lifecycle and the continuous read loop
//! - [`telemetry`]: tracing subscriber setup
//! - [`transport`]: Connector/connection traits and transport error categories
//!
//! ## Usage
//!
//! ```bash
//! iam-auth-demo --user-id alice --replication-group-id my-cluster \
//!     --region us-east-1 --redis-host my-cluster.xxxxxx.cache.amazonaws.com --tls
//! iam-authtoken-generator --user-id alice --replication-group-id my-cluster --region us-east-1
//! ```

pub mod backoff;
pub mod configuration;
pub mod constants;
pub mod errors;
pub mod redis_transport;
pub mod supervisor;
pub mod telemetry;
pub mod transport;
