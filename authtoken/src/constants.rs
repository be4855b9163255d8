// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::time::Duration;

/// https://docs.aws.amazon.com/AmazonElastiCache/latest/dg/auth-iam.html
/// IAM authentication tokens are valid for 15 minutes
pub const TOKEN_VALIDITY: Duration = Duration::from_secs(900);
pub const CONNECT_ACTION: &str = "connect";
pub const PRESIGN_SCHEME: &str = "https://";

pub const ELASTICACHE_SIGNING_NAME: &str = "elasticache";
pub const MEMORYDB_SIGNING_NAME: &str = "memorydb";

// Validation constants for ProviderOptions
pub const MAX_USER_ID_LENGTH: u64 = 128;
pub const MAX_CLUSTER_NAME_LENGTH: u64 = 255;
pub const MAX_REGION_LENGTH: u64 = 64;
