// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;
use zeroize::ZeroizeOnDrop;

use crate::constants::{
    ELASTICACHE_SIGNING_NAME, MAX_CLUSTER_NAME_LENGTH, MAX_REGION_LENGTH, MAX_USER_ID_LENGTH,
    MEMORYDB_SIGNING_NAME,
};

/// The managed cache service a token is signed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    #[default]
    ElastiCache,
    MemoryDb,
}

impl ServiceKind {
    pub fn from_memorydb_flag(is_memorydb: bool) -> Self {
        if is_memorydb {
            Self::MemoryDb
        } else {
            Self::ElastiCache
        }
    }

    /// The SigV4 signing name (service namespace in the credential scope).
    pub fn signing_name(&self) -> &'static str {
        match self {
            Self::ElastiCache => ELASTICACHE_SIGNING_NAME,
            Self::MemoryDb => MEMORYDB_SIGNING_NAME,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signing_name())
    }
}

/// The cluster (replication group) a token authorizes a connection to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCluster {
    pub cluster_name: String,
    pub region: String,
    pub service: ServiceKind,
}

impl TargetCluster {
    pub fn new(
        cluster_name: impl Into<String>,
        region: impl Into<String>,
        service: ServiceKind,
    ) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            region: region.into(),
            service,
        }
    }
}

/// Construction inputs for a [`TokenProvider`](crate::provider::TokenProvider).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderOptions {
    #[validate(length(min = 1, max = "MAX_USER_ID_LENGTH"))]
    #[validate(custom(function = "validate_identifier"))]
    pub user_id: String,

    #[validate(length(min = 1, max = "MAX_CLUSTER_NAME_LENGTH"))]
    #[validate(custom(function = "validate_identifier"))]
    pub cluster_name: String,

    #[validate(length(min = 1, max = "MAX_REGION_LENGTH"))]
    #[validate(custom(function = "validate_aws_region"))]
    pub region: String,

    #[serde(default)]
    pub service: ServiceKind,

    /// Log the resolved caller identity at construction
    #[serde(default)]
    pub debug: bool,
}

impl ProviderOptions {
    pub fn target(&self) -> TargetCluster {
        TargetCluster::new(&self.cluster_name, &self.region, self.service)
    }
}

/// Identifiers end up in the authority and query of the signed URL, so
/// whitespace, `/`, `?`, `#` and `@` are rejected.
fn validate_identifier(value: &str) -> Result<(), validator::ValidationError> {
    if value
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '@'))
    {
        return Err(validator::ValidationError::new("invalid_identifier"));
    }
    Ok(())
}

/// Validates AWS region format (e.g., "us-east-1", "eu-west-2", "us-gov-west-1")
/// Pattern: two lowercase letters, hyphen, lowercase letters, hyphen, digits
pub(crate) fn validate_aws_region(region: &str) -> Result<(), validator::ValidationError> {
    let parts: Vec<&str> = region.split('-').collect();
    if parts.len() < 3 {
        return Err(validator::ValidationError::new("invalid_aws_region"));
    }

    let first = parts[0];
    if first.len() != 2 || !first.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(validator::ValidationError::new("invalid_aws_region"));
    }

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(validator::ValidationError::new("invalid_aws_region"));
        }
    }

    let last = parts[parts.len() - 1];
    if last.is_empty() || !last.chars().all(|c| c.is_ascii_digit()) {
        return Err(validator::ValidationError::new("invalid_aws_region"));
    }

    Ok(())
}

/// A `(user, token)` pair handed to the transport's AUTH handshake.
#[derive(Clone, PartialEq, Eq, Serialize, ZeroizeOnDrop)]
pub struct IamCredentials {
    pub user: String,
    pub token: String,
}

impl IamCredentials {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }

    /// The pair in the order the transport expects: `(username, password)`.
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.user, &self.token)
    }
}

// Custom Debug implementation to prevent accidental logging of the token
impl fmt::Debug for IamCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamCredentials")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
