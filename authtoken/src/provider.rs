// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Cached IAM token generation.
//!
//! [`TokenProvider`] owns one cache slot holding the last generated
//! [`IamCredentials`] and the instant they were generated. A pair is
//! returned unchanged while it is younger than the validity window;
//! otherwise a new token is presigned under the write lock so that
//! concurrent callers racing past an expired entry sign only once.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use validator::Validate;

use crate::constants::TOKEN_VALIDITY;
use crate::errors::AuthTokenError;
use crate::identity;
use crate::models::{IamCredentials, ProviderOptions, TargetCluster};
use crate::signer::{PresignRequest, SigV4Presigner, connect_request_url, strip_scheme};

/// Source of `(username, password)` credentials for a transport handshake.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn get_credentials(&self) -> Result<IamCredentials, AuthTokenError>;

    /// Discards any cached credentials, e.g. after the server rejected them.
    async fn invalidate(&self) {}
}

struct CachedCredential {
    credentials: IamCredentials,
    generated_at: Instant,
}

pub struct TokenProvider<P = SigV4Presigner> {
    user: String,
    target: TargetCluster,
    presigner: P,
    validity: Duration,
    cached: RwLock<Option<CachedCredential>>,
}

impl TokenProvider<SigV4Presigner> {
    /// Validates `options` and builds a provider signing with the ambient AWS identity.
    pub async fn from_env(options: ProviderOptions) -> Result<Self, AuthTokenError> {
        options.validate()?;

        let config = identity::load_sdk_config(&options.region).await;
        let credentials = identity::credentials_provider(&config)?;

        if options.debug {
            identity::log_caller_identity(&config).await;
        }

        let target = options.target();
        let presigner = SigV4Presigner::new(credentials, &target);

        Ok(Self::new(options.user_id, target, presigner))
    }
}

impl<P: PresignRequest> TokenProvider<P> {
    pub fn new(user: impl Into<String>, target: TargetCluster, presigner: P) -> Self {
        Self {
            user: user.into(),
            target,
            presigner,
            validity: TOKEN_VALIDITY,
            cached: RwLock::new(None),
        }
    }

    /// Overrides the validity window (also used as `X-Amz-Expires`).
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn target(&self) -> &TargetCluster {
        &self.target
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Returns cached credentials if valid, otherwise generates fresh ones
    pub async fn get_credentials(&self) -> Result<IamCredentials, AuthTokenError> {
        // Fast path: no signing while the cached token is fresh
        {
            let cache = self.cached.read().await;
            if let Some(ref cached) = *cache
                && self.is_valid(cached)
            {
                return Ok(cached.credentials.clone());
            }
        }

        self.refresh().await
    }

    /// Drops the cached token so the next call signs a new one.
    pub async fn invalidate(&self) {
        let mut cache = self.cached.write().await;
        if cache.take().is_some() {
            tracing::debug!("[authtoken] invalidated cached token for {}", self.user);
        }
    }

    fn is_valid(&self, cached: &CachedCredential) -> bool {
        cached.generated_at.elapsed() < self.validity
    }

    async fn refresh(&self) -> Result<IamCredentials, AuthTokenError> {
        let mut cache = self.cached.write().await;

        // Double-check after acquiring write lock (another task may have refreshed)
        if let Some(ref cached) = *cache
            && self.is_valid(cached)
        {
            return Ok(cached.credentials.clone());
        }

        let generated_at = Instant::now();
        let url = connect_request_url(&self.target.cluster_name, &self.user);
        let signed_url = self.presigner.presign(&url, self.validity).await?;
        let credentials = IamCredentials::new(&self.user, strip_scheme(&signed_url)?);

        tracing::debug!(
            "[authtoken] generated token for {} on {} ({}), valid for {:?}",
            self.user,
            self.target.cluster_name,
            self.target.service,
            self.validity
        );

        *cache = Some(CachedCredential {
            credentials: credentials.clone(),
            generated_at,
        });

        Ok(credentials)
    }
}

#[async_trait]
impl<P: PresignRequest> CredentialProvider for TokenProvider<P> {
    async fn get_credentials(&self) -> Result<IamCredentials, AuthTokenError> {
        TokenProvider::<P>::get_credentials(self).await
    }

    async fn invalidate(&self) {
        TokenProvider::<P>::invalidate(self).await
    }
}
