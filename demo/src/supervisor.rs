// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Connection lifecycle around an IAM credential source.
//!
//! The [`ConnectionSupervisor`] never caches credentials itself: every
//! connect and every re-authentication asks the [`CredentialProvider`],
//! which returns its cached token while it is fresh.
//!
//! # Failure handling
//!
//! - **Transient** transport errors are retried with [`RetryPolicy`] backoff
//! - **Authentication** rejections invalidate the provider cache first, so the
//!   retry presents a newly signed token
//! - **Credential** errors (no usable AWS identity, signing denied) and other
//!   transport errors are returned immediately, and credential errors also
//!   end [`run`](ConnectionSupervisor::run)

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use iam_authtoken::CredentialProvider;
use tokio::time::Instant;

use crate::backoff::{BackoffHandler, RetryPolicy};
use crate::constants::{MAX_CONSECUTIVE_FAILURES, REAUTHENTICATE_INTERVAL};
use crate::errors::DemoError;
use crate::transport::{Connection, Connector, TransportError};

/// Why [`ConnectionSupervisor::run`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupted,
    TooManyFailures,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub successful_requests: u64,
    pub stopped: StopReason,
}

pub struct ConnectionSupervisor<C: Connector> {
    connector: C,
    credentials: Arc<dyn CredentialProvider>,
    policy: RetryPolicy,
    reauth_interval: Duration,
    connection: Option<C::Connection>,
    authenticated_at: Option<Instant>,
}

impl<C: Connector> ConnectionSupervisor<C> {
    pub fn new(connector: C, credentials: Arc<dyn CredentialProvider>, policy: RetryPolicy) -> Self {
        Self {
            connector,
            credentials,
            policy,
            reauth_interval: REAUTHENTICATE_INTERVAL,
            connection: None,
            authenticated_at: None,
        }
    }

    pub fn with_reauth_interval(mut self, reauth_interval: Duration) -> Self {
        self.reauth_interval = reauth_interval;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Opens a connection, retrying per the policy.
    pub async fn connect(&mut self) -> Result<(), DemoError> {
        self.with_retry(None).await.map(|_| ())
    }

    /// Reads `key`, connecting or re-authenticating first when needed.
    pub async fn get(&mut self, key: &str) -> Result<Option<String>, DemoError> {
        self.with_retry(Some(key)).await
    }

    /// Issues reads against random keys every `sleep` until `shutdown` resolves or
    /// [`MAX_CONSECUTIVE_FAILURES`] reads in a row have failed.
    ///
    /// Credential errors are not counted as failed reads; they end the loop with an error.
    pub async fn run<F>(&mut self, sleep: Duration, shutdown: F) -> Result<RunSummary, DemoError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut successful_requests = 0u64;
        let mut consecutive_failures = 0u32;

        loop {
            let key = random_key();

            let result = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                result = self.get(&key) => result,
            };

            match result {
                Ok(_) => {
                    successful_requests += 1;
                    consecutive_failures = 0;
                    println!("=> Successful requests: {successful_requests}");
                }
                Err(err) if err.is_credentials_error() => return Err(err),
                Err(err) => {
                    println!("Error: {err}");
                    consecutive_failures += 1;
                    if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                        tracing::error!(
                            "[demo] stopping after {} consecutive failures",
                            consecutive_failures
                        );
                        return Ok(RunSummary {
                            successful_requests,
                            stopped: StopReason::TooManyFailures,
                        });
                    }
                }
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(sleep) => {}
            }
        }

        Ok(RunSummary {
            successful_requests,
            stopped: StopReason::Interrupted,
        })
    }

    async fn with_retry(&mut self, key: Option<&str>) -> Result<Option<String>, DemoError> {
        let mut backoff = BackoffHandler::new(self.policy.clone());

        loop {
            let err = match self.attempt(key).await {
                Ok(value) => return Ok(value),
                Err(DemoError::Transport(err)) => err,
                Err(err) => return Err(err),
            };

            // the connection state is unknown after a failure
            self.connection = None;
            self.authenticated_at = None;

            if let TransportError::Authentication(_) = err {
                tracing::warn!("[demo] credentials rejected, regenerating token");
                self.credentials.invalidate().await;
            }

            if !err.is_retryable() {
                return Err(err.into());
            }

            match backoff.error() {
                Some(delay) => {
                    tracing::warn!(
                        "[demo] attempt {} failed ({}), retrying in {:?}",
                        backoff.failures(),
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    return Err(DemoError::RetriesExhausted {
                        attempts: backoff.failures(),
                        source: err,
                    });
                }
            }
        }
    }

    async fn attempt(&mut self, key: Option<&str>) -> Result<Option<String>, DemoError> {
        self.ensure_authenticated().await?;

        match (key, self.connection.as_mut()) {
            (Some(key), Some(connection)) => Ok(connection.get(key).await?),
            _ => Ok(None),
        }
    }

    async fn ensure_authenticated(&mut self) -> Result<(), DemoError> {
        let reauth_due = self
            .authenticated_at
            .is_none_or(|at| at.elapsed() >= self.reauth_interval);

        if let Some(connection) = self.connection.as_mut() {
            if !reauth_due {
                return Ok(());
            }
            if connection.supports_reauthentication() {
                let credentials = self.credentials.get_credentials().await?;
                connection.authenticate(&credentials).await?;
                self.authenticated_at = Some(Instant::now());
                tracing::debug!("[demo] re-authenticated as {}", credentials.user);
                return Ok(());
            }
            tracing::debug!("[demo] reconnecting to re-authenticate");
        }

        if self.connector.pins_credentials() {
            self.credentials.invalidate().await;
        }

        let credentials = self.credentials.get_credentials().await?;
        let connection = self.connector.connect(&credentials).await?;
        self.connection = Some(connection);
        self.authenticated_at = Some(Instant::now());

        Ok(())
    }
}

/// A random key; reads against it are expected to miss.
pub fn random_key() -> String {
    format!("{:032x}", fastrand::u128(..))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key() {
        let first = random_key();
        let second = random_key();
        assert_eq!(first.len(), 32);
        assert_ne!(first, second);
    }
}
