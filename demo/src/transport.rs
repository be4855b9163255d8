// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! The boundary to the cluster client.
//!
//! The supervisor only needs to open an authenticated connection, run a read
//! and re-send credentials on a live connection. Errors are classified so that
//! transient network failures and authentication rejections are handled
//! differently.

use async_trait::async_trait;
use iam_authtoken::IamCredentials;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Timeouts, resets, refused or dropped connections
    #[error("transient error: {0}")]
    Transient(String),
    /// The server rejected the presented credentials
    #[error("authentication rejected: {0}")]
    Authentication(String),
    #[error("{0}")]
    Fatal(String),
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::Authentication(_))
    }
}

/// Opens connections authenticated with the given credentials.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Connection;

    async fn connect(&self, credentials: &IamCredentials) -> Result<Self::Connection, TransportError>;

    /// Whether connections keep the credentials they were opened with and
    /// present them again on internal reconnects. Such connections are opened
    /// with a newly signed token so it outlives the re-authentication interval.
    fn pins_credentials(&self) -> bool {
        false
    }
}

#[async_trait]
pub trait Connection: Send {
    async fn get(&mut self, key: &str) -> Result<Option<String>, TransportError>;

    /// Re-sends `AUTH` on the live connection.
    async fn authenticate(&mut self, credentials: &IamCredentials) -> Result<(), TransportError>;

    /// Whether [`authenticate`](Connection::authenticate) covers the whole
    /// connection; otherwise the supervisor reconnects instead.
    fn supports_reauthentication(&self) -> bool {
        true
    }
}
