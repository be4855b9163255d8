// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use iam_authtoken::AuthTokenError;

use crate::transport::TransportError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DemoError {
    #[error(transparent)]
    Credentials(#[from] AuthTokenError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("giving up after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        source: TransportError,
    },
}

impl DemoError {
    pub fn is_credentials_error(&self) -> bool {
        matches!(self, Self::Credentials(_))
    }
}
