// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use aws_credential_types::provider::error::CredentialsError;
use validator::ValidationErrors;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AuthTokenError {
    #[error("credentials unavailable: {0}")]
    CredentialsUnavailable(String),
    #[error("signing error: {0}")]
    Signing(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl AuthTokenError {
    /// Whether the error is caused by the ambient AWS identity rather than by the inputs.
    pub fn is_credentials_unavailable(&self) -> bool {
        matches!(self, Self::CredentialsUnavailable(_))
    }
}

impl From<CredentialsError> for AuthTokenError {
    fn from(source: CredentialsError) -> Self {
        tracing::error!("{:?}", source);
        AuthTokenError::CredentialsUnavailable(source.to_string())
    }
}

impl From<ValidationErrors> for AuthTokenError {
    fn from(source: ValidationErrors) -> Self {
        AuthTokenError::Validation(source.to_string())
    }
}

impl From<aws_sigv4::http_request::SigningError> for AuthTokenError {
    fn from(source: aws_sigv4::http_request::SigningError) -> Self {
        tracing::error!("{:?}", source);
        AuthTokenError::Signing(source.to_string())
    }
}

impl From<http::Error> for AuthTokenError {
    fn from(source: http::Error) -> Self {
        AuthTokenError::Signing(source.to_string())
    }
}
