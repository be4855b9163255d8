// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! SigV4 presigning of the IAM `connect` request.
//!
//! The token is a presigned `GET https://<cluster>/?Action=connect&User=<user>`
//! whose signature lives in the query string (`X-Amz-*` parameters). The
//! host is never contacted; the cluster verifies the signature when the
//! token is presented as the AUTH password.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    SignableBody, SignableRequest, SignatureLocation, SigningSettings, sign,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::constants::{CONNECT_ACTION, PRESIGN_SCHEME};
use crate::errors::AuthTokenError;
use crate::models::{ServiceKind, TargetCluster};

/// Signs a request URL into a presigned URL valid for `expires_in`.
#[async_trait]
pub trait PresignRequest: Send + Sync {
    async fn presign(&self, url: &str, expires_in: Duration) -> Result<String, AuthTokenError>;
}

/// Everything but the RFC 3986 unreserved characters, the set SigV4 leaves as is.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Builds the unsigned `connect` request URL for `user` on `cluster_name`.
///
/// `Action` always precedes `User` in the query.
pub fn connect_request_url(cluster_name: &str, user: &str) -> String {
    format!(
        "{PRESIGN_SCHEME}{cluster_name}/?Action={CONNECT_ACTION}&User={}",
        utf8_percent_encode(user, QUERY_VALUE)
    )
}

/// Removes the scheme from a presigned URL; the cluster rejects tokens that carry it.
pub fn strip_scheme(signed_url: &str) -> Result<&str, AuthTokenError> {
    signed_url.strip_prefix(PRESIGN_SCHEME).ok_or_else(|| {
        AuthTokenError::Signing(format!("presigned url does not start with {PRESIGN_SCHEME}"))
    })
}

/// [`PresignRequest`] backed by `aws-sigv4` and an AWS credentials provider.
///
/// Credentials are resolved on every call so that refreshing providers
/// (instance role, SSO, assume-role) rotate transparently.
#[derive(Debug, Clone)]
pub struct SigV4Presigner {
    credentials: SharedCredentialsProvider,
    region: String,
    service: ServiceKind,
}

impl SigV4Presigner {
    pub fn new(credentials: SharedCredentialsProvider, target: &TargetCluster) -> Self {
        Self {
            credentials,
            region: target.region.clone(),
            service: target.service,
        }
    }

    pub(crate) fn presign_at(
        &self,
        credentials: Credentials,
        url: &str,
        expires_in: Duration,
        time: SystemTime,
    ) -> Result<String, AuthTokenError> {
        let identity: Identity = credentials.into();

        let mut settings = SigningSettings::default();
        settings.signature_location = SignatureLocation::QueryParams;
        settings.expires_in = Some(expires_in);

        let params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(self.service.signing_name())
            .time(time)
            .settings(settings)
            .build()
            .map_err(|err| AuthTokenError::Signing(err.to_string()))?
            .into();

        let signable =
            SignableRequest::new("GET", url, std::iter::empty(), SignableBody::Bytes(&[]))?;
        let (instructions, _signature) = sign(signable, &params)?.into_parts();

        let mut request = http::Request::builder().method("GET").uri(url).body(())?;
        instructions.apply_to_request_http1x(&mut request);

        Ok(request.uri().to_string())
    }
}

#[async_trait]
impl PresignRequest for SigV4Presigner {
    async fn presign(&self, url: &str, expires_in: Duration) -> Result<String, AuthTokenError> {
        let credentials = self.credentials.provide_credentials().await?;

        tracing::trace!(
            "[authtoken] signing for {} in {}",
            self.service,
            self.region
        );

        self.presign_at(credentials, url, expires_in, SystemTime::now())
    }
}
