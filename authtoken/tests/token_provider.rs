// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Token generation tests through the public API with static AWS credentials.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use aws_credential_types::Credentials;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::future;
use aws_credential_types::provider::ProvideCredentials;
use iam_authtoken::{ServiceKind, SigV4Presigner, TargetCluster, TokenProvider};
use percent_encoding::percent_decode_str;

/// Creates a provider signing with fixed example credentials.
fn create_provider(service: ServiceKind) -> TokenProvider {
    let credentials = Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG", None, None, "test");
    let target = TargetCluster::new("my-cluster", "us-east-1", service);
    let presigner = SigV4Presigner::new(SharedCredentialsProvider::new(credentials), &target);
    TokenProvider::new("alice", target, presigner)
}

/// Returns the query parameters of a token as `(name, value)` pairs.
fn query_pairs(token: &str) -> Vec<(String, String)> {
    let (_, query) = token.split_once('?').unwrap();
    query
        .split('&')
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode_str(value).decode_utf8().unwrap();
            (name.to_string(), value.into_owned())
        })
        .collect()
}

#[derive(Debug)]
struct NoCredentials;

impl ProvideCredentials for NoCredentials {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(Err(CredentialsError::not_loaded("no credentials")))
    }
}

// =============================================================================
// Token shape
// =============================================================================

#[tokio::test]
async fn test_end_to_end_token_shape() {
    let provider = create_provider(ServiceKind::ElastiCache);
    let credentials = provider.get_credentials().await.unwrap();

    assert_eq!(credentials.user, "alice");
    assert!(credentials.token.starts_with("my-cluster/?Action=connect&User=alice"));
    assert!(!credentials.token.starts_with("https:"));

    let (before_query, _) = credentials.token.split_once('?').unwrap();
    assert!(!before_query.contains("://"));
}

#[tokio::test]
async fn test_query_has_single_action_and_user() {
    let provider = create_provider(ServiceKind::ElastiCache);
    let credentials = provider.get_credentials().await.unwrap();
    let pairs = query_pairs(&credentials.token);

    let actions: Vec<_> = pairs.iter().filter(|(k, _)| k == "Action").collect();
    let users: Vec<_> = pairs.iter().filter(|(k, _)| k == "User").collect();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].1, "connect");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].1, "alice");

    let names: Vec<_> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    for expected in [
        "X-Amz-Algorithm",
        "X-Amz-Credential",
        "X-Amz-Date",
        "X-Amz-Expires",
        "X-Amz-SignedHeaders",
        "X-Amz-Signature",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    let expires = pairs.iter().find(|(k, _)| k == "X-Amz-Expires").unwrap();
    assert_eq!(expires.1, "900");
}

#[tokio::test]
async fn test_service_kind_changes_credential_scope() {
    let elasticache = create_provider(ServiceKind::ElastiCache)
        .get_credentials()
        .await
        .unwrap();
    let memorydb = create_provider(ServiceKind::MemoryDb)
        .get_credentials()
        .await
        .unwrap();

    let scope = |token: &str| {
        query_pairs(token)
            .into_iter()
            .find(|(k, _)| k == "X-Amz-Credential")
            .unwrap()
            .1
    };

    assert!(scope(&elasticache.token).ends_with("/us-east-1/elasticache/aws4_request"));
    assert!(scope(&memorydb.token).ends_with("/us-east-1/memorydb/aws4_request"));
}

#[tokio::test]
async fn test_repeated_calls_return_cached_token() {
    let provider = create_provider(ServiceKind::ElastiCache);
    let first = provider.get_credentials().await.unwrap();
    let second = provider.get_credentials().await.unwrap();
    assert_eq!(first.token, second.token);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_missing_identity_is_credentials_unavailable() {
    let target = TargetCluster::new("my-cluster", "us-east-1", ServiceKind::ElastiCache);
    let presigner = SigV4Presigner::new(SharedCredentialsProvider::new(NoCredentials), &target);
    let provider = TokenProvider::new("alice", target, presigner);

    let err = provider.get_credentials().await.unwrap_err();
    assert!(err.is_credentials_unavailable());
}

#[tokio::test]
async fn test_from_env_rejects_invalid_region() {
    let options = iam_authtoken::ProviderOptions {
        user_id: "alice".to_string(),
        cluster_name: "my-cluster".to_string(),
        region: "invalid-region".to_string(),
        service: ServiceKind::ElastiCache,
        debug: false,
    };

    let err = TokenProvider::from_env(options).await.err().unwrap();
    assert!(matches!(err, iam_authtoken::AuthTokenError::Validation(_)));
}
