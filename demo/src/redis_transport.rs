// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use async_trait::async_trait;
use iam_authtoken::IamCredentials;
use redis::aio::MultiplexedConnection;
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use redis::{AsyncCommands, ConnectionInfo, ErrorKind, IntoConnectionInfo, RedisError};

use crate::transport::{Connection, Connector, TransportError};

/// Connects to a Redis OSS / Valkey endpoint, standalone or in cluster mode.
#[derive(Debug, Clone)]
pub struct RedisConnector {
    host: String,
    port: u16,
    tls: bool,
    cluster_mode: bool,
}

impl RedisConnector {
    pub fn new(host: impl Into<String>, port: u16, tls: bool, cluster_mode: bool) -> Self {
        Self {
            host: host.into(),
            port,
            tls,
            cluster_mode,
        }
    }

    pub fn address(&self) -> String {
        let scheme = if self.tls { "rediss" } else { "redis" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    fn connection_info(&self, credentials: &IamCredentials) -> Result<ConnectionInfo, TransportError> {
        let mut info = self.address().into_connection_info().map_err(classify)?;
        info.redis.username = Some(credentials.user.clone());
        info.redis.password = Some(credentials.token.clone());
        Ok(info)
    }
}

pub enum RedisConnection {
    Standalone(MultiplexedConnection),
    Cluster(ClusterConnection),
}

#[async_trait]
impl Connector for RedisConnector {
    type Connection = RedisConnection;

    async fn connect(&self, credentials: &IamCredentials) -> Result<RedisConnection, TransportError> {
        let info = self.connection_info(credentials)?;

        let connection = if self.cluster_mode {
            let client = ClusterClient::builder(vec![info])
                .username(credentials.user.clone())
                .password(credentials.token.clone())
                .build()
                .map_err(classify)?;
            RedisConnection::Cluster(client.get_async_connection().await.map_err(classify)?)
        } else {
            let client = redis::Client::open(info).map_err(classify)?;
            RedisConnection::Standalone(
                client
                    .get_multiplexed_async_connection()
                    .await
                    .map_err(classify)?,
            )
        };

        tracing::debug!("[demo] connected to {} as {}", self.address(), credentials.user);

        Ok(connection)
    }

    /// The cluster client reuses its username and password for every node it
    /// later connects to.
    fn pins_credentials(&self) -> bool {
        self.cluster_mode
    }
}

#[async_trait]
impl Connection for RedisConnection {
    async fn get(&mut self, key: &str) -> Result<Option<String>, TransportError> {
        let value: Option<String> = match self {
            Self::Standalone(conn) => conn.get(key).await,
            Self::Cluster(conn) => conn.get(key).await,
        }
        .map_err(classify)?;
        Ok(value)
    }

    async fn authenticate(&mut self, credentials: &IamCredentials) -> Result<(), TransportError> {
        let mut cmd = redis::cmd("AUTH");
        cmd.arg(&credentials.user).arg(&credentials.token);
        let _: () = match self {
            Self::Standalone(conn) => cmd.query_async(conn).await,
            Self::Cluster(conn) => cmd.query_async(conn).await,
        }
        .map_err(classify)?;
        Ok(())
    }

    /// `AUTH` on a cluster connection reaches a single node only.
    fn supports_reauthentication(&self) -> bool {
        matches!(self, Self::Standalone(_))
    }
}

/// Maps a client error onto the supervisor's error categories.
pub fn classify(err: RedisError) -> TransportError {
    let message = err.to_string();

    if err.kind() == ErrorKind::AuthenticationFailed
        || matches!(err.code(), Some("NOAUTH" | "WRONGPASS"))
    {
        return TransportError::Authentication(message);
    }

    if err.is_timeout()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_io_error()
        || matches!(
            err.kind(),
            ErrorKind::TryAgain | ErrorKind::ClusterDown | ErrorKind::BusyLoadingError
        )
    {
        return TransportError::Transient(message);
    }

    TransportError::Fatal(message)
}
