// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use clap::{ArgAction, Args, Parser};
use iam_authtoken::{ProviderOptions, ServiceKind};

use crate::constants::DEFAULT_REDIS_PORT;
use crate::redis_transport::RedisConnector;

/// Options shared by every binary that generates tokens.
#[derive(Debug, Clone, Args)]
pub struct TokenOptions {
    #[arg(long, env("IAM_AUTH_USER_ID"))]
    pub user_id: String,
    #[arg(
        long,
        env("IAM_AUTH_REPLICATION_GROUP_ID"),
        help = "ElastiCache/MemoryDB for Redis/Valkey cluster name"
    )]
    pub replication_group_id: String,
    #[arg(long, env("AWS_REGION"))]
    pub region: String,
    #[arg(long = "memorydb-service", default_value = "false", env("IAM_AUTH_MEMORYDB_SERVICE"), action = ArgAction::SetTrue, help = "For MemoryDB IAM authentication")]
    pub is_memorydb: bool,
    #[arg(long, default_value = "false", env("IAM_AUTH_DEBUG"), action = ArgAction::SetTrue, help = "Print the caller identity")]
    pub debug: bool,
}

impl TokenOptions {
    pub fn provider_options(&self) -> ProviderOptions {
        ProviderOptions {
            user_id: self.user_id.clone(),
            cluster_name: self.replication_group_id.clone(),
            region: self.region.clone(),
            service: ServiceKind::from_memorydb_flag(self.is_memorydb),
            debug: self.debug,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Connect to a cluster using IAM authentication", long_about = None)]
pub struct DemoOptions {
    #[command(flatten)]
    pub token: TokenOptions,
    #[arg(long, env("IAM_AUTH_REDIS_HOST"), help = "Cluster endpoint")]
    pub redis_host: String,
    #[arg(long, default_value_t = DEFAULT_REDIS_PORT, env("IAM_AUTH_REDIS_PORT"))]
    pub redis_port: u16,
    #[arg(long, default_value = "false", env("IAM_AUTH_TLS"), action = ArgAction::SetTrue, help = "TLS enabled")]
    pub tls: bool,
    #[arg(long, default_value = "false", env("IAM_AUTH_CLUSTER_MODE"), action = ArgAction::SetTrue, help = "Cluster mode enabled")]
    pub cluster_mode: bool,
    #[arg(long, default_value = "1", env("IAM_AUTH_CONNECT_SLEEP_TIME"), help = "Seconds between requests")]
    pub connect_sleep_time: u64,
}

impl DemoOptions {
    pub fn connector(&self) -> RedisConnector {
        RedisConnector::new(
            &self.redis_host,
            self.redis_port,
            self.tls,
            self.cluster_mode,
        )
    }
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Generate an IAM authentication token", long_about = None)]
pub struct GeneratorOptions {
    #[command(flatten)]
    pub token: TokenOptions,
    #[arg(long, default_value = "false", action = ArgAction::SetTrue, help = "Print user and token as JSON")]
    pub json: bool,
}
