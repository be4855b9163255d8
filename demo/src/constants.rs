// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::time::Duration;

pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const MAX_CONSECUTIVE_FAILURES: u32 = 10;

// Retry policy around transient connection errors
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(10);
pub const RETRY_MAX_ATTEMPTS: u32 = 4; // initial attempt + 3 retries

/// Interval after which a live connection re-authenticates with a fresh token
pub const REAUTHENTICATE_INTERVAL: Duration = Duration::from_secs(600); // 10 minutes
