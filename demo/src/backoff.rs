// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Bounded exponential backoff

use std::time::Duration;

use crate::constants::{RETRY_BASE_DELAY, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY};

/// How many attempts to make and how long to wait between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    base: Duration,
    cap: Duration,
    max_attempts: u32,
}

impl Default for RetryPolicy {
    /// Base delay of 1 second, capped at 10 seconds, with 4 attempts in total.
    fn default() -> Self {
        Self {
            base: RETRY_BASE_DELAY,
            cap: RETRY_MAX_DELAY,
            max_attempts: RETRY_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Constructs a new policy
    ///
    /// After the n-th consecutive failure the delay is `base * 2^n`, capped at `cap`.
    /// `max_attempts` counts the initial attempt and is at least 1.
    pub fn new(base: Duration, cap: Duration, max_attempts: u32) -> Self {
        Self {
            base,
            cap,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The delay to wait after `failures` consecutive failures.
    pub fn delay(&self, failures: u32) -> Duration {
        self.base
            .saturating_mul(2u32.saturating_pow(failures))
            .min(self.cap)
    }
}

/// A stateful handler that tracks consecutive failures against a [`RetryPolicy`]
#[derive(Debug)]
pub struct BackoffHandler {
    policy: RetryPolicy,
    failures: u32,
}

impl BackoffHandler {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            failures: 0,
        }
    }

    /// Reports a success
    ///
    /// This resets the internal failure count.
    pub fn success(&mut self) {
        self.failures = 0;
    }

    /// Reports a failure and returns the delay before the next attempt,
    /// or `None` once the attempt budget is spent.
    pub fn error(&mut self) -> Option<Duration> {
        self.failures = self.failures.saturating_add(1);
        if self.failures >= self.policy.max_attempts {
            None
        } else {
            Some(self.policy.delay(self.failures))
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl From<RetryPolicy> for BackoffHandler {
    fn from(policy: RetryPolicy) -> Self {
        Self::new(policy)
    }
}
