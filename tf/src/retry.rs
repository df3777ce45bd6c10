// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Transient provider error matching.
//!
//! Terraform invocations talk to provider registries and cloud APIs, both of which
//! flake in well-known ways. A failed invocation whose combined output matches one of
//! the configured patterns is worth retrying; anything else fails fast.

use regex::Regex;
use std::time::Duration;

/// Patterns for provider / registry errors that are known to be transient. Matched
/// with [`Regex`] against the combined stdout+stderr of a failed invocation.
pub const DEFAULT_RETRYABLE_ERRORS: &[&str] = &[
    "(?s).*Failed to load state.*tcp.*timeout.*",
    "(?s).*Failed to load backend.*TLS handshake timeout.*",
    "(?s).*Error configuring the backend.*TLS handshake timeout.*",
    "(?s).*Error installing provider.*TLS handshake timeout.*",
    "(?s).*Error installing provider.*tcp.*timeout.*",
    "(?s).*Error installing provider.*tcp.*connection reset by peer.*",
    "(?s).*Failed to query available provider packages.*",
    "(?s).*timeout while waiting for plugin to start.*",
    "(?s).*timedout.*EOF.*",
    "(?s).*Client\\.Timeout exceeded while awaiting headers.*",
    "(?s).*Error.*cannot assign requested address.*",
    "(?s).*net/http: TLS handshake timeout.*",
    "(?s).*connection reset by peer.*",
];

/// How many times to re-run a failing invocation, and how long to wait between
/// attempts. A fresh invocation counts as attempt zero, so `max_retries = 3` means at
/// most 4 invocations.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub retryable_error_patterns: Vec<String>,
    pub max_retries: usize,
    pub time_between_retries: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retryable_error_patterns: Vec::new(),
            max_retries: 3,
            time_between_retries: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy preloaded with [`DEFAULT_RETRYABLE_ERRORS`].
    #[must_use]
    pub fn with_default_retryable_errors() -> Self {
        Self {
            retryable_error_patterns: DEFAULT_RETRYABLE_ERRORS
                .iter()
                .map(|it| (*it).to_string())
                .collect(),
            ..Default::default()
        }
    }

    /// Does the combined output of a failed invocation match any retryable pattern?
    /// Returns the matching pattern so it can be logged.
    #[must_use]
    pub fn find_retryable_match(&self, combined_output: &str) -> Option<&str> {
        self.retryable_error_patterns
            .iter()
            .find(|pattern| {
                Regex::new(pattern)
                    .map(|re| re.is_match(combined_output))
                    .unwrap_or(false)
            })
            .map(String::as_str)
    }
}
