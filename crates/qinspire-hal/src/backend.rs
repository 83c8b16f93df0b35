//! Executor trait and configuration.
//!
//! An [`Executor`] takes a finished cQASM program and returns the outcome
//! histogram of running it:
//!
//! ```text
//!   execute(program, backend selector, shots) ──→ RawResult { histogram, raw_text }
//! ```
//!
//! The call is async; callers await it and treat it as blocking. Transport
//! concerns such as authentication, polling and timeouts belong to the
//! implementation, which reports them as [`HalError`](crate::HalError).

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HalResult;
use crate::result::RawResult;

/// Which backend type a program should run on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendSelector {
    /// The platform's default backend type.
    #[default]
    Default,
    /// A backend type by numeric id.
    Id(u32),
    /// A backend type by name.
    Name(String),
}

impl fmt::Display for BackendSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendSelector::Default => f.write_str("default"),
            BackendSelector::Id(id) => write!(f, "#{id}"),
            BackendSelector::Name(name) => f.write_str(name),
        }
    }
}

impl FromStr for BackendSelector {
    type Err = std::convert::Infallible;

    /// `default`, a numeric id, or anything else as a name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("default") {
            return Ok(BackendSelector::Default);
        }
        let digits = s.strip_prefix('#').unwrap_or(s);
        Ok(match digits.parse::<u32>() {
            Ok(id) => BackendSelector::Id(id),
            Err(_) => BackendSelector::Name(s.to_string()),
        })
    }
}

/// Configuration for an executor instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// API endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// An extra value as a string, if present.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }

    /// An extra value as an unsigned integer, if present.
    pub fn extra_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(serde_json::Value::as_u64)
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extra: serde_json::Map<_, _> = self
            .extra
            .iter()
            .map(|(k, v)| {
                if k.contains("password") || k.contains("secret") {
                    (k.clone(), serde_json::Value::from("[REDACTED]"))
                } else {
                    (k.clone(), v.clone())
                }
            })
            .collect();
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &extra)
            .finish()
    }
}

/// Runs cQASM programs and reports their outcome histograms.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Name of this executor.
    fn name(&self) -> &str;

    /// Run `program` on the selected backend type for `shots` shots.
    ///
    /// An empty histogram is returned as-is; deciding whether it is an
    /// error is up to the caller.
    async fn execute(
        &self,
        program: &str,
        backend: &BackendSelector,
        shots: u32,
    ) -> HalResult<RawResult>;
}

/// Trait for creating executors from configuration.
pub trait ExecutorFactory: Executor + Sized {
    /// Create an executor from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
