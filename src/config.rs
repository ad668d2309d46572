//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Visitor-log resource on data.gov.
pub const DEFAULT_API_ENDPOINT: &str = "https://explore.data.gov/resource/644b-gaut.json";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the answering service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswersConfig {
    /// Visitor-log records endpoint.
    pub api_endpoint: String,
    /// Per-request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
    /// Deadline for a whole lookup (both queries of an ambiguous name).
    #[serde(default, with = "optional_duration_serde")]
    pub lookup_timeout: Option<Duration>,
    /// User agent sent to the records source.
    pub user_agent: String,
    /// HTTP port to listen on.
    pub port: u16,
}

impl Default for AnswersConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            lookup_timeout: None,
            user_agent: format!("civic-query/{}", env!("CARGO_PKG_VERSION")),
            port: DEFAULT_PORT,
        }
    }
}

impl AnswersConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `CIVIC_QUERY_*` environment variables.
    ///
    /// Values that do not parse are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("CIVIC_QUERY_API_ENDPOINT") {
            config.api_endpoint = endpoint;
        }
        if let Some(secs) = lookup("CIVIC_QUERY_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = lookup("CIVIC_QUERY_LOOKUP_TIMEOUT_SECS").and_then(|s| s.parse().ok())
        {
            config.lookup_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(port) = lookup("CIVIC_QUERY_PORT").and_then(|p| p.parse().ok()) {
            config.port = port;
        }

        config
    }

    /// Set the records endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the whole-lookup deadline.
    #[must_use]
    pub const fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    /// Set the server port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Serde module for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Same as `duration_serde`, for optional durations.
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
