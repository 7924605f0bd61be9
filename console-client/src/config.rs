//! Client configuration

use crate::{ClientResult, GraphqlClient};

/// Client configuration for connecting to the console API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CONSOLE_API_URL | http://localhost:4000/graphql | GraphQL endpoint |
/// | CONSOLE_API_TOKEN | (unset) | Bearer token |
/// | CONSOLE_REQUEST_TIMEOUT | 30 | Request timeout in seconds |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:4000/graphql";
    pub const DEFAULT_TIMEOUT: u64 = 30;

    /// Create a new client configuration
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("CONSOLE_API_URL").unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.into()),
        );
        config.token = std::env::var("CONSOLE_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        config.timeout = parse_timeout(std::env::var("CONSOLE_REQUEST_TIMEOUT").ok());
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a GraphQL client from this configuration
    pub fn build_client(&self) -> ClientResult<GraphqlClient> {
        GraphqlClient::new(self)
    }
}

/// Timeout in seconds; missing, malformed or zero values fall back to 30
fn parse_timeout(raw: Option<String>) -> u64 {
    raw.and_then(|t| t.trim().parse::<u64>().ok())
        .filter(|t| *t > 0)
        .unwrap_or(ClientConfig::DEFAULT_TIMEOUT)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT)
    }
}
