// console-client/src/graphql.rs
// GraphQL transport over HTTP

use http::StatusCode;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::graphql::{GraphqlRequest, GraphqlResponse};

use crate::{ClientConfig, ClientError, ClientResult};

/// GraphQL client for the console API
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphqlClient {
    /// Create a new GraphQL client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(ClientError::Config("endpoint must not be empty".into()));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Run one operation and decode its `data`
    pub async fn execute<T, V>(&self, operation: &str, query: &str, variables: V) -> ClientResult<T>
    where
        T: DeserializeOwned,
        V: Serialize + Send,
    {
        let body = GraphqlRequest::new(query, variables).with_operation(operation);
        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        tracing::debug!(operation, endpoint = %self.endpoint, "GraphQL request");
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        decode_response(status, &text).inspect_err(|e| {
            tracing::debug!(operation, status = %status, error = %e, "GraphQL request failed");
        })
    }
}

/// Decode an HTTP response body into the operation's `data`
///
/// Any GraphQL `errors` entry fails the whole operation, even when partial
/// data is present.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> ClientResult<T> {
    if !status.is_success() {
        // Servers often still send a GraphQL error body with a non-2xx status
        if let Ok(resp) = serde_json::from_str::<GraphqlResponse<serde_json::Value>>(body)
            && resp.has_errors()
        {
            return Err(ClientError::from_graphql(resp.errors));
        }
        return match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(body.to_string())),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(body.to_string())),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(body.to_string())),
            _ => Err(ClientError::Internal(format!("{}: {}", status, body))),
        };
    }

    let resp: GraphqlResponse<T> = serde_json::from_str(body)?;
    if resp.has_errors() {
        return Err(ClientError::from_graphql(resp.errors));
    }
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse("Missing data".into()))
}
