//! The HTTP API client shared by every gateway capability.

use crate::config::GatewayConfig;
use jelajah_core::error::GatewayError;
use jelajah_core::gateway::GatewayResult;
use jelajah_core::token::TokenStore;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Standard `{ "data": ... }` response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    /// Payload
    pub data: T,
}

/// HTTP client for the marketplace API.
///
/// Implements all the gateway capability traits from `jelajah-core`. The
/// bearer token is read from the shared [`TokenStore`] on every request, so
/// a login performed elsewhere in the process is picked up immediately.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    /// Creates a client from transport configuration and the shared token
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the underlying HTTP client
    /// cannot be constructed (e.g. TLS backend initialization failure).
    pub fn new(config: &GatewayConfig, tokens: TokenStore) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    /// Joins a path (with leading slash) onto the base URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Starts a GET request
    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.endpoint(path)))
    }

    /// Starts a POST request
    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.endpoint(path)))
    }

    /// Starts a PUT request
    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.put(self.endpoint(path)))
    }

    /// Starts a PATCH request
    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.patch(self.endpoint(path)))
    }

    /// Starts a DELETE request
    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.delete(self.endpoint(path)))
    }

    /// Attaches the bearer token when one is present. Requests without a
    /// token go out bare; the gateway's 401 is mapped to `Unauthorized`.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and decodes a successful JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> GatewayResult<T> {
        let response = request.send().await.map_err(map_transport)?;
        read_json(response).await
    }

    /// Sends a request where only the status matters.
    pub(crate) async fn send_unit(&self, request: RequestBuilder) -> GatewayResult<()> {
        let response = request.send().await.map_err(map_transport)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(read_failure(response).await)
        }
    }
}

/// Maps a reqwest error to the transport side of the taxonomy
fn map_transport(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(err.to_string())
    }
}

/// Decodes a JSON body, mapping non-success statuses onto the taxonomy
async fn read_json<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    } else {
        Err(read_failure(response).await)
    }
}

/// Classifies a non-success response
async fn read_failure(response: Response) -> GatewayError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        StatusCode::CONFLICT => {
            let body = response.text().await.unwrap_or_default();
            GatewayError::Conflict(body)
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "gateway returned an error payload");
            GatewayError::Api {
                status: status.as_u16(),
                message: body,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let config = GatewayConfig::new("https://api.jelajah.id/v1/");
        let client = ApiClient::new(&config, TokenStore::new()).unwrap();
        assert_eq!(
            client.endpoint("/booking/myBookings"),
            "https://api.jelajah.id/v1/booking/myBookings"
        );
    }

    #[test]
    fn envelope_unwraps_the_data_field() {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2,3]}"#).unwrap();
        assert_eq!(envelope.data, vec![1, 2, 3]);
    }
}
