//! Transport executing [`OutboundRequest`]s with reqwest.

use std::task::{Context, Poll};
use std::time::Duration;

use axum::http::StatusCode;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use tower::Service;

use crate::auth::types::ErrorBody;
use crate::client::request::OutboundRequest;
use crate::resilience::Failure;

/// Successful response: status plus raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Payload {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Executes one request per call. Non-2xx responses become [`Failure`]s;
/// errors without a response (connect, timeout) become `502 Bad Gateway`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }

    async fn send(client: reqwest::Client, request: OutboundRequest) -> Result<Payload, Failure> {
        let mut builder = client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(url = %request.url(), error = %e, "Upstream request failed");
            Failure::new(StatusCode::BAD_GATEWAY, e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Failure::new(StatusCode::BAD_GATEWAY, e.to_string()))?
            .to_vec();

        if status.is_success() {
            return Ok(Payload { status, body });
        }

        tracing::debug!(url = %request.url(), status = %status, "Upstream answered with an error");
        Err(failure_from_response(status, &body))
    }
}

/// Prefer the server's `{"error": "..."}` message over the reason phrase.
fn failure_from_response(status: StatusCode, body: &[u8]) -> Failure {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error }) if !error.is_empty() => Failure::new(status, error),
        _ => Failure::from_status(status),
    }
}

impl Service<OutboundRequest> for HttpTransport {
    type Response = Payload;
    type Error = Failure;
    type Future = BoxFuture<'static, Result<Payload, Failure>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: OutboundRequest) -> Self::Future {
        Box::pin(Self::send(self.client.clone(), request))
    }
}
