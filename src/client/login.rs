//! Login client: posts credentials through the retry interceptor.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tower::{ServiceBuilder, ServiceExt};
use url::Url;

use crate::auth::types::Credentials;
use crate::client::request::OutboundRequest;
use crate::client::transport::HttpTransport;
use crate::config::AppConfig;
use crate::http::LOGIN_ROUTE;
use crate::resilience::{Failure, Retry, RetryLayer, RetryPolicy};

/// Errors surfaced by [`LoginClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The final outcome of the login was a failure.
    #[error("login failed: {0}")]
    Rejected(#[from] Failure),

    /// The caller gave up before the login completed.
    #[error("login abandoned")]
    Abandoned,
}

/// Client for the `/login` endpoint.
#[derive(Debug, Clone)]
pub struct LoginClient {
    login_url: Url,
    service: Retry<HttpTransport>,
}

impl LoginClient {
    pub fn new(base_url: &str, policy: RetryPolicy, transport: HttpTransport) -> Result<Self, ClientError> {
        let login_url = Url::parse(base_url)?.join(LOGIN_ROUTE)?;
        let service = ServiceBuilder::new()
            .layer(RetryLayer::new(policy))
            .service(transport);
        Ok(Self { login_url, service })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::with_timeout(Duration::from_secs(config.client.timeout_secs))?;
        Self::new(&config.client.base_url, config.retry.policy(), transport)
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    pub fn policy(&self) -> RetryPolicy {
        self.service.policy()
    }

    /// The request sent for `credentials`.
    pub fn login_request(&self, credentials: &Credentials) -> Result<OutboundRequest, ClientError> {
        Ok(OutboundRequest::post(self.login_url.clone()).json(credentials)?)
    }

    /// Log in, retrying internal server errors up to the retry limit.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let request = self.login_request(credentials)?;
        self.service.clone().oneshot(request).await?;
        tracing::info!(email = %credentials.email, "Logged in");
        Ok(())
    }

    /// Like [`LoginClient::login`], but stops as soon as `abandoned` resolves.
    /// No attempt is started after that point.
    pub async fn login_until<A>(&self, credentials: &Credentials, abandoned: A) -> Result<(), ClientError>
    where
        A: Future<Output = ()>,
    {
        let request = self.login_request(credentials)?;
        let transport = self.service.get_ref();

        let outcome = self
            .policy()
            .execute_until(
                &request,
                |req: &OutboundRequest| transport.clone().oneshot(req.clone()),
                abandoned,
            )
            .await;

        match outcome {
            Some(Ok(_)) => {
                tracing::info!(email = %credentials.email, "Logged in");
                Ok(())
            }
            Some(Err(failure)) => Err(ClientError::Rejected(failure)),
            None => Err(ClientError::Abandoned),
        }
    }
}
