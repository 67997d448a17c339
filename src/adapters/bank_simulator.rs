use {
    crate::domain::{
        authorizer::{AuthorizationRequest, AuthorizationResponse, Authorizer},
        error::AuthorizationError,
    },
    reqwest::StatusCode,
    serde::Deserialize,
    std::{future::Future, pin::Pin, time::Duration},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_message: String,
}

/// HTTP client for the acquiring bank simulator (`POST {base_url}/payments`).
#[derive(Clone)]
pub struct BankSimulatorClient {
    base_url: String,
    client: reqwest::Client,
}

impl BankSimulatorClient {
    /// Fails only when the TLS backend or system resolver cannot be set up.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Uses a caller-configured client as is, timeout included.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    async fn authorize_inner(
        &self,
        req: AuthorizationRequest,
    ) -> Result<AuthorizationResponse, AuthorizationError> {
        let url = format!("{}/payments", self.base_url);

        let resp = self
            .client
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(error = %e, "bank simulator timed out");
                    AuthorizationError::Unavailable
                } else {
                    AuthorizationError::Internal(format!("perform authorization request: {e}"))
                }
            })?;

        match resp.status() {
            status if status.is_success() => resp.json::<AuthorizationResponse>().await.map_err(|e| {
                AuthorizationError::Internal(format!("decode authorization response: {e}"))
            }),
            StatusCode::BAD_REQUEST => {
                let body = resp.json::<ErrorBody>().await.map_err(|e| {
                    AuthorizationError::Internal(format!(
                        "parse authorization rejection response: {e}"
                    ))
                })?;
                Err(AuthorizationError::Rejected(body.error_message))
            }
            StatusCode::SERVICE_UNAVAILABLE => Err(AuthorizationError::Unavailable),
            other => Err(AuthorizationError::Unexpected(other.as_u16())),
        }
    }
}

impl Authorizer for BankSimulatorClient {
    fn authorize(
        &self,
        req: &AuthorizationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AuthorizationResponse, AuthorizationError>> + Send + '_>>
    {
        let req = req.clone();
        Box::pin(self.authorize_inner(req))
    }
}
