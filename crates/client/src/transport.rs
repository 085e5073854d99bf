use std::{sync::Arc, time::Duration};

use portfolio_shared::contact::{
    CONTACT_PATH, ContactSubmission, ErrorResponse, SubmitResponse, ValidationError,
};
use reqwest::Url;

/// Every way a dispatch can fail, normalized into one channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No usable response: connection refused, timeout, truncated body.
    #[error("could not reach server: {reason}")]
    Unreachable { reason: String },

    /// The server answered but did not accept the submission.
    #[error("server rejected submission ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        errors: Vec<ValidationError>,
    },
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, submission: &ContactSubmission)
    -> Result<SubmitResponse, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SubmitResponse, TransportError> {
        (**self).send(submission).await
    }
}

/// JSON over HTTP to `POST {base_url}/api/contact`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// `base_url` may carry a path prefix, `https://host/site` posts to
    /// `https://host/site/api/contact`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(CONTACT_PATH.trim_start_matches('/'))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SubmitResponse, TransportError> {
        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Err(TransportError::Unreachable {
                    reason: e.to_string(),
                });
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                return Err(TransportError::Unreachable {
                    reason: format!("Failed to read response body: {e}"),
                });
            }
        };

        if status.is_success() {
            return serde_json::from_slice::<SubmitResponse>(&body).map_err(|e| {
                TransportError::Rejected {
                    status: status.as_u16(),
                    message: format!("Unexpected response body: {e}"),
                    errors: vec![],
                }
            });
        }

        let (message, errors) = match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(body) => (body.message, body.errors),
            Err(_) => (
                status.canonical_reason().unwrap_or("Unknown").to_owned(),
                vec![],
            ),
        };

        tracing::debug!(status = status.as_u16(), %message, "Contact submission rejected");

        Err(TransportError::Rejected {
            status: status.as_u16(),
            message,
            errors,
        })
    }
}
