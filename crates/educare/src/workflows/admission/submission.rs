use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::contact::ContactMessage;
use super::enrollment::EnrollmentSubmission;
use crate::config::AdmissionConfig;

pub const DEFAULT_REJECTION_MESSAGE: &str = "Please try again later.";

/// Delivery failures. None of these is ever reported to the caller as a success.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission endpoint is not configured")]
    NotConfigured,
    #[error("submission rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unable to reach submission endpoint: {0}")]
    Transport(String),
}

/// Outbound hook for completed enrollment forms.
pub trait EnrollmentGateway: Send + Sync {
    fn submit(
        &self,
        submission: &EnrollmentSubmission,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

/// Outbound hook for contact-page messages.
pub trait ContactGateway: Send + Sync {
    fn deliver(
        &self,
        message: &ContactMessage,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

/// JSON-over-HTTP delivery to the intake backend. A 2xx answer is success; any other
/// status is a rejection carrying the backend's `message` when it sent one.
#[derive(Debug, Clone)]
pub struct HttpSubmissionGateway {
    http: reqwest::Client,
    enrollment_url: Option<String>,
    contact_url: Option<String>,
}

impl HttpSubmissionGateway {
    pub fn from_config(config: &AdmissionConfig) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder()
            .timeout(config.submission_timeout)
            .build()
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            enrollment_url: config.enrollment_endpoint.clone(),
            contact_url: config.contact_endpoint.clone(),
        })
    }

    async fn post_json<T>(&self, url: Option<&str>, payload: &T) -> Result<(), SubmissionError>
    where
        T: Serialize + Sync,
    {
        let url = url.ok_or(SubmissionError::NotConfigured)?;

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                warn!(%url, error = %err, "submission transport failure");
                SubmissionError::Transport(err.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            info!(%url, status = status.as_u16(), "submission accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(&body);
        warn!(%url, status = status.as_u16(), %message, "submission rejected");
        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string())
}

impl EnrollmentGateway for HttpSubmissionGateway {
    async fn submit(&self, submission: &EnrollmentSubmission) -> Result<(), SubmissionError> {
        self.post_json(self.enrollment_url.as_deref(), submission)
            .await
    }
}

impl ContactGateway for HttpSubmissionGateway {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), SubmissionError> {
        self.post_json(self.contact_url.as_deref(), message).await
    }
}
