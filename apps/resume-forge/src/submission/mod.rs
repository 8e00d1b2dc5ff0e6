/// Submission client: the one outbound call to the resume generation endpoint.
///
/// The endpoint generates the resume asynchronously and writes the PDF to object
/// storage; a 2xx only means the job was accepted. No retries are attempted here:
/// a failed submission goes straight back to the user.
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ResumeSubmission;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Seam between the workflow and whatever accepts submissions.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, submission: &ResumeSubmission) -> Result<(), SubmitError>;
}

/// Posts the submission as JSON to a fixed webhook URL.
#[derive(Clone)]
pub struct WebhookSubmitter {
    client: Client,
    endpoint: String,
}

impl WebhookSubmitter {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Submitter for WebhookSubmitter {
    async fn submit(&self, submission: &ResumeSubmission) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(submission)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation endpoint returned {}: {}", status, body);
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Submission accepted with status {}", status);
        Ok(())
    }
}
