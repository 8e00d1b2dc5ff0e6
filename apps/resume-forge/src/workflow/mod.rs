//! Submission & polling state machine.
//!
//! ```text
//! Idle -> Submitting -> Polling { attempt } -> Success { download_url }
//!             |                  |
//!             +-> Failure(Submission)
//!                                +-> Failure(Timeout)
//! ```
//!
//! Every `run` starts from `Idle`, and a validation failure never leaves it.
//! `run` takes `&mut self`, so one workflow can drive at most one poll
//! sequence at a time.

pub mod poller;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::form::{ResumeForm, ValidationError};
use crate::notifications::Notification;
use crate::storage::ArtifactStore;
use crate::submission::Submitter;

pub use poller::{poll_for_artifact, PollOutcome, PollPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Submission,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    /// `attempt` is 0 until the first existence check fires.
    Polling { attempt: u32 },
    Success { download_url: String },
    Failure(FailureKind),
}

/// Result of one `run`, carrying enough to render the final notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Invalid(ValidationError),
    SubmissionFailed,
    TimedOut { attempts: u32, storage_errors: u32 },
    Ready { download_url: String, attempts: u32 },
}

impl WorkflowOutcome {
    pub fn notification(&self) -> Notification {
        match self {
            WorkflowOutcome::Invalid(e) => e.notification(),
            WorkflowOutcome::SubmissionFailed => {
                Notification::destructive("Error", "Failed to generate resume. Please try again.")
            }
            WorkflowOutcome::TimedOut { .. } => Notification::destructive(
                "Error",
                "Resume generation is taking longer than expected. Please try again.",
            ),
            WorkflowOutcome::Ready { .. } => Notification::info(
                "Resume Generated!",
                "Your AI-powered resume is ready for download.",
            ),
        }
    }

    pub fn download_url(&self) -> Option<&str> {
        match self {
            WorkflowOutcome::Ready { download_url, .. } => Some(download_url),
            _ => None,
        }
    }
}

pub struct ResumeWorkflow<S, A> {
    submitter: S,
    store: A,
    policy: PollPolicy,
    phase: watch::Sender<Phase>,
}

impl<S, A> ResumeWorkflow<S, A>
where
    S: Submitter,
    A: ArtifactStore,
{
    pub fn new(submitter: S, store: A, policy: PollPolicy) -> Self {
        let (phase, _) = watch::channel(Phase::Idle);
        Self {
            submitter,
            store,
            policy,
            phase,
        }
    }

    /// Receiver that observes every phase change.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.phase.borrow().clone()
    }

    /// Validates the form, submits it once, then polls storage for the PDF.
    pub async fn run(&mut self, form: &ResumeForm) -> WorkflowOutcome {
        self.transition(Phase::Idle);

        let submission = match form.validate() {
            Ok(submission) => submission,
            Err(e) => {
                warn!("Submission blocked by validation: {e}");
                return WorkflowOutcome::Invalid(e);
            }
        };

        self.transition(Phase::Submitting);
        info!("Submitting resume for '{}'", submission.full_name);

        if let Err(e) = self.submitter.submit(submission).await {
            error!("Resume submission failed: {e}");
            self.transition(Phase::Failure(FailureKind::Submission));
            return WorkflowOutcome::SubmissionFailed;
        }

        self.transition(Phase::Polling { attempt: 0 });
        info!(
            "Submission accepted, polling for '{}' (up to {} checks, {:?} of waiting)",
            submission.full_name,
            self.policy.max_attempts,
            self.policy.ceiling()
        );

        let phase = &self.phase;
        let outcome = poll_for_artifact(&self.store, &submission.full_name, self.policy, |attempt| {
            phase.send_replace(Phase::Polling { attempt });
        })
        .await;

        match outcome {
            PollOutcome::Found { attempts } => {
                let download_url = self.store.public_url(&submission.full_name);
                info!("Resume ready at {download_url}");
                self.transition(Phase::Success {
                    download_url: download_url.clone(),
                });
                WorkflowOutcome::Ready {
                    download_url,
                    attempts,
                }
            }
            PollOutcome::TimedOut {
                attempts,
                storage_errors,
            } => {
                warn!(
                    storage_errors,
                    "Gave up on '{}' after {} checks", submission.full_name, attempts
                );
                self.transition(Phase::Failure(FailureKind::Timeout));
                WorkflowOutcome::TimedOut {
                    attempts,
                    storage_errors,
                }
            }
        }
    }

    fn transition(&self, next: Phase) {
        self.phase.send_replace(next);
    }
}
