use std::future::Future;

use formmail_models::contact::Submission;
use thiserror::Error;

/// Message shown when a submission failed without a more specific reason.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to send message";

/// Sends complete submissions to the contact endpoint.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionClient: Send + Sync + 'static {
    /// Issue exactly one request carrying the given submission.
    ///
    /// Completeness is not checked here.
    fn send(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<SubmissionAck, SubmissionClientError>> + Send;
}

/// Acknowledgement that the server accepted and dispatched a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionAck;

#[derive(Debug, Error)]
pub enum SubmissionClientError {
    /// The server answered with a non-success status.
    #[error("{0}")]
    Rejected(String),
    /// No response was received.
    #[error("{FALLBACK_ERROR_MESSAGE}")]
    Network(#[source] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionClient {
    pub fn with_send(
        mut self,
        submission: Submission,
        result: Result<SubmissionAck, SubmissionClientError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
