use std::sync::Arc;

use formmail_client_contracts::{
    SubmissionAck, SubmissionClient, SubmissionClientError, FALLBACK_ERROR_MESSAGE,
};
use formmail_models::contact::Submission;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

pub mod http;

#[derive(Debug, Clone)]
pub struct SubmissionClientImpl {
    config: SubmissionClientConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct SubmissionClientConfig {
    pub endpoint: Arc<Url>,
}

impl SubmissionClientImpl {
    pub fn new(config: SubmissionClientConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new()?,
        })
    }
}

impl SubmissionClient for SubmissionClientImpl {
    async fn send(&self, submission: &Submission) -> Result<SubmissionAck, SubmissionClientError> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .header(ACCEPT, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(|err| SubmissionClientError::Network(err.into()))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "submission accepted");
            return Ok(SubmissionAck);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|response| response.message)
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.into());
        debug!(%status, %message, "submission rejected");

        Err(SubmissionClientError::Rejected(message))
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}
