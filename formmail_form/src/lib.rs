//! State machine behind the contact form.
//!
//! The controller owns the field values and the transient ui state. It only
//! talks to the server through a [`SubmissionClient`] and only when every field
//! holds a value.

use std::{collections::BTreeSet, fmt};

use formmail_client_contracts::SubmissionClient;
use formmail_models::contact::{Submission, SubmissionField};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: Submission,
    pub is_loading: bool,
    /// Message of the last failed submission, empty if there is none.
    pub error: String,
    pub touched: BTreeSet<SubmissionField>,
    pub notification: Option<Notification>,
}

/// Transient notification shown after a submission went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Sent,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => f.write_str("Message sent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was not ready, nothing was sent.
    Skipped,
    Sent,
    Failed,
}

#[derive(Debug)]
pub struct FormController<Client> {
    client: Client,
    state: FormState,
}

impl<Client: SubmissionClient> FormController<Client> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn on_field_change(&mut self, field: SubmissionField, value: impl Into<String>) {
        self.state.values.set(field, value);
    }

    pub fn on_field_blur(&mut self, field: SubmissionField) {
        self.state.touched.insert(field);
    }

    /// Whether [`submit`](Self::submit) would issue a request.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading && self.state.values.is_complete()
    }

    /// Validation hint for a field the user has already left empty.
    ///
    /// Hints are informational and never affect [`can_submit`](Self::can_submit).
    pub fn hint(&self, field: SubmissionField) -> Option<String> {
        (self.state.touched.contains(&field) && self.state.values.get(field).is_empty())
            .then(|| format!("{} is required", field.label()))
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            debug!(missing = ?self.state.values.missing_fields(), "submit skipped");
            return SubmitOutcome::Skipped;
        }

        self.state.is_loading = true;
        self.state.error.clear();
        self.state.notification = None;

        let result = self.client.send(&self.state.values).await;
        self.state.is_loading = false;

        match result {
            Ok(_) => {
                info!("submission sent");
                self.state = FormState {
                    notification: Some(Notification::Sent),
                    ..Default::default()
                };
                SubmitOutcome::Sent
            }
            Err(err) => {
                info!("submission failed: {err}");
                self.state.error = err.to_string();
                SubmitOutcome::Failed
            }
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.state.notification = None;
    }
}
