use formmail_models::contact::Submission;
use serde::{Deserialize, Serialize};

/// Request body of the contact endpoint.
///
/// Absent fields deserialize as empty strings and are rejected later together
/// with explicitly empty ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<ApiSubmission> for Submission {
    fn from(value: ApiSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ApiSendMessageResponse {
    pub success: bool,
}
