use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::macros::nutype_string;

/// One of the four fixed fields of the contact form, in rendering order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionField {
    Name,
    Email,
    Subject,
    Message,
}

impl SubmissionField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// The key used in request bodies.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// The human readable label used in rendered messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw contact form values as entered by the user.
///
/// A submission may be incomplete; use [`ContactMessage::try_from`] to obtain
/// a message that is allowed to be dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Submission {
    pub fn get(&self, field: SubmissionField) -> &str {
        match field {
            SubmissionField::Name => &self.name,
            SubmissionField::Email => &self.email,
            SubmissionField::Subject => &self.subject,
            SubmissionField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: SubmissionField, value: impl Into<String>) {
        let slot = match field {
            SubmissionField::Name => &mut self.name,
            SubmissionField::Email => &mut self.email,
            SubmissionField::Subject => &mut self.subject,
            SubmissionField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn fields(&self) -> impl Iterator<Item = (SubmissionField, &str)> {
        SubmissionField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    pub fn missing_fields(&self) -> Vec<SubmissionField> {
        self.fields()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.fields().all(|(_, value)| !value.is_empty())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Incomplete submission, missing {missing:?}")]
pub struct IncompleteSubmission {
    pub missing: Vec<SubmissionField>,
}

nutype_string!(ContactName(validate(not_empty)));
nutype_string!(ContactEmail(validate(not_empty)));
nutype_string!(ContactSubject(validate(not_empty)));
nutype_string!(ContactContent(validate(not_empty)));

/// A complete submission: every field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactContent,
}

impl ContactMessage {
    pub fn get(&self, field: SubmissionField) -> &str {
        match field {
            SubmissionField::Name => self.name.as_str(),
            SubmissionField::Email => self.email.as_str(),
            SubmissionField::Subject => self.subject.as_str(),
            SubmissionField::Message => self.message.as_str(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (SubmissionField, &str)> {
        SubmissionField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl TryFrom<Submission> for ContactMessage {
    type Error = IncompleteSubmission;

    fn try_from(value: Submission) -> Result<Self, Self::Error> {
        let missing = value.missing_fields();
        let (Ok(name), Ok(email), Ok(subject), Ok(message)) = (
            ContactName::try_new(value.name),
            ContactEmail::try_new(value.email),
            ContactSubject::try_new(value.subject),
            ContactContent::try_new(value.message),
        ) else {
            return Err(IncompleteSubmission { missing });
        };

        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }
}

impl From<ContactMessage> for Submission {
    fn from(value: ContactMessage) -> Self {
        Self {
            name: value.name.into_inner(),
            email: value.email.into_inner(),
            subject: value.subject.into_inner(),
            message: value.message.into_inner(),
        }
    }
}

/// Text and markup bodies produced from a [`ContactMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub text: String,
    pub markup: String,
    pub subject: String,
}

#[cfg(test)]
mod tests {
    use formmail_utils::assert_matches;

    use super::*;

    fn submission() -> Submission {
        Submission {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn field_order_and_labels() {
        let labels = SubmissionField::ALL.map(SubmissionField::label);
        assert_eq!(labels, ["Name", "Email", "Subject", "Message"]);
    }

    #[test]
    fn field_keys_match_json_keys() {
        for field in SubmissionField::ALL {
            assert_eq!(field.to_string(), field.key());
            assert_eq!(
                serde_json::to_value(field).unwrap(),
                serde_json::Value::String(field.key().into())
            );
        }
    }

    #[test]
    fn set_then_get() {
        let mut sub = Submission::default();
        sub.set(SubmissionField::Message, "Hello");
        sub.set(SubmissionField::Message, "Hello");
        assert_eq!(sub.get(SubmissionField::Message), "Hello");
        assert_eq!(
            sub.missing_fields(),
            [
                SubmissionField::Name,
                SubmissionField::Email,
                SubmissionField::Subject
            ]
        );
    }

    #[test]
    fn complete_submission_converts() {
        let message = ContactMessage::try_from(submission()).unwrap();
        assert_eq!(*message.name, "Ann");
        assert_eq!(Submission::from(message), submission());
    }

    #[test]
    fn any_empty_field_is_rejected() {
        for field in SubmissionField::ALL {
            let mut sub = submission();
            sub.set(field, "");
            assert!(!sub.is_complete());
            assert_matches!(
                ContactMessage::try_from(sub),
                Err(IncompleteSubmission { missing }) if missing == &[field]
            );
        }
    }

    #[test]
    fn whitespace_counts_as_present() {
        let mut sub = submission();
        sub.name = " ".into();
        assert!(ContactMessage::try_from(sub).is_ok());
    }

    #[test]
    fn submission_json_keys() {
        let json = serde_json::to_value(submission()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ann",
                "email": "ann@x.com",
                "subject": "Hi",
                "message": "Hello there",
            })
        );
    }
}
