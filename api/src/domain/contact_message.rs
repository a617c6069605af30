use crate::domain::contact_email::ContactEmail;
use crate::domain::message_body::MessageBody;
use crate::domain::message_subject::MessageSubject;
use crate::domain::sender_name::SenderName;
use serde::{Deserialize, Serialize};

/// Raw field values as the visitor typed them.
///
/// Missing fields default to empty strings so they are reported as
/// field errors rather than rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub email: String,
    pub name: String,
    pub subject: String,
    pub message: String,
}

/// A contact request that passed every field validation.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub email: ContactEmail,
    pub name: SenderName,
    pub subject: MessageSubject,
    pub message: MessageBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Name,
    Subject,
    Message,
}

/// Visitor-facing errors, keyed by field, plus the generic `submission`
/// banner used when delivery fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<String>,
}

impl FormErrors {
    pub fn submission_failed(message: impl Into<String>) -> Self {
        Self {
            submission: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => self.email.as_deref(),
            Field::Name => self.name.as_deref(),
            Field::Subject => self.subject.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }

    /// Fields that currently carry an error, in validation order.
    pub fn invalid_fields(&self) -> Vec<Field> {
        [Field::Email, Field::Name, Field::Subject, Field::Message]
            .into_iter()
            .filter(|field| self.field(*field).is_some())
            .collect()
    }

    pub fn has_field_errors(&self) -> bool {
        !self.invalid_fields().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_field_errors() && self.submission.is_none()
    }
}

impl TryFrom<ContactRequest> for ContactMessage {
    type Error = FormErrors;

    /// Runs every field check, collecting all failures instead of stopping
    /// at the first one.
    fn try_from(value: ContactRequest) -> Result<Self, Self::Error> {
        let mut errors = FormErrors::default();

        let email = ContactEmail::parse(value.email)
            .map_err(|e| errors.email = Some(e))
            .ok();
        let name = SenderName::parse(value.name)
            .map_err(|e| errors.name = Some(e))
            .ok();
        let subject = MessageSubject::parse(value.subject)
            .map_err(|e| errors.subject = Some(e))
            .ok();
        let message = MessageBody::parse(value.message)
            .map_err(|e| errors.message = Some(e))
            .ok();

        match (email, name, subject, message) {
            (Some(email), Some(name), Some(subject), Some(message)) => Ok(ContactMessage {
                email,
                name,
                subject,
                message,
            }),
            _ => Err(errors),
        }
    }
}
