use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::FormField;

/// Raw field values as read from the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Contact => &self.contact,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Contact => self.contact = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
        }
    }

    /// Builds the outbound payload; callers validate first.
    pub fn to_submission(&self) -> ContactSubmission {
        let contact = self.contact.trim();
        ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            contact: (!contact.is_empty()).then(|| contact.to_string()),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference: String,
    pub accepted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn generated() -> Self {
        Self {
            reference: Uuid::new_v4().to_string(),
            accepted_at: Utc::now(),
        }
    }
}
