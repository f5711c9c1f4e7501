//! Per-field contact form rules.

use std::sync::OnceLock;

use regex::Regex;
use shared::{domain::FormField, protocol::ContactForm};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Required,
    EmailFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub field: FormField,
    pub message: Option<String>,
}

impl FieldValidation {
    fn valid(field: FormField) -> Self {
        Self {
            field,
            message: None,
        }
    }

    fn invalid(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.message.is_none()
    }
}

/// local@domain.tld with no whitespace or extra `@` in any part.
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(value)
}

pub fn validate_field(field: FormField, value: &str, mode: ValidationMode) -> FieldValidation {
    match mode {
        ValidationMode::Required if value.trim().is_empty() => {
            FieldValidation::invalid(field, format!("{} is required", field.label()))
        }
        ValidationMode::EmailFormat
            if !value.trim().is_empty() && !is_valid_email(value.trim()) =>
        {
            FieldValidation::invalid(field, INVALID_EMAIL_MESSAGE)
        }
        _ => FieldValidation::valid(field),
    }
}

pub fn rules_for(field: FormField) -> &'static [ValidationMode] {
    match field {
        FormField::Name | FormField::Subject | FormField::Message => &[ValidationMode::Required],
        FormField::Email => &[ValidationMode::Required, ValidationMode::EmailFormat],
        FormField::Contact => &[],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    results: Vec<FieldValidation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(FieldValidation::is_valid)
    }

    pub fn results(&self) -> &[FieldValidation] {
        &self.results
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldValidation> {
        self.results.iter().filter(|result| !result.is_valid())
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.results
            .iter()
            .find(|result| result.field == field)
            .and_then(|result| result.message.as_deref())
    }
}

/// Checks every field, even after one has failed, so all errors can be shown
/// at once. Within a field the first failing rule wins.
pub fn validate_form(form: &ContactForm) -> ValidationReport {
    let results = FormField::ALL
        .into_iter()
        .map(|field| {
            let value = form.value(field);
            rules_for(field)
                .iter()
                .map(|mode| validate_field(field, value, *mode))
                .find(|result| !result.is_valid())
                .unwrap_or_else(|| FieldValidation::valid(field))
        })
        .collect();
    ValidationReport { results }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
