use proptest::prelude::*;

use super::*;

fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        contact: String::new(),
        subject: subject.to_string(),
        message: message.to_string(),
    }
}

#[test]
fn email_pattern_examples() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@sub.example.org"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a@@b.co"));
    assert!(!is_valid_email("a b@c.de"));
    assert!(!is_valid_email("@b.co"));
    assert!(!is_valid_email("a@.co"));
    assert!(!is_valid_email("user@localhost"));
}

#[test]
fn required_rejects_blank_values() {
    let result = validate_field(FormField::Name, "   ", ValidationMode::Required);
    assert!(!result.is_valid());
    assert_eq!(result.message.as_deref(), Some("Name is required"));

    assert!(validate_field(FormField::Name, " Ada ", ValidationMode::Required).is_valid());
}

#[test]
fn email_format_skips_empty_values() {
    assert!(validate_field(FormField::Email, "", ValidationMode::EmailFormat).is_valid());

    let result = validate_field(FormField::Email, "", ValidationMode::Required);
    assert!(result.message.as_deref().is_some_and(|m| m.contains("required")));
}

#[test]
fn email_format_reports_message() {
    let result = validate_field(FormField::Email, "a@b", ValidationMode::EmailFormat);
    assert_eq!(result.message.as_deref(), Some(INVALID_EMAIL_MESSAGE));
}

#[test]
fn email_format_ignores_surrounding_whitespace() {
    assert!(
        validate_field(FormField::Email, " ada@example.com ", ValidationMode::EmailFormat)
            .is_valid()
    );
    assert!(validate_field(FormField::Email, "   ", ValidationMode::EmailFormat).is_valid());

    let report = validate_form(&form("Ada", "ada@example.com ", "Hi", "Hello"));
    assert!(report.is_valid());
    assert_eq!(
        validate_field(FormField::Email, " a@b ", ValidationMode::EmailFormat)
            .message
            .as_deref(),
        Some(INVALID_EMAIL_MESSAGE)
    );
}

#[test]
fn contact_handle_is_optional() {
    assert!(rules_for(FormField::Contact).is_empty());
    let report = validate_form(&form("Ada", "ada@example.com", "Hi", "Hello"));
    assert!(report.is_valid());
}

#[test]
fn reports_every_failing_field() {
    let report = validate_form(&form("", "ada@example.com", "", " "));

    assert!(!report.is_valid());
    let failing: Vec<FormField> = report.errors().map(|e| e.field).collect();
    assert_eq!(
        failing,
        vec![FormField::Name, FormField::Subject, FormField::Message]
    );
    assert_eq!(report.error_for(FormField::Subject), Some("Subject is required"));
    assert_eq!(report.error_for(FormField::Email), None);
    assert_eq!(report.results().len(), FormField::ALL.len());
}

#[test]
fn empty_email_reports_required_not_format() {
    let report = validate_form(&form("Ada", "", "Hi", "Hello"));
    assert_eq!(report.error_for(FormField::Email), Some("Email is required"));
}

proptest! {
    #[test]
    fn whitespace_or_at_free_parts_validate(
        local in "[a-z0-9._%+-]{1,12}",
        domain in "[a-z0-9-]{1,12}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{local}@{domain}.{tld}");
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn addresses_with_whitespace_never_validate(
        local in "[a-z]{1,6}",
        gap in "[ \t]{1,3}",
        domain in "[a-z]{1,6}",
    ) {
        let email = format!("{local}{gap}x@{domain}.com");
        prop_assert!(!is_valid_email(&email));
    }
}
