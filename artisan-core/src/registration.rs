use serde::{Deserialize, Serialize};

use crate::error::{FieldErrorKind, ValidationError};
use crate::fields::FieldReader;
use crate::id::Collection;

/// Value of `source` when the payload does not name one.
pub const DEFAULT_SOURCE: &str = "website";

/// A self-registration submitted by a prospective artisan.
///
/// `consent` is recorded as given; a registration without consent is still
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub craft_type: String,
    pub location: String,
    pub phone: String,
    pub email: Option<String>,
    /// First sample image, base64-encoded.
    pub image1_base64: Option<String>,
    /// Second sample image, base64-encoded.
    pub image2_base64: Option<String>,
    /// Consent to store and share the information for program outreach.
    pub consent: bool,
    /// Where the registration came from.
    pub source: Option<String>,
}

impl Registration {
    /// Validates an inbound JSON payload.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] listing every missing or mistyped field
    /// and a malformed `email`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(value)?;
        let name = r.required_str("name");
        let craft_type = r.required_str("craft_type");
        let location = r.required_str("location");
        let phone = r.required_str("phone");
        let email = r.optional_str("email");
        if email.as_deref().is_some_and(|e| !is_valid_email(e)) {
            r.push("email", FieldErrorKind::InvalidEmail);
        }
        let registration = Self {
            name,
            craft_type,
            location,
            phone,
            email,
            image1_base64: r.optional_str("image1_base64"),
            image2_base64: r.optional_str("image2_base64"),
            consent: r.required_bool("consent"),
            source: r.str_or("source", DEFAULT_SOURCE),
        };
        r.finish(registration)
    }
}

impl Collection for Registration {
    const NAME: &'static str = "registration";
}

/// Checks that `email` has the shape `local@domain.tld`.
///
/// The local part may hold any non-whitespace characters except `@`, with
/// dots only between other characters and never doubled. The domain needs at
/// least two dot-separated labels of alphanumerics (Unicode included) and
/// inner hyphens. The top-level label is alphabetic with two or more chars,
/// or an `xn--` punycode label.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if domain.contains('@') || domain.len() > 255 {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    labels_ok && labels.last().is_some_and(|tld| is_valid_tld(tld))
}

fn is_valid_tld(tld: &str) -> bool {
    if let Some(rest) = tld.strip_prefix("xn--") {
        return !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    }
    tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn full_payload() -> serde_json::Value {
        json!({
            "name": "Meera",
            "craft_type": "block printing",
            "location": "Bagru",
            "phone": "+91 90000 00000",
            "email": "meera@example.in",
            "consent": true,
        })
    }

    #[test]
    fn registration_defaults_source_to_website() {
        let reg = match Registration::from_json(&full_payload()) {
            Ok(r) => r,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(reg.source.as_deref(), Some(DEFAULT_SOURCE));
        assert!(reg.consent);
    }

    #[test]
    fn registration_explicit_null_source_stays_unset() {
        let mut payload = full_payload();
        payload["source"] = serde_json::Value::Null;
        let result = Registration::from_json(&payload);
        assert!(result.is_ok_and(|r| r.source.is_none()));
    }

    #[test]
    fn registration_accepts_withheld_consent() {
        let mut payload = full_payload();
        payload["consent"] = json!(false);
        let result = Registration::from_json(&payload);
        assert!(result.is_ok_and(|r| !r.consent));
    }

    #[test]
    fn registration_requires_consent_field() {
        let mut payload = full_payload();
        if let Some(obj) = payload.as_object_mut() {
            obj.remove("consent");
        }
        let err = Registration::from_json(&payload).err();
        assert!(err.is_some_and(|e| e.has_field("consent")));
    }

    #[test]
    fn registration_rejects_malformed_email() {
        let mut payload = full_payload();
        payload["email"] = json!("not-an-address");
        let err = match Registration::from_json(&payload) {
            Ok(r) => panic!("expected error, got {r:?}"),
            Err(e) => e,
        };
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].kind, FieldErrorKind::InvalidEmail);
    }

    #[test]
    fn registration_non_object_body_is_rejected() {
        let err = Registration::from_json(&json!(["name"])).err();
        assert!(err.is_some_and(|e| e.has_field("body")));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@c.com"));
        assert!(!is_valid_email("a@-c.com"));
        assert!(!is_valid_email("a@c..com"));
        assert!(!is_valid_email("a@c.c"));
    }

    #[test]
    fn email_local_part_dots_must_separate_characters() {
        assert!(is_valid_email("a.b@x.com"));
        assert!(!is_valid_email(".a@x.com"));
        assert!(!is_valid_email("a.@x.com"));
        assert!(!is_valid_email(".a..b@x.com"));
    }

    #[test]
    fn email_accepts_internationalized_domains() {
        assert!(is_valid_email("user@bücher.de"));
        assert!(is_valid_email("user@пример.рф"));
        assert!(is_valid_email("user@example.xn--p1ai"));
        assert!(!is_valid_email("user@example.xn--"));
    }

    proptest! {
        #[test]
        fn email_check_never_panics(s in "\\PC*") {
            let _ = is_valid_email(&s);
        }

        #[test]
        fn email_with_whitespace_is_rejected(local in "[a-z]{1,8}", ws in "[ \t]", tail in "[a-z]{0,4}") {
            let email = format!("{local}{ws}{tail}@example.com");
            prop_assert!(!is_valid_email(&email));
        }

        #[test]
        fn simple_addresses_are_accepted(local in "[a-z0-9_]{1,10}(\\.[a-z0-9_]{1,8})?", host in "[a-z]{1,12}", tld in "[a-z]{2,6}") {
            let email = format!("{local}@{host}.{tld}");
            prop_assert!(is_valid_email(&email));
        }
    }
}
