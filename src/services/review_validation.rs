//! Field-by-field validation of the review write payload.
//!
//! Rules run in a fixed order and stop at the first failure, so the caller
//! always gets exactly one message naming the offending field.

use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{NewReview, ReviewAuthor, UserType};
use crate::utils::{AppError, AppResult};

pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 100;
pub const PHONE_MAX: usize = 20;
pub const SUBJECT_MAX: usize = 200;
pub const MESSAGE_MAX: usize = 5000;
pub const RANK_AND_POSITION_MAX: usize = 100;

const KNOWN_FIELDS: [&str; 13] = [
    "name",
    "email",
    "phone",
    "subject",
    "message",
    "rating",
    "termsAccepted",
    "image",
    "publicId",
    "userType",
    "userId",
    "rankAndPosition",
    "debug",
];

lazy_static::lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern");
}

/// `debug: true` together with a non-empty email asks for the payload to be
/// echoed back instead of stored.
pub fn wants_debug_echo(payload: &Value) -> bool {
    let Some(fields) = payload.as_object() else {
        return false;
    };

    let debug = matches!(fields.get("debug"), Some(Value::Bool(true)));
    let has_email = fields
        .get("email")
        .and_then(Value::as_str)
        .is_some_and(|email| !email.is_empty());

    debug && has_email
}

pub fn validate_review(payload: &Value) -> AppResult<NewReview> {
    let fields = payload
        .as_object()
        .ok_or_else(|| fail("Request body must be a JSON object"))?;

    if let Some(unknown) = fields.keys().find(|key| !KNOWN_FIELDS.contains(&key.as_str())) {
        return Err(fail(&format!("Unknown field: {}", unknown)));
    }

    let name = required_text(
        fields,
        "name",
        NAME_MAX,
        "Name is required and must be at most 100 characters",
    )?;

    let email = required_text(
        fields,
        "email",
        EMAIL_MAX,
        "A valid email is required (max 100 characters)",
    )?;
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(fail("A valid email is required (max 100 characters)"));
    }

    let phone = optional_text(
        fields,
        "phone",
        PHONE_MAX,
        "Phone must be a string of at most 20 characters",
    )?
    .unwrap_or_default();

    let subject = required_text(
        fields,
        "subject",
        SUBJECT_MAX,
        "Subject is required and must be at most 200 characters",
    )?;

    let message = required_text(
        fields,
        "message",
        MESSAGE_MAX,
        "Message is required and must be at most 5000 characters",
    )?;

    let rating = match fields.get("rating").and_then(whole_number) {
        Some(rating @ 1..=5) => rating as i32,
        _ => return Err(fail("Rating must be an integer between 1 and 5")),
    };

    if !matches!(fields.get("termsAccepted"), Some(Value::Bool(true))) {
        return Err(fail("You must accept the terms and conditions (termsAccepted must be true)"));
    }

    let image = optional_text(fields, "image", usize::MAX, "Image must be a string or null")?;
    let public_id = optional_text(fields, "publicId", usize::MAX, "publicId must be a string or null")?;

    let user_type = fields
        .get("userType")
        .and_then(Value::as_str)
        .and_then(UserType::parse)
        .ok_or_else(|| fail("userType must be either 'General' or 'Client'"))?;

    // General reviews ignore whatever was sent for the client-only fields
    let author = match user_type {
        UserType::General => ReviewAuthor::General,
        UserType::Client => ReviewAuthor::Client {
            user_id: required_text(fields, "userId", usize::MAX, "userId is required for Client reviews")?,
            rank_and_position: required_text(
                fields,
                "rankAndPosition",
                RANK_AND_POSITION_MAX,
                "rankAndPosition is required for Client reviews and must be at most 100 characters",
            )?,
        },
    };

    if !matches!(fields.get("debug"), None | Some(Value::Bool(_))) {
        return Err(fail("debug must be a boolean"));
    }

    Ok(NewReview {
        name,
        email: email.to_lowercase(),
        phone,
        subject,
        message,
        rating,
        image,
        public_id,
        author,
    })
}

/// Present, a string, non-blank and within `max` characters. Returns it trimmed.
fn required_text(fields: &Map<String, Value>, key: &str, max: usize, message: &str) -> AppResult<String> {
    match fields.get(key).and_then(Value::as_str).map(str::trim) {
        Some(text) if !text.is_empty() && text.chars().count() <= max => Ok(text.to_string()),
        _ => Err(fail(message)),
    }
}

/// Missing, null or blank reads as `None`; any other non-string is rejected.
fn optional_text(
    fields: &Map<String, Value>,
    key: &str,
    max: usize,
    message: &str,
) -> AppResult<Option<String>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else if text.chars().count() <= max {
                Ok(Some(text.to_string()))
            } else {
                Err(fail(message))
            }
        }
        Some(_) => Err(fail(message)),
    }
}

/// Integral JSON number, whether sent as `5` or `5.0`
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
        .map(|f| f as i64)
}

fn fail(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "name": "Jane",
            "email": "J@X.COM",
            "subject": "Hi",
            "message": "Great work",
            "rating": 5,
            "termsAccepted": true,
            "userType": "General"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut payload = valid();
        payload[field] = value;
        payload
    }

    fn without(field: &str) -> Value {
        let mut payload = valid();
        payload.as_object_mut().unwrap().remove(field);
        payload
    }

    fn error_of(payload: &Value) -> String {
        match validate_review(payload) {
            Err(AppError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_general_review_is_normalized() {
        let review = validate_review(&valid()).unwrap();
        assert_eq!(review.name, "Jane");
        assert_eq!(review.email, "j@x.com");
        assert_eq!(review.phone, "");
        assert_eq!(review.rating, 5);
        assert_eq!(review.image, None);
        assert_eq!(review.public_id, None);
        assert_eq!(review.author, ReviewAuthor::General);
    }

    #[test]
    fn test_general_ignores_client_fields() {
        let mut payload = valid();
        payload["userId"] = json!("u-1");
        payload["rankAndPosition"] = json!(42);
        let review = validate_review(&payload).unwrap();
        assert_eq!(review.author, ReviewAuthor::General);
    }

    #[test]
    fn test_client_requires_user_id_and_rank() {
        let payload = with("userType", json!("Client"));
        assert!(error_of(&payload).contains("userId"));

        let mut payload = with("userType", json!("Client"));
        payload["userId"] = json!("u-1");
        assert!(error_of(&payload).contains("rankAndPosition"));

        payload["rankAndPosition"] = json!("x".repeat(101));
        assert!(error_of(&payload).contains("rankAndPosition"));

        payload["rankAndPosition"] = json!("Head of Ops");
        let review = validate_review(&payload).unwrap();
        assert_eq!(
            review.author,
            ReviewAuthor::Client {
                user_id: "u-1".into(),
                rank_and_position: "Head of Ops".into(),
            }
        );
    }

    #[test]
    fn test_rating_bounds() {
        for rating in [json!(0), json!(6), json!(3.5), json!("5"), json!(null)] {
            assert!(error_of(&with("rating", rating)).contains("Rating"));
        }
        assert!(error_of(&without("rating")).contains("Rating"));

        for rating in 1..=5 {
            assert_eq!(validate_review(&with("rating", json!(rating))).unwrap().rating, rating);
        }
    }

    #[test]
    fn test_whole_float_rating_is_accepted() {
        assert_eq!(validate_review(&with("rating", json!(5.0))).unwrap().rating, 5);
        assert_eq!(validate_review(&with("rating", json!(1.0))).unwrap().rating, 1);
        assert!(error_of(&with("rating", json!(6.0))).contains("Rating"));
        assert!(error_of(&with("rating", json!(4.5))).contains("Rating"));
        assert!(error_of(&with("rating", json!(1e300))).contains("Rating"));
    }

    #[test]
    fn test_email_format() {
        assert!(error_of(&with("email", json!("not-an-email"))).contains("email"));
        assert!(error_of(&with("email", json!("jane@localhost"))).contains("email"));
        assert!(error_of(&with("email", json!("@x.com"))).contains("email"));
        assert_eq!(validate_review(&with("email", json!("A@B.com"))).unwrap().email, "a@b.com");
        // loose pattern: a matching substring is enough
        assert_eq!(
            validate_review(&with("email", json!("Jane Doe <Jane@X.com>"))).unwrap().email,
            "jane doe <jane@x.com>"
        );
    }

    #[test]
    fn test_length_limits_count_characters() {
        assert!(validate_review(&with("name", json!("é".repeat(100)))).is_ok());
        assert!(error_of(&with("name", json!("é".repeat(101)))).contains("Name"));
        assert!(error_of(&with("subject", json!("s".repeat(201)))).contains("Subject"));
        assert!(error_of(&with("message", json!("m".repeat(5001)))).contains("Message"));
        assert!(error_of(&with("phone", json!("1".repeat(21)))).contains("Phone"));
        assert!(error_of(&with("email", json!(format!("{}@x.com", "a".repeat(95))))).contains("email"));
    }

    #[test]
    fn test_required_fields() {
        assert!(error_of(&without("name")).contains("Name"));
        assert!(error_of(&with("name", json!("   "))).contains("Name"));
        assert!(error_of(&without("subject")).contains("Subject"));
        assert!(error_of(&without("message")).contains("Message"));
        assert!(error_of(&without("userType")).contains("userType"));
        assert!(error_of(&with("userType", json!("Admin"))).contains("userType"));
    }

    #[test]
    fn test_terms_must_be_true() {
        assert!(error_of(&with("termsAccepted", json!(false))).contains("termsAccepted"));
        assert!(error_of(&with("termsAccepted", json!("true"))).contains("termsAccepted"));
        assert!(error_of(&without("termsAccepted")).contains("termsAccepted"));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut payload = with("name", json!(""));
        payload["rating"] = json!(9);
        assert!(error_of(&payload).starts_with("Name"));
    }

    #[test]
    fn test_optional_fields() {
        let mut payload = valid();
        payload["phone"] = json!(null);
        payload["image"] = json!("");
        payload["publicId"] = json!("reviews/abc");
        let review = validate_review(&payload).unwrap();
        assert_eq!(review.phone, "");
        assert_eq!(review.image, None);
        assert_eq!(review.public_id.as_deref(), Some("reviews/abc"));

        assert!(error_of(&with("phone", json!(5551234))).contains("Phone"));
        assert!(error_of(&with("image", json!(true))).contains("Image"));
    }

    #[test]
    fn test_rejects_unknown_and_mistyped_input() {
        assert!(error_of(&with("isAdmin", json!(true))).contains("isAdmin"));
        assert!(error_of(&json!(["not", "an", "object"])).contains("JSON object"));
        assert!(error_of(&with("debug", json!("yes"))).contains("debug"));
        assert!(validate_review(&with("debug", json!(false))).is_ok());
    }

    #[test]
    fn test_debug_echo_detection() {
        assert!(wants_debug_echo(&json!({ "debug": true, "email": "x" })));
        assert!(!wants_debug_echo(&json!({ "debug": true, "email": "" })));
        assert!(!wants_debug_echo(&json!({ "debug": true })));
        assert!(!wants_debug_echo(&json!({ "debug": "true", "email": "x@y.z" })));
        assert!(!wants_debug_echo(&valid()));
    }
}
