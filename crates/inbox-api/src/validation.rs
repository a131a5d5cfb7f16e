use chrono::{DateTime, Utc};
use serde_json::Value;

use inbox_types::Message;

use crate::error::ValidationError;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;
const MIN_EMAIL_SUFFIX_CHARS: usize = 2;

/// A submission that passed validation. Fields hold the trimmed input,
/// which is also what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl NewMessage {
    pub fn into_message(self, created_at: DateTime<Utc>) -> Message {
        Message::new(self.name, self.email, self.message, created_at)
    }
}

/// Check a raw request body. Name, email, then message; the first failing
/// field decides the error. A field that is absent or not a JSON string is
/// treated like an empty one, and so is every field of a non-object body.
pub fn validate(body: &Value) -> Result<NewMessage, ValidationError> {
    let name = field(body, "name")
        .filter(|name| name.chars().count() >= MIN_NAME_CHARS)
        .ok_or(ValidationError::NameTooShort)?;

    let email = field(body, "email")
        .filter(|email| is_valid_email(email))
        .ok_or(ValidationError::InvalidEmail)?;

    let message = field(body, "message")
        .filter(|message| message.chars().count() >= MIN_MESSAGE_CHARS)
        .ok_or(ValidationError::MessageTooShort)?;

    Ok(NewMessage {
        name: name.to_owned(),
        email: email.to_owned(),
        message: message.to_owned(),
    })
}

fn field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)?.as_str().map(|raw| raw.trim_matches(is_space))
}

/// Unicode whitespace plus U+FEFF, which browsers' `trim()` also strip.
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Loose `local@domain.tld` shape: no whitespace (or BOM) anywhere, exactly one `@`
/// with something on both sides, and somewhere in the domain a dot that has
/// at least one character before it and two after it. Deliverability is not
/// checked.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_space) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.match_indices('.').any(|(dot, _)| {
        dot > 0 && domain[dot + 1..].chars().count() >= MIN_EMAIL_SUFFIX_CHARS
    })
}
