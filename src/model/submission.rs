//! Contact-form submission records and partial updates

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown for missing text fields
pub const MISSING: &str = "N/A";

/// Placeholder shown for a missing phone number
pub const NO_PHONE: &str = "-";

/// A contact-form submission as delivered by the data service
///
/// Every field tolerates being absent, `null` or of the wrong type; a bad
/// field falls back to its default and display helpers substitute
/// placeholders instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Submission {
    /// Numeric ids are kept as their decimal text
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    /// Raw creation timestamp, parsed only for display
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subject: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
}

/// Strings pass through, numbers become their text, anything else is absent
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| text_of(value).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(text_of)
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value.as_bool())
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

impl Submission {
    pub fn is_resolved(&self) -> bool {
        self.resolved.unwrap_or(false)
    }

    /// Creation date formatted as `YYYY-MM-DD` in local time
    pub fn display_date(&self) -> String {
        let raw = self.created_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.with_timezone(&Local).format("%Y-%m-%d").to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return dt.format("%Y-%m-%d").to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
        MISSING.to_string()
    }

    pub fn display_name(&self) -> &str {
        or_placeholder(&self.name, MISSING)
    }

    pub fn display_email(&self) -> &str {
        or_placeholder(&self.email, MISSING)
    }

    pub fn display_phone(&self) -> &str {
        or_placeholder(self.phone.as_deref().unwrap_or_default(), NO_PHONE)
    }

    pub fn display_subject(&self) -> &str {
        or_placeholder(&self.subject, MISSING)
    }

    pub fn display_message(&self) -> &str {
        or_placeholder(&self.message, MISSING)
    }

    /// Status label if the service provides one, otherwise derived from `resolved`
    pub fn status_label(&self) -> &str {
        match self.status.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ if self.is_resolved() => "Resolved",
            _ => "Pending",
        }
    }
}

/// Partial update payload; absent fields are left untouched by the service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<&Submission> for SubmissionPatch {
    /// Every user-editable field of a draft; the status label only if set
    fn from(draft: &Submission) -> Self {
        Self {
            name: Some(draft.name.clone()),
            email: Some(draft.email.clone()),
            phone: Some(draft.phone.clone().unwrap_or_default()),
            subject: Some(draft.subject.clone()),
            message: Some(draft.message.clone()),
            resolved: Some(draft.is_resolved()),
            status: draft.status.clone(),
        }
    }
}
