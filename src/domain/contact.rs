// Contact domain model
use super::document::{Document, FieldValue};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const CONTACTS_COLLECTION: &str = "contacts";

const PREVIEW_CHARS: usize = 50;
const MISSING: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
        }
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("read") => ContactStatus::Read,
            _ => ContactStatus::New,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub status: ContactStatus,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Contact {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.string("name"),
            email: doc.string("email"),
            subject: doc.string("subject"),
            message: doc.string("message"),
            status: ContactStatus::parse(doc.get("status").and_then(FieldValue::as_str)),
            timestamp: doc.get("timestamp").and_then(FieldValue::as_timestamp),
        }
    }

    /// Short date for the contacts table, e.g. `3/7/2025`
    pub fn list_date(&self) -> String {
        self.timestamp
            .map(|t| t.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| MISSING.to_string())
    }

    /// Full date and time, e.g. `3/7/2025, 2:05:09 PM`
    pub fn full_date(&self) -> String {
        self.timestamp
            .map(|t| t.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
            .unwrap_or_else(|| MISSING.to_string())
    }

    /// First 50 characters of the message followed by an ellipsis
    pub fn message_preview(&self) -> String {
        let message = self.message.as_deref().unwrap_or(MISSING);
        let preview: String = message.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", preview)
    }

    pub fn to_row(&self) -> ContactRow {
        ContactRow {
            id: self.id.clone(),
            date: self.list_date(),
            name: or_missing(&self.name),
            email: or_missing(&self.email),
            subject: or_missing(&self.subject),
            message: self.message_preview(),
            status: self.status,
        }
    }

    pub fn to_details(&self) -> ContactDetails {
        ContactDetails {
            id: self.id.clone(),
            date: self.full_date(),
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            subject: self.subject.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
            status: self.status,
        }
    }
}

fn or_missing(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}

/// One row of the contacts table; actions reference `id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRow {
    pub id: String,
    pub date: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDetails {
    pub id: String,
    pub date: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Document {
        Document::new("c1")
            .with_field("name", FieldValue::String("Asha".to_string()))
            .with_field("email", FieldValue::String("asha@example.com".to_string()))
            .with_field("subject", FieldValue::String("Seeds".to_string()))
            .with_field("message", FieldValue::String("x".repeat(80)))
            .with_field(
                "timestamp",
                FieldValue::Timestamp(Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap()),
            )
    }

    #[test]
    fn test_missing_status_is_new() {
        let contact = Contact::from_document(&sample());
        assert_eq!(contact.status, ContactStatus::New);
    }

    #[test]
    fn test_row_truncates_message() {
        let row = Contact::from_document(&sample()).to_row();
        assert_eq!(row.message, format!("{}...", "x".repeat(50)));
        assert_eq!(row.date, "3/7/2025");
    }

    #[test]
    fn test_full_date_format() {
        let contact = Contact::from_document(&sample());
        assert_eq!(contact.full_date(), "3/7/2025, 2:05:09 PM");
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let contact = Contact::from_document(&Document::new("bare"));
        let row = contact.to_row();
        assert_eq!(row.name, "N/A");
        assert_eq!(row.date, "N/A");
        assert_eq!(row.message, "N/A...");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let doc = Document::new("u").with_field("message", FieldValue::String("é".repeat(60)));
        let preview = Contact::from_document(&doc).message_preview();
        assert_eq!(preview.chars().count(), 53);
    }
}
