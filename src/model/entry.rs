use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::status::DutyStatus;

/// Entry text fields, in display order. Duty status and the logsheet
/// selection are typed selectors, not free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Note,
    StartTime,
    EndTime,
}

static ALL_ENTRY_FIELDS: &[EntryField] = &[EntryField::Note, EntryField::StartTime, EntryField::EndTime];

impl EntryField {
    /// Returns all entry text fields in display order.
    pub fn all() -> &'static [EntryField] {
        ALL_ENTRY_FIELDS
    }

    /// Display label for the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::StartTime => "Start Time",
            Self::EndTime => "End Time",
        }
    }

    /// Whether the field must be non-empty on submit.
    pub fn required(self) -> bool {
        matches!(self, Self::StartTime | Self::EndTime)
    }
}

/// Client-held duty-status entry form data.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub note: String,
    pub status: DutyStatus,
    pub start_time: String,
    pub end_time: String,
    /// Selected logsheet foreign key; submission is disallowed without one.
    pub logsheet: Option<i64>,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryDraft {
    /// Creates a fresh draft: Driving status, both times set to now (UTC,
    /// minute precision), no logsheet selected.
    pub fn new() -> Self {
        Self::at(Utc::now().format("%Y-%m-%dT%H:%M").to_string())
    }

    /// Creates a fresh draft with both timestamps set to a fixed value.
    pub fn at(now: impl Into<String>) -> Self {
        let now = now.into();
        Self {
            note: String::new(),
            status: DutyStatus::default(),
            start_time: now.clone(),
            end_time: now,
            logsheet: None,
        }
    }

    /// Replaces the value of one text field.
    pub fn set(&mut self, field: EntryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EntryField::Note => self.note = value,
            EntryField::StartTime => self.start_time = value,
            EntryField::EndTime => self.end_time = value,
        }
    }

    /// Returns the current value of one text field.
    pub fn get(&self, field: EntryField) -> &str {
        match field {
            EntryField::Note => &self.note,
            EntryField::StartTime => &self.start_time,
            EntryField::EndTime => &self.end_time,
        }
    }

    /// Builds the `POST entries/` body, merging in the logsheet foreign key.
    pub fn payload(&self, logsheet: i64) -> EntryPayload {
        EntryPayload {
            note: self.note.clone(),
            status: self.status,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            logsheet,
        }
    }
}

/// Wire body for `POST entries/` and `PUT entries/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPayload {
    pub note: String,
    pub status: DutyStatus,
    pub start_time: String,
    pub end_time: String,
    pub logsheet: i64,
}

/// A server-confirmed entry, including its assigned id and logsheet key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryRecord {
    pub id: i64,
    pub logsheet: i64,
    pub status: DutyStatus,
    #[serde(default)]
    pub note: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_starts_driving_with_no_logsheet() {
        let draft = EntryDraft::at("2024-01-01T08:00");
        assert_eq!(draft.status, DutyStatus::Driving);
        assert_eq!(draft.logsheet, None);
        assert_eq!(draft.note, "");
        assert_eq!(draft.start_time, "2024-01-01T08:00");
        assert_eq!(draft.end_time, "2024-01-01T08:00");
    }

    #[test]
    fn new_uses_minute_precision_timestamp() {
        let draft = EntryDraft::new();
        // YYYY-MM-DDTHH:MM
        assert_eq!(draft.start_time.len(), 16);
        assert_eq!(&draft.start_time[10..11], "T");
    }

    #[test]
    fn set_replaces_text_fields() {
        let mut draft = EntryDraft::at("2024-01-01T08:00");
        draft.set(EntryField::Note, "fuel stop");
        draft.set(EntryField::EndTime, "2024-01-01T10:30");
        assert_eq!(draft.get(EntryField::Note), "fuel stop");
        assert_eq!(draft.get(EntryField::EndTime), "2024-01-01T10:30");
        assert_eq!(draft.get(EntryField::StartTime), "2024-01-01T08:00");
    }

    #[test]
    fn payload_merges_logsheet_foreign_key() {
        let draft = EntryDraft::at("2024-01-01T08:00");
        assert_eq!(draft.payload(10).logsheet, 10);
    }

    #[test]
    fn payload_sends_status_wire_string() {
        let mut draft = EntryDraft::at("2024-01-01T08:00");
        draft.status = DutyStatus::OffDuty;
        let json = serde_json::to_value(draft.payload(10)).unwrap();
        assert_eq!(json["status"], "Off Duty");
        assert_eq!(json["logsheet"], 10);
    }

    #[test]
    fn record_deserializes_from_response() {
        let body = r#"{
            "id": 100,
            "logsheet": 10,
            "status": "Driving",
            "note": null,
            "start_time": "2024-01-01T08:00",
            "end_time": "2024-01-01T12:00"
        }"#;
        let record: EntryRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.id, 100);
        assert_eq!(record.logsheet, 10);
        assert_eq!(record.status, DutyStatus::Driving);
        assert_eq!(record.note, None);
    }

    #[test]
    fn required_fields_are_the_timestamps() {
        assert!(!EntryField::Note.required());
        assert!(EntryField::StartTime.required());
        assert!(EntryField::EndTime.required());
    }
}
