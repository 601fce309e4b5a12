use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Logsheet form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogsheetField {
    Date,
    DrivingHours,
    OnDutyHours,
    OffDutyHours,
    SleeperHours,
    HoursLeftInCycle,
    BolNumber,
    Shipper,
    Commodity,
}

static ALL_LOGSHEET_FIELDS: &[LogsheetField] = &[
    LogsheetField::Date,
    LogsheetField::DrivingHours,
    LogsheetField::OnDutyHours,
    LogsheetField::OffDutyHours,
    LogsheetField::SleeperHours,
    LogsheetField::HoursLeftInCycle,
    LogsheetField::BolNumber,
    LogsheetField::Shipper,
    LogsheetField::Commodity,
];

impl LogsheetField {
    /// Returns all logsheet fields in display order.
    pub fn all() -> &'static [LogsheetField] {
        ALL_LOGSHEET_FIELDS
    }

    /// Display label for the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::DrivingHours => "Driving Hours",
            Self::OnDutyHours => "On Duty Hours",
            Self::OffDutyHours => "Off Duty Hours",
            Self::SleeperHours => "Sleeper Hours",
            Self::HoursLeftInCycle => "Hours Left In Cycle",
            Self::BolNumber => "BOL Number",
            Self::Shipper => "Shipper",
            Self::Commodity => "Commodity",
        }
    }

    /// Whether the field must be non-empty on submit.
    pub fn required(self) -> bool {
        matches!(self, Self::Date)
    }

    /// Whether the field holds an hours figure.
    pub fn is_hours(self) -> bool {
        matches!(
            self,
            Self::DrivingHours
                | Self::OnDutyHours
                | Self::OffDutyHours
                | Self::SleeperHours
                | Self::HoursLeftInCycle
        )
    }
}

/// Client-held logsheet form data for the active trip.
///
/// All values are held as entered text; hour fields start at `0` and are
/// parsed when the submission payload is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogsheetDraft {
    pub date: String,
    pub driving_hours: String,
    pub on_duty_hours: String,
    pub off_duty_hours: String,
    pub sleeper_hours: String,
    pub hours_left_in_cycle: String,
    pub bol_number: String,
    pub shipper: String,
    pub commodity: String,
}

impl Default for LogsheetDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl LogsheetDraft {
    /// Creates a fresh draft: today's UTC date, zero hours, empty shipping
    /// details.
    pub fn new() -> Self {
        Self::for_date(Utc::now().format("%Y-%m-%d").to_string())
    }

    /// Creates a fresh draft for a fixed date.
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            driving_hours: "0".to_string(),
            on_duty_hours: "0".to_string(),
            off_duty_hours: "0".to_string(),
            sleeper_hours: "0".to_string(),
            hours_left_in_cycle: "0".to_string(),
            bol_number: String::new(),
            shipper: String::new(),
            commodity: String::new(),
        }
    }

    /// Replaces the value of one field.
    pub fn set(&mut self, field: LogsheetField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LogsheetField::Date => self.date = value,
            LogsheetField::DrivingHours => self.driving_hours = value,
            LogsheetField::OnDutyHours => self.on_duty_hours = value,
            LogsheetField::OffDutyHours => self.off_duty_hours = value,
            LogsheetField::SleeperHours => self.sleeper_hours = value,
            LogsheetField::HoursLeftInCycle => self.hours_left_in_cycle = value,
            LogsheetField::BolNumber => self.bol_number = value,
            LogsheetField::Shipper => self.shipper = value,
            LogsheetField::Commodity => self.commodity = value,
        }
    }

    /// Returns the current value of one field.
    pub fn get(&self, field: LogsheetField) -> &str {
        match field {
            LogsheetField::Date => &self.date,
            LogsheetField::DrivingHours => &self.driving_hours,
            LogsheetField::OnDutyHours => &self.on_duty_hours,
            LogsheetField::OffDutyHours => &self.off_duty_hours,
            LogsheetField::SleeperHours => &self.sleeper_hours,
            LogsheetField::HoursLeftInCycle => &self.hours_left_in_cycle,
            LogsheetField::BolNumber => &self.bol_number,
            LogsheetField::Shipper => &self.shipper,
            LogsheetField::Commodity => &self.commodity,
        }
    }

    /// Builds the `POST logsheets/` body, merging in the trip foreign key.
    ///
    /// Hour fields that fail to parse are sent as zero; validation happens
    /// before submission, not here.
    pub fn payload(&self, trip: i64) -> LogsheetPayload {
        LogsheetPayload {
            trip,
            date: self.date.clone(),
            driving_hours: parse_hours(&self.driving_hours),
            on_duty_hours: parse_hours(&self.on_duty_hours),
            off_duty_hours: parse_hours(&self.off_duty_hours),
            sleeper_hours: parse_hours(&self.sleeper_hours),
            hours_left_in_cycle: parse_hours(&self.hours_left_in_cycle),
            bol_number: self.bol_number.clone(),
            shipper: self.shipper.clone(),
            commodity: self.commodity.clone(),
        }
    }
}

fn parse_hours(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

/// Wire body for `POST logsheets/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogsheetPayload {
    pub trip: i64,
    pub date: String,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
    pub sleeper_hours: f64,
    pub hours_left_in_cycle: f64,
    pub bol_number: String,
    pub shipper: String,
    pub commodity: String,
}

/// A server-confirmed logsheet, including its assigned id and trip key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogsheetRecord {
    pub id: i64,
    pub trip: i64,
    pub date: String,
    #[serde(default)]
    pub driving_hours: f64,
    #[serde(default)]
    pub on_duty_hours: f64,
    #[serde(default)]
    pub off_duty_hours: f64,
    #[serde(default)]
    pub sleeper_hours: f64,
    #[serde(default)]
    pub hours_left_in_cycle: f64,
    #[serde(default)]
    pub bol_number: Option<String>,
    #[serde(default)]
    pub shipper: Option<String>,
    #[serde(default)]
    pub commodity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_defaults_hours_to_zero() {
        let draft = LogsheetDraft::for_date("2024-01-01");
        for &field in LogsheetField::all().iter().filter(|f| f.is_hours()) {
            assert_eq!(draft.get(field), "0", "{field:?}");
        }
        assert_eq!(draft.bol_number, "");
    }

    #[test]
    fn new_draft_uses_iso_date() {
        let draft = LogsheetDraft::new();
        assert_eq!(draft.date.len(), 10);
        assert_eq!(&draft.date[4..5], "-");
    }

    #[test]
    fn set_replaces_field_value() {
        let mut draft = LogsheetDraft::for_date("2024-01-01");
        draft.set(LogsheetField::Shipper, "Acme");
        draft.set(LogsheetField::Shipper, "Globex");
        assert_eq!(draft.get(LogsheetField::Shipper), "Globex");
    }

    #[test]
    fn payload_merges_trip_foreign_key() {
        let draft = LogsheetDraft::for_date("2024-01-01");
        assert_eq!(draft.payload(7).trip, 7);
    }

    #[test]
    fn payload_parses_hours() {
        let mut draft = LogsheetDraft::for_date("2024-01-01");
        draft.set(LogsheetField::DrivingHours, "5");
        draft.set(LogsheetField::OnDutyHours, "2.5");
        let payload = draft.payload(1);
        assert_eq!(payload.driving_hours, 5.0);
        assert_eq!(payload.on_duty_hours, 2.5);
        assert_eq!(payload.off_duty_hours, 0.0);
    }

    #[test]
    fn payload_sends_unparseable_hours_as_zero() {
        let mut draft = LogsheetDraft::for_date("2024-01-01");
        draft.set(LogsheetField::SleeperHours, "abc");
        assert_eq!(draft.payload(1).sleeper_hours, 0.0);
    }

    #[test]
    fn payload_wire_shape() {
        let mut draft = LogsheetDraft::for_date("2024-01-01");
        draft.set(LogsheetField::DrivingHours, "5");
        draft.set(LogsheetField::BolNumber, "BOL-99");
        draft.set(LogsheetField::Shipper, "Acme");
        draft.set(LogsheetField::Commodity, "Steel");
        let json = serde_json::to_string(&draft.payload(1)).unwrap();
        insta::assert_snapshot!(
            json,
            @r#"{"trip":1,"date":"2024-01-01","driving_hours":5.0,"on_duty_hours":0.0,"off_duty_hours":0.0,"sleeper_hours":0.0,"hours_left_in_cycle":0.0,"bol_number":"BOL-99","shipper":"Acme","commodity":"Steel"}"#
        );
    }

    #[test]
    fn record_deserializes_with_nullable_details() {
        let body = r#"{
            "id": 10,
            "trip": 1,
            "date": "2024-01-01",
            "driving_hours": 5.0,
            "on_duty_hours": 2.0,
            "off_duty_hours": 0.0,
            "sleeper_hours": 0.0,
            "hours_left_in_cycle": 63.0,
            "bol_number": null,
            "shipper": "Acme",
            "commodity": null
        }"#;
        let record: LogsheetRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.id, 10);
        assert_eq!(record.trip, 1);
        assert_eq!(record.driving_hours, 5.0);
        assert_eq!(record.bol_number, None);
        assert_eq!(record.shipper.as_deref(), Some("Acme"));
    }
}
