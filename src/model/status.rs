use std::fmt;

use serde::{Deserialize, Serialize};

/// Driver duty status for a logsheet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DutyStatus {
    #[default]
    Driving,
    #[serde(rename = "Off Duty")]
    OffDuty,
    #[serde(rename = "On Duty")]
    OnDuty,
    Sleeper,
}

static ALL_STATUSES: &[DutyStatus] = &[
    DutyStatus::Driving,
    DutyStatus::OffDuty,
    DutyStatus::OnDuty,
    DutyStatus::Sleeper,
];

impl DutyStatus {
    /// Returns the wire string the API expects for this status.
    pub fn api_str(&self) -> &'static str {
        match self {
            DutyStatus::Driving => "Driving",
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::OnDuty => "On Duty",
            DutyStatus::Sleeper => "Sleeper",
        }
    }

    /// Returns all statuses in selector order.
    pub fn all() -> &'static [DutyStatus] {
        ALL_STATUSES
    }
}

#[mutants::skip]
impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_str_all_statuses() {
        assert_eq!(DutyStatus::Driving.api_str(), "Driving");
        assert_eq!(DutyStatus::OffDuty.api_str(), "Off Duty");
        assert_eq!(DutyStatus::OnDuty.api_str(), "On Duty");
        assert_eq!(DutyStatus::Sleeper.api_str(), "Sleeper");
    }

    #[test]
    fn all_returns_4_statuses() {
        assert_eq!(DutyStatus::all().len(), 4);
    }

    #[test]
    fn default_is_driving() {
        assert_eq!(DutyStatus::default(), DutyStatus::Driving);
    }

    #[test]
    fn serializes_to_wire_strings() {
        for status in DutyStatus::all() {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.api_str()));
        }
    }

    #[test]
    fn serde_round_trip() {
        for status in DutyStatus::all() {
            let json = serde_json::to_string(status).unwrap();
            let deserialized: DutyStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*status, deserialized);
        }
    }
}
