use serde::{Deserialize, Serialize};

use crate::geo::LocationSlot;

/// Trip form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripField {
    CurrentLocation,
    PickupLocation,
    DropoffLocation,
    CarrierName,
    MainOfficeAddress,
    HomeTerminalAddress,
    TractorNumber,
    TrailerNumber,
    LicensePlate,
}

static ALL_TRIP_FIELDS: &[TripField] = &[
    TripField::CurrentLocation,
    TripField::PickupLocation,
    TripField::DropoffLocation,
    TripField::CarrierName,
    TripField::MainOfficeAddress,
    TripField::HomeTerminalAddress,
    TripField::TractorNumber,
    TripField::TrailerNumber,
    TripField::LicensePlate,
];

impl TripField {
    /// Returns all trip fields in display order.
    pub fn all() -> &'static [TripField] {
        ALL_TRIP_FIELDS
    }

    /// Display label for the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentLocation => "Current Location",
            Self::PickupLocation => "Pickup Location",
            Self::DropoffLocation => "Dropoff Location",
            Self::CarrierName => "Carrier Name",
            Self::MainOfficeAddress => "Main Office Address",
            Self::HomeTerminalAddress => "Home Terminal Address",
            Self::TractorNumber => "Tractor Number",
            Self::TrailerNumber => "Trailer Number",
            Self::LicensePlate => "License Plate",
        }
    }

    /// Whether the field must be non-empty on submit.
    pub fn required(self) -> bool {
        matches!(
            self,
            Self::CurrentLocation | Self::PickupLocation | Self::DropoffLocation | Self::CarrierName
        )
    }

    /// The map slot this field feeds, for the three location fields.
    pub fn location_slot(self) -> Option<LocationSlot> {
        match self {
            Self::CurrentLocation => Some(LocationSlot::Current),
            Self::PickupLocation => Some(LocationSlot::Pickup),
            Self::DropoffLocation => Some(LocationSlot::Dropoff),
            _ => None,
        }
    }
}

/// Client-held trip form data, not yet persisted.
///
/// Every field is free text; edits are last-write-wins per field. The draft
/// doubles as the `POST trips/` body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripDraft {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub carrier_name: String,
    pub main_office_address: String,
    pub home_terminal_address: String,
    pub tractor_number: String,
    pub trailer_number: String,
    pub license_plate: String,
}

impl TripDraft {
    /// Replaces the value of one field.
    pub fn set(&mut self, field: TripField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TripField::CurrentLocation => self.current_location = value,
            TripField::PickupLocation => self.pickup_location = value,
            TripField::DropoffLocation => self.dropoff_location = value,
            TripField::CarrierName => self.carrier_name = value,
            TripField::MainOfficeAddress => self.main_office_address = value,
            TripField::HomeTerminalAddress => self.home_terminal_address = value,
            TripField::TractorNumber => self.tractor_number = value,
            TripField::TrailerNumber => self.trailer_number = value,
            TripField::LicensePlate => self.license_plate = value,
        }
    }

    /// Returns the current value of one field.
    pub fn get(&self, field: TripField) -> &str {
        match field {
            TripField::CurrentLocation => &self.current_location,
            TripField::PickupLocation => &self.pickup_location,
            TripField::DropoffLocation => &self.dropoff_location,
            TripField::CarrierName => &self.carrier_name,
            TripField::MainOfficeAddress => &self.main_office_address,
            TripField::HomeTerminalAddress => &self.home_terminal_address,
            TripField::TractorNumber => &self.tractor_number,
            TripField::TrailerNumber => &self.trailer_number,
            TripField::LicensePlate => &self.license_plate,
        }
    }
}

/// A server-confirmed trip, including its assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TripRecord {
    pub id: i64,
    #[serde(flatten)]
    pub details: TripDraft,
}
