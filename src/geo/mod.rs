//! Geocoding: coordinates, location slots, and the lookup adapter.

mod geocoder;

pub use geocoder::Geocoder;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// The three trip locations shown on the map, in route order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationSlot {
    Current,
    Pickup,
    Dropoff,
}

static ALL_SLOTS: &[LocationSlot] = &[
    LocationSlot::Current,
    LocationSlot::Pickup,
    LocationSlot::Dropoff,
];

impl LocationSlot {
    /// Returns all slots in route order.
    pub fn all() -> &'static [LocationSlot] {
        ALL_SLOTS
    }

    /// Marker label shown on the map.
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "Current Location",
            Self::Pickup => "Pickup Location",
            Self::Dropoff => "Dropoff Location",
        }
    }

    /// Index of this slot in route order.
    pub fn index(self) -> usize {
        match self {
            Self::Current => 0,
            Self::Pickup => 1,
            Self::Dropoff => 2,
        }
    }
}
