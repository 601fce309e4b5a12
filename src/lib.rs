#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Trip and duty-status logging TUI for fleet drivers.
//!
//! haulog is a terminal front end for a fleet logistics API: a four-tab
//! wizard that creates a trip, then daily logsheets, then duty-status
//! entries, with live geocoding of the trip's locations and a canvas map
//! showing the route.

pub mod api;
pub mod config;
pub mod geo;
pub mod model;
pub mod tui;
