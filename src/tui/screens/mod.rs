//! TUI screen implementations, one per wizard step.

pub mod dashboard;
pub mod entry_form;
pub mod logsheet_form;
pub mod trip_form;

pub use dashboard::draw_dashboard;
pub use entry_form::{EntryFormState, draw_entry_form};
pub use logsheet_form::{LogsheetFormState, draw_logsheet_form};
pub use trip_form::{TripFormState, draw_trip_form};
