//! Reusable TUI widgets.

pub mod form;
pub mod map_view;
pub mod status_bar;
pub mod tabs;

pub use form::{Form, FormField, draw_form, draw_form_grid};
pub use map_view::{MapMarker, MapView};
pub use status_bar::draw_status_bar;
pub use tabs::{TabBarContext, draw_tab_bar};
