//! Map view controller — owns the wizard's single map surface.
//!
//! Holds marker, path, and viewport state between renders; the trip screen
//! calls [`MapView::redraw`] whenever a location resolves and draws the
//! result on a canvas with a world-map backdrop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};

use crate::geo::{Coordinate, LocationSlot};

/// Default viewport: a continental view of the United States.
const DEFAULT_X_BOUNDS: [f64; 2] = [-130.0, -65.0];
const DEFAULT_Y_BOUNDS: [f64; 2] = [22.0, 52.0];

/// Fraction of the marker bounding box added as padding on each side when
/// fitting the viewport.
const FIT_PADDING: f64 = 0.5;

/// Minimum viewport span in degrees, so a lone marker keeps some context.
const MIN_SPAN: f64 = 4.0;

/// A placed, labeled location marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarker {
    pub slot: LocationSlot,
    pub coord: Coordinate,
}

/// The single map surface: markers, connecting path, and viewport.
///
/// Other components never touch the surface directly; they hand coordinates
/// to [`redraw`](Self::redraw) and this controller owns everything drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    initialized: bool,
    markers: Vec<MapMarker>,
    path: Vec<Coordinate>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    /// Creates an uninitialized map view with no surface.
    pub fn new() -> Self {
        Self {
            initialized: false,
            markers: Vec::new(),
            path: Vec::new(),
            x_bounds: DEFAULT_X_BOUNDS,
            y_bounds: DEFAULT_Y_BOUNDS,
        }
    }

    /// Creates the map surface centered on the default continental view.
    ///
    /// Idempotent: calling again while initialized changes nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        *self = Self::new();
        self.initialized = true;
    }

    /// Releases the surface and all drawn artifacts.
    ///
    /// Safe to call when never initialized.
    pub fn dispose(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` while the surface exists.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the placed markers in route order.
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Returns the connecting path waypoints (empty below two markers).
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    /// Returns the viewport longitude bounds.
    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    /// Returns the viewport latitude bounds.
    pub fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }

    /// Clears and replaces all markers and the path, then refits the
    /// viewport.
    ///
    /// Markers are placed in the fixed route order current → pickup →
    /// dropoff, skipping absent coordinates; the path connects them once at
    /// least two are present. With zero coordinates present the call is a
    /// no-op: previous markers and viewport stay as they are.
    pub fn redraw(
        &mut self,
        current: Option<Coordinate>,
        pickup: Option<Coordinate>,
        dropoff: Option<Coordinate>,
    ) {
        if !self.initialized {
            return;
        }

        let present: Vec<MapMarker> = [
            (LocationSlot::Current, current),
            (LocationSlot::Pickup, pickup),
            (LocationSlot::Dropoff, dropoff),
        ]
        .iter()
        .filter_map(|&(slot, coord)| coord.map(|coord| MapMarker { slot, coord }))
        .collect();

        if present.is_empty() {
            return;
        }

        self.markers = present;
        self.path = if self.markers.len() >= 2 {
            self.markers.iter().map(|m| m.coord).collect()
        } else {
            Vec::new()
        };
        self.fit_viewport();
    }

    /// Fits the viewport to the marker bounding box plus padding.
    fn fit_viewport(&mut self) {
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        for marker in &self.markers {
            min_lon = min_lon.min(marker.coord.lon);
            max_lon = max_lon.max(marker.coord.lon);
            min_lat = min_lat.min(marker.coord.lat);
            max_lat = max_lat.max(marker.coord.lat);
        }

        self.x_bounds = fit_axis(min_lon, max_lon, 180.0);
        self.y_bounds = fit_axis(min_lat, max_lat, 90.0);
    }

    /// Renders the surface: world-map backdrop, route path, labeled markers.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Route Map ")
            .title_bottom(Line::from(" © OpenStreetMap contributors "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if !self.initialized {
            frame.render_widget(block, area);
            return;
        }

        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds(self.x_bounds)
            .y_bounds(self.y_bounds)
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });

                for pair in self.path.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].lon,
                        y1: pair[0].lat,
                        x2: pair[1].lon,
                        y2: pair[1].lat,
                        color: Color::Blue,
                    });
                }

                ctx.layer();
                for marker in &self.markers {
                    let color = slot_color(marker.slot);
                    let point = [(marker.coord.lon, marker.coord.lat)];
                    ctx.draw(&Points {
                        coords: &point,
                        color,
                    });
                    ctx.print(
                        marker.coord.lon,
                        marker.coord.lat,
                        Line::styled(marker.slot.label(), Style::default().fg(color)),
                    );
                }
            });
        frame.render_widget(canvas, area);
    }
}

/// Marker color per route slot.
fn slot_color(slot: LocationSlot) -> Color {
    match slot {
        LocationSlot::Current => Color::Yellow,
        LocationSlot::Pickup => Color::Green,
        LocationSlot::Dropoff => Color::Red,
    }
}

/// Pads a one-axis extent and clamps it to the world.
fn fit_axis(min: f64, max: f64, limit: f64) -> [f64; 2] {
    let pad = (max - min) * FIT_PADDING;
    let mut lo = min - pad;
    let mut hi = max + pad;
    if hi - lo < MIN_SPAN {
        let center = (hi + lo) / 2.0;
        lo = center - MIN_SPAN / 2.0;
        hi = center + MIN_SPAN / 2.0;
    }
    [lo.max(-limit), hi.min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denver() -> Coordinate {
        Coordinate::new(39.7392, -104.9903)
    }

    fn chicago() -> Coordinate {
        Coordinate::new(41.8781, -87.6298)
    }

    fn new_york() -> Coordinate {
        Coordinate::new(40.7128, -74.0060)
    }

    fn initialized() -> MapView {
        let mut map = MapView::new();
        map.initialize();
        map
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn new_starts_uninitialized_on_default_view() {
            let map = MapView::new();
            assert!(!map.initialized());
            assert_eq!(map.x_bounds(), DEFAULT_X_BOUNDS);
            assert_eq!(map.y_bounds(), DEFAULT_Y_BOUNDS);
        }

        #[test]
        fn initialize_creates_the_surface() {
            let map = initialized();
            assert!(map.initialized());
            assert!(map.markers().is_empty());
        }

        #[test]
        fn initialize_twice_is_a_noop() {
            let mut map = initialized();
            map.redraw(Some(denver()), None, None);
            let bounds = map.x_bounds();

            map.initialize();
            assert_eq!(map.markers().len(), 1);
            assert_eq!(map.x_bounds(), bounds);
        }

        #[test]
        fn dispose_releases_markers_and_viewport() {
            let mut map = initialized();
            map.redraw(Some(denver()), Some(chicago()), None);
            map.dispose();
            assert!(!map.initialized());
            assert!(map.markers().is_empty());
            assert!(map.path().is_empty());
            assert_eq!(map.x_bounds(), DEFAULT_X_BOUNDS);
        }

        #[test]
        fn dispose_without_initialize_is_safe() {
            let mut map = MapView::new();
            map.dispose();
            assert!(!map.initialized());
        }

        #[test]
        fn redraw_before_initialize_is_a_noop() {
            let mut map = MapView::new();
            map.redraw(Some(denver()), None, None);
            assert!(map.markers().is_empty());
        }
    }

    mod redraw {
        use super::*;

        #[test]
        fn zero_coordinates_leaves_previous_state() {
            let mut map = initialized();
            map.redraw(Some(denver()), Some(chicago()), None);
            let before = map.clone();

            map.redraw(None, None, None);
            assert_eq!(map, before);
        }

        #[test]
        fn single_marker_has_no_path() {
            let mut map = initialized();
            map.redraw(None, Some(chicago()), None);
            assert_eq!(map.markers().len(), 1);
            assert_eq!(map.markers()[0].slot, LocationSlot::Pickup);
            assert!(map.path().is_empty());
        }

        #[test]
        fn two_markers_connect_with_a_path() {
            let mut map = initialized();
            map.redraw(Some(denver()), None, Some(new_york()));
            assert_eq!(map.markers().len(), 2);
            assert_eq!(map.path(), &[denver(), new_york()]);
        }

        #[test]
        fn three_markers_keep_route_order() {
            let mut map = initialized();
            map.redraw(Some(denver()), Some(chicago()), Some(new_york()));
            let slots: Vec<LocationSlot> = map.markers().iter().map(|m| m.slot).collect();
            assert_eq!(
                slots,
                vec![
                    LocationSlot::Current,
                    LocationSlot::Pickup,
                    LocationSlot::Dropoff
                ]
            );
            assert_eq!(map.path().len(), 3);
        }

        #[test]
        fn redraw_replaces_earlier_markers() {
            let mut map = initialized();
            map.redraw(Some(denver()), Some(chicago()), Some(new_york()));
            map.redraw(None, Some(chicago()), None);
            assert_eq!(map.markers().len(), 1);
            assert!(map.path().is_empty());
        }
    }

    mod viewport {
        use super::*;

        #[test]
        fn fit_contains_all_markers_with_padding() {
            let mut map = initialized();
            map.redraw(Some(denver()), Some(chicago()), Some(new_york()));

            let [west, east] = map.x_bounds();
            let [south, north] = map.y_bounds();
            for marker in map.markers() {
                assert!(marker.coord.lon > west && marker.coord.lon < east);
                assert!(marker.coord.lat > south && marker.coord.lat < north);
            }
            // Padding pushes the bounds strictly past the extremes.
            assert!(west < -104.9903);
            assert!(east > -74.0060);
        }

        #[test]
        fn single_marker_gets_minimum_span() {
            let mut map = initialized();
            map.redraw(Some(denver()), None, None);

            let [west, east] = map.x_bounds();
            assert!((east - west - MIN_SPAN).abs() < 1e-9);
            let center = (east + west) / 2.0;
            assert!((center - denver().lon).abs() < 1e-9);
        }

        #[test]
        fn bounds_clamp_to_the_world() {
            let mut map = initialized();
            map.redraw(Some(Coordinate::new(89.5, 179.5)), None, None);
            assert!(map.y_bounds()[1] <= 90.0);
            assert!(map.x_bounds()[1] <= 180.0);
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render(map: &MapView, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    map.draw(frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn renders_title_and_attribution() {
            let map = initialized();
            let output = render(&map, 70, 20);
            assert!(output.contains("Route Map"));
            assert!(output.contains("OpenStreetMap contributors"));
        }

        #[test]
        fn renders_marker_labels() {
            let mut map = initialized();
            map.redraw(Some(denver()), Some(chicago()), None);
            let output = render(&map, 80, 24);
            assert!(output.contains("Current Location"));
            assert!(output.contains("Pickup Location"));
        }

        #[test]
        fn uninitialized_map_renders_frame_only() {
            let map = MapView::new();
            let output = render(&map, 70, 20);
            assert!(output.contains("Route Map"));
        }
    }
}
