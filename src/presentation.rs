//! What the map and the timing card show.
//!
//! Visibility only affects rendering; stored route results are never touched
//! by toggling.

use rayon::prelude::*;

use crate::error::GeometryError;
use crate::polyline::{EncodedPath, build_overlay_path};
use crate::route::{Algorithm, RouteResults};

/// Overlays are drawn in this order, later ones on top.
pub const DRAW_ORDER: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub weight: f32,
    pub opacity: f32,
    pub color: &'static str,
}

impl StrokeStyle {
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        let color = match algorithm {
            Algorithm::Dijkstra => "#0000ff",
            Algorithm::AStar => "#ff0000",
            Algorithm::Bfs => "#00ff00",
        };
        Self {
            weight: 3.0,
            opacity: 0.7,
            color,
        }
    }
}

/// Per-algorithm overlay toggles. Everything starts visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility([bool; 3]);

impl Default for Visibility {
    fn default() -> Self {
        Self([true; 3])
    }
}

impl Visibility {
    pub fn is_visible(&self, algorithm: Algorithm) -> bool {
        self.0[algorithm.index()]
    }

    pub fn set(&mut self, algorithm: Algorithm, visible: bool) {
        self.0[algorithm.index()] = visible;
    }

    /// Flips the toggle and returns the new state.
    pub fn toggle(&mut self, algorithm: Algorithm) -> bool {
        let visible = !self.is_visible(algorithm);
        self.set(algorithm, visible);
        visible
    }
}

/// Outcome of the last "Find Route", for the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouteStatus {
    #[default]
    Idle,
    Pending,
    Found,
    /// The service answered but no algorithm produced a path.
    NoRoute,
    /// The request could not be completed.
    Failed,
}

impl RouteStatus {
    pub fn message(&self) -> &'static str {
        match self {
            RouteStatus::Idle => "",
            RouteStatus::Pending => "Finding route...",
            RouteStatus::Found => "Route found",
            RouteStatus::NoRoute => "No route found",
            RouteStatus::Failed => "Route request failed",
        }
    }
}

/// A route ready for the map's polygon primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub algorithm: Algorithm,
    pub path: EncodedPath,
    pub style: StrokeStyle,
}

/// Builds overlays for every visible algorithm with a drawable path, in
/// [`DRAW_ORDER`].
pub fn render_overlays(
    results: &RouteResults,
    visibility: &Visibility,
) -> Result<Vec<Overlay>, GeometryError> {
    DRAW_ORDER
        .par_iter()
        .filter(|algorithm| visibility.is_visible(**algorithm))
        .filter_map(|&algorithm| match build_overlay_path(&results.get(algorithm).points) {
            Ok(path) if path.is_empty() => None,
            Ok(path) => Some(Ok(Overlay {
                algorithm,
                path,
                style: StrokeStyle::for_algorithm(algorithm),
            })),
            Err(err) => Some(Err(err)),
        })
        .collect()
}

/// One line of the timing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRow {
    pub algorithm: Algorithm,
    pub label: &'static str,
    pub elapsed: String,
    pub visible: bool,
    /// False until a response has filled this algorithm's result.
    pub computed: bool,
}

pub fn timing_rows(results: &RouteResults, visibility: &Visibility) -> Vec<TimingRow> {
    results
        .iter()
        .map(|(algorithm, result)| TimingRow {
            algorithm,
            label: algorithm.label(),
            elapsed: format!("{} ms", result.elapsed_ms),
            visible: visibility.is_visible(algorithm),
            computed: result.is_computed(),
        })
        .collect()
}

/// Pin label for the marker at `index`: `A`, `B`, `C`, ...
pub fn pin_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
