//! Encoded polylines for route overlays.
//!
//! Routes arrive from the routing service as coordinate pairs and leave as
//! the compact encoded-polyline strings the map widget's overlay primitive
//! consumes (precision 1e5). The service and the widget disagree on axis
//! order, so pairs are swapped on the way out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

const PRECISION: f64 = 1e5;
const MAX_LAT: f64 = 90.0;
const MAX_LNG: f64 = 180.0;

/// A polyline as a sequence of coordinate pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from coordinate points.
    ///
    /// Each point is a pair in whatever axis order the caller works in.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// The same points with each pair's axes exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.points.iter().map(|&(a, b)| (b, a)).collect())
    }

    /// The forward path followed by its interior points in reverse.
    ///
    /// `[p1, p2, p3, p4]` becomes `[p1, p2, p3, p4, p3, p2]`: traced as a
    /// polygon outline it runs out and back without a closing seam, and the
    /// endpoints appear once each.
    pub fn closed_loop(&self) -> Self {
        let n = self.points.len();
        let mut points = Vec::with_capacity((2 * n).saturating_sub(2));
        points.extend_from_slice(&self.points);
        if n > 2 {
            points.extend(self.points[1..n - 1].iter().rev());
        }
        Self::new(points)
    }

    /// Encodes the pairs in the order given.
    ///
    /// Either axis may hold a longitude, so both are bounded by 180 degrees.
    pub fn encode(&self) -> Result<EncodedPath, GeometryError> {
        let mut out = String::with_capacity(self.points.len() * 8);
        let mut previous = (0i64, 0i64);
        for (index, &(a, b)) in self.points.iter().enumerate() {
            if !in_range(a, MAX_LNG) || !in_range(b, MAX_LNG) {
                return Err(GeometryError::InvalidGeometry { index });
            }
            let current = (scale(a), scale(b));
            let delta = current
                .0
                .checked_sub(previous.0)
                .zip(current.1.checked_sub(previous.1))
                .ok_or(GeometryError::InvalidGeometry { index })?;
            encode_value(delta.0, &mut out);
            encode_value(delta.1, &mut out);
            previous = current;
        }
        Ok(EncodedPath(out))
    }

    pub fn decode(path: &EncodedPath) -> Result<Self, GeometryError> {
        let bytes = path.0.as_bytes();
        let mut points = Vec::new();
        let mut offset = 0;
        let mut current = (0i64, 0i64);
        while offset < bytes.len() {
            let start = offset;
            let delta = (
                decode_value(bytes, &mut offset)?,
                decode_value(bytes, &mut offset)?,
            );
            current = current
                .0
                .checked_add(delta.0)
                .zip(current.1.checked_add(delta.1))
                .ok_or(GeometryError::MalformedPath { offset: start })?;
            points.push((current.0 as f64 / PRECISION, current.1 as f64 / PRECISION));
        }
        Ok(Self::new(points))
    }
}

/// An encoded polyline string, ready for the overlay primitive.
///
/// An empty path means "draw nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPath(String);

impl EncodedPath {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EncodedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the overlay path for a route as returned by the routing service.
///
/// Fewer than two points yields an empty path. Otherwise the route is closed
/// into a loop, each pair is swapped into the widget's axis order, and the
/// result is encoded. The input is left untouched.
///
/// Points must be latitude-first and on the globe: `|lat| <= 90`,
/// `|lng| <= 180`.
pub fn build_overlay_path(points: &[(f64, f64)]) -> Result<EncodedPath, GeometryError> {
    if points.len() < 2 {
        return Ok(EncodedPath::default());
    }
    if let Some(index) = points
        .iter()
        .position(|&(lat, lng)| !in_range(lat, MAX_LAT) || !in_range(lng, MAX_LNG))
    {
        return Err(GeometryError::InvalidGeometry { index });
    }
    Polyline::new(points.to_vec()).closed_loop().swapped().encode()
}

fn in_range(value: f64, limit: f64) -> bool {
    value.is_finite() && value.abs() <= limit
}

fn scale(value: f64) -> i64 {
    (value * PRECISION).round() as i64
}

fn encode_value(delta: i64, out: &mut String) {
    let shifted = if delta < 0 { !(delta << 1) } else { delta << 1 };
    let mut value = shifted as u64;
    while value >= 0x20 {
        out.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    out.push(char::from(value as u8 + 63));
}

fn decode_value(bytes: &[u8], offset: &mut usize) -> Result<i64, GeometryError> {
    let mut result = 0i64;
    let mut shift = 0;
    loop {
        let byte = *bytes
            .get(*offset)
            .ok_or(GeometryError::MalformedPath { offset: *offset })?;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(GeometryError::MalformedPath { offset: *offset });
        }
        *offset += 1;
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}
