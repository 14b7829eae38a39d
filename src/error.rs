//! Error types.

use thiserror::Error;

/// A remote lookup or routing call failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not encode request parameter: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

/// A point sequence could not be turned into an overlay path.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid geometry: non-finite or out-of-range coordinate at index {index}")]
    InvalidGeometry { index: usize },

    #[error("malformed encoded path at byte {offset}")]
    MalformedPath { offset: usize },
}

/// The current waypoints cannot form a route request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteRequestError {
    #[error("a route needs 2 or 3 waypoints, got {0}")]
    WaypointCount(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
