//! Seams between the planner core and the remote service.
//!
//! The core only depends on these traits; `service::PathPilotClient` is the
//! HTTP implementation and tests substitute their own.

use crate::error::ServiceError;
use crate::route::{RouteRequest, RouteResponse};
use crate::waypoint::LatLng;

/// The indexed place closest to a raw coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestPlace {
    pub place_id: String,
    pub formatted_address: Option<String>,
}

/// Looks up places and their addresses.
pub trait LocationProvider {
    /// Nearest indexed place to `at`, used when a click carries no place id.
    fn nearest(&self, at: LatLng) -> Result<NearestPlace, ServiceError>;

    /// Canonical address for a known place.
    fn place_address(&self, place_id: &str, at: LatLng) -> Result<String, ServiceError>;
}

/// Computes candidate routes for every registered algorithm.
pub trait RouteProvider {
    fn route(&self, request: &RouteRequest) -> Result<RouteResponse, ServiceError>;
}

impl<T: LocationProvider + ?Sized> LocationProvider for &T {
    fn nearest(&self, at: LatLng) -> Result<NearestPlace, ServiceError> {
        (**self).nearest(at)
    }

    fn place_address(&self, place_id: &str, at: LatLng) -> Result<String, ServiceError> {
        (**self).place_address(place_id, at)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn route(&self, request: &RouteRequest) -> Result<RouteResponse, ServiceError> {
        (**self).route(request)
    }
}
