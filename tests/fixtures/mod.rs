//! Test fixtures for pathpilot.
//!
//! Provides:
//! - Real Gainesville locations
//! - In-memory location and route providers

#![allow(dead_code)]

pub mod gainesville_locations;

use std::cell::{Cell, RefCell};

use pathpilot::error::ServiceError;
use pathpilot::route::{RouteRequest, RouteResponse};
use pathpilot::traits::{LocationProvider, NearestPlace, RouteProvider};
use pathpilot::waypoint::LatLng;

pub use gainesville_locations::*;

/// Resolves coordinates to the nearest campus location.
#[derive(Default)]
pub struct CampusLookup {
    pub offline: Cell<bool>,
}

impl CampusLookup {
    fn closest(at: LatLng) -> &'static Location {
        CAMPUS
            .iter()
            .min_by(|a, b| {
                let da = (a.lat - at.lat).powi(2) + (a.lng - at.lng).powi(2);
                let db = (b.lat - at.lat).powi(2) + (b.lng - at.lng).powi(2);
                da.total_cmp(&db)
            })
            .expect("campus fixture is not empty")
    }
}

impl LocationProvider for CampusLookup {
    fn nearest(&self, at: LatLng) -> Result<NearestPlace, ServiceError> {
        if self.offline.get() {
            return Err(ServiceError::MissingField("place_id"));
        }
        Ok(NearestPlace {
            place_id: Self::closest(at).name.to_string(),
            formatted_address: None,
        })
    }

    fn place_address(&self, place_id: &str, _at: LatLng) -> Result<String, ServiceError> {
        CAMPUS
            .iter()
            .find(|location| location.name == place_id)
            .map(address_of)
            .ok_or(ServiceError::MissingField("result.formatted_address"))
    }
}

/// Returns a straight-line route through the requested waypoints.
#[derive(Default)]
pub struct StraightLineRouter {
    pub fail: Cell<bool>,
    pub requests: RefCell<Vec<RouteRequest>>,
}

impl RouteProvider for StraightLineRouter {
    fn route(&self, request: &RouteRequest) -> Result<RouteResponse, ServiceError> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail.get() {
            return Err(ServiceError::MissingField("dijkstra"));
        }

        let points: Vec<(f64, f64)> = std::iter::once(&request.start)
            .chain(request.mid.as_ref())
            .chain(std::iter::once(&request.end))
            .map(|waypoint| (waypoint.lat_lng.lat, waypoint.lat_lng.lng))
            .collect();

        Ok(RouteResponse {
            dijkstra: points.clone(),
            dijkstra_time: 12,
            a_star: points.clone(),
            a_star_time: 8,
            bfs: points,
            bfs_time: 30,
        })
    }
}
