//! "Find Route": one round trip to the routing service.

use tracing::{error, info};

use crate::route::{RouteRequest, RouteResponse, RouteResults};
use crate::traits::RouteProvider;
use crate::waypoint::Waypoint;

#[derive(Debug, Clone)]
pub struct RouteOrchestrator<R> {
    provider: R,
}

impl<R: RouteProvider> RouteOrchestrator<R> {
    pub fn new(provider: R) -> Self {
        Self { provider }
    }

    /// Sends `request`; failures are logged and yield `None`.
    pub fn fetch(&self, request: &RouteRequest) -> Option<RouteResponse> {
        match self.provider.route(request) {
            Ok(response) => {
                info!(
                    dijkstra_ms = response.dijkstra_time,
                    a_star_ms = response.a_star_time,
                    bfs_ms = response.bfs_time,
                    "route computed"
                );
                Some(response)
            }
            Err(err) => {
                error!("route request failed: {err}");
                None
            }
        }
    }

    /// Requests routes for `waypoints` (origin, optional stop, destination)
    /// and stores them in `results` as one batch.
    ///
    /// This is the ticket-free entry point for callers that keep their own
    /// results. `Planner::find_route` goes through [`Self::fetch`] instead so
    /// it can drop a response whose waypoints have since changed.
    ///
    /// On any failure `results` is left exactly as it was and `None` is returned.
    pub fn request_route(
        &self,
        waypoints: &[Waypoint],
        results: &mut RouteResults,
    ) -> Option<RouteResponse> {
        let request = match RouteRequest::from_waypoints(waypoints) {
            Ok(request) => request,
            Err(err) => {
                error!("route request not sent: {err}");
                return None;
            }
        };

        let response = self.fetch(&request)?;
        results.apply(&response);
        Some(response)
    }
}
