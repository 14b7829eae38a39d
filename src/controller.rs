//! The planner: sole owner of waypoint, route, and display state.
//!
//! Both lookups and route requests are split in two. `begin_*` hands out a
//! ticket, the slow call runs wherever the caller likes, and `complete_*`
//! applies the result only if no newer request was started in between. A
//! late answer for an old click therefore cannot overwrite a newer one.

use tracing::{debug, info};

use crate::error::{GeometryError, RouteRequestError};
use crate::orchestrator::RouteOrchestrator;
use crate::presentation::{Overlay, RouteStatus, TimingRow, Visibility, render_overlays, timing_rows};
use crate::resolver::{LocationResolver, MapClick, PlaceSelection};
use crate::route::{Algorithm, RouteRequest, RouteResponse, RouteResults};
use crate::slots::{MarkerWindow, Slot, SlotState};
use crate::traits::{LocationProvider, RouteProvider};
use crate::waypoint::Waypoint;

/// Issued when a lookup starts; redeemed with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ResolveTicket {
    seq: u64,
    target: Option<Slot>,
}

/// Issued when a route request starts; carries the request to send.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct RouteTicket {
    seq: u64,
    pub request: RouteRequest,
}

/// What happened to a completed lookup or route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The result carried nothing usable (no address, disabled slot, failed request).
    Ignored,
    /// A newer request was started after this one.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Planner {
    slots: SlotState,
    markers: MarkerWindow,
    results: RouteResults,
    visibility: Visibility,
    status: RouteStatus,
    resolve_seq: u64,
    route_seq: u64,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    pub fn new() -> Self {
        let slots = SlotState::new(false);
        Self {
            markers: MarkerWindow::new(slots.capacity()),
            slots,
            results: RouteResults::default(),
            visibility: Visibility::default(),
            status: RouteStatus::Idle,
            resolve_seq: 0,
            route_seq: 0,
        }
    }

    pub fn slots(&self) -> &SlotState {
        &self.slots
    }

    pub fn markers(&self) -> &MarkerWindow {
        &self.markers
    }

    pub fn results(&self) -> &RouteResults {
        &self.results
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn status(&self) -> RouteStatus {
        self.status
    }

    pub fn stop_enabled(&self) -> bool {
        self.slots.stop_enabled()
    }

    /// Shows or hides the stop field.
    pub fn set_stop_enabled(&mut self, enabled: bool) {
        if enabled == self.slots.stop_enabled() {
            return;
        }
        let had_stop = self.slots.get(Slot::Stop).is_some();
        self.slots = self.slots.with_stop_enabled(enabled);
        self.markers.resize(self.slots.capacity());
        if had_stop {
            self.invalidate_routes();
        }
        debug!(enabled, "stop slot toggled");
    }

    pub fn toggle_overlay(&mut self, algorithm: Algorithm) -> bool {
        self.visibility.toggle(algorithm)
    }

    /// Starts a lookup. Any lookup started earlier becomes stale.
    pub fn begin_resolution(&mut self, target: Option<Slot>) -> ResolveTicket {
        self.resolve_seq += 1;
        ResolveTicket {
            seq: self.resolve_seq,
            target,
        }
    }

    /// Places a resolved waypoint, unless a newer lookup has started.
    pub fn complete_resolution(&mut self, ticket: ResolveTicket, waypoint: Waypoint) -> Applied {
        if ticket.seq != self.resolve_seq {
            debug!(ticket = ticket.seq, latest = self.resolve_seq, "discarding stale resolution");
            return Applied::Stale;
        }
        let Some(next) = self.slots.assign(waypoint.clone(), ticket.target) else {
            debug!(slot = ?ticket.target, "selection ignored");
            return Applied::Ignored;
        };
        self.slots = next;
        self.markers.push(waypoint);
        self.invalidate_routes();
        Applied::Applied
    }

    /// Resolves and places a map click.
    pub fn on_map_click<P: LocationProvider>(
        &mut self,
        resolver: &LocationResolver<P>,
        click: &MapClick,
    ) -> Applied {
        let ticket = self.begin_resolution(None);
        let waypoint = resolver.resolve_click(click);
        self.complete_resolution(ticket, waypoint)
    }

    /// Places an autocomplete selection into the field it was made in.
    pub fn on_place_select<P: LocationProvider>(
        &mut self,
        resolver: &LocationResolver<P>,
        place: &PlaceSelection,
        field: Slot,
    ) -> Applied {
        let ticket = self.begin_resolution(Some(field));
        let waypoint = resolver.resolve_place(place);
        self.complete_resolution(ticket, waypoint)
    }

    /// Waypoints in route order: origin, stop (if enabled), destination.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.slots.ordered().into_iter().cloned().collect()
    }

    /// Starts a route request for the current waypoints.
    pub fn begin_route(&mut self) -> Result<RouteTicket, RouteRequestError> {
        let request = RouteRequest::from_waypoints(&self.waypoints())?;
        self.route_seq += 1;
        self.status = RouteStatus::Pending;
        Ok(RouteTicket {
            seq: self.route_seq,
            request,
        })
    }

    /// Stores a route response, unless the waypoints changed or another
    /// request started since the ticket was issued. `None` marks a failed
    /// request and keeps the previous results.
    pub fn complete_route(&mut self, ticket: RouteTicket, response: Option<RouteResponse>) -> Applied {
        if ticket.seq != self.route_seq {
            debug!(ticket = ticket.seq, latest = self.route_seq, "discarding stale route");
            return Applied::Stale;
        }
        match response {
            Some(response) => {
                self.results.apply(&response);
                self.status = if response.is_empty() {
                    RouteStatus::NoRoute
                } else {
                    RouteStatus::Found
                };
                info!(status = ?self.status, "route results updated");
                Applied::Applied
            }
            None => {
                self.status = RouteStatus::Failed;
                Applied::Ignored
            }
        }
    }

    /// Runs "Find Route" to completion and returns the service payload.
    ///
    /// Fails without sending anything when origin or destination is unset.
    /// `Ok(None)` means the request was sent and failed; see [`Self::status`].
    pub fn find_route<R: RouteProvider>(
        &mut self,
        orchestrator: &RouteOrchestrator<R>,
    ) -> Result<Option<RouteResponse>, RouteRequestError> {
        let ticket = self.begin_route()?;
        let response = orchestrator.fetch(&ticket.request);
        self.complete_route(ticket, response.clone());
        Ok(response)
    }

    pub fn overlays(&self) -> Result<Vec<Overlay>, GeometryError> {
        render_overlays(&self.results, &self.visibility)
    }

    pub fn timings(&self) -> Vec<TimingRow> {
        timing_rows(&self.results, &self.visibility)
    }

    // The waypoint set changed: drop routes and any request still in flight.
    fn invalidate_routes(&mut self) {
        self.results.reset();
        self.route_seq += 1;
        self.status = RouteStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::{LatLng, UNRESOLVED_ADDRESS};

    fn wp(name: &str) -> Waypoint {
        Waypoint::new(LatLng::new(29.64, -82.35), None, name)
    }

    fn response() -> RouteResponse {
        RouteResponse {
            dijkstra: vec![(29.64, -82.35), (29.65, -82.34)],
            dijkstra_time: 12,
            a_star: vec![(29.64, -82.35), (29.65, -82.34)],
            a_star_time: 8,
            bfs: vec![(29.64, -82.35), (29.65, -82.34)],
            bfs_time: 30,
        }
    }

    fn with_route() -> Planner {
        let mut planner = Planner::new();
        for name in ["A", "B"] {
            let ticket = planner.begin_resolution(None);
            planner.complete_resolution(ticket, wp(name));
        }
        let ticket = planner.begin_route().unwrap();
        assert_eq!(planner.complete_route(ticket, Some(response())), Applied::Applied);
        planner
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let mut planner = Planner::new();
        let first = planner.begin_resolution(None);
        let second = planner.begin_resolution(None);

        assert_eq!(planner.complete_resolution(second, wp("second")), Applied::Applied);
        assert_eq!(planner.complete_resolution(first, wp("first")), Applied::Stale);
        assert_eq!(planner.slots().text(Slot::Origin), "second");
        assert_eq!(planner.markers().len(), 1);
    }

    #[test]
    fn test_empty_address_ignored_without_side_effects() {
        let mut planner = with_route();
        let ticket = planner.begin_resolution(None);
        let blank = Waypoint::unresolved(LatLng::new(0.0, 0.0));
        assert_eq!(planner.complete_resolution(ticket, blank), Applied::Ignored);
        assert_eq!(planner.results().get(Algorithm::Bfs).elapsed_ms, 30);
    }

    #[test]
    fn test_sentinel_address_is_placed() {
        let mut planner = Planner::new();
        let ticket = planner.begin_resolution(None);
        let waypoint = Waypoint::unresolved(LatLng::new(0.0, 0.0)).with_fallback_address();
        assert_eq!(planner.complete_resolution(ticket, waypoint), Applied::Applied);
        assert_eq!(planner.slots().text(Slot::Origin), UNRESOLVED_ADDRESS);
    }

    #[test]
    fn test_new_selection_resets_routes() {
        let mut planner = with_route();
        assert_eq!(planner.status(), RouteStatus::Found);

        let ticket = planner.begin_resolution(None);
        planner.complete_resolution(ticket, wp("C"));
        assert_eq!(planner.results(), &RouteResults::default());
        assert_eq!(planner.status(), RouteStatus::Idle);
    }

    #[test]
    fn test_route_for_old_waypoints_is_stale() {
        let mut planner = Planner::new();
        for name in ["A", "B"] {
            let ticket = planner.begin_resolution(None);
            planner.complete_resolution(ticket, wp(name));
        }
        let route = planner.begin_route().unwrap();
        let click = planner.begin_resolution(None);
        planner.complete_resolution(click, wp("C"));

        assert_eq!(planner.complete_route(route, Some(response())), Applied::Stale);
        assert_eq!(planner.results(), &RouteResults::default());
    }

    #[test]
    fn test_failed_route_keeps_previous_results() {
        let mut planner = with_route();
        let before = planner.results().clone();

        let ticket = planner.begin_route().unwrap();
        assert_eq!(planner.complete_route(ticket, None), Applied::Ignored);
        assert_eq!(planner.results(), &before);
        assert_eq!(planner.status(), RouteStatus::Failed);
        assert_eq!(planner.overlays().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_response_reports_no_route() {
        let mut planner = with_route();
        let ticket = planner.begin_route().unwrap();
        let empty = RouteResponse {
            dijkstra: vec![],
            dijkstra_time: 3,
            a_star: vec![],
            a_star_time: 2,
            bfs: vec![],
            bfs_time: 9,
        };
        planner.complete_route(ticket, Some(empty));
        assert_eq!(planner.status(), RouteStatus::NoRoute);
        assert!(planner.overlays().unwrap().is_empty());
    }

    #[test]
    fn test_find_route_reports_missing_waypoints() {
        struct Unreachable;
        impl RouteProvider for Unreachable {
            fn route(&self, _: &RouteRequest) -> Result<RouteResponse, crate::error::ServiceError> {
                panic!("no request expected");
            }
        }

        let mut planner = Planner::new();
        let ticket = planner.begin_resolution(None);
        planner.complete_resolution(ticket, wp("A"));
        let orchestrator = RouteOrchestrator::new(Unreachable);
        assert_eq!(
            planner.find_route(&orchestrator),
            Err(RouteRequestError::WaypointCount(1))
        );
        assert_eq!(planner.status(), RouteStatus::Idle);
    }

    #[test]
    fn test_begin_route_needs_origin_and_destination() {
        let mut planner = Planner::new();
        let ticket = planner.begin_resolution(None);
        planner.complete_resolution(ticket, wp("A"));
        assert_eq!(planner.begin_route(), Err(RouteRequestError::WaypointCount(1)));
        assert_eq!(planner.status(), RouteStatus::Idle);
    }

    #[test]
    fn test_disabling_stop_trims_markers_and_discards_stop() {
        let mut planner = Planner::new();
        planner.set_stop_enabled(true);
        for name in ["A", "B", "C"] {
            let ticket = planner.begin_resolution(None);
            planner.complete_resolution(ticket, wp(name));
        }
        assert_eq!(planner.markers().len(), 3);
        assert_eq!(planner.waypoints().len(), 3);

        planner.set_stop_enabled(false);
        assert_eq!(planner.markers().len(), 2);
        assert_eq!(planner.slots().text(Slot::Stop), "");
        let names: Vec<_> = planner.waypoints().into_iter().map(|w| w.address).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_toggle_overlay_keeps_results() {
        let mut planner = with_route();
        assert!(!planner.toggle_overlay(Algorithm::Bfs));
        assert_eq!(planner.results().get(Algorithm::Bfs).elapsed_ms, 30);
        let shown: Vec<_> = planner.overlays().unwrap().iter().map(|o| o.algorithm).collect();
        assert_eq!(shown, vec![Algorithm::Dijkstra, Algorithm::AStar]);
    }
}
