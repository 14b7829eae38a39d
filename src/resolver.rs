//! Turns raw selections into waypoints.
//!
//! Resolution never fails outright: when a lookup errors the waypoint keeps
//! its coordinates and falls back to the unresolved-address label.

use tracing::{debug, warn};

use crate::traits::LocationProvider;
use crate::waypoint::{LatLng, Waypoint};

/// A place picked from the autocomplete dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSelection {
    pub lat_lng: LatLng,
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
}

/// A click on the map: raw coordinates, plus a place id when the click
/// landed on a labelled point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct MapClick {
    pub lat_lng: LatLng,
    pub place_id: Option<String>,
}

impl MapClick {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat_lng: LatLng::new(lat, lng),
            place_id: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocationResolver<P> {
    provider: P,
}

impl<P: LocationProvider> LocationResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolves a map click through the lookup service.
    ///
    /// Without a place id the nearest indexed place is looked up first; the
    /// canonical address is then fetched for whichever place id is known.
    pub fn resolve_click(&self, click: &MapClick) -> Waypoint {
        let mut waypoint = Waypoint::new(click.lat_lng, click.place_id.clone(), String::new());

        if waypoint.place_id.is_none() {
            match self.provider.nearest(click.lat_lng) {
                Ok(nearest) => {
                    waypoint.place_id = Some(nearest.place_id);
                    waypoint.address = nearest.formatted_address.unwrap_or_default();
                }
                Err(err) => {
                    warn!(lat = click.lat_lng.lat, lng = click.lat_lng.lng, "nearest place lookup failed: {err}");
                    return waypoint.with_fallback_address();
                }
            }
        }

        if let Some(place_id) = waypoint.place_id.as_deref() {
            match self.provider.place_address(place_id, click.lat_lng) {
                Ok(address) => waypoint.address = address,
                Err(err) => warn!(place_id, "address lookup failed: {err}"),
            }
        }

        debug!(address = %waypoint.address, "resolved map click");
        waypoint.with_fallback_address()
    }

    /// Autocomplete selections already carry their address; no lookup runs.
    pub fn resolve_place(&self, place: &PlaceSelection) -> Waypoint {
        Waypoint::new(
            place.lat_lng,
            place.place_id.clone(),
            place.formatted_address.clone().unwrap_or_default(),
        )
        .with_fallback_address()
    }
}
