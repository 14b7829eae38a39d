//! Resolved map locations.

use serde::{Deserialize, Serialize};

/// Label shown in place of an address the lookup could not resolve.
pub const UNRESOLVED_ADDRESS: &str = "no address! pick a better point :)";

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A location the user picked, together with what the lookup service knows about it.
///
/// Serialized with the field names the routing service expects
/// (`latLng`, `placeId`, `address`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub lat_lng: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default)]
    pub address: String,
}

impl Waypoint {
    pub fn new(lat_lng: LatLng, place_id: Option<String>, address: impl Into<String>) -> Self {
        Self {
            lat_lng,
            place_id,
            address: address.into(),
        }
    }

    /// A waypoint whose lookup has not run yet.
    pub fn unresolved(lat_lng: LatLng) -> Self {
        Self::new(lat_lng, None, String::new())
    }

    /// Address as displayed in the From/Stop/To fields.
    pub fn label(&self) -> &str {
        if self.address.is_empty() {
            UNRESOLVED_ADDRESS
        } else {
            &self.address
        }
    }

    /// Replaces a blank address with [`UNRESOLVED_ADDRESS`].
    pub fn with_fallback_address(mut self) -> Self {
        if self.address.trim().is_empty() {
            self.address = UNRESOLVED_ADDRESS.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_sentinel() {
        let waypoint = Waypoint::unresolved(LatLng::new(29.64, -82.35));
        assert_eq!(waypoint.label(), UNRESOLVED_ADDRESS);
    }

    #[test]
    fn test_with_fallback_address_keeps_real_address() {
        let waypoint = Waypoint::new(LatLng::new(29.64, -82.35), None, "A").with_fallback_address();
        assert_eq!(waypoint.address, "A");

        let blank = Waypoint::new(LatLng::new(29.64, -82.35), None, "  ").with_fallback_address();
        assert_eq!(blank.address, UNRESOLVED_ADDRESS);
    }

    #[test]
    fn test_serializes_with_service_field_names() {
        let waypoint = Waypoint::new(LatLng::new(29.64, -82.35), Some("abc".into()), "A");
        let json = serde_json::to_value(&waypoint).unwrap();
        assert_eq!(json["latLng"]["lat"], 29.64);
        assert_eq!(json["placeId"], "abc");
        assert_eq!(json["address"], "A");

        let without_id = serde_json::to_value(Waypoint::unresolved(LatLng::new(1.0, 2.0))).unwrap();
        assert!(without_id.get("placeId").is_none());
    }

    #[test]
    fn test_is_finite() {
        assert!(LatLng::new(1.0, 2.0).is_finite());
        assert!(!LatLng::new(f64::NAN, 2.0).is_finite());
        assert!(!LatLng::new(1.0, f64::INFINITY).is_finite());
    }
}
