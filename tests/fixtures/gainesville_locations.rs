//! Gainesville, FL locations around the University of Florida campus.

use pathpilot::waypoint::LatLng;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const CENTURY_TOWER: Location = Location::new("Century Tower", 29.6488, -82.3433);
pub const BEN_HILL_GRIFFIN: Location = Location::new("Ben Hill Griffin Stadium", 29.6500, -82.3486);
pub const REITZ_UNION: Location = Location::new("Reitz Union", 29.6463, -82.3478);
pub const LIBRARY_WEST: Location = Location::new("Library West", 29.6508, -82.3429);
pub const SHANDS: Location = Location::new("UF Health Shands Hospital", 29.6403, -82.3443);

pub const CAMPUS: &[Location] = &[
    CENTURY_TOWER,
    BEN_HILL_GRIFFIN,
    REITZ_UNION,
    LIBRARY_WEST,
    SHANDS,
];

/// Address the mock lookup returns for a location.
pub fn address_of(location: &Location) -> String {
    format!("{}, Gainesville, FL 32611", location.name)
}
