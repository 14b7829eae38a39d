//! Route requests, responses, and per-algorithm results.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::RouteRequestError;
use crate::waypoint::Waypoint;

/// One coordinate pair in the order the routing service returns it.
pub type RoutePoint = (f64, f64);

/// The search algorithms the routing service runs on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    AStar,
    Bfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Bfs];

    /// Field name in the routing service response.
    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "aStar",
            Algorithm::Bfs => "bfs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's",
            Algorithm::AStar => "A*",
            Algorithm::Bfs => "BFS",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Algorithm::Dijkstra => 0,
            Algorithm::AStar => 1,
            Algorithm::Bfs => 2,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Waypoints keyed by role, as sent to the routing service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    pub start: Waypoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<Waypoint>,
    pub end: Waypoint,
}

impl RouteRequest {
    /// Builds a request from an ordered list: origin, optional stop, destination.
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Result<Self, RouteRequestError> {
        match waypoints {
            [start, end] => Ok(Self {
                start: start.clone(),
                mid: None,
                end: end.clone(),
            }),
            [start, mid, end] => Ok(Self {
                start: start.clone(),
                mid: Some(mid.clone()),
                end: end.clone(),
            }),
            _ => Err(RouteRequestError::WaypointCount(waypoints.len())),
        }
    }
}

/// Routing service response: one path and one timing per algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub dijkstra: Vec<RoutePoint>,
    #[serde(deserialize_with = "elapsed_ms")]
    pub dijkstra_time: u64,
    #[serde(alias = "astar")]
    pub a_star: Vec<RoutePoint>,
    #[serde(alias = "astarTime", deserialize_with = "elapsed_ms")]
    pub a_star_time: u64,
    pub bfs: Vec<RoutePoint>,
    #[serde(deserialize_with = "elapsed_ms")]
    pub bfs_time: u64,
}

impl RouteResponse {
    pub fn points(&self, algorithm: Algorithm) -> &[RoutePoint] {
        match algorithm {
            Algorithm::Dijkstra => &self.dijkstra,
            Algorithm::AStar => &self.a_star,
            Algorithm::Bfs => &self.bfs,
        }
    }

    pub fn elapsed_ms(&self, algorithm: Algorithm) -> u64 {
        match algorithm {
            Algorithm::Dijkstra => self.dijkstra_time,
            Algorithm::AStar => self.a_star_time,
            Algorithm::Bfs => self.bfs_time,
        }
    }

    /// True when no algorithm produced a drawable path.
    pub fn is_empty(&self) -> bool {
        Algorithm::ALL
            .iter()
            .all(|algorithm| self.points(*algorithm).len() < 2)
    }
}

// Timings may arrive as fractional milliseconds.
fn elapsed_ms<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value.round() as u64)
    } else {
        Err(de::Error::custom(format!("invalid elapsed time {value}")))
    }
}

/// One algorithm's path and reported computation time.
///
/// `elapsed_ms == 0` means not computed yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteResult {
    pub points: Vec<RoutePoint>,
    pub elapsed_ms: u64,
}

impl RouteResult {
    pub fn is_computed(&self) -> bool {
        self.elapsed_ms > 0 || !self.points.is_empty()
    }
}

/// Results for every registered algorithm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteResults {
    results: [RouteResult; 3],
}

impl RouteResults {
    pub fn get(&self, algorithm: Algorithm) -> &RouteResult {
        &self.results[algorithm.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &RouteResult)> {
        Algorithm::ALL
            .into_iter()
            .map(move |algorithm| (algorithm, self.get(algorithm)))
    }

    /// Replaces every algorithm's result from one response.
    pub fn apply(&mut self, response: &RouteResponse) {
        self.results = Algorithm::ALL.map(|algorithm| RouteResult {
            points: response.points(algorithm).to_vec(),
            elapsed_ms: response.elapsed_ms(algorithm),
        });
    }

    pub fn reset(&mut self) {
        self.results = Default::default();
    }
}
