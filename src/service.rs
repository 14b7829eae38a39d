//! HTTP adapter for the PathPilot backend.
//!
//! Object-valued query parameters (`latLng`, `start`, `mid`, `end`) are sent
//! JSON-encoded, which is what the backend parses.

use serde::Deserialize;
use tracing::debug;

use crate::error::ServiceError;
use crate::route::{RouteRequest, RouteResponse};
use crate::traits::{LocationProvider, NearestPlace, RouteProvider};
use crate::waypoint::LatLng;

pub const DEFAULT_BASE_URL: &str = "https://pathpilot-back.vercel.app/api";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathPilotClient {
    config: ServiceConfig,
    client: reqwest::blocking::Client,
}

impl PathPilotClient {
    pub fn new(config: ServiceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T, ServiceError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = self.url(endpoint);
        debug!(%url, params = query.len(), "GET");
        let body = self
            .client
            .get(url)
            .query(query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<T>())?;
        Ok(body)
    }
}

impl LocationProvider for PathPilotClient {
    fn nearest(&self, at: LatLng) -> Result<NearestPlace, ServiceError> {
        let query = [("latLng", serde_json::to_string(&at)?)];
        let body: NearestResponse = self.get("nearest", &query)?;
        let place_id = body
            .place_id
            .filter(|id| !id.is_empty())
            .ok_or(ServiceError::MissingField("place_id"))?;

        Ok(NearestPlace {
            place_id,
            formatted_address: body.formatted_address,
        })
    }

    fn place_address(&self, place_id: &str, at: LatLng) -> Result<String, ServiceError> {
        let query = [
            ("latLng", serde_json::to_string(&at)?),
            ("placeId", place_id.to_string()),
        ];
        let body: MarkerResponse = self.get("marker", &query)?;
        body.result
            .and_then(|result| result.formatted_address)
            .ok_or(ServiceError::MissingField("result.formatted_address"))
    }
}

impl RouteProvider for PathPilotClient {
    fn route(&self, request: &RouteRequest) -> Result<RouteResponse, ServiceError> {
        self.get("route", &route_query(request)?)
    }
}

fn route_query(request: &RouteRequest) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
    let mut query = vec![("start", serde_json::to_string(&request.start)?)];
    if let Some(mid) = &request.mid {
        query.push(("mid", serde_json::to_string(mid)?));
    }
    query.push(("end", serde_json::to_string(&request.end)?));
    Ok(query)
}

#[derive(Debug, Deserialize)]
struct NearestResponse {
    place_id: Option<String>,
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarkerResponse {
    result: Option<MarkerResult>,
}

#[derive(Debug, Deserialize)]
struct MarkerResult {
    formatted_address: Option<String>,
}
