//! pathpilot route-planning client core
//!
//! Waypoint slot assignment, route requests against the PathPilot backend,
//! and encoded overlays for the returned routes. The map widget, geocoder,
//! and search algorithms live elsewhere; this crate decides what goes where.

pub mod config;
pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod polyline;
pub mod presentation;
pub mod resolver;
pub mod route;
pub mod service;
pub mod slots;
pub mod traits;
pub mod waypoint;
