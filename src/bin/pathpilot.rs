use anyhow::{Context, bail};
use clap::Parser;
use tracing::{Level, debug, info};

use pathpilot::config::AppConfig;
use pathpilot::controller::{Applied, Planner};
use pathpilot::orchestrator::RouteOrchestrator;
use pathpilot::presentation::pin_label;
use pathpilot::resolver::{LocationResolver, MapClick, PlaceSelection};
use pathpilot::service::PathPilotClient;
use pathpilot::slots::Slot;
use pathpilot::waypoint::LatLng;

/// Plan a route by clicking points, without the map.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Map clicks as `lat,lng`, applied in order.
    #[arg(required = true, value_parser = parse_click)]
    clicks: Vec<MapClick>,

    /// Autocomplete picks as `FIELD=lat,lng,address`, where FIELD is
    /// 1 (From), 2 (To) or 3 (Stop). Applied after the clicks.
    #[arg(long = "select", value_parser = parse_selection)]
    selections: Vec<FieldSelection>,

    /// Enable the intermediate stop.
    #[arg(short, long)]
    stop: bool,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Clone)]
struct FieldSelection {
    slot: Slot,
    place: PlaceSelection,
}

fn parse_lat_lng(lat: &str, lng: &str) -> Result<LatLng, String> {
    let lat: f64 = lat.trim().parse().map_err(|err| format!("latitude: {err}"))?;
    let lng: f64 = lng.trim().parse().map_err(|err| format!("longitude: {err}"))?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(format!("non-finite coordinate {lat},{lng}"));
    }
    Ok(LatLng::new(lat, lng))
}

fn parse_click(value: &str) -> Result<MapClick, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got {value:?}"))?;
    let at = parse_lat_lng(lat, lng)?;
    Ok(MapClick::at(at.lat, at.lng))
}

fn parse_selection(value: &str) -> Result<FieldSelection, String> {
    let (field, rest) = value
        .split_once('=')
        .ok_or_else(|| format!("expected `FIELD=lat,lng,address`, got {value:?}"))?;
    let slot = field
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Slot::from_field_id)
        .ok_or_else(|| format!("unknown field {field:?}, expected 1, 2 or 3"))?;
    let mut parts = rest.splitn(3, ',');
    let (Some(lat), Some(lng)) = (parts.next(), parts.next()) else {
        return Err(format!("expected `lat,lng[,address]`, got {rest:?}"));
    };
    Ok(FieldSelection {
        slot,
        place: PlaceSelection {
            lat_lng: parse_lat_lng(lat, lng)?,
            place_id: None,
            formatted_address: parts.next().map(|address| address.trim().to_string()),
        },
    })
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    debug!(center = ?config.map.center, zoom = config.map.zoom, "map settings");

    let client = PathPilotClient::new(config.service.clone()).context("building HTTP client")?;
    let resolver = LocationResolver::new(&client);
    let orchestrator = RouteOrchestrator::new(&client);

    let mut planner = Planner::new();
    planner.set_stop_enabled(cli.stop);
    for click in &cli.clicks {
        if planner.on_map_click(&resolver, click) != Applied::Applied {
            info!(lat = click.lat_lng.lat, lng = click.lat_lng.lng, "click not placed");
        }
    }

    for selection in &cli.selections {
        if planner.on_place_select(&resolver, &selection.place, selection.slot) != Applied::Applied {
            info!(slot = ?selection.slot, "selection not placed");
        }
    }

    for (index, marker) in planner.markers().iter().enumerate() {
        println!("{} {}", pin_label(index), marker.label());
    }

    if planner.find_route(&orchestrator)?.is_none() {
        bail!("{}", planner.status().message());
    }
    println!("{}", planner.status().message());

    for row in planner.timings().into_iter().filter(|row| row.computed) {
        println!("{:<12} {}", row.label, row.elapsed);
    }
    for overlay in planner.overlays()? {
        println!("{} {} {}", overlay.algorithm, overlay.style.color, overlay.path);
    }

    Ok(())
}
