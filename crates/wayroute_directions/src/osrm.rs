use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use wayroute_core::GeoPoint;

use crate::directions::{Directions, DirectionsError};
use crate::route::{Route, Step};

/// Travel mode is fixed to automobile.
pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/driving/";

pub const OSRM_API_URL: &str = "https://router.project-osrm.org";

const OSRM_URL_ENV_VAR: &str = "WAYROUTE_OSRM_URL";

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    legs: Vec<OsrmLeg>,
}

#[derive(Deserialize)]
struct OsrmLeg {
    steps: Vec<OsrmStep>,
}

#[derive(Deserialize)]
struct OsrmStep {
    distance: f64,
    name: String,
    geometry: OsrmGeometry,
    maneuver: OsrmManeuver,
}

#[derive(Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    modifier: Option<String>,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: [lng, lat].
    coordinates: Vec<[f64; 2]>,
}

fn to_points(geometry: OsrmGeometry) -> Vec<GeoPoint> {
    geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| GeoPoint::new(lat, lng))
        .collect()
}

fn maneuver_verb(kind: &str) -> Option<&'static str> {
    match kind {
        "turn" | "end of road" => Some("Turn"),
        "continue" | "new name" => Some("Continue"),
        "merge" => Some("Merge"),
        "fork" => Some("Keep"),
        "on ramp" => Some("Take the ramp"),
        "off ramp" => Some("Take the exit"),
        "roundabout" | "rotary" => Some("Take the roundabout"),
        _ => None,
    }
}

/// OSRM returns no prose, only a maneuver type/modifier and a road name.
/// Unknown maneuvers map to an empty instruction and are later filtered
/// out of the displayable steps.
fn build_instruction(step: &OsrmStep) -> String {
    let name = step.name.trim();

    match step.maneuver.kind.as_str() {
        "depart" if name.is_empty() => String::from("Head out"),
        "depart" => format!("Head out on {name}"),
        "arrive" => String::from("Arrive at destination"),
        kind => {
            let Some(verb) = maneuver_verb(kind) else {
                return String::new();
            };

            let mut instruction = String::from(verb);
            if let Some(modifier) = step.maneuver.modifier.as_deref() {
                instruction.push(' ');
                instruction.push_str(modifier);
            }
            if !name.is_empty() {
                instruction.push_str(" onto ");
                instruction.push_str(name);
            }
            instruction
        }
    }
}

fn to_route(osrm: OsrmRoute) -> Route {
    let steps = osrm
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(|step| Step {
            instruction: build_instruction(&step),
            distance: step.distance,
            geometry: to_points(step.geometry),
        })
        .collect();

    Route {
        distance: osrm.distance,
        duration: osrm.duration,
        geometry: to_points(osrm.geometry),
        steps,
    }
}

pub struct OsrmDirectionsClientParams {
    pub osrm_url: String,
}

impl Default for OsrmDirectionsClientParams {
    fn default() -> Self {
        Self {
            osrm_url: std::env::var(OSRM_URL_ENV_VAR)
                .unwrap_or_else(|_| String::from(OSRM_API_URL)),
        }
    }
}

pub struct OsrmDirectionsClient {
    params: OsrmDirectionsClientParams,
    client: reqwest::Client,
}

impl OsrmDirectionsClient {
    pub fn new(params: OsrmDirectionsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }
}

impl Default for OsrmDirectionsClient {
    fn default() -> Self {
        Self::new(OsrmDirectionsClientParams::default())
    }
}

#[async_trait]
impl Directions for OsrmDirectionsClient {
    async fn fetch_route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route, DirectionsError> {
        let mut url = self.params.osrm_url.clone();
        url.push_str(OSRM_ROUTE_API_PATH);

        for (i, point) in [from, to].iter().enumerate() {
            let point: geo_types::Point = point.into();
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i == 0 {
                url.push(';');
            }
        }

        debug!("OSRM: requesting route {:?} -> {:?}", from, to);

        let response = self
            .client
            .get(url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api { status, message });
        }

        let body: OsrmRouteResponse = response.json().await?;

        match body.code.as_str() {
            "Ok" => {}
            "NoRoute" => return Err(DirectionsError::NoRouteFound),
            code => {
                return Err(DirectionsError::Api {
                    status: 200,
                    message: format!("{}: {}", code, body.message.unwrap_or_default()),
                });
            }
        }

        match body.routes.into_iter().next() {
            Some(route) => Ok(to_route(route)),
            None => Err(DirectionsError::NoRouteFound),
        }
    }
}
