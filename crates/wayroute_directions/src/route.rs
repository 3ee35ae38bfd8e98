use serde::{Deserialize, Serialize};
use wayroute_core::GeoPoint;

/// A driving route as returned by the directions provider: the overall
/// path plus the raw instructional steps, in travel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Total length in meters.
    pub distance: f64,

    /// Total travel time in seconds.
    pub duration: f64,

    pub geometry: Vec<GeoPoint>,

    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,

    /// Step length in meters.
    pub distance: f64,

    pub geometry: Vec<GeoPoint>,
}

/// A displayable turn-by-turn step with its marker location.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
    pub distance: f64,
    pub location: GeoPoint,
    pub geometry: Vec<GeoPoint>,
}

/// Derives the displayable steps of a route.
///
/// Steps without an instruction or without geometry are dropped; the
/// marker location of a retained step is the first coordinate of its
/// path segment.
pub fn route_steps(route: &Route) -> Vec<RouteStep> {
    route
        .steps
        .iter()
        .filter(|step| !step.instruction.is_empty())
        .filter_map(|step| {
            let location = *step.geometry.first()?;

            Some(RouteStep {
                instruction: step.instruction.clone(),
                distance: step.distance,
                location,
                geometry: step.geometry.clone(),
            })
        })
        .collect()
}
