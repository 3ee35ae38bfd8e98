pub mod directions;
pub mod osrm;
pub mod route;

pub use directions::{Directions, DirectionsError};
pub use osrm::{OsrmDirectionsClient, OsrmDirectionsClientParams};
pub use route::{Route, RouteStep, Step, route_steps};
