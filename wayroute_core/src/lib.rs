pub mod geopoint;
pub mod location_pair;

pub use geopoint::GeoPoint;
pub use location_pair::LocationPair;
