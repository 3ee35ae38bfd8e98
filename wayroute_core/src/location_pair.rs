use serde::{Deserialize, Serialize};

use crate::geopoint::GeoPoint;

/// Resolved start/end coordinates, created once both addresses geocode
/// successfully and carried as the payload of the route-screen transition.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct LocationPair {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl LocationPair {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }
}

impl PartialEq for LocationPair {
    fn eq(&self, other: &Self) -> bool {
        self.start.lat == other.start.lat
            && self.start.lng == other.start.lng
            && self.end.lat == other.end.lat
            && self.end.lng == other.end.lng
    }
}

impl Eq for LocationPair {}

impl std::hash::Hash for LocationPair {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.start.lat.to_bits());
        state.write_u64(self.start.lng.to_bits());
        state.write_u64(self.end.lat.to_bits());
        state.write_u64(self.end.lng.to_bits());
    }
}
