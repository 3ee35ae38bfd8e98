//! Hand-rolled service doubles for model tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use wayroute_core::{GeoPoint, LocationPair};
use wayroute_directions::{Directions, DirectionsError, Route, Step};
use wayroute_geocoding::{AddressCompleter, Geocoder, GeocodingError};

use crate::coordinator::Coordinator;

pub struct StaticGeocoder {
    places: Vec<(String, GeoPoint)>,
    pub calls: AtomicUsize,
}

impl StaticGeocoder {
    pub fn with(places: &[(&str, GeoPoint)]) -> Arc<Self> {
        Arc::new(Self {
            places: places
                .iter()
                .map(|(name, point)| (String::from(*name), *point))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.places
            .iter()
            .find(|(name, _)| name == address)
            .map(|(_, point)| *point)
            .ok_or(GeocodingError::NotFound)
    }
}

pub struct StaticCompleter {
    items: Vec<String>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl StaticCompleter {
    pub fn with(items: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            items: items.into_iter().map(String::from).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            items: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AddressCompleter for StaticCompleter {
    async fn complete(&self, _query: &str) -> Result<Vec<String>, GeocodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeocodingError::Api {
                status: 500,
                message: String::from("boom"),
            });
        }
        Ok(self.items.clone())
    }
}

/// Answers each known query after its configured delay, for exercising
/// out-of-order delivery.
pub struct DelayedCompleter {
    entries: Vec<(String, Duration, Vec<String>)>,
}

impl DelayedCompleter {
    pub fn with(entries: Vec<(&str, Duration, Vec<&str>)>) -> Arc<Self> {
        Arc::new(Self {
            entries: entries
                .into_iter()
                .map(|(query, delay, items)| {
                    (
                        String::from(query),
                        delay,
                        items.into_iter().map(String::from).collect(),
                    )
                })
                .collect(),
        })
    }
}

#[async_trait]
impl AddressCompleter for DelayedCompleter {
    async fn complete(&self, query: &str) -> Result<Vec<String>, GeocodingError> {
        match self.entries.iter().find(|(q, _, _)| q == query) {
            Some((_, delay, items)) => {
                tokio::time::sleep(*delay).await;
                Ok(items.clone())
            }
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Default)]
pub struct RecordingCoordinator {
    pub shown: Mutex<Vec<LocationPair>>,
    pub presented: Mutex<Vec<LocationPair>>,
}

impl Coordinator for RecordingCoordinator {
    fn show_route_map(&self, pair: LocationPair) {
        self.shown.lock().unwrap().push(pair);
    }

    fn present_route_map(&self, pair: LocationPair) {
        self.presented.lock().unwrap().push(pair);
    }
}

enum DirectionsOutcome {
    Route(Route),
    Error(fn() -> DirectionsError),
}

pub struct RecordingDirections {
    outcome: DirectionsOutcome,
    pub requests: Mutex<Vec<(GeoPoint, GeoPoint)>>,
}

impl RecordingDirections {
    pub fn ok(route: Route) -> Arc<Self> {
        Arc::new(Self {
            outcome: DirectionsOutcome::Route(route),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn err(factory: fn() -> DirectionsError) -> Arc<Self> {
        Arc::new(Self {
            outcome: DirectionsOutcome::Error(factory),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Directions for RecordingDirections {
    async fn fetch_route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route, DirectionsError> {
        self.requests.lock().unwrap().push((from, to));
        match &self.outcome {
            DirectionsOutcome::Route(route) => Ok(route.clone()),
            DirectionsOutcome::Error(factory) => Err(factory()),
        }
    }
}

/// Holds every request until released, so a test can observe the
/// loading state in between.
pub struct GatedDirections {
    route: Route,
    gate: Notify,
}

impl GatedDirections {
    pub fn new(route: Route) -> Arc<Self> {
        Arc::new(Self {
            route,
            gate: Notify::new(),
        })
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Directions for GatedDirections {
    async fn fetch_route(&self, _from: GeoPoint, _to: GeoPoint) -> Result<Route, DirectionsError> {
        self.gate.notified().await;
        Ok(self.route.clone())
    }
}

pub fn sample_route() -> Route {
    Route {
        distance: 67231.4,
        duration: 3105.9,
        geometry: vec![
            GeoPoint::new(32.0853, 34.7818),
            GeoPoint::new(31.7683, 35.2137),
        ],
        steps: vec![
            Step {
                instruction: String::from("Head out on Allenby"),
                distance: 250.0,
                geometry: vec![GeoPoint::new(32.0853, 34.7818)],
            },
            Step {
                instruction: String::new(),
                distance: 0.0,
                geometry: vec![GeoPoint::new(32.0, 34.9)],
            },
            Step {
                instruction: String::from("Arrive at destination"),
                distance: 0.0,
                geometry: vec![GeoPoint::new(31.7683, 35.2137)],
            },
        ],
    }
}
