use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;
use wayroute_core::LocationPair;
use wayroute_directions::{Directions, Route, RouteStep, route_steps};

use crate::view_state::ViewState;

/// The readable fields of the route screen.
#[derive(Clone, Debug, Default)]
pub struct RouteSnapshot {
    pub state: ViewState,
    pub route: Option<Route>,
    pub steps: Vec<RouteStep>,
}

/// Orchestrates the route screen: one fetch for the pair it was created
/// with, no retry, no cancellation.
#[derive(Clone)]
pub struct RouteModel {
    directions: Arc<dyn Directions>,
    pair: LocationPair,
    snapshot: Arc<watch::Sender<RouteSnapshot>>,
}

impl RouteModel {
    pub fn new(directions: Arc<dyn Directions>, pair: LocationPair) -> Self {
        let (tx, _) = watch::channel(RouteSnapshot::default());
        Self {
            directions,
            pair,
            snapshot: Arc::new(tx),
        }
    }

    /// Constructs the model and starts loading right away, mirroring the
    /// screen being presented with its pair.
    pub fn start(directions: Arc<dyn Directions>, pair: LocationPair) -> Self {
        let model = Self::new(directions, pair);
        let task = model.clone();
        tokio::spawn(async move { task.load().await });
        model
    }

    pub async fn load(&self) {
        self.snapshot.send_modify(|s| s.state = ViewState::Loading);

        match self.directions.fetch_route(self.pair.start, self.pair.end).await {
            Ok(route) => {
                debug!("route loaded with {} raw steps", route.steps.len());
                self.snapshot.send_modify(|s| {
                    s.steps = route_steps(&route);
                    s.route = Some(route);
                    s.state = ViewState::Loaded;
                });
            }
            Err(err) => {
                self.snapshot.send_modify(|s| s.state = ViewState::Failed(err.to_string()));
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RouteSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> RouteSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> ViewState {
        self.snapshot.borrow().state.clone()
    }
}
