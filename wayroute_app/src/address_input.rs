use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;
use wayroute_core::LocationPair;
use wayroute_geocoding::{AddressCompleter, Geocoder, GeocodingError};

use crate::coordinator::Coordinator;
use crate::suggestions::{SuggestionBatch, SuggestionFeed};
use crate::view_state::ViewState;

/// How long a failure message stays up before clearing back to idle.
pub const ERROR_CLEAR_DELAY: Duration = Duration::from_secs(4);

/// The readable fields of the address-entry screen. Republished as a
/// whole on every mutation through a single watch channel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddressInputSnapshot {
    pub start_address: String,
    pub end_address: String,
    pub start_suggestions: Vec<String>,
    pub end_suggestions: Vec<String>,
    pub is_valid: bool,
    pub state: ViewState,
}

/// Orchestrates the address-entry screen: field edits, live suggestions,
/// validity, and the submit workflow that hands a [`LocationPair`] to
/// the coordinator once both addresses resolve.
pub struct AddressInputModel {
    coordinator: Arc<dyn Coordinator>,
    geocoder: Arc<dyn Geocoder>,
    snapshot: Arc<watch::Sender<AddressInputSnapshot>>,
    start_feed: SuggestionFeed,
    end_feed: SuggestionFeed,
    error_epoch: Arc<AtomicU64>,
}

impl AddressInputModel {
    pub fn new(
        coordinator: Arc<dyn Coordinator>,
        geocoder: Arc<dyn Geocoder>,
        completer: Arc<dyn AddressCompleter>,
    ) -> Self {
        let (tx, _) = watch::channel(AddressInputSnapshot::default());
        let snapshot = Arc::new(tx);

        let start_feed = SuggestionFeed::spawn(completer.clone());
        let end_feed = SuggestionFeed::spawn(completer);

        forward_suggestions(start_feed.subscribe(), snapshot.clone(), |s, items| {
            s.start_suggestions = items;
        });
        forward_suggestions(end_feed.subscribe(), snapshot.clone(), |s, items| {
            s.end_suggestions = items;
        });

        Self {
            coordinator,
            geocoder,
            snapshot,
            start_feed,
            end_feed,
            error_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AddressInputSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> AddressInputSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn is_valid(&self) -> bool {
        self.snapshot.borrow().is_valid
    }

    pub fn state(&self) -> ViewState {
        self.snapshot.borrow().state.clone()
    }

    pub fn set_start_address(&self, text: impl Into<String>) {
        let text = text.into();
        self.start_feed.update(text.clone());
        self.snapshot.send_if_modified(|s| {
            if s.start_address == text {
                return false;
            }
            s.start_address = text;
            s.is_valid = !s.start_address.is_empty() && !s.end_address.is_empty();
            true
        });
    }

    pub fn set_end_address(&self, text: impl Into<String>) {
        let text = text.into();
        self.end_feed.update(text.clone());
        self.snapshot.send_if_modified(|s| {
            if s.end_address == text {
                return false;
            }
            s.end_address = text;
            s.is_valid = !s.start_address.is_empty() && !s.end_address.is_empty();
            true
        });
    }

    /// Geocodes both addresses and, on success, activates the route
    /// screen with the resolved pair. A no-op while invalid. Failures
    /// leave the fields untouched; a second submit starts from scratch.
    pub async fn submit(&self) {
        let (start, end, valid) = {
            let s = self.snapshot.borrow();
            (s.start_address.clone(), s.end_address.clone(), s.is_valid)
        };

        if !valid {
            debug!("submit ignored: both addresses are required");
            return;
        }

        self.set_state(ViewState::Loading);

        match self.resolve_pair(&start, &end).await {
            Ok(pair) => {
                self.set_state(ViewState::Idle);
                self.coordinator.show_route_map(pair);
            }
            Err(err) => {
                self.set_state(ViewState::Failed(err.to_string()));
                self.schedule_error_clear();
            }
        }
    }

    async fn resolve_pair(&self, start: &str, end: &str) -> Result<LocationPair, GeocodingError> {
        // sequential: the end lookup is skipped when the start fails
        let start = self.geocoder.geocode(start).await?;
        let end = self.geocoder.geocode(end).await?;
        Ok(LocationPair::new(start, end))
    }

    fn set_state(&self, state: ViewState) {
        self.error_epoch.fetch_add(1, Ordering::Relaxed);
        self.snapshot.send_modify(|s| s.state = state);
    }

    fn schedule_error_clear(&self) {
        let epoch = self.error_epoch.load(Ordering::Relaxed);
        let snapshot = self.snapshot.clone();
        let error_epoch = self.error_epoch.clone();

        tokio::spawn(async move {
            tokio::time::sleep(ERROR_CLEAR_DELAY).await;

            // a later submit owns the state now
            if error_epoch.load(Ordering::Relaxed) != epoch {
                return;
            }

            snapshot.send_if_modified(|s| {
                if matches!(s.state, ViewState::Failed(_)) {
                    s.state = ViewState::Idle;
                    true
                } else {
                    false
                }
            });
        });
    }
}

fn forward_suggestions(
    mut batches: watch::Receiver<SuggestionBatch>,
    snapshot: Arc<watch::Sender<AddressInputSnapshot>>,
    apply: impl Fn(&mut AddressInputSnapshot, Vec<String>) + Send + 'static,
) {
    tokio::spawn(async move {
        let mut applied_seq = 0u64;

        while batches.changed().await.is_ok() {
            let batch = batches.borrow_and_update().clone();
            if batch.seq < applied_seq {
                continue;
            }
            applied_seq = batch.seq;
            snapshot.send_modify(|s| apply(s, batch.items.clone()));
        }
    });
}
