use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;
use wayroute_geocoding::{AddressCompleter, MIN_QUERY_LEN};

/// Quiet period after the last keystroke before a lookup is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// One published round of completions. `seq` increases with every issued
/// query, so consumers can drop a batch that arrives after a newer one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionBatch {
    pub seq: u64,
    pub query: String,
    pub items: Vec<String>,
}

/// Live autocomplete for one address field.
///
/// Keystrokes go in through [`update`](Self::update); debounced,
/// deduplicated batches come out of the watch channel. Lookup failures
/// emit an empty batch instead of an error, and queries under
/// [`MIN_QUERY_LEN`] characters short-circuit without any lookup.
pub struct SuggestionFeed {
    input: mpsc::UnboundedSender<String>,
    batches: watch::Receiver<SuggestionBatch>,
    pump: JoinHandle<()>,
}

impl SuggestionFeed {
    pub fn spawn(completer: Arc<dyn AddressCompleter>) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let (tx, batches) = watch::channel(SuggestionBatch::default());

        let pump = tokio::spawn(pump(completer, rx, Arc::new(tx)));

        Self { input, batches, pump }
    }

    /// Feeds the current text of the field. Restartable per keystroke;
    /// each call resets the debounce timer.
    pub fn update(&self, text: impl Into<String>) {
        let _ = self.input.send(text.into());
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionBatch> {
        self.batches.clone()
    }
}

impl Drop for SuggestionFeed {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

fn publish(output: &watch::Sender<SuggestionBatch>, batch: SuggestionBatch) {
    output.send_if_modified(|current| {
        // a slow stale response must never overwrite a newer one
        if batch.seq < current.seq {
            debug!("dropping stale suggestion batch for {:?}", batch.query);
            return false;
        }
        *current = batch;
        true
    });
}

async fn pump(
    completer: Arc<dyn AddressCompleter>,
    mut input: mpsc::UnboundedReceiver<String>,
    output: Arc<watch::Sender<SuggestionBatch>>,
) {
    let mut last_issued: Option<String> = None;
    let mut seq: u64 = 0;

    while let Some(mut current) = input.recv().await {
        // debounce: the timer restarts on every newer keystroke
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(text) => current = text,
                    None => break,
                },
                _ = tokio::time::sleep(DEBOUNCE) => break,
            }
        }

        let query = current.trim().to_string();
        if last_issued.as_deref() == Some(query.as_str()) {
            continue;
        }
        last_issued = Some(query.clone());
        seq += 1;

        if query.chars().count() < MIN_QUERY_LEN {
            publish(&output, SuggestionBatch { seq, query, items: Vec::new() });
            continue;
        }

        // fire-and-forget per query; ordering is restored by `seq`
        let completer = completer.clone();
        let output = output.clone();
        tokio::spawn(async move {
            let items = match completer.complete(&query).await {
                Ok(items) => items,
                Err(err) => {
                    debug!("suggestion lookup for {:?} failed: {}", query, err);
                    Vec::new()
                }
            };
            publish(&output, SuggestionBatch { seq, query, items });
        });
    }
}
