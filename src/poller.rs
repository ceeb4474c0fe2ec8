//! Per-source polling workers
//!
//! One task per source. Each samples its collector, emits only on change,
//! and observes interval and enablement updates between sleep cycles via the
//! source's control channel.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::registry::{MetricSource, SourceRegistry};

/// A tagged value change emitted by a poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Name of the source that changed
    pub source: String,
    /// The new value
    pub value: String,
}

/// Spawn one polling task per registered source
pub fn spawn_all(registry: &Arc<SourceRegistry>, tx: &mpsc::Sender<Update>) {
    for source in registry.sources() {
        tokio::spawn(run(
            Arc::clone(source),
            Arc::clone(registry),
            tx.clone(),
        ));
    }
}

/// Poll one source until it is disabled
///
/// The send blocks while the aggregator is busy; that is the only
/// backpressure in the pipeline, so a slow aggregator delays all pollers
/// proportionally rather than dropping emissions.
pub async fn run(
    source: Arc<MetricSource>,
    registry: Arc<SourceRegistry>,
    tx: mpsc::Sender<Update>,
) {
    let mut control = source.subscribe();
    let mut last_emitted = String::new();

    loop {
        let current = *control.borrow_and_update();
        if !current.enabled {
            info!("source '{}' disabled, poller exiting", source.name());
            return;
        }

        let parent = match source.dependency() {
            Some(dep) => registry.value_of(dep),
            None => String::new(),
        };

        let value = source.collector().collect(&parent).await;

        if value != last_emitted {
            source.publish_value(&value);
            debug!("source '{}' changed: '{}'", source.name(), value);

            let update = Update {
                source: source.name().to_string(),
                value: value.clone(),
            };
            if tx.send(update).await.is_err() {
                // aggregator gone, nothing left to feed
                return;
            }

            last_emitted = value;
        }

        sleep(current.interval).await;
    }
}
