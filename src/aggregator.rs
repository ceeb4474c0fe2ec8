//! The single consumer of poller updates
//!
//! Owns the merged snapshot and the display rules. Every received update
//! triggers a full recomputation of the composite line; nothing is derived
//! incrementally.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, trace};
use tokio::sync::mpsc;

use crate::config::{BarConfig, RuleConfig};
use crate::poller::Update;
use crate::registry::SourceRegistry;
use crate::render::{Segment, render};
use crate::sink::StatusSink;

pub struct Aggregator {
    registry: Arc<SourceRegistry>,
    rules: RuleConfig,
    separator: String,
    sink: Arc<dyn StatusSink>,
    snapshot: HashMap<String, String>,
}

impl Aggregator {
    pub fn new(
        registry: Arc<SourceRegistry>,
        config: &BarConfig,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            registry,
            rules: config.rules.clone(),
            separator: config.separator.clone(),
            sink,
            snapshot: HashMap::new(),
        }
    }

    /// Consume updates until every poller is gone
    ///
    /// There is no other exit: the aggregator has no fatal error path and
    /// runs for the lifetime of the process.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Update>) {
        while let Some(update) = rx.recv().await {
            self.snapshot.insert(update.source, update.value);

            let status = self.compose();
            trace!("status: '{}'", status);

            if let Err(e) = self.sink.apply(&status).await {
                error!("failed to apply status: {}", e);
            }
        }
    }

    /// Recompute the composite line from scratch, applying the suppression
    /// rules in display order
    fn compose(&self) -> String {
        let mut segments = Vec::new();

        for name in self.registry.display_order() {
            // a disabled source stays off the bar for the rest of the run
            if !self.registry.is_enabled(name) {
                continue;
            }

            let value = self.snapshot.get(name).cloned().unwrap_or_default();

            if name == &self.rules.battery && value == self.rules.no_battery_sentinel {
                if self.registry.disable(name) {
                    info!("no battery present, disabling source '{}'", name);
                }
                continue;
            }

            if name == &self.rules.extip && !value.is_empty() && value == self.vpn_value() {
                let backoff = Duration::from_secs(self.rules.backoff);
                if self.registry.raise_interval(name, backoff) {
                    info!(
                        "external ip matches the vpn address, raising '{}' interval to {:?}",
                        name, backoff
                    );
                }
                continue;
            }

            if value.is_empty() {
                continue;
            }

            segments.push(Segment {
                prefix: self.registry.prefix_of(name),
                value,
            });
        }

        render(&segments, &self.separator)
    }

    fn vpn_value(&self) -> String {
        self.snapshot
            .get(&self.rules.vpn)
            .cloned()
            .unwrap_or_default()
    }
}
