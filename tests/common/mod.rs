//! Test doubles shared by the integration suites

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use rootline::collect::Collect;
use rootline::config::{BarConfig, CollectorKind, LogLevel, RuleConfig, SourceConfig};
use rootline::error::Result;
use rootline::registry::MetricSource;
use rootline::sink::StatusSink;

/// Collector that replays a fixed script, then repeats its last value
pub struct ScriptedCollector {
    script: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedCollector {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(values.into_iter().map(Into::into).collect()),
            last: Mutex::new(String::new()),
        }
    }
}

#[async_trait]
impl Collect for ScriptedCollector {
    async fn collect(&self, _parent: &str) -> String {
        let mut script = self.script.lock().unwrap();
        match script.pop_front() {
            Some(next) => {
                *self.last.lock().unwrap() = next.clone();
                next
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// Sink that forwards every applied status to a channel
pub struct RecordingSink {
    tx: mpsc::UnboundedSender<String>,
}

impl RecordingSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl StatusSink for RecordingSink {
    async fn apply(&self, status: &str) -> Result<()> {
        let _ = self.tx.send(status.to_string());
        Ok(())
    }
}

/// Source configuration holding only what the engine cares about; the kind
/// is irrelevant because tests inject their own collectors
pub fn source_config(
    name: &str,
    prefix: &str,
    interval: u64,
    depends_on: Option<&str>,
) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        kind: CollectorKind::Clock,
        prefix: prefix.to_string(),
        interval,
        depends_on: depends_on.map(str::to_string),
        enabled: true,
        url: None,
        power_supply: None,
        format: None,
    }
}

/// A source backed by a scripted collector
pub fn scripted_source<I, S>(name: &str, prefix: &str, interval: u64, values: I) -> MetricSource
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MetricSource::new(
        &source_config(name, prefix, interval, None),
        Arc::new(ScriptedCollector::new(values)),
    )
}

/// Bar configuration for aggregator tests; sources live in the registry, so
/// only the display settings matter here
pub fn bar_config(display_order: &[&str], separator: &str) -> BarConfig {
    BarConfig {
        sources: Vec::new(),
        display_order: display_order.iter().map(|s| s.to_string()).collect(),
        separator: separator.to_string(),
        rules: RuleConfig::default(),
        log_level: LogLevel::Info,
    }
}
