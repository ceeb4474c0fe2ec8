//! Poller behavior: change detection, dependency reads, disablement

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use common::{ScriptedCollector, scripted_source, source_config};
use rootline::collect::Collect;
use rootline::poller::{self, Update};
use rootline::registry::{MetricSource, SourceRegistry};

#[tokio::test(start_paused = true)]
async fn identical_samples_emit_once() {
    let source = scripted_source("link", "L", 1, ["up", "up", "up", "down"]);
    let registry = Arc::new(
        SourceRegistry::from_sources(vec![source], vec!["link".to_string()]).unwrap(),
    );

    let (tx, mut rx) = mpsc::channel(8);
    poller::spawn_all(&registry, &tx);
    drop(tx);

    assert_eq!(
        rx.recv().await,
        Some(Update {
            source: "link".to_string(),
            value: "up".to_string(),
        })
    );
    assert_eq!(rx.recv().await.unwrap().value, "down");

    // the value is steady from here on, so nothing further arrives
    let quiet = timeout(Duration::from_secs(30), rx.recv()).await;
    assert!(quiet.is_err());
}

#[tokio::test(start_paused = true)]
async fn disable_terminates_the_poller() {
    let source = scripted_source("battery", "B", 1, ["50%"]);
    let registry = Arc::new(
        SourceRegistry::from_sources(vec![source], vec!["battery".to_string()]).unwrap(),
    );

    let (tx, mut rx) = mpsc::channel(8);
    poller::spawn_all(&registry, &tx);
    drop(tx);

    assert_eq!(rx.recv().await.unwrap().value, "50%");
    assert!(registry.disable("battery"));

    // the poller exits on its next wake-up; with it gone, the channel closes
    assert_eq!(rx.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn disabled_at_startup_never_emits() {
    let mut config = source_config("battery", "B", 1, None);
    config.enabled = false;
    let source = MetricSource::new(&config, Arc::new(ScriptedCollector::new(["50%"])));
    let registry = Arc::new(SourceRegistry::from_sources(vec![source], vec![]).unwrap());

    let (tx, mut rx) = mpsc::channel(8);
    poller::spawn_all(&registry, &tx);
    drop(tx);

    assert_eq!(rx.recv().await, None);
}

struct EchoCollector;

#[async_trait]
impl Collect for EchoCollector {
    async fn collect(&self, parent: &str) -> String {
        if parent.is_empty() {
            String::new()
        } else {
            format!("echo {}", parent)
        }
    }
}

#[tokio::test(start_paused = true)]
async fn dependent_reads_the_parent_value() {
    let parent = scripted_source("xset", "", 1, ["DPMS is Enabled"]);
    let child = MetricSource::new(
        &source_config("dpms", "D", 1, Some("xset")),
        Arc::new(EchoCollector),
    );
    let registry = Arc::new(
        SourceRegistry::from_sources(vec![parent, child], vec!["dpms".to_string()]).unwrap(),
    );

    let (tx, mut rx) = mpsc::channel(8);
    poller::spawn_all(&registry, &tx);
    drop(tx);

    // the child's first sample may race the parent's; within a cycle it
    // observes the published value
    loop {
        let update = timeout(Duration::from_secs(30), rx.recv())
            .await
            .expect("dependent never observed the parent value")
            .expect("pollers exited early");
        if update.source == "dpms" && update.value == "echo DPMS is Enabled" {
            break;
        }
    }
}
