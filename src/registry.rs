//! The source registry: one record per metric, constructed once from static
//! configuration and shared by reference with the pollers and the aggregator

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::collect::{self, Collect};
use crate::config::{BarConfig, SourceConfig};
use crate::error::{Result, StatusError};

/// Runtime control state for one source
///
/// Written only by the aggregator; the poller reads the latest state between
/// sleep cycles, so interval and enablement changes are never torn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// Current poll period
    pub interval: Duration,
    /// Once false, the source's poller exits and is never revived
    pub enabled: bool,
}

/// One registered metric source
pub struct MetricSource {
    name: String,
    prefix: String,
    dependency: Option<String>,
    collector: Arc<dyn Collect>,
    control: watch::Sender<Control>,
    value: watch::Sender<String>,
}

impl MetricSource {
    /// Create a source from its configuration and a collector
    pub fn new(config: &SourceConfig, collector: Arc<dyn Collect>) -> Self {
        let control = Control {
            interval: Duration::from_secs(config.interval),
            enabled: config.enabled,
        };

        Self {
            name: config.name.clone(),
            prefix: config.prefix.clone(),
            dependency: config.depends_on.clone(),
            collector,
            control: watch::channel(control).0,
            value: watch::channel(String::new()).0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn dependency(&self) -> Option<&str> {
        self.dependency.as_deref()
    }

    pub fn collector(&self) -> Arc<dyn Collect> {
        Arc::clone(&self.collector)
    }

    /// Latest sampled value, written only by the owning poller
    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    /// Publish a freshly sampled value for dependents to read
    pub(crate) fn publish_value(&self, value: &str) {
        self.value.send_replace(value.to_string());
    }

    /// Current control state
    pub fn control(&self) -> Control {
        *self.control.borrow()
    }

    /// Subscribe to control changes; used by the source's poller
    pub fn subscribe(&self) -> watch::Receiver<Control> {
        self.control.subscribe()
    }
}

/// Registry of all sources, keyed by name
///
/// The source set is fixed after construction: sources are disabled, never
/// removed.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<MetricSource>>,
    display_order: Vec<String>,
}

impl SourceRegistry {
    /// Build a registry from explicit sources and a display order
    pub fn from_sources(sources: Vec<MetricSource>, display_order: Vec<String>) -> Result<Self> {
        let mut by_name: HashMap<String, Arc<MetricSource>> = HashMap::new();

        for source in sources {
            if by_name.contains_key(source.name()) {
                return Err(StatusError::Registry(format!(
                    "duplicate source name: {}",
                    source.name()
                ))
                .into());
            }
            by_name.insert(source.name().to_string(), Arc::new(source));
        }

        for source in by_name.values() {
            let Some(dep) = source.dependency() else {
                continue;
            };
            if dep == source.name() {
                return Err(StatusError::Registry(format!(
                    "source '{}' depends on itself",
                    source.name()
                ))
                .into());
            }
            let Some(parent) = by_name.get(dep) else {
                return Err(StatusError::Registry(format!(
                    "source '{}' depends on unknown source '{}'",
                    source.name(),
                    dep
                ))
                .into());
            };
            if parent.dependency().is_some() {
                return Err(StatusError::Registry(format!(
                    "source '{}' depends on '{}', which has a dependency of its own",
                    source.name(),
                    dep
                ))
                .into());
            }
        }

        for name in &display_order {
            if !by_name.contains_key(name) {
                return Err(StatusError::Registry(format!(
                    "display order references unknown source '{}'",
                    name
                ))
                .into());
            }
        }

        Ok(Self {
            sources: by_name,
            display_order,
        })
    }

    /// Build a registry from static configuration, wiring up the built-in
    /// collectors
    pub fn from_config(config: &BarConfig) -> Result<Self> {
        let sources = config
            .sources
            .iter()
            .map(|sc| MetricSource::new(sc, collect::build(sc)))
            .collect();

        Self::from_sources(sources, config.display_order.clone())
    }

    /// Look up a source by name
    pub fn get(&self, name: &str) -> Option<&Arc<MetricSource>> {
        self.sources.get(name)
    }

    /// Iterate over all registered sources
    pub fn sources(&self) -> impl Iterator<Item = &Arc<MetricSource>> {
        self.sources.values()
    }

    /// Names to render, in display order
    pub fn display_order(&self) -> &[String] {
        &self.display_order
    }

    /// Latest value of a named source; empty when unknown
    pub fn value_of(&self, name: &str) -> String {
        self.sources.get(name).map(|s| s.value()).unwrap_or_default()
    }

    /// Display prefix of a named source; empty when unknown
    pub fn prefix_of(&self, name: &str) -> String {
        self.sources
            .get(name)
            .map(|s| s.prefix().to_string())
            .unwrap_or_default()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.sources.get(name).is_some_and(|s| s.control().enabled)
    }

    /// Permanently disable a source; returns true on the first transition
    pub fn disable(&self, name: &str) -> bool {
        let Some(source) = self.sources.get(name) else {
            return false;
        };

        source.control.send_if_modified(|control| {
            if control.enabled {
                control.enabled = false;
                true
            } else {
                false
            }
        })
    }

    /// Raise a source's poll interval; never lowers it. Returns true when
    /// the interval actually changed.
    pub fn raise_interval(&self, name: &str, interval: Duration) -> bool {
        let Some(source) = self.sources.get(name) else {
            return false;
        };

        source.control.send_if_modified(|control| {
            if interval > control.interval {
                control.interval = interval;
                true
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectorKind;

    fn source_config(name: &str, depends_on: Option<&str>) -> SourceConfig {
        SourceConfig {
            name: name.to_string(),
            kind: CollectorKind::Clock,
            prefix: String::new(),
            interval: 1,
            depends_on: depends_on.map(str::to_string),
            enabled: true,
            url: None,
            power_supply: None,
            format: None,
        }
    }

    fn source(name: &str, depends_on: Option<&str>) -> MetricSource {
        let config = source_config(name, depends_on);
        MetricSource::new(&config, collect::build(&config))
    }

    #[test]
    fn default_config_builds() {
        let registry = SourceRegistry::from_config(&BarConfig::default()).unwrap();
        assert_eq!(registry.display_order().len(), 6);
        assert!(registry.get("xset").is_some());
        assert_eq!(
            registry.get("dpms").unwrap().dependency(),
            Some("xset")
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = SourceRegistry::from_sources(
            vec![source("clock", None), source("clock", None)],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let result =
            SourceRegistry::from_sources(vec![source("dpms", Some("xset"))], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn chained_dependencies_are_rejected() {
        let result = SourceRegistry::from_sources(
            vec![
                source("a", None),
                source("b", Some("a")),
                source("c", Some("b")),
            ],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn display_order_must_reference_known_sources() {
        let result =
            SourceRegistry::from_sources(vec![source("clock", None)], vec!["bogus".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn disable_is_one_way() {
        let registry =
            SourceRegistry::from_sources(vec![source("battery", None)], vec![]).unwrap();

        assert!(registry.is_enabled("battery"));
        assert!(registry.disable("battery"));
        assert!(!registry.is_enabled("battery"));
        // a second disable is a no-op
        assert!(!registry.disable("battery"));
    }

    #[test]
    fn raise_interval_never_lowers() {
        let registry =
            SourceRegistry::from_sources(vec![source("extip", None)], vec![]).unwrap();
        let extip = registry.get("extip").unwrap();

        assert!(registry.raise_interval("extip", Duration::from_secs(3600)));
        assert_eq!(extip.control().interval, Duration::from_secs(3600));

        assert!(!registry.raise_interval("extip", Duration::from_secs(10)));
        assert_eq!(extip.control().interval, Duration::from_secs(3600));
    }
}
