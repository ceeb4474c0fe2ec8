use config::{self, File};
use log::{debug, error};
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, StatusError};

/// Which built-in collector backs a source
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollectorKind {
    /// Raw `xset q` output, consumed by dependents
    Xset,
    /// Display power state parsed from the xset output
    Dpms,
    /// Keyboard layout parsed from the xset output
    Layout,
    /// VPN endpoint address from `piactl`
    Vpn,
    /// Public IP fetched over HTTP
    Extip,
    /// Battery state from sysfs
    Battery,
    /// Local wall clock
    Clock,
}

/// Configuration for a single metric source
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Unique source name
    pub name: String,
    /// Collector backing this source
    pub kind: CollectorKind,
    /// Display prefix, usually an icon glyph
    #[serde(default)]
    pub prefix: String,
    /// Poll period in seconds
    pub interval: u64,
    /// Name of the source whose value is fed to this collector
    #[serde(default)]
    pub depends_on: Option<String>,
    /// Initial enabled state
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Endpoint override for extip sources
    #[serde(default)]
    pub url: Option<String>,
    /// Sysfs directory override for battery sources
    #[serde(default)]
    pub power_supply: Option<String>,
    /// strftime format override for clock sources
    #[serde(default)]
    pub format: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// Cross-source display rules applied by the aggregator
#[derive(Debug, Deserialize, Clone)]
pub struct RuleConfig {
    /// Name of the battery source
    #[serde(default = "default_battery")]
    pub battery: String,
    /// Name of the VPN source
    #[serde(default = "default_vpn")]
    pub vpn: String,
    /// Name of the external IP source
    #[serde(default = "default_extip")]
    pub extip: String,
    /// Battery value that triggers permanent disablement
    #[serde(default = "default_no_battery")]
    pub no_battery_sentinel: String,
    /// External IP poll period in seconds once it matches the VPN address
    #[serde(default = "default_backoff")]
    pub backoff: u64,
}

fn default_battery() -> String {
    "battery".to_string()
}

fn default_vpn() -> String {
    "vpn".to_string()
}

fn default_extip() -> String {
    "extip".to_string()
}

fn default_no_battery() -> String {
    "No Battery".to_string()
}

fn default_backoff() -> u64 {
    3600
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            battery: default_battery(),
            vpn: default_vpn(),
            extip: default_extip(),
            no_battery_sentinel: default_no_battery(),
            backoff: default_backoff(),
        }
    }
}

/// Bar configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BarConfig {
    /// The full source set, constructed once before any worker starts
    pub sources: Vec<SourceConfig>,
    /// Names to render, in order; sources absent from this list are sampled
    /// but never displayed
    pub display_order: Vec<String>,
    /// Separator between rendered segments
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Aggregator rules
    #[serde(default)]
    pub rules: RuleConfig,
    /// Logging level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_separator() -> String {
    " | ".to_string()
}

fn source(
    name: &str,
    kind: CollectorKind,
    prefix: &str,
    interval: u64,
    depends_on: Option<&str>,
) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        kind,
        prefix: prefix.to_string(),
        interval,
        depends_on: depends_on.map(str::to_string),
        enabled: true,
        url: None,
        power_supply: None,
        format: None,
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                source("xset", CollectorKind::Xset, "", 1, None),
                source("dpms", CollectorKind::Dpms, "\u{f0335}", 1, Some("xset")),
                source("layout", CollectorKind::Layout, "\u{f030c}", 1, Some("xset")),
                source("vpn", CollectorKind::Vpn, "\u{f11f1}", 10, None),
                source("extip", CollectorKind::Extip, "\u{f015f}", 600, None),
                source("battery", CollectorKind::Battery, "\u{f0079}", 60, None),
                source("clock", CollectorKind::Clock, "\u{e641}", 60, None),
            ],
            display_order: ["dpms", "layout", "vpn", "extip", "battery", "clock"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            separator: default_separator(),
            rules: RuleConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Logging level
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

/// Load bar configuration from a file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BarConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());

    if !path.exists() {
        error!("Configuration file {} does not exist", path.display());
        return Err(StatusError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        ))
        .into());
    }

    let extension = match path.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => {
            error!("Configuration file has no extension");
            return Err(StatusError::Config(format!(
                "Configuration file has no extension: {}",
                path.display()
            ))
            .into());
        }
    };

    let format = match extension.as_str() {
        "toml" => config::FileFormat::Toml,
        "json" => config::FileFormat::Json,
        "yaml" | "yml" => config::FileFormat::Yaml,
        format => {
            error!("Unsupported configuration format: {}", format);
            return Err(
                StatusError::Config(format!("Unsupported config format: {}", format)).into(),
            );
        }
    };

    let config = config::Config::builder()
        .add_source(File::with_name(&path.to_string_lossy()).format(format))
        .build()
        .map_err(|e| StatusError::Config(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| StatusError::Config(e.to_string()).into())
}
