//! Value collection for the status line sources

mod battery;
mod clock;
mod command;
mod external_ip;
mod parsers;

pub use battery::{BatteryCollector, NO_BATTERY};
pub use clock::ClockCollector;
pub use command::{CommandCollector, NO_DATA, run_command};
pub use external_ip::{DEFAULT_IP_URL, ExternalIpCollector};
pub use parsers::{DpmsCollector, LayoutCollector, parse_dpms, parse_layout};

use std::sync::Arc;

use crate::config::{CollectorKind, SourceConfig};

/// Contract for sampling one value
///
/// Implementations never propagate errors: a failed collection surfaces as a
/// sentinel string or an empty string, and downstream suppression rules take
/// it from there.
#[async_trait::async_trait]
pub trait Collect: Send + Sync + 'static {
    /// Produce the current value, given the dependency's last known value
    async fn collect(&self, parent: &str) -> String;
}

/// Build the collector backing a configured source
pub fn build(config: &SourceConfig) -> Arc<dyn Collect> {
    match config.kind {
        CollectorKind::Xset => Arc::new(CommandCollector::new("xset", ["q"])),
        CollectorKind::Dpms => Arc::new(DpmsCollector),
        CollectorKind::Layout => Arc::new(LayoutCollector),
        CollectorKind::Vpn => Arc::new(CommandCollector::new("piactl", ["get", "vpnip"])),
        CollectorKind::Extip => Arc::new(ExternalIpCollector::new(
            config.url.as_deref().unwrap_or(DEFAULT_IP_URL),
        )),
        CollectorKind::Battery => Arc::new(match &config.power_supply {
            Some(dir) => BatteryCollector::new(dir),
            None => BatteryCollector::default(),
        }),
        CollectorKind::Clock => Arc::new(match &config.format {
            Some(format) => ClockCollector::new(format),
            None => ClockCollector::default(),
        }),
    }
}
