use std::path::PathBuf;

use tokio::fs;

use super::Collect;

/// Sentinel for absent battery hardware
pub const NO_BATTERY: &str = "No Battery";

const CHARGING: &str = "Charging";
const DEFAULT_SUPPLY_DIR: &str = "/sys/class/power_supply/BAT0";

/// Battery state read from a sysfs power supply directory
pub struct BatteryCollector {
    supply_dir: PathBuf,
}

impl BatteryCollector {
    /// Create a collector reading from the given power supply directory
    pub fn new(supply_dir: impl Into<PathBuf>) -> Self {
        Self {
            supply_dir: supply_dir.into(),
        }
    }
}

impl Default for BatteryCollector {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPLY_DIR)
    }
}

#[async_trait::async_trait]
impl Collect for BatteryCollector {
    async fn collect(&self, _parent: &str) -> String {
        let status = match fs::read_to_string(self.supply_dir.join("status")).await {
            Ok(status) => status,
            Err(_) => return NO_BATTERY.to_string(),
        };

        if status.trim() == CHARGING {
            return CHARGING.to_string();
        }

        match fs::read_to_string(self.supply_dir.join("capacity")).await {
            Ok(capacity) => format!("{}%", capacity.trim()),
            Err(_) => NO_BATTERY.to_string(),
        }
    }
}
