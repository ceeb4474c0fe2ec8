use chrono::Local;
use chrono::format::StrftimeItems;
use log::warn;

use super::Collect;

const DEFAULT_FORMAT: &str = "%A %Y-%m-%d %H:%M";

/// Local wall clock formatted with a strftime pattern
pub struct ClockCollector {
    format: String,
}

impl ClockCollector {
    /// Create a collector with the given format, falling back to the default
    /// when the pattern does not parse
    pub fn new(format: impl Into<String>) -> Self {
        let format = format.into();

        if StrftimeItems::new(&format).parse().is_err() {
            warn!(
                "invalid clock format '{}', using '{}'",
                format, DEFAULT_FORMAT
            );
            return Self::default();
        }

        Self { format }
    }
}

impl Default for ClockCollector {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Collect for ClockCollector {
    async fn collect(&self, _parent: &str) -> String {
        Local::now().format(&self.format).to_string()
    }
}
