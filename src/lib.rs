//! A concurrent status-line engine for dwm-style bars

pub mod aggregator;
pub mod collect;
pub mod config;
pub mod error;
pub mod poller;
pub mod registry;
pub mod render;
pub mod sink;
pub mod util;

/// Re-export of commonly used types for convenience
pub mod prelude {
    pub use crate::aggregator::Aggregator;
    pub use crate::collect::Collect;
    pub use crate::config::{BarConfig, CollectorKind, LogLevel, RuleConfig, SourceConfig};
    pub use crate::error::{Result, StatusError};
    pub use crate::poller::Update;
    pub use crate::registry::{Control, MetricSource, SourceRegistry};
    pub use crate::render::{Segment, render};
    pub use crate::sink::{ConsoleSink, RootWindowSink, StatusSink};
}

pub use util::logging::init as init_logging;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
