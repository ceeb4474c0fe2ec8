//! Destinations for the rendered status line

use log::debug;
use tokio::process::Command;

use crate::error::{Result, StatusError};

/// Where the composite status ends up
#[async_trait::async_trait]
pub trait StatusSink: Send + Sync + 'static {
    /// Apply a freshly rendered status
    async fn apply(&self, status: &str) -> Result<()>;
}

/// Writes the status to stdout; selected by the debug flag
pub struct ConsoleSink;

#[async_trait::async_trait]
impl StatusSink for ConsoleSink {
    async fn apply(&self, status: &str) -> Result<()> {
        println!("{}", status);
        Ok(())
    }
}

/// Sets the X root window name via `xsetroot -name`
pub struct RootWindowSink {
    program: String,
}

impl RootWindowSink {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for RootWindowSink {
    fn default() -> Self {
        Self::new("xsetroot")
    }
}

#[async_trait::async_trait]
impl StatusSink for RootWindowSink {
    async fn apply(&self, status: &str) -> Result<()> {
        debug!("setting root window name: '{}'", status);

        let output = Command::new(&self.program)
            .arg("-name")
            .arg(status)
            .output()
            .await
            .map_err(|e| {
                StatusError::Sink(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(StatusError::Sink(format!(
                "{} exited with {}",
                self.program, output.status
            ))
            .into());
        }

        Ok(())
    }
}
