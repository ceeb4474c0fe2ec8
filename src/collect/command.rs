use std::time::Duration;

use log::warn;
use tokio::process::Command;
use tokio::time::timeout;

use super::Collect;

/// Sentinel for a command that failed or produced no output
pub const NO_DATA: &str = "No Data";

const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a command, folding every failure into the sentinel
///
/// Stdout and stderr are combined and trimmed, matching what an interactive
/// shell would show for the tools this feeds on (`xset`, `piactl`).
pub async fn run_command(program: &str, args: &[String]) -> String {
    let output = match timeout(COMMAND_TIMEOUT, Command::new(program).args(args).output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            warn!("failed to execute {}: {}", program, e);
            return NO_DATA.to_string();
        }
        Err(_) => {
            warn!("{} timed out after {:?}", program, COMMAND_TIMEOUT);
            return NO_DATA.to_string();
        }
    };

    let mut combined = output.stdout;
    combined.extend_from_slice(&output.stderr);

    let text = String::from_utf8_lossy(&combined).trim().to_string();
    if text.is_empty() {
        NO_DATA.to_string()
    } else {
        text
    }
}

/// Collector that samples the output of an external command
pub struct CommandCollector {
    program: String,
    args: Vec<String>,
}

impl CommandCollector {
    /// Create a collector for a program and its arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl Collect for CommandCollector {
    async fn collect(&self, _parent: &str) -> String {
        run_command(&self.program, &self.args).await
    }
}
