use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;
use tokio::sync::mpsc;

use rootline::aggregator::Aggregator;
use rootline::config::{BarConfig, load_config};
use rootline::poller;
use rootline::registry::SourceRegistry;
use rootline::sink::{ConsoleSink, RootWindowSink, StatusSink};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "rootline", about = "Status line daemon for dwm-style bars", version)]
struct Args {
    /// Print the status line to stdout instead of the root window
    #[arg(short, long)]
    debug: bool,

    /// Path to a configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BarConfig::default(),
    };

    rootline::init_logging(&config.log_level);
    info!("starting rootline {}", rootline::VERSION);

    let sink: Arc<dyn StatusSink> = if args.debug {
        Arc::new(ConsoleSink)
    } else {
        Arc::new(RootWindowSink::default())
    };

    let registry = Arc::new(SourceRegistry::from_config(&config)?);

    // near-rendezvous capacity: a blocked send is the pipeline's backpressure
    let (tx, rx) = mpsc::channel(1);
    poller::spawn_all(&registry, &tx);
    drop(tx);

    Aggregator::new(registry, &config, sink).run(rx).await;

    Ok(())
}
