//! Command-line interface for kafka-peek
//!
//! Interactive inspection of one partition of a Kafka topic: resolve a start
//! position, poll bounded batches, print each event, and stop on configurable
//! conditions (no events, sequence number bound, enqueued-time bound, or a
//! declined continue prompt).

use clap::{Parser, Subcommand};
use kafka_peek::{run_peek, PeekOpts};

#[derive(Parser)]
#[command(name = "kafka-peek")]
#[command(about = "An interactive tool for peeking at events in one Kafka topic partition")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll bounded batches of events from one partition and print them
    Peek {
        #[command(flatten)]
        opts: PeekOpts,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Peek { opts } => run_peek(opts).await,
    }
}
