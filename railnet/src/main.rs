use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use railnet::console;
use railnet::persist;

/// Railway network and timetable console.
#[derive(Parser)]
#[command(name = "railnet", version, about)]
struct Args {
    /// Snapshot file holding the network state between runs.
    #[arg(long, default_value = "network.json")]
    data: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut network = persist::load_or_default(&args.data);

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    if let Err(err) = console::run(&mut network, stdin, &mut stdout) {
        error!(error = %err, "console session aborted");
        return ExitCode::FAILURE;
    }

    if let Err(err) = persist::save(&args.data, &network) {
        error!(error = %err, "failed to persist network snapshot");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Log to stderr, filtered by RUST_LOG, so transcripts on stdout stay
/// clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
