//! gpucheck binary entry point

use gpucheck::report;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = report::run(&mut out) {
        tracing::error!("environment check failed: {e}");
        std::process::exit(1);
    }
}
