//! Binary entrypoint: read one JSON request from stdin, write one report to stdout.
//!
//! Logs go to stderr (`RUST_LOG`, default `impact_engine=info`) so stdout stays
//! a single JSON object. Failures print an `ErrorOutput` and exit with status 1.

use impact_engine::{run, AnalysisRequest, Config, EngineError};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("impact_engine=info")),
    )
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary() {
    tracing::error!(error = %e, "impact-engine failed");
    let err = e.to_output();
    let mut out = io::stdout().lock();
    let _ = serde_json::to_writer(&mut out, &err);
    let _ = writeln!(out);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), EngineError> {
  let config = Config::from_env()?;

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let request: AnalysisRequest = serde_json::from_str(&raw)?;

  let report = run(&request, &config);
  let json = serde_json::to_vec(&report)?;
  let mut out = io::stdout().lock();
  out.write_all(&json)?;
  out.flush()?;
  Ok(())
}
