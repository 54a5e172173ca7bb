//! Figmant business impact engine: rule-based scoring of design-critique issues.
//!
//! Attaches ROI, priority and projected revenue to each issue, matches an
//! optional problem statement against stored templates, and aggregates
//! everything into a ranked summary. No AI, no DB, no network; pure
//! computation over tables held in [`Config`].

pub mod calculator;
pub mod config;
pub mod context;
pub mod currency;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod solutions;
pub mod summary;
pub mod tables;
pub mod types;

pub use config::Config;
pub use error::EngineError;
pub use types::{AnalysisReport, AnalysisRequest, Issue};

/// Run the engine on parsed input and return the report (no I/O).
pub fn run(request: &AnalysisRequest, config: &Config) -> AnalysisReport {
  engine::analyze(request, config)
}
