//! Engine configuration with sane defaults, optionally overridden from TOML.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::tables::{self, KeywordRules, DEFAULT_INDUSTRY};
use crate::types::IndustryBenchmark;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_ENV: &str = "IMPACT_ENGINE_CONFIG";

/// Weights of the template-matching score components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
  pub word_overlap: f64,
  /// Added once per category keyword found.
  pub category_keyword: f64,
  pub urgency: f64,
  pub business_impact: f64,
}

impl Default for MatchWeights {
  fn default() -> Self {
    Self {
      word_overlap: 0.6,
      category_keyword: 0.2,
      urgency: 0.1,
      business_impact: 0.15,
    }
  }
}

/// Tunable tables and thresholds. Built once, passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Below this match score the problem statement gets the fallback context.
  pub match_threshold: f64,
  /// Minimum match score before contextual solutions are offered.
  pub solution_threshold: f64,
  pub match_weights: MatchWeights,
  /// Used when the request carries no monthly traffic.
  pub default_monthly_traffic: f64,
  /// USD per developer hour, for implementation cost estimates.
  pub developer_hourly_rate: f64,
  pub benchmarks: BTreeMap<String, IndustryBenchmark>,
  pub impact_percentages: BTreeMap<String, f64>,
  pub keywords: KeywordRules,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      match_threshold: 0.3,
      solution_threshold: 0.4,
      match_weights: MatchWeights::default(),
      default_monthly_traffic: 10_000.0,
      developer_hourly_rate: 100.0,
      benchmarks: tables::default_benchmarks(),
      impact_percentages: tables::default_impact_percentages(),
      keywords: KeywordRules::default(),
    }
  }
}

impl Config {
  /// Parse a TOML document; omitted keys keep their defaults.
  pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
    let config: Config = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: &Path) -> Result<Self, EngineError> {
    let contents = std::fs::read_to_string(path)?;
    let config = Self::from_toml_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
  }

  /// Config from `IMPACT_ENGINE_CONFIG` if set, defaults otherwise.
  pub fn from_env() -> Result<Self, EngineError> {
    match std::env::var_os(CONFIG_ENV) {
      Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
      _ => Ok(Self::default()),
    }
  }

  pub fn validate(&self) -> Result<(), EngineError> {
    for (field, value) in [
      ("match_threshold", self.match_threshold),
      ("solution_threshold", self.solution_threshold),
    ] {
      if !(0.0..=1.0).contains(&value) {
        return Err(EngineError::config(field, "must be between 0.0 and 1.0"));
      }
    }

    let w = &self.match_weights;
    for (field, value) in [
      ("match_weights.word_overlap", w.word_overlap),
      ("match_weights.category_keyword", w.category_keyword),
      ("match_weights.urgency", w.urgency),
      ("match_weights.business_impact", w.business_impact),
      ("default_monthly_traffic", self.default_monthly_traffic),
      ("developer_hourly_rate", self.developer_hourly_rate),
    ] {
      if !value.is_finite() || value < 0.0 {
        return Err(EngineError::config(field, "must be a non-negative number"));
      }
    }

    if !self.benchmarks.contains_key(DEFAULT_INDUSTRY) {
      return Err(EngineError::config(
        "benchmarks",
        "must contain a \"default\" industry",
      ));
    }

    for (key, value) in &self.impact_percentages {
      if !value.is_finite() || *value < 0.0 {
        return Err(EngineError::config(
          &format!("impact_percentages.{}", key),
          "must be a non-negative number",
        ));
      }
    }

    Ok(())
  }
}
