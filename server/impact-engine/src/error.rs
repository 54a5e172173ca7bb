//! Structured error types for the impact engine.
//!
//! Scoring itself is total; these only surface at the config and I/O edges.

use thiserror::Error;

use crate::types::ErrorOutput;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("config: {field}: {reason}")]
  Config { field: String, reason: String },

  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("toml: {0}")]
  Toml(#[from] toml::de::Error),
}

impl EngineError {
  pub fn config(field: &str, reason: &str) -> Self {
    Self::Config {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  /// JSON body printed on stdout when the binary fails.
  pub fn to_output(&self) -> ErrorOutput {
    match self {
      Self::Config { field, reason } => ErrorOutput::new(reason.clone()).with_field(field.clone()),
      _ => ErrorOutput::new(self.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn config_error_carries_field() {
    let out = EngineError::config("match_threshold", "must be within [0, 1]").to_output();
    assert!(out.error);
    assert_eq!(out.message, "must be within [0, 1]");
    assert_eq!(out.field.as_deref(), Some("match_threshold"));
  }

  #[test]
  fn json_error_has_no_field() {
    let err: EngineError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
    let out = err.to_output();
    assert!(out.message.starts_with("json: "), "{}", out.message);
    assert!(out.field.is_none());

    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["error"], true);
    assert!(v.get("field").is_none());
  }
}
