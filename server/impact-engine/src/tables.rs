//! Scoring tables: industry benchmarks, base impact percentages, keyword rules.
//!
//! Every lookup here is total. Unknown keys fall back to a default constant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{IndustryBenchmark, Severity};

pub const DEFAULT_INDUSTRY: &str = "default";

/// Base impact for `{severity}-{category}` keys missing from the table.
pub const FALLBACK_IMPACT: f64 = 5.0;

/// Used only if a custom benchmark table has no `default` row.
pub const FALLBACK_BENCHMARK: IndustryBenchmark = IndustryBenchmark {
  average_conversion_rate: 0.022,
  average_order_value: 100.0,
  accessibility_compliance: 0.70,
  mobile_usage: 0.60,
};

pub fn default_benchmarks() -> BTreeMap<String, IndustryBenchmark> {
  let rows = [
    ("e-commerce", 0.025, 85.0, 0.65, 0.73),
    ("saas", 0.030, 150.0, 0.72, 0.45),
    ("fintech", 0.018, 220.0, 0.80, 0.62),
    ("healthcare", 0.015, 180.0, 0.85, 0.55),
  ];
  let mut table: BTreeMap<String, IndustryBenchmark> = rows
    .into_iter()
    .map(|(key, conversion, aov, a11y, mobile)| {
      (
        key.to_string(),
        IndustryBenchmark {
          average_conversion_rate: conversion,
          average_order_value: aov,
          accessibility_compliance: a11y,
          mobile_usage: mobile,
        },
      )
    })
    .collect();
  table.insert(DEFAULT_INDUSTRY.to_string(), FALLBACK_BENCHMARK);
  table
}

pub fn default_impact_percentages() -> BTreeMap<String, f64> {
  // (category, critical, warning, improvement)
  let rows = [
    ("accessibility", 15.0, 8.0, 4.0),
    ("conversion", 25.0, 12.0, 6.0),
    ("usability", 18.0, 10.0, 5.0),
    ("performance", 20.0, 9.0, 4.5),
    ("navigation", 16.0, 8.0, 4.0),
    ("content", 10.0, 6.0, 3.0),
    ("visual", 8.0, 4.0, 2.0),
  ];
  let mut table = BTreeMap::new();
  for (category, critical, warning, improvement) in rows {
    table.insert(impact_key(Severity::Critical, category), critical);
    table.insert(impact_key(Severity::Warning, category), warning);
    table.insert(impact_key(Severity::Improvement, category), improvement);
  }
  table
}

pub fn impact_key(severity: Severity, category: &str) -> String {
  format!("{}-{}", severity.as_str(), category.trim().to_lowercase())
}

/// Benchmark for an industry; unknown industries get the `default` row.
pub fn benchmark_for(
  benchmarks: &BTreeMap<String, IndustryBenchmark>,
  industry: &str,
) -> IndustryBenchmark {
  let key = industry.trim().to_lowercase();
  benchmarks
    .get(&key)
    .or_else(|| benchmarks.get(DEFAULT_INDUSTRY))
    .copied()
    .unwrap_or(FALLBACK_BENCHMARK)
}

/// Base impact percentage for a severity/category pair (5.0 when absent).
pub fn base_impact(table: &BTreeMap<String, f64>, severity: Severity, category: &str) -> f64 {
  table
    .get(&impact_key(severity, category))
    .copied()
    .unwrap_or(FALLBACK_IMPACT)
}

// ---------------------------------------------------------------------------
// Keyword rules
// ---------------------------------------------------------------------------

/// Declarative keyword rules shared by the matcher and context extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordRules {
  /// Problem category -> keywords that boost templates of that category.
  pub category_keywords: BTreeMap<String, Vec<String>>,
  pub urgency_keywords: Vec<String>,
  pub impact_keywords: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
  list.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordRules {
  fn default() -> Self {
    let categories: [(&str, &[&str]); 7] = [
      (
        "conversion_decline",
        &["conversion", "signup", "sign up", "checkout", "purchase", "abandon", "funnel", "drop"],
      ),
      (
        "user_engagement",
        &["engagement", "bounce", "retention", "session", "churn", "time on site"],
      ),
      (
        "trust_credibility",
        &["trust", "credibility", "security", "professional", "legitimate", "reviews"],
      ),
      ("mobile_experience", &["mobile", "responsive", "phone", "tablet", "touch"]),
      (
        "accessibility_compliance",
        &["accessibility", "wcag", "ada", "screen reader", "contrast", "compliance"],
      ),
      (
        "navigation_usability",
        &["navigation", "menu", "confusing", "lost", "search", "findability"],
      ),
      (
        "brand_perception",
        &["brand", "outdated", "modern", "perception", "look and feel"],
      ),
    ];

    Self {
      category_keywords: categories
        .iter()
        .map(|(category, list)| (category.to_string(), words(list)))
        .collect(),
      urgency_keywords: words(&[
        "urgent",
        "asap",
        "immediately",
        "critical",
        "emergency",
        "deadline",
        "quickly",
      ]),
      impact_keywords: words(&[
        "revenue",
        "sales",
        "conversion",
        "customers",
        "losing",
        "money",
        "cost",
        "roi",
      ]),
    }
  }
}

impl KeywordRules {
  /// Keywords for a category; empty for categories without rules.
  pub fn for_category(&self, category: &str) -> &[String] {
    self
      .category_keywords
      .get(&category.trim().to_lowercase())
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }
}

/// Any keyword contained in the (already lowercased) text?
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
  keywords.iter().any(|k| text.contains(k.as_str()))
}

/// Number of keywords contained in the (already lowercased) text.
pub fn count_matches(text: &str, keywords: &[String]) -> usize {
  keywords.iter().filter(|k| text.contains(k.as_str())).count()
}
