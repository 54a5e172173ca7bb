//! ROI / business impact calculator for a single issue.
//!
//! Total over its inputs: every table lookup has a default and no branch can
//! fail, so callers never handle errors here.

use crate::config::Config;
use crate::currency::{format_currency, round1, round2};
use crate::tables;
use crate::types::*;

const AFFECTED_USERS_BASELINE: f64 = 15.0;

/// Priority bucket for an ROI score. Thresholds are fixed.
pub fn priority_for(severity: Severity, roi_score: f64) -> PriorityLevel {
  if severity == Severity::Critical && roi_score >= 15.0 {
    PriorityLevel::Critical
  } else if roi_score >= 12.0 {
    PriorityLevel::High
  } else if roi_score >= 8.0 {
    PriorityLevel::Medium
  } else {
    PriorityLevel::Low
  }
}

pub fn confidence_level(confidence: f64) -> ConfidenceLevel {
  if confidence >= 0.8 {
    ConfidenceLevel::High
  } else if confidence >= 0.6 {
    ConfidenceLevel::Medium
  } else {
    ConfidenceLevel::Low
  }
}

/// `base × confidence × severity × scope × effort`, rounded to one decimal.
pub fn roi_score(base_impact: f64, issue: &Issue) -> f64 {
  round1(
    base_impact
      * issue.clamped_confidence()
      * issue.severity.multiplier()
      * issue.impact_scope.multiplier()
      * issue.effort().divisor(),
  )
}

/// Conversion rate as a fraction. Values above 1 are read as percentages.
fn resolve_conversion_rate(requested: Option<f64>, benchmark: &IndustryBenchmark) -> f64 {
  match requested {
    Some(rate) if rate.is_finite() && rate > 1.0 => rate / 100.0,
    Some(rate) if rate.is_finite() && rate >= 0.0 => rate,
    _ => benchmark.average_conversion_rate,
  }
}

fn resolve_traffic(requested: Option<f64>, config: &Config) -> f64 {
  match requested {
    Some(traffic) if traffic.is_finite() && traffic >= 0.0 => traffic,
    _ => config.default_monthly_traffic,
  }
}

/// Attach business metrics to one issue.
pub fn score(
  issue: &Issue,
  screen_type: &str,
  industry: &str,
  monthly_traffic: Option<f64>,
  current_conversion_rate: Option<f64>,
  config: &Config,
) -> BusinessImpactMetrics {
  let benchmark = tables::benchmark_for(&config.benchmarks, industry);
  let base = tables::base_impact(&config.impact_percentages, issue.severity, &issue.category);
  let confidence = issue.clamped_confidence();
  let weighted = base * confidence;

  let roi = roi_score(base, issue);
  let priority_level = priority_for(issue.severity, roi);

  let traffic = resolve_traffic(monthly_traffic, config);
  let rate = resolve_conversion_rate(current_conversion_rate, &benchmark);
  let current_monthly_revenue = traffic * rate * benchmark.average_order_value;
  let monthly_increase = current_monthly_revenue * weighted / 100.0;

  let industry_label = industry_label(industry, config);
  let screen_label = match screen_type.trim() {
    "" => "general",
    s => s,
  };

  let revenue_impact = RevenueImpact {
    monthly: format_currency(monthly_increase),
    annual: format_currency(monthly_increase * 12.0),
    confidence: confidence_level(confidence),
    methodology: format!(
      "{} benchmark, {} screen: monthly traffic x conversion rate x average order value \
       x {:.1}% projected lift",
      industry_label, screen_label, weighted
    ),
  };

  let category = issue.category.trim().to_lowercase();
  let metrics = BusinessImpactMetrics {
    roi_score: roi,
    priority_level,
    revenue_impact,
    ux_metrics: ux_metrics(issue, &category, weighted),
    accessibility_impact: accessibility_impact(issue, &category, &benchmark, weighted),
    conversion_metrics: ConversionMetrics {
      current_rate: round2(rate * 100.0),
      projected_rate: round2(rate * 100.0 * (1.0 + weighted / 100.0)),
      lift_percentage: round1(weighted),
      mobile_users_affected: round1(benchmark.mobile_usage * 100.0),
    },
    implementation_analysis: implementation_analysis(issue.effort(), monthly_increase, config),
    competitive_advantage: competitive_advantage(roi, &category, &industry_label),
  };

  tracing::debug!(
    issue_id = %issue.id,
    roi_score = metrics.roi_score,
    priority = metrics.priority_level.as_str(),
    monthly = %metrics.revenue_impact.monthly,
    "scored issue"
  );

  metrics
}

fn industry_label(industry: &str, config: &Config) -> String {
  let key = industry.trim().to_lowercase();
  if config.benchmarks.contains_key(&key) {
    key
  } else {
    tables::DEFAULT_INDUSTRY.to_string()
  }
}

fn ux_metrics(issue: &Issue, category: &str, weighted: f64) -> UxMetrics {
  let task_weight = if issue.impact_scope == ImpactScope::TaskCompletion {
    1.0
  } else {
    0.5
  };
  let time_weight = match category {
    "usability" | "navigation" => 0.8,
    _ => 0.4,
  };
  let error_weight = if issue.severity == Severity::Critical {
    0.7
  } else {
    0.3
  };

  UxMetrics {
    task_completion_improvement: round1(weighted * task_weight),
    user_satisfaction_increase: round1(weighted * 0.6),
    time_on_task_reduction: round1(weighted * time_weight),
    error_rate_reduction: round1(weighted * error_weight),
  }
}

fn accessibility_impact(
  issue: &Issue,
  category: &str,
  benchmark: &IndustryBenchmark,
  weighted: f64,
) -> AccessibilityImpact {
  if category != "accessibility" {
    return AccessibilityImpact {
      compliance_improvement: 0.0,
      affected_users_percentage: 0.0,
      legal_risk_reduction: RiskLevel::Low,
      wcag_level: None,
    };
  }

  let gap = (1.0 - benchmark.accessibility_compliance).max(0.0) * 100.0;
  AccessibilityImpact {
    compliance_improvement: round1(gap * (weighted / 20.0).min(1.0)),
    affected_users_percentage: round1(AFFECTED_USERS_BASELINE * issue.clamped_confidence()),
    legal_risk_reduction: match issue.severity {
      Severity::Critical => RiskLevel::High,
      Severity::Warning => RiskLevel::Medium,
      Severity::Improvement | Severity::Unknown => RiskLevel::Low,
    },
    wcag_level: Some("AA".to_string()),
  }
}

fn implementation_analysis(
  effort: Effort,
  monthly_increase: f64,
  config: &Config,
) -> ImplementationAnalysis {
  let hours = effort.estimated_hours();
  let cost = hours * config.developer_hourly_rate;
  let daily = monthly_increase / 30.0;
  let payback_period_days = if daily > 0.0 && daily.is_finite() {
    Some((cost / daily).ceil().min(u32::MAX as f64) as u32)
  } else {
    None
  };
  let complexity = effort.tier();

  ImplementationAnalysis {
    effort,
    complexity,
    estimated_hours: hours,
    estimated_cost: format_currency(cost),
    payback_period_days,
    quick_win: complexity == ComplexityTier::QuickWin,
  }
}

fn competitive_advantage(roi: f64, category: &str, industry: &str) -> CompetitiveAdvantage {
  let position = if roi >= 15.0 {
    MarketPosition::MarketLeading
  } else if roi >= 8.0 {
    MarketPosition::Competitive
  } else {
    MarketPosition::Parity
  };
  let summary = match position {
    MarketPosition::MarketLeading => format!(
      "Fixing this {} issue puts the experience ahead of typical {} competitors",
      category, industry
    ),
    MarketPosition::Competitive => format!(
      "Closes a {} gap that stronger {} competitors have already addressed",
      category, industry
    ),
    MarketPosition::Parity => format!("Keeps {} quality at {} baseline", category, industry),
  };

  CompetitiveAdvantage {
    differentiation_score: round1((roi / 3.0).min(10.0)),
    position,
    summary,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn issue(
    severity: Severity,
    category: &str,
    confidence: f64,
    scope: ImpactScope,
    effort: Effort,
  ) -> Issue {
    Issue {
      id: "issue-1".into(),
      level: None,
      severity,
      category: category.into(),
      confidence,
      impact_scope: scope,
      element: None,
      description: "Low contrast on primary button".into(),
      suggested_fix: "Darken the button background".into(),
      implementation: Implementation { effort },
    }
  }

  #[test]
  fn critical_accessibility_conversion_example() {
    let config = Config::default();
    let i = issue(
      Severity::Critical,
      "accessibility",
      1.0,
      ImpactScope::Conversion,
      Effort::Minutes,
    );
    let m = score(&i, "checkout", "ecommerce", None, None, &config);
    assert!((m.roi_score - 31.5).abs() < 1e-9);
    assert_eq!(m.priority_level, PriorityLevel::Critical);
    assert_eq!(m.accessibility_impact.legal_risk_reduction, RiskLevel::High);
    assert_eq!(m.accessibility_impact.wcag_level.as_deref(), Some("AA"));
    assert!(m.implementation_analysis.quick_win);
  }

  #[test]
  fn priority_thresholds() {
    assert_eq!(priority_for(Severity::Critical, 15.0), PriorityLevel::Critical);
    assert_eq!(priority_for(Severity::Critical, 14.9), PriorityLevel::High);
    assert_eq!(priority_for(Severity::Warning, 40.0), PriorityLevel::High);
    assert_eq!(priority_for(Severity::Warning, 12.0), PriorityLevel::High);
    assert_eq!(priority_for(Severity::Improvement, 8.0), PriorityLevel::Medium);
    assert_eq!(priority_for(Severity::Improvement, 7.9), PriorityLevel::Low);
    assert_eq!(priority_for(Severity::Critical, 0.0), PriorityLevel::Low);
  }

  #[test]
  fn unknown_scope_and_effort_use_defaults() {
    let i = issue(Severity::Warning, "typography", 1.0, ImpactScope::Unknown, Effort::Unknown);
    // 5.0 fallback x 1.0 x 1.0 x 1.0 x 0.8
    assert!((roi_score(5.0, &i) - 4.0).abs() < 1e-9);
  }

  #[test]
  fn unknown_severity_is_neutral_and_never_critical() {
    let config = Config::default();
    let i = issue(Severity::Unknown, "conversion", 1.0, ImpactScope::Conversion, Effort::Minutes);
    let m = score(&i, "checkout", "saas", None, None, &config);
    // 5.0 fallback x 1.0 x 1.0 x 1.4 x 1.0
    assert!((m.roi_score - 7.0).abs() < 1e-9);
    assert_eq!(m.priority_level, PriorityLevel::Low);
    assert_eq!(priority_for(Severity::Unknown, 50.0), PriorityLevel::High);
  }

  #[test]
  fn revenue_uses_benchmark_and_traffic() {
    let config = Config::default();
    let i = issue(Severity::Critical, "conversion", 0.8, ImpactScope::Conversion, Effort::Hours);
    // saas: 10_000 x 0.03 x 150 = 45_000/month; lift 25 x 0.8 = 20% -> 9_000.
    let m = score(&i, "pricing", "saas", Some(10_000.0), None, &config);
    assert_eq!(m.revenue_impact.monthly, "$9,000");
    assert_eq!(m.revenue_impact.annual, "$108,000");
    assert_eq!(m.revenue_impact.confidence, ConfidenceLevel::High);
    assert!(m.revenue_impact.methodology.contains("saas"));
  }

  #[test]
  fn percentage_conversion_rate_is_normalized() {
    let config = Config::default();
    let i = issue(Severity::Warning, "usability", 1.0, ImpactScope::TaskCompletion, Effort::Hours);
    let as_fraction = score(&i, "", "default", Some(1000.0), Some(0.05), &config);
    let as_percent = score(&i, "", "default", Some(1000.0), Some(5.0), &config);
    assert_eq!(as_fraction.revenue_impact, as_percent.revenue_impact);
    assert_eq!(as_fraction.conversion_metrics.current_rate, 5.0);
  }

  #[test]
  fn confidence_is_clamped() {
    let config = Config::default();
    let high = issue(Severity::Warning, "visual", 7.0, ImpactScope::Aesthetic, Effort::Days);
    let one = issue(Severity::Warning, "visual", 1.0, ImpactScope::Aesthetic, Effort::Days);
    assert_eq!(
      score(&high, "", "", None, None, &config).roi_score,
      score(&one, "", "", None, None, &config).roi_score
    );
    let negative = issue(Severity::Warning, "visual", -3.0, ImpactScope::Aesthetic, Effort::Days);
    let m = score(&negative, "", "", None, None, &config);
    assert_eq!(m.roi_score, 0.0);
    assert_eq!(m.revenue_impact.monthly, "$0");
    assert_eq!(m.implementation_analysis.payback_period_days, None);
  }

  #[test]
  fn non_accessibility_issue_has_empty_accessibility_block() {
    let config = Config::default();
    let i = issue(Severity::Critical, "performance", 0.9, ImpactScope::Performance, Effort::Days);
    let m = score(&i, "", "fintech", None, None, &config);
    assert_eq!(m.accessibility_impact.compliance_improvement, 0.0);
    assert_eq!(m.accessibility_impact.wcag_level, None);
    assert_eq!(m.implementation_analysis.complexity, ComplexityTier::Complex);
    assert_eq!(m.implementation_analysis.estimated_cost, "$2,400");
  }

  #[test]
  fn payback_period_from_monthly_revenue() {
    let config = Config::default();
    // default: 10_000 x 0.022 x 100 = 22_000; lift 12% -> 2_640/month = 88/day.
    let i = issue(Severity::Warning, "conversion", 1.0, ImpactScope::Conversion, Effort::Hours);
    let m = score(&i, "", "default", None, None, &config);
    assert_eq!(m.revenue_impact.monthly, "$2,640");
    // 4h x $100 = $400 -> ceil(400 / 88) = 5 days.
    assert_eq!(m.implementation_analysis.payback_period_days, Some(5));
  }
}
