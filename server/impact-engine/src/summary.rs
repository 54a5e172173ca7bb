//! Aggregate scored issues into totals, quick wins and an implementation roadmap.

use std::cmp::Ordering;

use crate::currency::{format_currency, parse_currency, round1};
use crate::types::*;

const IMMEDIATE_LIMIT: usize = 3;
const SHORT_TERM_LIMIT: usize = 5;

/// roi_score desc, then issue id asc for determinism.
pub fn by_roi_desc(a: &ScoredIssue, b: &ScoredIssue) -> Ordering {
  b.roi_score()
    .partial_cmp(&a.roi_score())
    .unwrap_or(Ordering::Equal)
    .then_with(|| a.issue.id.cmp(&b.issue.id))
}

fn monthly_revenue(s: &ScoredIssue) -> f64 {
  parse_currency(&s.business_metrics.revenue_impact.monthly)
}

fn roadmap_item(s: &ScoredIssue) -> RoadmapItem {
  RoadmapItem {
    issue_id: s.issue.id.clone(),
    description: s.issue.description.clone(),
    roi_score: s.roi_score(),
    priority_level: s.priority(),
    monthly_revenue: s.business_metrics.revenue_impact.monthly.clone(),
    effort: s.issue.effort(),
  }
}

pub fn summarize(scored: &[ScoredIssue]) -> ImpactSummary {
  let mut ranked: Vec<&ScoredIssue> = scored.iter().collect();
  ranked.sort_by(|a, b| by_roi_desc(a, b));

  let quick_wins: Vec<&ScoredIssue> = ranked
    .iter()
    .copied()
    .filter(|s| s.tier() == ComplexityTier::QuickWin)
    .collect();

  let immediate = quick_wins
    .iter()
    .take(IMMEDIATE_LIMIT)
    .map(|s| roadmap_item(s))
    .collect();
  let short_term = ranked
    .iter()
    .filter(|s| s.tier() == ComplexityTier::Standard)
    .filter(|s| s.priority() >= PriorityLevel::High)
    .take(SHORT_TERM_LIMIT)
    .map(|s| roadmap_item(s))
    .collect();
  let long_term = ranked
    .iter()
    .filter(|s| s.tier() == ComplexityTier::Complex)
    .map(|s| roadmap_item(s))
    .collect();

  let total: f64 = scored.iter().map(monthly_revenue).sum();
  let average_roi_score = if scored.is_empty() {
    0.0
  } else {
    round1(scored.iter().map(|s| s.roi_score()).sum::<f64>() / scored.len() as f64)
  };

  // First maximum in roi order wins revenue ties.
  let highest_impact = ranked.iter().copied().fold(None, |best: Option<&ScoredIssue>, s| {
    match best {
      Some(b) if monthly_revenue(b) >= monthly_revenue(s) => Some(b),
      _ => Some(s),
    }
  });

  ImpactSummary {
    total_potential_revenue: format_currency(total),
    quick_wins_available: quick_wins.len(),
    critical_issues_count: scored
      .iter()
      .filter(|s| s.priority() == PriorityLevel::Critical)
      .count(),
    average_roi_score,
    implementation_roadmap: ImplementationRoadmap {
      immediate,
      short_term,
      long_term,
    },
    top_recommendation: ranked.first().map(|s| roadmap_item(s)),
    quickest_win: quick_wins.first().map(|s| roadmap_item(s)),
    highest_impact: highest_impact.map(roadmap_item),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::calculator;
  use crate::config::Config;
  use pretty_assertions::assert_eq;

  fn scored(id: &str, severity: Severity, category: &str, effort: Effort) -> ScoredIssue {
    let issue = Issue {
      id: id.into(),
      level: None,
      severity,
      category: category.into(),
      confidence: 1.0,
      impact_scope: ImpactScope::Conversion,
      element: None,
      description: format!("{} issue", category),
      suggested_fix: String::new(),
      implementation: Implementation { effort },
    };
    let business_metrics =
      calculator::score(&issue, "checkout", "e-commerce", Some(20_000.0), None, &Config::default());
    ScoredIssue {
      issue,
      business_metrics,
    }
  }

  #[test]
  fn empty_input() {
    let s = summarize(&[]);
    assert_eq!(s.total_potential_revenue, "$0");
    assert_eq!(s.average_roi_score, 0.0);
    assert_eq!(s.quick_wins_available, 0);
    assert!(s.top_recommendation.is_none());
    assert!(s.highest_impact.is_none());
    assert_eq!(s.implementation_roadmap, ImplementationRoadmap::default());
  }

  #[test]
  fn roadmap_buckets() {
    let issues = vec![
      scored("q1", Severity::Warning, "visual", Effort::Minutes),
      scored("q2", Severity::Critical, "conversion", Effort::Minutes),
      scored("q3", Severity::Improvement, "content", Effort::Minutes),
      scored("q4", Severity::Warning, "accessibility", Effort::Minutes),
      scored("s1", Severity::Critical, "usability", Effort::Hours),
      scored("s2", Severity::Improvement, "visual", Effort::Hours),
      scored("c1", Severity::Critical, "performance", Effort::Days),
      scored("c2", Severity::Improvement, "content", Effort::Days),
    ];
    let s = summarize(&issues);

    fn ids(items: &[RoadmapItem]) -> Vec<String> {
      items.iter().map(|i| i.issue_id.clone()).collect()
    }
    assert_eq!(ids(&s.implementation_roadmap.immediate), vec!["q2", "q4", "q1"]);
    assert_eq!(ids(&s.implementation_roadmap.short_term), vec!["s1"]);
    assert_eq!(ids(&s.implementation_roadmap.long_term), vec!["c1", "c2"]);
    assert_eq!(s.quick_wins_available, 4);
    assert_eq!(s.critical_issues_count, 3);
    assert_eq!(s.top_recommendation.unwrap().issue_id, "q2");
    assert_eq!(s.quickest_win.unwrap().issue_id, "q2");
  }

  #[test]
  fn total_revenue_sums_formatted_values() {
    let issues = vec![
      scored("a", Severity::Critical, "conversion", Effort::Hours),
      scored("b", Severity::Warning, "navigation", Effort::Days),
    ];
    let expected: f64 = issues.iter().map(monthly_revenue).sum();
    let s = summarize(&issues);
    assert_eq!(parse_currency(&s.total_potential_revenue), expected);
    assert_eq!(s.highest_impact.unwrap().issue_id, "a");
  }

  #[test]
  fn ties_break_on_issue_id() {
    let issues = vec![
      scored("b", Severity::Warning, "visual", Effort::Minutes),
      scored("a", Severity::Warning, "visual", Effort::Minutes),
    ];
    let s = summarize(&issues);
    assert_eq!(s.top_recommendation.unwrap().issue_id, "a");
    assert_eq!(s.highest_impact.unwrap().issue_id, "a");
  }

  #[test]
  fn huge_traffic_totals_do_not_overflow() {
    let config = Config::default();
    let issues: Vec<ScoredIssue> = ["a", "b"]
      .iter()
      .map(|id| {
        let issue = Issue {
          id: id.to_string(),
          level: None,
          severity: Severity::Critical,
          category: "conversion".into(),
          confidence: 1.0,
          impact_scope: ImpactScope::Conversion,
          element: None,
          description: String::new(),
          suggested_fix: String::new(),
          implementation: Implementation { effort: Effort::Hours },
        };
        let business_metrics =
          calculator::score(&issue, "checkout", "e-commerce", Some(1e20), None, &config);
        ScoredIssue {
          issue,
          business_metrics,
        }
      })
      .collect();

    let each = monthly_revenue(&issues[0]);
    assert!(each > i64::MAX as f64);
    let s = summarize(&issues);
    assert!(!s.total_potential_revenue.contains('-'));
    assert_eq!(parse_currency(&s.total_potential_revenue), each * 2.0);
  }
}
