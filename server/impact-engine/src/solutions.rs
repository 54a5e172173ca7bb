//! Solutions shown next to the analysis: stored contextual recommendations for a
//! matched problem statement, plus one traditional fix per scored issue.

use std::cmp::Ordering;

use crate::currency::round2;
use crate::types::*;

fn urgency_factor(urgency: Urgency) -> f64 {
  match urgency {
    Urgency::High => 1.1,
    Urgency::Medium => 1.0,
    Urgency::Low => 0.9,
  }
}

/// Stable id for a solution derived from an issue.
pub fn solution_id(issue_id: &str, fix: &str) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(issue_id.as_bytes());
  hasher.update(b"|");
  hasher.update(fix.as_bytes());
  let hex = hasher.finalize().to_hex();
  format!("sol-{}", &hex[..16])
}

fn primary_audience(context: Option<&BusinessContext>) -> String {
  context
    .and_then(|c| c.stakeholders.first().cloned())
    .unwrap_or_else(|| "stakeholders".to_string())
}

/// Contextual solutions tied to the matched template, weighted by match score.
///
/// Sorted by confidence desc, then id.
pub fn contextual_solutions(
  template: &ProblemStatementTemplate,
  match_score: f64,
  context: &BusinessContext,
  rows: &[ContextualSolution],
) -> Vec<Solution> {
  let confidence = round2((match_score * urgency_factor(context.urgency)).clamp(0.0, 1.0));
  let audience = primary_audience(Some(context));

  let mut out: Vec<Solution> = rows
    .iter()
    .filter(|row| row.template_ids.iter().any(|id| *id == template.id))
    .map(|row| Solution {
      id: row.id.clone(),
      title: row.title.clone(),
      description: row.description.clone(),
      category: if row.category.is_empty() {
        template.category.clone()
      } else {
        row.category.clone()
      },
      effort: row.effort,
      impact: row.expected_impact.clone().unwrap_or_else(|| "medium".to_string()),
      confidence,
      source: SolutionSource::Contextual,
      stakeholder_communication: row.stakeholder_communication.clone().unwrap_or_else(|| {
        format!(
          "For {}: addresses \"{}\" ({} timeline)",
          audience, template.statement, context.timeline
        )
      }),
      success_metrics: row.success_metrics.clone(),
      issue_id: None,
    })
    .collect();

  out.sort_by(|a, b| {
    b.confidence
      .partial_cmp(&a.confidence)
      .unwrap_or(Ordering::Equal)
      .then_with(|| a.id.cmp(&b.id))
  });
  out
}

/// One solution per scored issue that carries a suggested fix.
///
/// Sorted by roi_score desc, then issue id.
pub fn traditional_solutions(
  scored: &[ScoredIssue],
  context: Option<&BusinessContext>,
) -> Vec<Solution> {
  let audience = primary_audience(context);

  let mut with_fix: Vec<&ScoredIssue> = scored
    .iter()
    .filter(|s| !s.issue.suggested_fix.trim().is_empty())
    .collect();
  with_fix.sort_by(|a, b| crate::summary::by_roi_desc(a, b));

  with_fix
    .into_iter()
    .map(|s| {
      let issue = &s.issue;
      let metrics = &s.business_metrics;
      Solution {
        id: solution_id(&issue.id, &issue.suggested_fix),
        title: issue.suggested_fix.clone(),
        description: issue.description.clone(),
        category: issue.category.clone(),
        effort: issue.effort(),
        impact: metrics.priority_level.as_str().to_string(),
        confidence: round2(issue.clamped_confidence()),
        source: SolutionSource::Traditional,
        stakeholder_communication: format!(
          "For {}: {} priority {} fix, projected {} per month",
          audience,
          metrics.priority_level.as_str(),
          issue.category,
          metrics.revenue_impact.monthly
        ),
        success_metrics: Vec::new(),
        issue_id: Some(issue.id.clone()),
      }
    })
    .collect()
}

/// Contextual recommendations first, then issue-level fixes.
pub fn merge(contextual: Vec<Solution>, traditional: Vec<Solution>) -> Vec<Solution> {
  let mut out = contextual;
  out.extend(traditional);
  out
}
