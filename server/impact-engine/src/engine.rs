//! End-to-end pipeline: score issues, match the problem statement, build
//! solutions, summarize.

use crate::calculator;
use crate::config::Config;
use crate::context;
use crate::matcher;
use crate::solutions;
use crate::summary;
use crate::types::*;

/// Run the engine on a parsed request (no I/O). Deterministic for a given input.
pub fn analyze(request: &AnalysisRequest, config: &Config) -> AnalysisReport {
  let screen_type = request.screen_type.as_deref().unwrap_or_default();
  let industry = request.industry.as_deref().unwrap_or_default();

  let scored_issues: Vec<ScoredIssue> = request
    .issues
    .iter()
    .map(|issue| ScoredIssue {
      business_metrics: calculator::score(
        issue,
        screen_type,
        industry,
        request.monthly_traffic,
        request.current_conversion_rate,
        config,
      ),
      issue: issue.clone(),
    })
    .collect();

  let statement = request
    .problem_statement
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty());

  let mut problem_match = None;
  let mut business_context = None;
  let mut contextual = Vec::new();

  if let Some(statement) = statement {
    let result = matcher::match_statement(statement, &request.templates, config);
    let ctx = context::extract(statement, result.best.map(|t| &t.implied_context));

    if let Some(template) = result.best {
      let solutions_offered = result.score >= config.solution_threshold;
      if solutions_offered {
        contextual = solutions::contextual_solutions(
          template,
          result.score,
          &ctx,
          &request.contextual_solutions,
        );
      }
      problem_match = Some(ProblemMatch {
        template_id: template.id.clone(),
        category: template.category.clone(),
        score: crate::currency::round2(result.score),
        solutions_offered,
      });
    }
    business_context = Some(ctx);
  }

  let traditional = solutions::traditional_solutions(&scored_issues, business_context.as_ref());
  let summary = summary::summarize(&scored_issues);

  tracing::info!(
    issues = scored_issues.len(),
    critical = summary.critical_issues_count,
    quick_wins = summary.quick_wins_available,
    contextual_solutions = contextual.len(),
    "analysis complete"
  );

  AnalysisReport {
    scored_issues,
    summary,
    problem_match,
    business_context,
    solutions: solutions::merge(contextual, traditional),
  }
}
