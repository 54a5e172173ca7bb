//! Rank a free-text problem statement against stored problem-statement templates.
//!
//! Cheap keyword heuristic, not a semantic search: word overlap plus fixed
//! boosts from the keyword rules. Scores are clamped to [0, 1].

use crate::config::Config;
use crate::tables;
use crate::types::ProblemStatementTemplate;

/// Best template for a statement. `best` is `None` below the match threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
  pub best: Option<&'a ProblemStatementTemplate>,
  pub score: f64,
}

/// Lowercased words longer than two characters, punctuation trimmed.
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .to_lowercase()
    .split_whitespace()
    .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
    .filter(|w| w.chars().count() > 2)
    .collect()
}

/// Fraction of user words that substring-match any template word.
pub fn word_overlap(user_words: &[String], template_words: &[String]) -> f64 {
  if user_words.is_empty() {
    return 0.0;
  }
  let hits = user_words
    .iter()
    .filter(|u| {
      template_words
        .iter()
        .any(|t| t.contains(u.as_str()) || u.contains(t.as_str()))
    })
    .count();
  hits as f64 / user_words.len() as f64
}

/// Score one template against a statement, in [0, 1].
pub fn score_template(
  statement: &str,
  template: &ProblemStatementTemplate,
  config: &Config,
) -> f64 {
  let lowered = statement.to_lowercase();
  let weights = &config.match_weights;
  let rules = &config.keywords;

  let overlap = word_overlap(&tokenize(statement), &tokenize(&template.statement));
  let category_hits = tables::count_matches(&lowered, rules.for_category(&template.category));

  let mut score = overlap * weights.word_overlap + category_hits as f64 * weights.category_keyword;
  if tables::contains_any(&lowered, &rules.urgency_keywords) {
    score += weights.urgency;
  }
  if tables::contains_any(&lowered, &rules.impact_keywords) {
    score += weights.business_impact;
  }

  if score.is_nan() {
    0.0
  } else {
    score.clamp(0.0, 1.0)
  }
}

/// Highest-scoring template; earlier templates win ties.
pub fn match_statement<'a>(
  statement: &str,
  templates: &'a [ProblemStatementTemplate],
  config: &Config,
) -> MatchResult<'a> {
  let mut best: Option<(&ProblemStatementTemplate, f64)> = None;
  for template in templates {
    let score = score_template(statement, template, config);
    if best.map_or(true, |(_, s)| score > s) {
      best = Some((template, score));
    }
  }

  match best {
    Some((template, score)) if score >= config.match_threshold => {
      tracing::info!(template_id = %template.id, score, "problem statement matched");
      MatchResult {
        best: Some(template),
        score,
      }
    }
    Some((template, score)) => {
      tracing::info!(
        template_id = %template.id,
        score,
        threshold = config.match_threshold,
        "best template below threshold; using fallback context"
      );
      MatchResult { best: None, score }
    }
    None => MatchResult {
      best: None,
      score: 0.0,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::ImpliedContext;

  fn template(id: &str, statement: &str, category: &str) -> ProblemStatementTemplate {
    ProblemStatementTemplate {
      id: id.into(),
      statement: statement.into(),
      category: category.into(),
      implied_context: ImpliedContext::default(),
    }
  }

  fn templates() -> Vec<ProblemStatementTemplate> {
    vec![
      template(
        "t-conv",
        "Our conversion rate is declining and users abandon checkout",
        "conversion_decline",
      ),
      template(
        "t-mobile",
        "The site is hard to use on mobile phones",
        "mobile_experience",
      ),
      template(
        "t-brand",
        "Our brand looks outdated compared to competitors",
        "brand_perception",
      ),
    ]
  }

  #[test]
  fn tokenize_drops_short_words_and_punctuation() {
    assert_eq!(
      tokenize("We're losing it, FAST!"),
      vec!["we're".to_string(), "losing".into(), "fast".into()]
    );
  }

  #[test]
  fn checkout_statement_matches_conversion_template() {
    let config = Config::default();
    let ts = templates();
    let result = match_statement(
      "Our checkout conversion is dropping and the CEO wants this fixed immediately",
      &ts,
      &config,
    );
    let best = result.best.expect("should match");
    assert_eq!(best.id, "t-conv");
    assert!(result.score >= 0.9, "score {}", result.score);
  }

  #[test]
  fn identical_statement_gets_full_overlap() {
    let config = Config::default();
    let t = template("t", "The site is hard to use on mobile phones", "unknown_category");
    let score = score_template(&t.statement, &t, &config);
    assert!(score >= 0.6, "score {}", score);
  }

  #[test]
  fn unrelated_statement_falls_back() {
    let config = Config::default();
    let ts = templates();
    let result = match_statement("xyz qqq", &ts, &config);
    assert!(result.best.is_none());
    assert!(result.score < config.match_threshold);
  }

  #[test]
  fn empty_templates_give_zero() {
    let config = Config::default();
    let result = match_statement("conversion is down", &[], &config);
    assert!(result.best.is_none());
    assert_eq!(result.score, 0.0);
  }

  #[test]
  fn score_is_capped_at_one() {
    let config = Config::default();
    let t = template(
      "t",
      "conversion signup checkout purchase abandon funnel drop",
      "conversion_decline",
    );
    let score = score_template(
      "urgent revenue conversion signup checkout purchase abandon funnel drop",
      &t,
      &config,
    );
    assert_eq!(score, 1.0);
  }

  #[test]
  fn ties_keep_first_template() {
    let config = Config::default();
    let ts = vec![
      template("first", "navigation menu", "navigation_usability"),
      template("second", "navigation menu", "navigation_usability"),
    ];
    let result = match_statement("navigation menu confusing", &ts, &config);
    assert_eq!(result.best.map(|t| t.id.as_str()), Some("first"));
  }
}
