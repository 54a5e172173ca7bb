//! Business context extracted from a problem statement via keyword checks.

use crate::types::{BusinessContext, ImpliedContext, Urgency};

const HIGH_URGENCY: &[&str] = &["urgent", "asap", "immediately", "critical", "emergency"];
const LOW_URGENCY: &[&str] = &["eventually", "no rush", "when possible", "someday"];

/// (keywords, stakeholder added when any keyword appears)
const STAKEHOLDER_RULES: &[(&[&str], &str)] = &[
  (&["ceo", "executive", "leadership", "board"], "executives"),
  (&["marketing"], "marketing team"),
  (&["developer", "engineering", "dev team"], "development team"),
  (&["designer", "design team"], "design team"),
  (&["sales"], "sales team"),
  (&["customer", "users"], "customers"),
];

const GOAL_RULES: &[(&[&str], &str)] = &[
  (&["conversion", "signup", "checkout"], "increase conversion rate"),
  (&["engagement", "retention", "bounce"], "improve user engagement"),
  (&["accessib", "compliance", "wcag"], "achieve accessibility compliance"),
  (&["trust", "credib"], "build user trust"),
  (&["mobile"], "improve mobile experience"),
  (&["revenue", "sales"], "grow revenue"),
];

const BUSINESS_TYPE_RULES: &[(&[&str], &str)] = &[
  (&["ecommerce", "e-commerce", "shop", "store", "checkout"], "e-commerce"),
  (&["saas", "subscription", "software"], "saas"),
  (&["bank", "fintech", "payment", "lending"], "fintech"),
  (&["health", "patient", "clinic"], "healthcare"),
];

const SEGMENT_RULES: &[(&[&str], &str)] = &[
  (&["enterprise", "b2b"], "enterprise"),
  (&["senior", "older"], "older adults"),
  (&["mobile"], "mobile users"),
  (&["first-time", "new users", "new visitors"], "new users"),
];

const TIMELINE_RULES: &[(&[&str], &str)] = &[
  (&["this week", "tomorrow", "by friday", "today"], "immediate"),
  (&["this month", "next month", "weeks"], "short-term"),
  (&["quarter", "this year", "next year", "months"], "long-term"),
];

fn has_any(text: &str, keywords: &[&str]) -> bool {
  keywords.iter().any(|k| text.contains(k))
}

/// Keyword must start a word: "board" does not fire inside "dashboard".
fn has_word_start(text: &str, keywords: &[&str]) -> bool {
  keywords.iter().any(|k| {
    text.match_indices(k).any(|(i, _)| {
      text[..i]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
    })
  })
}

fn first_rule(text: &str, rules: &[(&[&str], &str)]) -> Option<String> {
  rules
    .iter()
    .find(|(keywords, _)| has_any(text, keywords))
    .map(|(_, value)| value.to_string())
}

fn push_unique(list: &mut Vec<String>, value: &str) {
  if !list.iter().any(|v| v == value) {
    list.push(value.to_string());
  }
}

impl BusinessContext {
  /// Low-confidence context used when nothing in the statement or template applies.
  pub fn fallback() -> Self {
    Self {
      urgency: Urgency::Medium,
      stakeholders: Vec::new(),
      goals: Vec::new(),
      business_type: "general".into(),
      user_segment: "general".into(),
      timeline: "flexible".into(),
    }
  }
}

/// Extract urgency, stakeholders, goals, business type, segment and timeline.
///
/// Urgency is a single overwritten value (last matching branch wins); the
/// other fields accumulate independently.
pub fn extract(statement: &str, template_context: Option<&ImpliedContext>) -> BusinessContext {
  let text = statement.to_lowercase();
  let implied = template_context.cloned().unwrap_or_default();
  let fallback = BusinessContext::fallback();

  let mut urgency = implied.urgency.unwrap_or(fallback.urgency);
  if has_any(&text, HIGH_URGENCY) {
    urgency = Urgency::High;
  }
  if has_any(&text, LOW_URGENCY) {
    urgency = Urgency::Low;
  }

  let mut stakeholders = Vec::new();
  for s in &implied.typical_stakeholders {
    push_unique(&mut stakeholders, s);
  }
  for (keywords, stakeholder) in STAKEHOLDER_RULES {
    if has_word_start(&text, keywords) {
      push_unique(&mut stakeholders, stakeholder);
    }
  }

  let mut goals = Vec::new();
  for (keywords, goal) in GOAL_RULES {
    if has_any(&text, keywords) {
      push_unique(&mut goals, goal);
    }
  }

  BusinessContext {
    urgency,
    stakeholders,
    goals,
    business_type: first_rule(&text, BUSINESS_TYPE_RULES)
      .or(implied.business_type)
      .unwrap_or(fallback.business_type),
    user_segment: first_rule(&text, SEGMENT_RULES)
      .or(implied.user_segment)
      .unwrap_or(fallback.user_segment),
    timeline: first_rule(&text, TIMELINE_RULES)
      .or(implied.timeline)
      .unwrap_or(fallback.timeline),
  }
}
