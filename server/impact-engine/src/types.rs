//! Core types for the impact engine (JSON contract with Node + derived metrics).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Issue (inbound, produced by the analysis pipeline)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Critical,
  Warning,
  Improvement,
  /// Any label outside the known set; scored with neutral weights.
  #[serde(other)]
  Unknown,
}

impl Severity {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Critical => "critical",
      Self::Warning => "warning",
      Self::Improvement => "improvement",
      Self::Unknown => "unknown",
    }
  }

  pub fn multiplier(self) -> f64 {
    match self {
      Self::Critical => 1.5,
      Self::Warning => 1.0,
      Self::Improvement => 0.6,
      Self::Unknown => 1.0,
    }
  }
}

/// Dimension of the experience an issue affects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactScope {
  Conversion,
  TaskCompletion,
  UserTrust,
  Performance,
  Readability,
  Aesthetic,
  #[default]
  #[serde(other)]
  Unknown,
}

impl ImpactScope {
  pub fn multiplier(self) -> f64 {
    match self {
      Self::Conversion => 1.4,
      Self::TaskCompletion => 1.3,
      Self::UserTrust => 1.2,
      Self::Performance => 1.1,
      Self::Readability => 0.9,
      Self::Aesthetic => 0.7,
      Self::Unknown => 1.0,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
  Minutes,
  Hours,
  Days,
  #[default]
  #[serde(other)]
  Unknown,
}

impl Effort {
  /// Divisor applied to the ROI score (cheaper fixes rank higher).
  pub fn divisor(self) -> f64 {
    match self {
      Self::Minutes => 1.0,
      Self::Hours => 0.8,
      Self::Days => 0.5,
      Self::Unknown => 0.8,
    }
  }

  pub fn estimated_hours(self) -> f64 {
    match self {
      Self::Minutes => 0.5,
      Self::Hours => 4.0,
      Self::Days => 24.0,
      Self::Unknown => 8.0,
    }
  }

  pub fn tier(self) -> ComplexityTier {
    match self {
      Self::Minutes => ComplexityTier::QuickWin,
      Self::Days => ComplexityTier::Complex,
      Self::Hours | Self::Unknown => ComplexityTier::Standard,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
  #[serde(default)]
  pub effort: Effort,
}

/// Where the annotated element sits on the design (pixels, top-left origin).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementLocation {
  #[serde(default)]
  pub x: f64,
  #[serde(default)]
  pub y: f64,
  #[serde(default)]
  pub width: f64,
  #[serde(default)]
  pub height: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub selector: Option<String>,
}

/// One critique issue. Unknown fields are silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub level: Option<String>,
  pub severity: Severity,
  pub category: String,
  #[serde(default = "default_confidence")]
  pub confidence: f64,
  #[serde(default)]
  pub impact_scope: ImpactScope,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub element: Option<ElementLocation>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub suggested_fix: String,
  #[serde(default)]
  pub implementation: Implementation,
}

fn default_confidence() -> f64 {
  0.7
}

impl Issue {
  /// Confidence clamped into [0, 1]; NaN counts as no confidence.
  pub fn clamped_confidence(&self) -> f64 {
    if self.confidence.is_nan() {
      0.0
    } else {
      self.confidence.clamp(0.0, 1.0)
    }
  }

  pub fn effort(&self) -> Effort {
    self.implementation.effort
  }
}

// ---------------------------------------------------------------------------
// Industry benchmark
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
  /// Fraction of sessions that convert (0.025 = 2.5%).
  pub average_conversion_rate: f64,
  /// USD per order / plan.
  pub average_order_value: f64,
  /// Fraction of sites in the industry meeting WCAG AA.
  pub accessibility_compliance: f64,
  /// Fraction of traffic from mobile devices.
  pub mobile_usage: f64,
}

// ---------------------------------------------------------------------------
// Business impact metrics (derived, attached to an issue)
// ---------------------------------------------------------------------------

/// Ordered low -> critical so comparisons follow severity of the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
  Low,
  Medium,
  High,
  Critical,
}

impl PriorityLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
      Self::Critical => "critical",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueImpact {
  /// Formatted as "$1,234".
  pub monthly: String,
  pub annual: String,
  pub confidence: ConfidenceLevel,
  pub methodology: String,
}

/// Projected UX improvements, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UxMetrics {
  pub task_completion_improvement: f64,
  pub user_satisfaction_increase: f64,
  pub time_on_task_reduction: f64,
  pub error_rate_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityImpact {
  pub compliance_improvement: f64,
  pub affected_users_percentage: f64,
  pub legal_risk_reduction: RiskLevel,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub wcag_level: Option<String>,
}

/// Conversion rates in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionMetrics {
  pub current_rate: f64,
  pub projected_rate: f64,
  pub lift_percentage: f64,
  pub mobile_users_affected: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityTier {
  QuickWin,
  Standard,
  Complex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationAnalysis {
  pub effort: Effort,
  pub complexity: ComplexityTier,
  pub estimated_hours: f64,
  pub estimated_cost: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub payback_period_days: Option<u32>,
  pub quick_win: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketPosition {
  MarketLeading,
  Competitive,
  Parity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveAdvantage {
  pub differentiation_score: f64,
  pub position: MarketPosition,
  pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessImpactMetrics {
  pub roi_score: f64,
  pub priority_level: PriorityLevel,
  pub revenue_impact: RevenueImpact,
  pub ux_metrics: UxMetrics,
  pub accessibility_impact: AccessibilityImpact,
  pub conversion_metrics: ConversionMetrics,
  pub implementation_analysis: ImplementationAnalysis,
  pub competitive_advantage: CompetitiveAdvantage,
}

/// An issue with its business metrics attached (the shape the UI reads).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredIssue {
  #[serde(flatten)]
  pub issue: Issue,
  pub business_metrics: BusinessImpactMetrics,
}

impl ScoredIssue {
  pub fn roi_score(&self) -> f64 {
    self.business_metrics.roi_score
  }

  pub fn priority(&self) -> PriorityLevel {
    self.business_metrics.priority_level
  }

  pub fn tier(&self) -> ComplexityTier {
    self.business_metrics.implementation_analysis.complexity
  }
}

// ---------------------------------------------------------------------------
// Problem statements and business context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
  Low,
  #[default]
  #[serde(alias = "med")]
  Medium,
  High,
}

/// Context a template implies when it matches (stored alongside the template row).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpliedContext {
  #[serde(default)]
  pub business_type: Option<String>,
  #[serde(default)]
  pub user_segment: Option<String>,
  #[serde(default)]
  pub urgency: Option<Urgency>,
  #[serde(default)]
  pub typical_stakeholders: Vec<String>,
  #[serde(default)]
  pub timeline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemStatementTemplate {
  pub id: String,
  pub statement: String,
  pub category: String,
  #[serde(default)]
  pub implied_context: ImpliedContext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessContext {
  pub urgency: Urgency,
  pub stakeholders: Vec<String>,
  pub goals: Vec<String>,
  pub business_type: String,
  pub user_segment: String,
  pub timeline: String,
}

/// Accepted template match reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemMatch {
  pub template_id: String,
  pub category: String,
  pub score: f64,
  pub solutions_offered: bool,
}

// ---------------------------------------------------------------------------
// Solutions
// ---------------------------------------------------------------------------

/// Stored recommendation tied to one or more templates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContextualSolution {
  pub id: String,
  #[serde(default)]
  pub template_ids: Vec<String>,
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub effort: Effort,
  #[serde(default)]
  pub expected_impact: Option<String>,
  #[serde(default)]
  pub stakeholder_communication: Option<String>,
  #[serde(default)]
  pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionSource {
  Traditional,
  Contextual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
  pub id: String,
  pub title: String,
  pub description: String,
  pub category: String,
  pub effort: Effort,
  pub impact: String,
  pub confidence: f64,
  pub source: SolutionSource,
  pub stakeholder_communication: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub success_metrics: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub issue_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapItem {
  pub issue_id: String,
  pub description: String,
  pub roi_score: f64,
  pub priority_level: PriorityLevel,
  pub monthly_revenue: String,
  pub effort: Effort,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImplementationRoadmap {
  pub immediate: Vec<RoadmapItem>,
  pub short_term: Vec<RoadmapItem>,
  pub long_term: Vec<RoadmapItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactSummary {
  pub total_potential_revenue: String,
  pub quick_wins_available: usize,
  pub critical_issues_count: usize,
  pub average_roi_score: f64,
  pub implementation_roadmap: ImplementationRoadmap,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub top_recommendation: Option<RoadmapItem>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub quickest_win: Option<RoadmapItem>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub highest_impact: Option<RoadmapItem>,
}

// ---------------------------------------------------------------------------
// Request / report (stdin / stdout)
// ---------------------------------------------------------------------------

/// Input: one JSON object from Node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
  #[serde(default)]
  pub issues: Vec<Issue>,
  #[serde(default)]
  pub screen_type: Option<String>,
  #[serde(default)]
  pub industry: Option<String>,
  #[serde(default)]
  pub monthly_traffic: Option<f64>,
  #[serde(default)]
  pub current_conversion_rate: Option<f64>,
  #[serde(default)]
  pub problem_statement: Option<String>,
  #[serde(default)]
  pub templates: Vec<ProblemStatementTemplate>,
  #[serde(default)]
  pub contextual_solutions: Vec<ContextualSolution>,
}

/// Output: one JSON object to stdout for Node to parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
  pub scored_issues: Vec<ScoredIssue>,
  pub summary: ImpactSummary,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub problem_match: Option<ProblemMatch>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub business_context: Option<BusinessContext>,
  pub solutions: Vec<Solution>,
}

/// Structured error output for unreadable input.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
