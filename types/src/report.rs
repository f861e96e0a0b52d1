//! Report records produced by an analysis run.
//!
//! The engine returns data only; anything visual (icons, links, charts) is
//! the consumer's problem. Every record here serializes cleanly so hosts can
//! ship reports across process boundaries.

use serde::{Deserialize, Serialize};

/// How urgently a suggestion should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Average,
    Major,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Minor => write!(f, "minor"),
            Severity::Average => write!(f, "average"),
            Severity::Major => write!(f, "major"),
        }
    }
}

/// One piece of advice emitted by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub severity: Severity,
    pub text: String,
    /// The observed value, already formatted for display.
    pub actual: String,
    /// The recommended value, already formatted for display.
    pub recommended: String,
}

/// Sort key for statistics: core metrics first, then optional ones, each
/// ordered by their position number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticOrder {
    Core(u16),
    Optional(u16),
}

impl Default for StatisticOrder {
    fn default() -> Self {
        StatisticOrder::Optional(u16::MAX)
    }
}

/// One summary metric emitted by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub display_value: String,
    pub tooltip: String,
    #[serde(default)]
    pub order: StatisticOrder,
}

/// Where in a module's lifecycle a failure occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePhase {
    /// An event handler returned an error. Carries the encounter-relative
    /// timestamp (ms) and log index of the triggering event.
    Event { timestamp: i64, index: u64 },
    Suggestions,
    Statistic,
}

/// A recorded, non-fatal module failure.
///
/// Failed modules are excluded from suggestions and statistics but surfaced
/// here so the host can show what went missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFailure {
    pub module: String,
    pub phase: FailurePhase,
    pub cause: String,
}

/// Per-module slice of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub module: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<Statistic>,
}

/// Basic facts about the analyzed encounter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub duration_millis: i64,
    pub event_count: u64,
}

/// The merged output of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: EncounterSummary,
    /// Active modules in construction order. Modules that produced neither
    /// suggestions nor a statistic are omitted.
    pub modules: Vec<ModuleReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ModuleFailure>,
}

impl AnalysisReport {
    /// All statistics across modules, sorted by their order key. Ties keep
    /// module construction order.
    pub fn statistics(&self) -> Vec<(&str, &Statistic)> {
        let mut stats: Vec<(&str, &Statistic)> = self
            .modules
            .iter()
            .filter_map(|m| m.statistic.as_ref().map(|s| (m.module.as_str(), s)))
            .collect();
        stats.sort_by_key(|(_, s)| s.order);
        stats
    }

    /// All suggestions across modules, hardest-hitting first. Ties keep
    /// module construction order.
    pub fn suggestions(&self) -> Vec<(&str, &Suggestion)> {
        let mut all: Vec<(&str, &Suggestion)> = self
            .modules
            .iter()
            .flat_map(|m| m.suggestions.iter().map(|s| (m.module.as_str(), s)))
            .collect();
        all.sort_by_key(|(_, s)| std::cmp::Reverse(s.severity));
        all
    }
}
