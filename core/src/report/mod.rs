//! Report aggregation.
//!
//! After the pass completes, every active module that survived it is queried
//! once for suggestions and once for its statistic; the results merge into a
//! single [`AnalysisReport`]. Output methods are read-only and fallible: an
//! error here excludes that module from the report the same way a handler
//! error would, recorded for diagnostic display.


use vantage_types::{
    FailurePhase, ModuleFailure, ModuleReport, Severity, Suggestion, Thresholds,
};

use crate::analysis::ModuleContext;
use crate::analysis::dispatcher::DispatchOutcome;
use crate::analysis::registry::ModuleCell;

/// Collects the suggestions one module emits, with the threshold-evaluation
/// helper modules grade themselves through.
#[derive(Debug, Default)]
pub struct SuggestionCollector {
    suggestions: Vec<Suggestion>,
}

impl SuggestionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade `thresholds` and start a suggestion draft. If the observed
    /// value is inside all boundaries the draft is inert: builder calls are
    /// accepted and nothing is emitted.
    pub fn when(&mut self, thresholds: Thresholds) -> SuggestionDraft<'_> {
        let severity = thresholds.severity();
        let actual = thresholds.format_value(thresholds.actual);
        let recommended = thresholds.format_value(thresholds.recommended());
        SuggestionDraft { collector: self, severity, text: String::new(), actual, recommended }
    }

    /// Start a draft gated by a boolean instead of numeric thresholds, at a
    /// fixed severity. For "take talent X"-style advice where there is no
    /// metric to grade.
    pub fn when_flag(&mut self, triggered: bool, severity: Severity) -> SuggestionDraft<'_> {
        SuggestionDraft {
            collector: self,
            severity: triggered.then_some(severity),
            text: String::new(),
            actual: String::new(),
            recommended: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    fn push(&mut self, suggestion: Suggestion) {
        self.suggestions.push(suggestion);
    }

    fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggestions
    }
}

/// An in-progress suggestion. `actual` and `recommended` default to the
/// threshold values rendered in the threshold's display style; override them
/// for richer phrasing.
#[must_use = "a suggestion draft does nothing until .emit() is called"]
pub struct SuggestionDraft<'a> {
    collector: &'a mut SuggestionCollector,
    severity: Option<Severity>,
    text: String,
    actual: String,
    recommended: String,
}

impl SuggestionDraft<'_> {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = actual.into();
        self
    }

    pub fn recommended(mut self, recommended: impl Into<String>) -> Self {
        self.recommended = recommended.into();
        self
    }

    /// Append the suggestion to the module's output, if one is warranted.
    pub fn emit(self) {
        if let Some(severity) = self.severity {
            self.collector.push(Suggestion {
                severity,
                text: self.text,
                actual: self.actual,
                recommended: self.recommended,
            });
        }
    }
}

/// Query every active, healthy module for its outputs. Modules that produce
/// neither suggestions nor a statistic are omitted from the report; modules
/// whose output methods fail are excluded and recorded like handler failures.
pub(crate) fn collect_reports(
    modules: &[ModuleCell],
    outcome: &mut DispatchOutcome,
    ctx: &ModuleContext<'_>,
) -> Vec<ModuleReport> {
    let mut reports = Vec::new();

    for (idx, cell) in modules.iter().enumerate() {
        if outcome.failed[idx] {
            continue;
        }
        let analyzer = cell.analyzer.borrow();
        if !analyzer.active() {
            continue;
        }

        let mut collector = SuggestionCollector::new();
        if let Err(cause) = analyzer.suggestions(ctx, &mut collector) {
            record_output_failure(outcome, idx, cell, FailurePhase::Suggestions, &cause);
            continue;
        }

        let statistic = match analyzer.statistic(ctx) {
            Ok(statistic) => statistic,
            Err(cause) => {
                record_output_failure(outcome, idx, cell, FailurePhase::Statistic, &cause);
                continue;
            }
        };

        let suggestions = collector.into_suggestions();
        if suggestions.is_empty() && statistic.is_none() {
            continue;
        }
        reports.push(ModuleReport { module: cell.name.to_string(), suggestions, statistic });
    }

    reports
}

fn record_output_failure(
    outcome: &mut DispatchOutcome,
    idx: usize,
    cell: &ModuleCell,
    phase: FailurePhase,
    cause: &crate::error::ModuleError,
) {
    tracing::warn!(module = cell.name, %cause, "module output failed; excluding from report");
    outcome.failed[idx] = true;
    outcome.failures.push(ModuleFailure {
        module: cell.name.to_string(),
        phase,
        cause: cause.to_string(),
    });
}
