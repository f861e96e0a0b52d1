//! Plain-text report rendering.

use std::fmt::Write;

use vantage_types::formatting::format_duration;
use vantage_types::{AnalysisReport, Severity};

/// Render the report for terminal display. `min_severity` drops quieter
/// suggestions from the listing; statistics and failures always print.
pub fn render_text(report: &AnalysisReport, min_severity: Option<Severity>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Encounter: {} ({} events)",
        format_duration(report.summary.duration_millis),
        report.summary.event_count
    );

    let statistics = report.statistics();
    if !statistics.is_empty() {
        let _ = writeln!(out, "\nStatistics:");
        for (module, stat) in statistics {
            let _ = writeln!(out, "  {:<20} {}", module, stat.display_value);
            if !stat.tooltip.is_empty() {
                let _ = writeln!(out, "  {:<20}   {}", "", stat.tooltip);
            }
        }
    }

    let suggestions: Vec<_> = report
        .suggestions()
        .into_iter()
        .filter(|(_, s)| min_severity.is_none_or(|min| s.severity >= min))
        .collect();
    if !suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions:");
        for (module, suggestion) in suggestions {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                suggestion.severity, module, suggestion.text
            );
            if !suggestion.actual.is_empty() {
                let _ = writeln!(
                    out,
                    "      actual: {}, recommended: {}",
                    suggestion.actual, suggestion.recommended
                );
            }
        }
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "\nFailed modules:");
        for failure in &report.failures {
            let _ = writeln!(out, "  {}: {}", failure.module, failure.cause);
        }
    }

    out
}
