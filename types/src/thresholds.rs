//! Suggestion threshold descriptions.
//!
//! A module grades an observed value against three escalating severity
//! boundaries. The comparison direction says which side of the boundaries is
//! "bad": `GreaterThan` for metrics like waste (more is worse), `LessThan`
//! for metrics like uptime (less is worse).

use serde::{Deserialize, Serialize};

use crate::formatting;
use crate::report::Severity;

/// Which side of the boundaries counts against the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compare {
    /// The observed value should stay below the boundaries.
    GreaterThan,
    /// The observed value should stay above the boundaries.
    LessThan,
}

/// How the observed value should be rendered in suggestion text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdStyle {
    /// A fraction in 0.0..=1.0, rendered as a percentage.
    #[default]
    Percentage,
    /// A plain number.
    Number,
    /// A duration in seconds.
    Seconds,
}

/// An observed value with its severity boundaries.
///
/// Boundaries escalate: crossing `minor` yields a minor suggestion, `average`
/// an average one, `major` a major one. An observed value inside all three
/// boundaries produces no suggestion at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub actual: f64,
    pub compare: Compare,
    pub minor: f64,
    pub average: f64,
    pub major: f64,
    #[serde(default)]
    pub style: ThresholdStyle,
}

impl Thresholds {
    /// Thresholds for a metric where exceeding the boundaries is bad.
    pub fn greater_than(actual: f64, minor: f64, average: f64, major: f64) -> Self {
        Self { actual, compare: Compare::GreaterThan, minor, average, major, style: ThresholdStyle::default() }
    }

    /// Thresholds for a metric where falling below the boundaries is bad.
    pub fn less_than(actual: f64, minor: f64, average: f64, major: f64) -> Self {
        Self { actual, compare: Compare::LessThan, minor, average, major, style: ThresholdStyle::default() }
    }

    pub fn with_style(mut self, style: ThresholdStyle) -> Self {
        self.style = style;
        self
    }

    /// The boundary the observed value is compared against first; this is the
    /// recommended value surfaced in suggestion text.
    pub fn recommended(&self) -> f64 {
        self.minor
    }

    /// Grade the observed value. `None` means no suggestion is warranted.
    pub fn severity(&self) -> Option<Severity> {
        let beyond = |boundary: f64| match self.compare {
            Compare::GreaterThan => self.actual > boundary,
            Compare::LessThan => self.actual < boundary,
        };
        if beyond(self.major) {
            Some(Severity::Major)
        } else if beyond(self.average) {
            Some(Severity::Average)
        } else if beyond(self.minor) {
            Some(Severity::Minor)
        } else {
            None
        }
    }

    /// Render a value in this threshold's display style.
    pub fn format_value(&self, value: f64) -> String {
        match self.style {
            ThresholdStyle::Percentage => formatting::format_percentage(value),
            ThresholdStyle::Number => format!("{value:.1}"),
            ThresholdStyle::Seconds => format!("{value:.1}s"),
        }
    }
}
