//! Shared types for the VANTAGE encounter analysis toolkit.
//!
//! Everything in this crate is plain data: the report records produced by an
//! analysis run, the threshold descriptions modules grade themselves against,
//! and the display formatting helpers report consumers share. The analysis
//! engine itself lives in `vantage-core`; hosts that only render reports can
//! depend on this crate alone.

pub mod formatting;
pub mod report;
pub mod thresholds;

pub use report::{
    AnalysisReport, EncounterSummary, FailurePhase, ModuleFailure, ModuleReport, Severity,
    Statistic, StatisticOrder, Suggestion,
};
pub use thresholds::{Compare, ThresholdStyle, Thresholds};
