pub mod analysis;
pub mod combatant;
pub mod encounter;
pub mod error;
pub mod events;
pub mod modules;
pub mod report;
mod run;

// Re-exports for convenience
pub use analysis::{
    Analyzer, BuildContext, Handle, HandlerSlot, Module, ModuleContext, ModuleKey, ModuleRegistry,
    Subscription, calculate_effective_damage,
};
pub use combatant::{CombatantState, CombatantTracker};
pub use encounter::{ActorDirectory, ActorInfo, Affiliation, EncounterInput, EncounterMetadata};
pub use error::{AnalysisError, ModuleError};
pub use events::{
    AbilityId, AbilityRef, ActorId, ActorQualifier, Event, EventFilter, EventKind, EventTime,
    ItemId, SpecId,
};
pub use report::SuggestionCollector;
pub use run::analyze;

// The report records come from `vantage-types`; re-exported so module authors
// only need one dependency.
pub use vantage_types::{
    AnalysisReport, Compare, EncounterSummary, FailurePhase, ModuleFailure, ModuleReport, Severity,
    Statistic, StatisticOrder, Suggestion, ThresholdStyle, Thresholds,
};
