//! One analysis run, end to end.
//!
//! Control flow: resolve the requested module graph (fatal on setup errors),
//! replay the event stream once through the dispatcher, then aggregate
//! module outputs into the report. Each run owns its instances and combatant
//! state exclusively; analyzing several encounters concurrently means one
//! independent run per encounter, sharing nothing mutable.

use std::cell::RefCell;

use vantage_types::{AnalysisReport, EncounterSummary};

use crate::analysis::{ModuleContext, ModuleRegistry, dispatcher, resolver};
use crate::combatant::CombatantTracker;
use crate::encounter::{ActorDirectory, EncounterInput};
use crate::error::AnalysisError;
use crate::events::EventTime;

/// Analyze one encounter with the registered modules.
///
/// Fatal setup errors (cyclic or missing dependencies, constructor failures)
/// return `Err` and produce no partial report. Per-module runtime failures
/// never fail the run; they surface in [`AnalysisReport::failures`].
pub fn analyze(
    registry: &ModuleRegistry,
    input: &EncounterInput,
) -> Result<AnalysisReport, AnalysisError> {
    let meta = &input.metadata;
    let actors = ActorDirectory::from_metadata(meta);
    let tracker = RefCell::new(CombatantTracker::from_metadata(meta));

    let resolved = {
        let combatants = tracker.borrow();
        resolver::resolve(registry, meta, &combatants)?
    };

    let mut outcome = dispatcher::run_pass(&resolved.cells, meta, &actors, &tracker, &input.events);

    // The encounter ends at the later of the declared duration and the last
    // event; unclosed buff intervals close there.
    let last_event = input.events.last().map_or(0, |e| e.timestamp.millis());
    let end = EventTime::from_millis(meta.duration_millis.max(last_event));
    tracker.borrow_mut().finalize(end);

    let combatants = tracker.borrow();
    let ctx = ModuleContext { meta, combatants: &combatants, now: end };
    let modules = crate::report::collect_reports(&resolved.cells, &mut outcome, &ctx);

    Ok(AnalysisReport {
        summary: EncounterSummary {
            duration_millis: end.millis(),
            event_count: input.events.len() as u64,
        },
        modules,
        failures: outcome.failures,
    })
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod run_tests;
