//! Event dispatcher.
//!
//! One forward pass over the caller-sorted event stream. Per event: advance
//! the internal combatant-state handler first, then invoke every matching
//! subscription in registration order. A handler error is isolated to its
//! module; the pass always completes for everyone else. Nothing ever seeks
//! backward and no event is visited twice.

use std::cell::RefCell;

use vantage_types::{FailurePhase, ModuleFailure};

use crate::combatant::CombatantTracker;
use crate::encounter::{ActorDirectory, EncounterMetadata};
use crate::events::{Event, EventFilter};

use super::registry::ModuleCell;
use super::{HandlerSlot, ModuleContext};

/// One routed subscription: which module, which filter, which handler slot.
struct Route {
    module_idx: usize,
    filter: EventFilter,
    slot: HandlerSlot,
}

/// What the pass learned about module health.
pub(crate) struct DispatchOutcome {
    /// Parallel to the module list; true once a module has failed.
    pub failed: Vec<bool>,
    pub failures: Vec<ModuleFailure>,
}

pub(crate) fn run_pass(
    modules: &[ModuleCell],
    meta: &EncounterMetadata,
    actors: &ActorDirectory,
    tracker: &RefCell<CombatantTracker>,
    events: &[Event],
) -> DispatchOutcome {
    // Collect routes up front, in module construction order. Inactive
    // modules are skipped entirely: they get no routes, so no crafted event
    // can reach them.
    let mut routes: Vec<Route> = Vec::new();
    for (module_idx, cell) in modules.iter().enumerate() {
        let analyzer = cell.analyzer.borrow();
        if !analyzer.active() {
            continue;
        }
        for sub in analyzer.subscriptions() {
            routes.push(Route { module_idx, filter: sub.filter, slot: sub.slot });
        }
    }

    let mut outcome =
        DispatchOutcome { failed: vec![false; modules.len()], failures: Vec::new() };

    for event in events {
        // Derived state first: handlers observe combatant state that already
        // includes the current event.
        tracker.borrow_mut().advance(event);

        let combatants = tracker.borrow();
        let ctx = ModuleContext { meta, combatants: &combatants, now: event.timestamp };

        for route in &routes {
            if outcome.failed[route.module_idx] {
                continue;
            }
            if !route.filter.matches(event, actors) {
                continue;
            }
            let cell = &modules[route.module_idx];
            let result = cell.analyzer.borrow_mut().on_event(route.slot, event, &ctx);
            if let Err(cause) = result {
                tracing::warn!(
                    module = cell.name,
                    timestamp = event.timestamp.millis(),
                    %cause,
                    "module handler failed; excluding module for the rest of the run"
                );
                outcome.failed[route.module_idx] = true;
                outcome.failures.push(ModuleFailure {
                    module: cell.name.to_string(),
                    phase: FailurePhase::Event {
                        timestamp: event.timestamp.millis(),
                        index: event.index,
                    },
                    cause: cause.to_string(),
                });
            }
        }
    }

    outcome
}
