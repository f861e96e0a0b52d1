//! The analysis-module framework.
//!
//! A module is one pluggable unit of analysis: constructed exactly once per
//! run with its declared dependencies injected, fed the events its filters
//! match, then queried once for suggestions and a statistic. This module
//! defines the contract; [`resolver`] builds the instantiation graph,
//! [`dispatcher`] owns the event pass, and [`crate::report`] collects the
//! outputs.

pub mod dispatcher;
pub mod registry;
pub mod resolver;

#[cfg(test)]
mod resolver_tests;

pub use registry::ModuleRegistry;

use std::any::TypeId;
use std::cell::{Ref, RefCell};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use vantage_types::Statistic;

use crate::combatant::{CombatantState, CombatantTracker};
use crate::encounter::EncounterMetadata;
use crate::error::ModuleError;
use crate::events::{Event, EventFilter, EventTime};
use crate::report::SuggestionCollector;

use registry::ModuleCell;

/// Type identity of a module. Two keys are equal iff they name the same
/// concrete module type; the carried name is for diagnostics only.
#[derive(Clone, Copy)]
pub struct ModuleKey {
    type_id: TypeId,
    name: &'static str,
}

impl ModuleKey {
    pub fn of<T: Module>() -> Self {
        Self { type_id: TypeId::of::<T>(), name: T::NAME }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ModuleKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ModuleKey {}

impl Hash for ModuleKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl std::fmt::Debug for ModuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModuleKey({})", self.name)
    }
}

/// Selects which of a module's handlers a matched subscription invokes.
/// Slot values are private to the module that registered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerSlot(pub u16);

/// One (filter, handler) registration.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub filter: EventFilter,
    pub slot: HandlerSlot,
}

impl Subscription {
    pub fn new(filter: EventFilter, slot: HandlerSlot) -> Self {
        Self { filter, slot }
    }
}

/// Runtime behavior of a module instance.
///
/// Default implementations make every piece opt-in: a pure derived-state
/// module overrides only `subscriptions`/`on_event`; a pure output module
/// overrides only `suggestions` or `statistic`.
pub trait Analyzer: 'static {
    /// Whether this module applies to the analyzed combatant's build.
    /// Decided once, at construction. Inactive modules receive no events and
    /// contribute nothing to the report.
    fn active(&self) -> bool {
        true
    }

    /// The (filter, slot) pairs this module listens with. Called once, after
    /// construction, only for active modules. Registration order within a
    /// module is the order of the returned vec.
    fn subscriptions(&self) -> Vec<Subscription> {
        Vec::new()
    }

    /// Handle one matched event. Returning an error marks the module failed:
    /// it is dropped from the rest of the pass and from the report, without
    /// disturbing any other module.
    fn on_event(
        &mut self,
        _slot: HandlerSlot,
        _event: &Event,
        _ctx: &ModuleContext<'_>,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Produce suggestions from accumulated state. Must not mutate state.
    fn suggestions(
        &self,
        _ctx: &ModuleContext<'_>,
        _when: &mut SuggestionCollector,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Produce the module's summary statistic, if it has one. Must not
    /// mutate state.
    fn statistic(&self, _ctx: &ModuleContext<'_>) -> Result<Option<Statistic>, ModuleError> {
        Ok(None)
    }
}

/// Static identity and construction of a module type.
pub trait Module: Analyzer + Sized {
    /// Stable machine-readable name, used in reports and diagnostics.
    const NAME: &'static str;

    /// Module types this one requires instances of. The resolver constructs
    /// all of them before `build` runs.
    fn dependencies() -> Vec<ModuleKey> {
        Vec::new()
    }

    /// Construct the module. This is where the `active` decision is made
    /// (typically from talents or gear on `ctx.selected()`) and where
    /// dependency handles are grabbed via [`BuildContext::dep`].
    fn build(ctx: &BuildContext<'_>) -> Result<Self, ModuleError>;
}

/// A typed, shared handle to a resolved dependency instance.
///
/// Handles are cheap to clone and are the only way modules reach each other;
/// each points at the single per-run instance of its module type.
pub struct Handle<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self { cell: Rc::clone(&self.cell) }
    }
}

impl<T: Module> Handle<T> {
    /// Borrow the dependency for reading. Dependency edges are acyclic, so a
    /// module reading its dependency can never re-enter itself.
    pub fn get(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }
}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle<{}>", std::any::type_name::<T>())
    }
}

/// Injected view a module constructor gets: read-only encounter metadata,
/// pre-pass combatant state (static talents/gear), and its resolved
/// dependencies.
pub struct BuildContext<'a> {
    pub meta: &'a EncounterMetadata,
    pub combatants: &'a CombatantTracker,
    pub(crate) module: &'static str,
    pub(crate) declared: Vec<ModuleKey>,
    pub(crate) cells: &'a hashbrown::HashMap<ModuleKey, ModuleCell>,
}

impl BuildContext<'_> {
    /// The analyzed player's state. During construction only the static
    /// facts (talents, gear, spec) are populated.
    pub fn selected(&self) -> &CombatantState {
        self.combatants.selected()
    }

    /// Fetch the shared instance of a declared dependency.
    pub fn dep<T: Module>(&self) -> Result<Handle<T>, ModuleError> {
        let key = ModuleKey::of::<T>();
        if !self.declared.contains(&key) {
            return Err(ModuleError::UndeclaredDependency {
                module: self.module,
                dependency: key.name(),
            });
        }
        let cell = self.cells.get(&key).ok_or(ModuleError::UnresolvedDependency {
            module: self.module,
            dependency: key.name(),
        })?;
        let typed = Rc::clone(&cell.any).downcast::<RefCell<T>>().map_err(|_| {
            ModuleError::UnresolvedDependency { module: self.module, dependency: key.name() }
        })?;
        Ok(Handle { cell: typed })
    }
}

/// Shared facts available to handlers and output methods: the encounter
/// metadata and the combatant state at the current replay position.
pub struct ModuleContext<'a> {
    pub meta: &'a EncounterMetadata,
    pub combatants: &'a CombatantTracker,
    /// The current replay position; the encounter end once the pass is done.
    pub now: EventTime,
}

impl ModuleContext<'_> {
    pub fn selected(&self) -> &CombatantState {
        self.combatants.selected()
    }

    /// Encounter length in milliseconds: the metadata duration when the log
    /// layer provided one, otherwise the replay position reached so far.
    pub fn fight_duration(&self) -> i64 {
        if self.meta.duration_millis > 0 {
            self.meta.duration_millis
        } else {
            self.now.millis()
        }
    }
}

/// Isolate the damage attributable to a multiplicative bonus.
///
/// Given a hit dealt *with* a `bonus` fraction active (0.4 for +40%), returns
/// the portion of the raw amount the bonus contributed.
pub fn calculate_effective_damage(event: &Event, bonus: f64) -> f64 {
    let raw = event.raw_amount() as f64;
    raw - raw / (1.0 + bonus)
}
