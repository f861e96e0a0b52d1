//! Dependency resolver.
//!
//! Depth-first instantiation with memoization by type identity. Every
//! requested module type is constructed at most once per run and shared by
//! all dependents; dependencies are fully constructed before the dependent's
//! constructor runs, so construction order is a topological order of the
//! declared graph. Any failure here is fatal: the run aborts before a single
//! event is dispatched.

use hashbrown::HashMap;

use crate::combatant::CombatantTracker;
use crate::encounter::EncounterMetadata;
use crate::error::AnalysisError;

use super::registry::{ModuleCell, ModuleRegistry};
use super::{BuildContext, ModuleKey};

/// All module instances for one run, in construction order.
pub(crate) struct ResolvedModules {
    pub cells: Vec<ModuleCell>,
}

pub(crate) fn resolve(
    registry: &ModuleRegistry,
    meta: &EncounterMetadata,
    combatants: &CombatantTracker,
) -> Result<ResolvedModules, AnalysisError> {
    let mut built: HashMap<ModuleKey, ModuleCell> = HashMap::with_capacity(registry.len());
    let mut order: Vec<ModuleKey> = Vec::with_capacity(registry.len());
    let mut visiting: Vec<ModuleKey> = Vec::new();

    for key in registry.roster() {
        resolve_one(registry, *key, meta, combatants, &mut visiting, &mut built, &mut order)?;
    }

    tracing::debug!(modules = order.len(), "module graph resolved");

    let cells = order
        .iter()
        .filter_map(|key| built.get(key).cloned())
        .collect();
    Ok(ResolvedModules { cells })
}

fn resolve_one(
    registry: &ModuleRegistry,
    key: ModuleKey,
    meta: &EncounterMetadata,
    combatants: &CombatantTracker,
    visiting: &mut Vec<ModuleKey>,
    built: &mut HashMap<ModuleKey, ModuleCell>,
    order: &mut Vec<ModuleKey>,
) -> Result<(), AnalysisError> {
    // Memoized: constructed on an earlier path, reuse the instance.
    if built.contains_key(&key) {
        return Ok(());
    }

    if visiting.contains(&key) {
        // The cycle runs from the first visit of `key` back to `key`.
        let start = visiting.iter().position(|k| *k == key).unwrap_or(0);
        let mut cycle: Vec<&'static str> = visiting[start..].iter().map(ModuleKey::name).collect();
        cycle.push(key.name());
        return Err(AnalysisError::CyclicDependency { cycle });
    }

    // Roster keys always resolve; dependency keys are checked by the caller,
    // so a miss here means the registry was mutated mid-resolve. Treat it the
    // same as an undeclared dependency for a stable error surface.
    let Some(descriptor) = registry.get(&key) else {
        return Err(AnalysisError::MissingDependency {
            module: visiting.last().map_or("<roster>", |k| k.name()),
            dependency: key.name(),
        });
    };

    visiting.push(key);
    let declared = (descriptor.dependencies)();
    for dep in &declared {
        if !registry.contains(dep) {
            return Err(AnalysisError::MissingDependency {
                module: descriptor.name,
                dependency: dep.name(),
            });
        }
        resolve_one(registry, *dep, meta, combatants, visiting, built, order)?;
    }
    visiting.pop();

    let ctx = BuildContext {
        meta,
        combatants,
        module: descriptor.name,
        declared,
        cells: &*built,
    };
    let cell = (descriptor.build)(&ctx).map_err(|source| AnalysisError::ModuleConstruction {
        module: descriptor.name,
        source,
    })?;

    order.push(key);
    built.insert(key, cell);
    Ok(())
}
