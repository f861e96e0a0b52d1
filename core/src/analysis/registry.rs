//! Module registry.
//!
//! The hosting application decides which module types apply to a given
//! encounter and registers them here. Registration erases the concrete type
//! behind a descriptor (name, declared dependencies, build fn) keyed by type
//! identity; the resolver works on descriptors only.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::error::ModuleError;

use super::{Analyzer, BuildContext, Module, ModuleKey};

/// Type-erased constructor result: one shared instance, reachable both as a
/// `dyn Analyzer` (for dispatch) and as `dyn Any` (for typed injection into
/// dependents).
#[derive(Clone)]
pub(crate) struct ModuleCell {
    pub name: &'static str,
    pub any: Rc<dyn Any>,
    pub analyzer: Rc<RefCell<dyn Analyzer>>,
}

fn build_cell<T: Module>(ctx: &BuildContext<'_>) -> Result<ModuleCell, ModuleError> {
    let module = T::build(ctx)?;
    let cell = Rc::new(RefCell::new(module));
    Ok(ModuleCell {
        name: T::NAME,
        any: Rc::clone(&cell) as Rc<dyn Any>,
        analyzer: cell,
    })
}

/// Everything the resolver needs to know about a registered module type.
pub struct ModuleDescriptor {
    pub(crate) name: &'static str,
    pub(crate) dependencies: fn() -> Vec<ModuleKey>,
    pub(crate) build: fn(&BuildContext<'_>) -> Result<ModuleCell, ModuleError>,
}

impl std::fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("dependencies", &(self.dependencies)())
            .finish()
    }
}

/// The set of module types requested for a run.
///
/// Iteration order is registration order; that order seeds construction
/// order, which in turn fixes subscription-registration order in the
/// dispatcher. Registering the same type twice is a no-op.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    descriptors: HashMap<ModuleKey, ModuleDescriptor>,
    roster: Vec<ModuleKey>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the built-in shared modules.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<crate::modules::AbilityTracker>();
        registry.register::<crate::modules::DamageDone>();
        registry
    }

    pub fn register<T: Module>(&mut self) {
        let key = ModuleKey::of::<T>();
        if self.descriptors.contains_key(&key) {
            return;
        }
        self.descriptors.insert(
            key,
            ModuleDescriptor {
                name: T::NAME,
                dependencies: T::dependencies,
                build: build_cell::<T>,
            },
        );
        self.roster.push(key);
    }

    /// Drop a registered module type by name. Dependents of a removed type
    /// will fail resolution with a missing-dependency error.
    pub fn remove(&mut self, name: &str) {
        self.roster.retain(|key| key.name() != name);
        self.descriptors.retain(|key, _| key.name() != name);
    }

    pub fn contains(&self, key: &ModuleKey) -> bool {
        self.descriptors.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub(crate) fn get(&self, key: &ModuleKey) -> Option<&ModuleDescriptor> {
        self.descriptors.get(key)
    }

    pub(crate) fn roster(&self) -> &[ModuleKey] {
        &self.roster
    }

    /// Registered module names with their declared dependency names, in
    /// registration order. For host-side listings.
    pub fn modules(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        self.roster
            .iter()
            .filter_map(|key| self.descriptors.get(key))
            .map(|desc| {
                let deps = (desc.dependencies)().iter().map(|d| d.name()).collect();
                (desc.name, deps)
            })
            .collect()
    }
}
