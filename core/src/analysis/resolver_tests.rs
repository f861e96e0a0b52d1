//! Tests for dependency resolution.

use std::cell::RefCell;

use crate::encounter::{EncounterInput, EncounterMetadata};
use crate::error::{AnalysisError, ModuleError};
use crate::events::ActorId;
use crate::run::analyze;

use super::*;

thread_local! {
    /// Construction log, reset per test. Tests run single-threaded per
    /// thread, so each test sees only its own entries after a reset.
    static CONSTRUCTED: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn reset_log() {
    CONSTRUCTED.with(|log| log.borrow_mut().clear());
}

fn constructed() -> Vec<&'static str> {
    CONSTRUCTED.with(|log| log.borrow().clone())
}

fn record(name: &'static str) {
    CONSTRUCTED.with(|log| log.borrow_mut().push(name));
}

fn meta() -> EncounterMetadata {
    EncounterMetadata {
        encounter_name: None,
        selected_player: ActorId(1),
        spec: None,
        duration_millis: 0,
        talents: vec![],
        gear: vec![],
        actors: vec![],
    }
}

fn empty_input() -> EncounterInput {
    EncounterInput { metadata: meta(), events: vec![] }
}

// ─── Test module graph: Top -> {Left, Right}, Left -> Base, Right -> Base ───

struct Base;

impl Analyzer for Base {}

impl Module for Base {
    const NAME: &'static str = "base";

    fn build(_ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        record(Self::NAME);
        Ok(Base)
    }
}

struct Left {
    _base: Handle<Base>,
}

impl Analyzer for Left {}

impl Module for Left {
    const NAME: &'static str = "left";

    fn dependencies() -> Vec<ModuleKey> {
        vec![ModuleKey::of::<Base>()]
    }

    fn build(ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        record(Self::NAME);
        Ok(Left { _base: ctx.dep::<Base>()? })
    }
}

struct Right {
    _base: Handle<Base>,
}

impl Analyzer for Right {}

impl Module for Right {
    const NAME: &'static str = "right";

    fn dependencies() -> Vec<ModuleKey> {
        vec![ModuleKey::of::<Base>()]
    }

    fn build(ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        record(Self::NAME);
        Ok(Right { _base: ctx.dep::<Base>()? })
    }
}

struct Top {
    _left: Handle<Left>,
    _right: Handle<Right>,
}

impl Analyzer for Top {}

impl Module for Top {
    const NAME: &'static str = "top";

    fn dependencies() -> Vec<ModuleKey> {
        vec![ModuleKey::of::<Left>(), ModuleKey::of::<Right>()]
    }

    fn build(ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        record(Self::NAME);
        Ok(Top { _left: ctx.dep::<Left>()?, _right: ctx.dep::<Right>()? })
    }
}

#[test]
fn diamond_graph_constructs_each_module_once_in_topological_order() {
    reset_log();
    let mut registry = ModuleRegistry::new();
    registry.register::<Top>();

    analyze(&registry, &empty_input()).unwrap();

    // Base exactly once even though two modules need it, and every
    // dependency before its dependent.
    assert_eq!(constructed(), vec!["base", "left", "right", "top"]);
}

#[test]
fn shared_dependency_is_one_instance() {
    reset_log();
    let mut registry = ModuleRegistry::new();
    registry.register::<Left>();
    registry.register::<Right>();
    registry.register::<Base>();

    analyze(&registry, &empty_input()).unwrap();

    let base_count = constructed().iter().filter(|n| **n == "base").count();
    assert_eq!(base_count, 1, "base must be memoized, not rebuilt per dependent");
}

// ─── Cycle: CycleA -> CycleB -> CycleA ───

struct CycleA;

impl Analyzer for CycleA {}

impl Module for CycleA {
    const NAME: &'static str = "cycle_a";

    fn dependencies() -> Vec<ModuleKey> {
        vec![ModuleKey::of::<CycleB>()]
    }

    fn build(_ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        record(Self::NAME);
        Ok(CycleA)
    }
}

struct CycleB;

impl Analyzer for CycleB {}

impl Module for CycleB {
    const NAME: &'static str = "cycle_b";

    fn dependencies() -> Vec<ModuleKey> {
        vec![ModuleKey::of::<CycleA>()]
    }

    fn build(_ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        record(Self::NAME);
        Ok(CycleB)
    }
}

#[test]
fn cycle_fails_naming_both_modules_and_constructs_nothing() {
    reset_log();
    let mut registry = ModuleRegistry::new();
    registry.register::<CycleA>();
    registry.register::<CycleB>();

    let err = analyze(&registry, &empty_input()).unwrap_err();
    match &err {
        AnalysisError::CyclicDependency { cycle } => {
            assert!(cycle.contains(&"cycle_a"), "cycle path was {cycle:?}");
            assert!(cycle.contains(&"cycle_b"), "cycle path was {cycle:?}");
            assert_eq!(cycle.first(), cycle.last(), "path should loop back to its start");
        }
        other => panic!("expected CyclicDependency, got {other:?}"),
    }
    assert!(constructed().is_empty(), "no constructor may run when the graph is cyclic");
}

#[test]
fn self_dependency_is_reported_as_a_cycle() {
    struct SelfLoop;

    impl Analyzer for SelfLoop {}

    impl Module for SelfLoop {
        const NAME: &'static str = "self_loop";

        fn dependencies() -> Vec<ModuleKey> {
            vec![ModuleKey::of::<SelfLoop>()]
        }

        fn build(_ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
            Ok(SelfLoop)
        }
    }

    let mut registry = ModuleRegistry::new();
    registry.register::<SelfLoop>();

    let err = analyze(&registry, &empty_input()).unwrap_err();
    assert_eq!(err.cycle(), ["self_loop", "self_loop"]);
}

#[test]
fn unregistered_dependency_fails_resolution() {
    reset_log();
    let mut registry = ModuleRegistry::new();
    // Left declares Base, and Base was never registered.
    registry.register::<Left>();

    let err = analyze(&registry, &empty_input()).unwrap_err();
    match err {
        AnalysisError::MissingDependency { module, dependency } => {
            assert_eq!(module, "left");
            assert_eq!(dependency, "base");
        }
        other => panic!("expected MissingDependency, got {other:?}"),
    }
}

#[test]
fn constructor_failure_aborts_the_whole_run() {
    struct Broken;

    impl Analyzer for Broken {}

    impl Module for Broken {
        const NAME: &'static str = "broken";

        fn build(_ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
            Err(ModuleError::failed("missing encounter data"))
        }
    }

    let mut registry = ModuleRegistry::new();
    registry.register::<Base>();
    registry.register::<Broken>();

    let err = analyze(&registry, &empty_input()).unwrap_err();
    match err {
        AnalysisError::ModuleConstruction { module, source } => {
            assert_eq!(module, "broken");
            assert_eq!(source.to_string(), "missing encounter data");
        }
        other => panic!("expected ModuleConstruction, got {other:?}"),
    }
}

#[test]
fn undeclared_dependency_access_is_rejected_at_build_time() {
    struct Sneaky;

    impl Analyzer for Sneaky {}

    impl Module for Sneaky {
        const NAME: &'static str = "sneaky";

        // No dependencies declared, but build tries to grab one anyway.
        fn build(ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
            let _ = ctx.dep::<Base>()?;
            Ok(Sneaky)
        }
    }

    let mut registry = ModuleRegistry::new();
    registry.register::<Base>();
    registry.register::<Sneaky>();

    let err = analyze(&registry, &empty_input()).unwrap_err();
    match err {
        AnalysisError::ModuleConstruction { module, source } => {
            assert_eq!(module, "sneaky");
            assert!(matches!(source, ModuleError::UndeclaredDependency { .. }));
        }
        other => panic!("expected ModuleConstruction, got {other:?}"),
    }
}

