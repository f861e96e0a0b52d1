//! Canonical event model.
//!
//! One `Event` is one timestamped occurrence in an encounter log, already
//! normalized by the host's log-fetching layer. The engine never interprets
//! what an event *means*; it only reads the routing fields (timestamp, kind,
//! source, target, ability) and hands the payload fields through to modules.

mod filter;

#[cfg(test)]
mod filter_tests;

pub use filter::{ActorQualifier, EventFilter};

use serde::{Deserialize, Serialize};

/// Encounter-relative time in milliseconds.
///
/// Events are totally ordered by timestamp, with the original log index as a
/// stable tie-break. The stream handed to the engine is already sorted; the
/// engine trusts that and never re-sorts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventTime(pub i64);

impl EventTime {
    pub const ZERO: EventTime = EventTime(0);

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn from_secs(secs: i64) -> Self {
        Self(secs * 1000)
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, clamped at zero.
    pub fn since(self, earlier: EventTime) -> i64 {
        (self.0 - earlier.0).max(0)
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", vantage_types::formatting::format_duration(self.0))
    }
}

/// Identifies one tracked actor (player or enemy) within an encounter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ActorId(pub i64);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies an ability, spell, buff, or talent. Talents and buffs share the
/// ability id space, as they do in the game logs this engine was built for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct AbilityId(pub i64);

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies an equipped item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

/// Identifies a combatant's specialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct SpecId(pub i64);

/// An ability reference carried on an event: the id routes, the name is for
/// display only and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRef {
    pub id: AbilityId,
    #[serde(default)]
    pub name: String,
}

impl AbilityRef {
    pub fn new(id: AbilityId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Enumerated event kinds the engine can route on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    BeginCast,
    Cast,
    Damage,
    Heal,
    /// A resource gain or loss (energy, rage, fury, ...).
    Energize,
    ApplyBuff,
    RefreshBuff,
    RemoveBuff,
    ApplyDebuff,
    RefreshDebuff,
    RemoveDebuff,
    Summon,
    Death,
}

/// One immutable log record.
///
/// Payload fields are flat optionals/zero-defaults rather than a kind-keyed
/// enum so hosts can normalize foreign log formats without lossy mapping;
/// a module reads the fields its subscribed kinds populate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: EventTime,
    /// Position in the original log; stable tie-break for equal timestamps.
    #[serde(default)]
    pub index: u64,
    pub kind: EventKind,
    #[serde(default)]
    pub source: Option<ActorId>,
    #[serde(default)]
    pub target: Option<ActorId>,
    #[serde(default)]
    pub ability: Option<AbilityRef>,
    /// Damage or healing amount, after mitigation, excluding absorbs.
    #[serde(default)]
    pub amount: i64,
    /// Portion of a hit or heal that went into an absorb shield.
    #[serde(default)]
    pub absorbed: i64,
    /// Healing beyond the target's missing health.
    #[serde(default)]
    pub overheal: i64,
    /// Net resource change for `Energize` events.
    #[serde(default)]
    pub resource_change: i64,
    /// Resource gain lost to sitting at the cap.
    #[serde(default)]
    pub waste: i64,
    /// Stack count for buff events; `None` means a single, unstacked apply.
    #[serde(default)]
    pub stacks: Option<u32>,
}

impl Event {
    pub fn new(timestamp: EventTime, kind: EventKind) -> Self {
        Self {
            timestamp,
            index: 0,
            kind,
            source: None,
            target: None,
            ability: None,
            amount: 0,
            absorbed: 0,
            overheal: 0,
            resource_change: 0,
            waste: 0,
            stacks: None,
        }
    }

    #[must_use]
    pub fn index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    #[must_use]
    pub fn source(mut self, id: ActorId) -> Self {
        self.source = Some(id);
        self
    }

    #[must_use]
    pub fn target(mut self, id: ActorId) -> Self {
        self.target = Some(id);
        self
    }

    #[must_use]
    pub fn ability(mut self, id: AbilityId, name: &str) -> Self {
        self.ability = Some(AbilityRef::new(id, name));
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn absorbed(mut self, absorbed: i64) -> Self {
        self.absorbed = absorbed;
        self
    }

    #[must_use]
    pub fn energize(mut self, resource_change: i64, waste: i64) -> Self {
        self.resource_change = resource_change;
        self.waste = waste;
        self
    }

    #[must_use]
    pub fn stacks(mut self, stacks: u32) -> Self {
        self.stacks = Some(stacks);
        self
    }

    /// The ability id, if the event carries one.
    pub fn ability_id(&self) -> Option<AbilityId> {
        self.ability.as_ref().map(|a| a.id)
    }

    /// Damage or healing including the absorbed portion.
    pub fn raw_amount(&self) -> i64 {
        self.amount + self.absorbed
    }
}
