//! Composable event filters.
//!
//! A filter is immutable data: a set of qualifiers that AND together. The
//! same filter value can back any number of subscriptions, and because AND is
//! commutative the order qualifiers were chained in never changes what
//! matches. Matching is a handful of field comparisons per event.

use serde::{Deserialize, Serialize};

use crate::encounter::ActorDirectory;

use super::{AbilityId, ActorId, Event, EventKind};

/// Constrains which actor may appear on one side of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorQualifier {
    /// The player the encounter is being analyzed for.
    Selected,
    /// Any actor the encounter metadata classifies as friendly
    /// (the selected player included).
    AnyFriendly,
    /// Any actor the encounter metadata classifies as hostile.
    AnyHostile,
    /// Exactly this actor.
    Specific(ActorId),
}

impl ActorQualifier {
    fn matches(self, actor: Option<ActorId>, actors: &ActorDirectory) -> bool {
        // Actors missing from the metadata roster only match `Specific`.
        let Some(id) = actor else {
            return false;
        };
        match self {
            ActorQualifier::Selected => actors.is_selected(id),
            ActorQualifier::AnyFriendly => actors.is_friendly(id),
            ActorQualifier::AnyHostile => actors.is_hostile(id),
            ActorQualifier::Specific(want) => id == want,
        }
    }
}

/// A composable predicate over events.
///
/// A filter with no qualifiers beyond its kind matches every event of that
/// kind; that is deliberate and used for "all damage done by anyone" style
/// subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default)]
    kind: Option<EventKind>,
    #[serde(default)]
    source: Option<ActorQualifier>,
    #[serde(default)]
    target: Option<ActorQualifier>,
    /// Empty means any ability (or none).
    #[serde(default)]
    abilities: Vec<AbilityId>,
}

impl EventFilter {
    /// A filter with no qualifiers at all; matches every event.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn kind(kind: EventKind) -> Self {
        Self { kind: Some(kind), ..Self::default() }
    }

    pub fn begin_cast() -> Self {
        Self::kind(EventKind::BeginCast)
    }

    pub fn cast() -> Self {
        Self::kind(EventKind::Cast)
    }

    pub fn damage() -> Self {
        Self::kind(EventKind::Damage)
    }

    pub fn heal() -> Self {
        Self::kind(EventKind::Heal)
    }

    pub fn energize() -> Self {
        Self::kind(EventKind::Energize)
    }

    pub fn apply_buff() -> Self {
        Self::kind(EventKind::ApplyBuff)
    }

    pub fn refresh_buff() -> Self {
        Self::kind(EventKind::RefreshBuff)
    }

    pub fn remove_buff() -> Self {
        Self::kind(EventKind::RemoveBuff)
    }

    pub fn apply_debuff() -> Self {
        Self::kind(EventKind::ApplyDebuff)
    }

    pub fn remove_debuff() -> Self {
        Self::kind(EventKind::RemoveDebuff)
    }

    pub fn death() -> Self {
        Self::kind(EventKind::Death)
    }

    /// Require the event's source to satisfy `qualifier`.
    #[must_use]
    pub fn by(mut self, qualifier: ActorQualifier) -> Self {
        self.source = Some(qualifier);
        self
    }

    /// Require the event's target to satisfy `qualifier`.
    #[must_use]
    pub fn to(mut self, qualifier: ActorQualifier) -> Self {
        self.target = Some(qualifier);
        self
    }

    /// Require this ability. Chaining adds to the accepted set.
    #[must_use]
    pub fn ability(mut self, id: AbilityId) -> Self {
        self.abilities.push(id);
        self
    }

    /// Require one of these abilities.
    #[must_use]
    pub fn abilities(mut self, ids: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities.extend(ids);
        self
    }

    /// Evaluate the filter against one event. Every present qualifier must
    /// pass; the directory resolves selected/friendly/hostile classification.
    pub fn matches(&self, event: &Event, actors: &ActorDirectory) -> bool {
        if let Some(kind) = self.kind
            && event.kind != kind
        {
            return false;
        }
        if let Some(source) = self.source
            && !source.matches(event.source, actors)
        {
            return false;
        }
        if let Some(target) = self.target
            && !target.matches(event.target, actors)
        {
            return false;
        }
        if !self.abilities.is_empty() {
            let Some(id) = event.ability_id() else {
                return false;
            };
            if !self.abilities.contains(&id) {
                return false;
            }
        }
        true
    }
}
