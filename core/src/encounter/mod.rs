//! Encounter input boundary.
//!
//! An encounter arrives from the host's log-fetching/normalizing layer as
//! static metadata plus a sorted event list. The engine validates nothing
//! about the sort; the caller owns that contract.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::events::{AbilityId, ActorId, Event, ItemId, SpecId};

/// Which side of the fight an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Affiliation {
    Friendly,
    Hostile,
}

/// One actor in the encounter roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorInfo {
    pub id: ActorId,
    #[serde(default)]
    pub name: String,
    pub affiliation: Affiliation,
}

/// Static facts about one encounter, supplied alongside the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterMetadata {
    #[serde(default)]
    pub encounter_name: Option<String>,
    /// The player the analysis is about.
    pub selected_player: ActorId,
    #[serde(default)]
    pub spec: Option<SpecId>,
    /// Total encounter length. Zero means "unknown, use the last event".
    #[serde(default)]
    pub duration_millis: i64,
    /// The selected player's talent selections (ability ids).
    #[serde(default)]
    pub talents: Vec<AbilityId>,
    /// The selected player's equipped items.
    #[serde(default)]
    pub gear: Vec<ItemId>,
    /// Every actor the log layer identified.
    #[serde(default)]
    pub actors: Vec<ActorInfo>,
}

/// The full input for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterInput {
    pub metadata: EncounterMetadata,
    /// Sorted ascending by (timestamp, index). The engine trusts this.
    pub events: Vec<Event>,
}

/// Immutable actor classification lookups, built once per run from the
/// metadata roster and shared by every filter evaluation.
#[derive(Debug, Clone)]
pub struct ActorDirectory {
    selected: ActorId,
    friendly: HashSet<ActorId>,
    hostile: HashSet<ActorId>,
    names: HashMap<ActorId, String>,
}

impl ActorDirectory {
    pub fn from_metadata(meta: &EncounterMetadata) -> Self {
        let mut friendly = HashSet::new();
        let mut hostile = HashSet::new();
        let mut names = HashMap::new();
        // The selected player is friendly whether or not the roster lists them.
        friendly.insert(meta.selected_player);
        for actor in &meta.actors {
            match actor.affiliation {
                Affiliation::Friendly => friendly.insert(actor.id),
                Affiliation::Hostile => hostile.insert(actor.id),
            };
            names.insert(actor.id, actor.name.clone());
        }
        Self { selected: meta.selected_player, friendly, hostile, names }
    }

    pub fn selected(&self) -> ActorId {
        self.selected
    }

    pub fn is_selected(&self, id: ActorId) -> bool {
        id == self.selected
    }

    pub fn is_friendly(&self, id: ActorId) -> bool {
        self.friendly.contains(&id)
    }

    pub fn is_hostile(&self, id: ActorId) -> bool {
        self.hostile.contains(&id)
    }

    pub fn name(&self, id: ActorId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}
