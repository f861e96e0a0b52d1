//! Derived per-actor combatant state.
//!
//! Translates buff apply/remove events into point-in-time queryable facts:
//! "does actor X have buff Y right now", "how long was buff Y up in total".
//! Static facts (talents, gear, spec) come from the encounter metadata at
//! construction; dynamic facts advance only through the dispatcher's internal
//! update path, which runs before any module handler sees an event.

#[cfg(test)]
mod tracker_tests;

use hashbrown::{HashMap, HashSet};

use crate::encounter::EncounterMetadata;
use crate::events::{AbilityId, ActorId, Event, EventKind, EventTime, ItemId, SpecId};

/// Uptime bookkeeping for one buff on one actor.
///
/// An interval opens on the first apply and closes on remove; a second apply
/// while the interval is open refreshes stacks without opening a second
/// interval, so overlapping applies never double-count.
#[derive(Debug, Clone, Copy, Default)]
struct BuffTrack {
    stacks: u32,
    opened_at: Option<EventTime>,
    accumulated_millis: i64,
}

impl BuffTrack {
    fn apply(&mut self, stacks: u32, at: EventTime) {
        if self.opened_at.is_none() {
            self.opened_at = Some(at);
        }
        self.stacks = self.stacks.max(1).max(stacks);
    }

    fn remove(&mut self, at: EventTime) {
        if let Some(opened) = self.opened_at.take() {
            self.accumulated_millis += at.since(opened);
        }
        self.stacks = 0;
    }

    fn uptime_millis(&self, now: EventTime) -> i64 {
        let open = self.opened_at.map_or(0, |opened| now.since(opened));
        self.accumulated_millis + open
    }
}

/// Queryable state for one actor.
#[derive(Debug, Clone)]
pub struct CombatantState {
    id: ActorId,
    spec: Option<SpecId>,
    talents: HashSet<AbilityId>,
    items: HashSet<ItemId>,
    buffs: HashMap<AbilityId, BuffTrack>,
}

impl CombatantState {
    fn new(id: ActorId) -> Self {
        Self {
            id,
            spec: None,
            talents: HashSet::new(),
            items: HashSet::new(),
            buffs: HashMap::new(),
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn spec(&self) -> Option<SpecId> {
        self.spec
    }

    /// Static per-run: set at construction from the encounter metadata.
    pub fn has_talent(&self, id: AbilityId) -> bool {
        self.talents.contains(&id)
    }

    pub fn has_item(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    /// Trinkets live in the same id space as any other equipped item.
    pub fn has_trinket(&self, id: ItemId) -> bool {
        self.has_item(id)
    }

    /// Whether the buff is active at the current replay position.
    pub fn has_buff(&self, id: AbilityId) -> bool {
        self.buff_stacks(id) > 0
    }

    pub fn buff_stacks(&self, id: AbilityId) -> u32 {
        self.buffs.get(&id).map_or(0, |b| b.stacks)
    }

    /// Cumulative time the buff has been active as of `now` (an open interval
    /// counts up to `now`). After the pass, `now` is the encounter end.
    pub fn buff_uptime(&self, id: AbilityId, now: EventTime) -> i64 {
        self.buffs.get(&id).map_or(0, |b| b.uptime_millis(now))
    }

    fn apply_buff(&mut self, id: AbilityId, stacks: u32, at: EventTime) {
        self.buffs.entry(id).or_default().apply(stacks, at);
    }

    fn remove_buff(&mut self, id: AbilityId, at: EventTime) {
        if let Some(track) = self.buffs.get_mut(&id) {
            track.remove(at);
        }
    }

    /// Close every open interval. Used on death and at encounter end.
    fn close_open_buffs(&mut self, at: EventTime) {
        for track in self.buffs.values_mut() {
            track.remove(at);
        }
    }
}

/// All combatant state for one run.
///
/// The selected player's static facts are seeded from the metadata; other
/// actors are created lazily as buff events reference them.
#[derive(Debug)]
pub struct CombatantTracker {
    selected: CombatantState,
    others: HashMap<ActorId, CombatantState>,
    position: EventTime,
}

impl CombatantTracker {
    pub fn from_metadata(meta: &EncounterMetadata) -> Self {
        let mut selected = CombatantState::new(meta.selected_player);
        selected.spec = meta.spec;
        selected.talents = meta.talents.iter().copied().collect();
        selected.items = meta.gear.iter().copied().collect();
        Self { selected, others: HashMap::new(), position: EventTime::ZERO }
    }

    /// The analyzed player's state.
    pub fn selected(&self) -> &CombatantState {
        &self.selected
    }

    pub fn combatant(&self, id: ActorId) -> Option<&CombatantState> {
        if id == self.selected.id {
            Some(&self.selected)
        } else {
            self.others.get(&id)
        }
    }

    /// The dispatcher's current replay position (encounter end after the pass).
    pub fn position(&self) -> EventTime {
        self.position
    }

    fn combatant_mut(&mut self, id: ActorId) -> &mut CombatantState {
        if id == self.selected.id {
            &mut self.selected
        } else {
            self.others.entry(id).or_insert_with(|| CombatantState::new(id))
        }
    }

    /// Advance derived state for one event. Runs before any subscription so
    /// handlers always observe state *including* the current event.
    pub(crate) fn advance(&mut self, event: &Event) {
        self.position = event.timestamp;
        match event.kind {
            // Debuffs are the same effect bookkeeping on a (usually hostile)
            // target; they share the ability id space with buffs.
            EventKind::ApplyBuff
            | EventKind::RefreshBuff
            | EventKind::ApplyDebuff
            | EventKind::RefreshDebuff => {
                if let (Some(target), Some(ability)) = (event.target, event.ability_id()) {
                    let stacks = event.stacks.unwrap_or(1);
                    self.combatant_mut(target).apply_buff(ability, stacks, event.timestamp);
                }
            }
            EventKind::RemoveBuff | EventKind::RemoveDebuff => {
                if let (Some(target), Some(ability)) = (event.target, event.ability_id()) {
                    self.combatant_mut(target).remove_buff(ability, event.timestamp);
                }
            }
            EventKind::Death => {
                if let Some(target) = event.target {
                    self.combatant_mut(target).close_open_buffs(event.timestamp);
                }
            }
            _ => {}
        }
    }

    /// Close unfinished intervals at the encounter's final timestamp.
    pub(crate) fn finalize(&mut self, end: EventTime) {
        self.position = end;
        self.selected.close_open_buffs(end);
        for state in self.others.values_mut() {
            state.close_open_buffs(end);
        }
    }
}
