//! Per-ability accounting for the selected player.

use hashbrown::HashMap;

use crate::analysis::{
    Analyzer, BuildContext, HandlerSlot, Module, ModuleContext, Subscription,
};
use crate::error::ModuleError;
use crate::events::{AbilityId, ActorQualifier, Event, EventFilter};

const ON_CAST: HandlerSlot = HandlerSlot(0);
const ON_DAMAGE: HandlerSlot = HandlerSlot(1);
const ON_HEAL: HandlerSlot = HandlerSlot(2);

/// Accumulated totals for one ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityTotals {
    pub casts: u32,
    pub damage_effective: i64,
    pub healing_effective: i64,
}

/// Tracks casts and per-ability damage/healing totals for the selected
/// player. Produces no output of its own; dependents query it.
#[derive(Debug, Default)]
pub struct AbilityTracker {
    totals: HashMap<AbilityId, AbilityTotals>,
}

impl AbilityTracker {
    /// Totals for an ability; zeroes if it never appeared.
    pub fn ability(&self, id: AbilityId) -> AbilityTotals {
        self.totals.get(&id).copied().unwrap_or_default()
    }

    fn entry(&mut self, event: &Event) -> Option<&mut AbilityTotals> {
        let id = event.ability_id()?;
        Some(self.totals.entry(id).or_default())
    }
}

impl Analyzer for AbilityTracker {
    fn subscriptions(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(EventFilter::cast().by(ActorQualifier::Selected), ON_CAST),
            Subscription::new(EventFilter::damage().by(ActorQualifier::Selected), ON_DAMAGE),
            Subscription::new(EventFilter::heal().by(ActorQualifier::Selected), ON_HEAL),
        ]
    }

    fn on_event(
        &mut self,
        slot: HandlerSlot,
        event: &Event,
        _ctx: &ModuleContext<'_>,
    ) -> Result<(), ModuleError> {
        let Some(totals) = self.entry(event) else {
            return Ok(());
        };
        match slot {
            ON_CAST => totals.casts += 1,
            ON_DAMAGE => totals.damage_effective += event.raw_amount(),
            ON_HEAL => totals.healing_effective += event.amount + event.absorbed,
            _ => {}
        }
        Ok(())
    }
}

impl Module for AbilityTracker {
    const NAME: &'static str = "ability_tracker";

    fn build(_ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        Ok(Self::default())
    }
}
