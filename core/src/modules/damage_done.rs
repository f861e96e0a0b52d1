//! Total damage output of the selected player.

use vantage_types::formatting::{format_duration, format_per_second, format_thousands};
use vantage_types::{Statistic, StatisticOrder};

use crate::analysis::{
    Analyzer, BuildContext, HandlerSlot, Module, ModuleContext, Subscription,
};
use crate::error::ModuleError;
use crate::events::{ActorQualifier, Event, EventFilter};

const ON_DAMAGE: HandlerSlot = HandlerSlot(0);

/// Accumulates the selected player's effective damage and reports it as a
/// core statistic with a per-second value.
#[derive(Debug, Default)]
pub struct DamageDone {
    total: i64,
}

impl DamageDone {
    pub fn total(&self) -> i64 {
        self.total
    }
}

impl Analyzer for DamageDone {
    fn subscriptions(&self) -> Vec<Subscription> {
        vec![Subscription::new(
            EventFilter::damage().by(ActorQualifier::Selected),
            ON_DAMAGE,
        )]
    }

    fn on_event(
        &mut self,
        _slot: HandlerSlot,
        event: &Event,
        _ctx: &ModuleContext<'_>,
    ) -> Result<(), ModuleError> {
        self.total += event.raw_amount();
        Ok(())
    }

    fn statistic(&self, ctx: &ModuleContext<'_>) -> Result<Option<Statistic>, ModuleError> {
        let duration = ctx.fight_duration();
        Ok(Some(Statistic {
            display_value: format!("{} DPS", format_per_second(self.total, duration)),
            tooltip: format!(
                "{} total damage done over {}",
                format_thousands(self.total),
                format_duration(duration)
            ),
            order: StatisticOrder::Core(0),
        }))
    }
}

impl Module for DamageDone {
    const NAME: &'static str = "damage_done";

    fn build(_ctx: &BuildContext<'_>) -> Result<Self, ModuleError> {
        Ok(Self::default())
    }
}
