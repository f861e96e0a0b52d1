//! Built-in shared modules.
//!
//! These are ordinary modules with no special access: they register through
//! the same public contract as host-supplied ones. They exist because most
//! analysis rosters want them as dependencies (cast counts, baseline damage
//! output) and keeping them here saves every host reimplementing them.

mod ability_tracker;
mod damage_done;

pub use ability_tracker::{AbilityTotals, AbilityTracker};
pub use damage_done::DamageDone;
