//! Handlers that turn occurrences into ledger updates.
//!
//! Each handler owns one statistic: it checks whether the occurrence's objects
//! belong to its category, reads the current value through the ledger, and
//! commits the rewritten lore back to the object.

mod damage;
mod kill;
mod mining;
mod registry;

pub use damage::DamageHandler;
pub use kill::KillHandler;
pub use mining::MiningHandler;
pub use registry::HandlerRegistry;

use stattrak_core::{LoreHolder, StatLedger};

use crate::config::StatNames;
use crate::events::{Occurrence, OccurrenceKind};

/// Context provided to handlers for one occurrence.
pub struct HandlerContext<'a> {
    pub ledger: &'a StatLedger,
    pub names: &'a StatNames,
}

/// Composable unit reacting to one kind of occurrence.
pub trait OccurrenceHandler: Send + Sync {
    /// Returns the handler name for logging and debugging.
    fn name(&self) -> &'static str;

    /// Returns execution priority (lower values execute first).
    fn priority(&self) -> i32 {
        0
    }

    /// Returns true if this handler reacts to `kind`.
    fn handles(&self, kind: OccurrenceKind) -> bool;

    /// Applies the occurrence to the objects it carries.
    ///
    /// Returns the number of objects whose lore was rewritten.
    fn apply(&self, occurrence: &mut Occurrence<'_>, ctx: &HandlerContext<'_>) -> usize;
}

/// Increments counter `name` on `holder`. Returns false when the object
/// cannot carry lore.
fn bump_counter(holder: &mut dyn LoreHolder, name: &str, ledger: &StatLedger) -> bool {
    let Some(lore) = holder.lore() else {
        return false;
    };
    let updated = ledger.increment(lore, name);
    holder.commit_lore(updated);
    true
}
