//! Handler for entity kills.

use stattrak_core::ItemCategory;
use tracing::trace;

use super::{HandlerContext, OccurrenceHandler, bump_counter};
use crate::events::{Occurrence, OccurrenceKind};

/// Counts kills on the killer's weapon.
///
/// Deaths without a killer, or with a non-weapon in hand, change nothing.
#[derive(Debug, Clone, Copy)]
pub struct KillHandler;

impl OccurrenceHandler for KillHandler {
    fn name(&self) -> &'static str {
        "kill"
    }

    fn handles(&self, kind: OccurrenceKind) -> bool {
        kind == OccurrenceKind::EntityDied
    }

    fn apply(&self, occurrence: &mut Occurrence<'_>, ctx: &HandlerContext<'_>) -> usize {
        let Occurrence::EntityDied {
            entity,
            weapon: Some(weapon),
        } = occurrence
        else {
            return 0;
        };

        if !ItemCategory::Weapon.matches(weapon.material()) {
            trace!(
                target: "runtime::handlers",
                handler = self.name(),
                %entity,
                material = weapon.material(),
                "Killer not holding a weapon"
            );
            return 0;
        }

        usize::from(bump_counter(&mut **weapon, &ctx.names.kills, ctx.ledger))
    }
}
