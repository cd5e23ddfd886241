//! Handler for damage taken while wearing armor.

use stattrak_core::{ItemCategory, StatValue, allocate};
use tracing::{debug, trace};

use super::{HandlerContext, OccurrenceHandler};
use crate::events::{Occurrence, OccurrenceKind};

/// Spreads damage taken across the worn armor pieces.
///
/// Only pieces in [`ItemCategory::Armor`] that can carry lore share the
/// damage. With no such piece the occurrence is dropped without touching
/// anything.
///
/// # Example Flow
///
/// ```text
/// Player takes 3.0 damage wearing helmet (0.0) + boots (0.0) + elytra
///   → eligible: helmet, boots
///   → share 1.5 each
///   → helmet "Damage Taken: 1.5", boots "Damage Taken: 1.5", elytra untouched
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DamageHandler;

impl OccurrenceHandler for DamageHandler {
    fn name(&self) -> &'static str {
        "damage"
    }

    fn handles(&self, kind: OccurrenceKind) -> bool {
        kind == OccurrenceKind::EntityDamaged
    }

    fn apply(&self, occurrence: &mut Occurrence<'_>, ctx: &HandlerContext<'_>) -> usize {
        let Occurrence::EntityDamaged {
            victim,
            amount,
            armor,
        } = occurrence
        else {
            return 0;
        };

        if !amount.is_finite() || *amount < 0.0 {
            debug!(
                target: "runtime::handlers",
                handler = self.name(),
                %victim,
                amount = *amount,
                "Ignoring non-finite or negative damage"
            );
            return 0;
        }

        let name = ctx.names.damage_taken.as_str();

        // Read pass: the batch keeps each piece's index and the value read
        // here, so the write pass never looks a piece up by material again.
        let batch: Vec<(usize, StatValue)> = armor
            .iter()
            .enumerate()
            .filter(|(_, piece)| ItemCategory::Armor.matches(piece.material()))
            .filter_map(|(index, piece)| {
                piece
                    .lore()
                    .map(|lore| (index, ctx.ledger.decode(lore, name)))
            })
            .collect();

        if batch.is_empty() {
            trace!(
                target: "runtime::handlers",
                handler = self.name(),
                %victim,
                "No trackable armor"
            );
            return 0;
        }

        let allocations = allocate(*amount, batch);
        for allocation in &allocations {
            let piece = &mut armor[allocation.target];
            let Some(lore) = piece.lore() else {
                continue;
            };
            let updated = ctx.ledger.encode(lore, [(name, allocation.updated)]);
            piece.commit_lore(updated);
        }

        allocations.len()
    }
}
