//! Handler for broken blocks.

use stattrak_core::ItemCategory;

use super::{HandlerContext, OccurrenceHandler, bump_counter};
use crate::events::{Occurrence, OccurrenceKind};

/// Counts blocks mined on the breaking tool.
#[derive(Debug, Clone, Copy)]
pub struct MiningHandler;

impl OccurrenceHandler for MiningHandler {
    fn name(&self) -> &'static str {
        "mining"
    }

    fn handles(&self, kind: OccurrenceKind) -> bool {
        kind == OccurrenceKind::BlockBroken
    }

    fn apply(&self, occurrence: &mut Occurrence<'_>, ctx: &HandlerContext<'_>) -> usize {
        match occurrence {
            Occurrence::BlockBroken { tool, .. } if ItemCategory::Tool.matches(tool.material()) => {
                usize::from(bump_counter(&mut **tool, &ctx.names.blocks_mined, ctx.ledger))
            }
            _ => 0,
        }
    }
}
