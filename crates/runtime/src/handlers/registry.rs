//! Handler registry dispatching occurrences by kind.

use std::sync::Arc;

use tracing::debug;

use super::{HandlerContext, OccurrenceHandler};
use crate::events::Occurrence;

/// Ordered set of handlers.
///
/// Handlers are sorted by priority once at construction; dispatch offers the
/// occurrence to every handler that declares it handles the occurrence's kind.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: Arc<[Arc<dyn OccurrenceHandler>]>,
}

impl HandlerRegistry {
    /// Creates a registry from `handlers`, sorted by priority (lower first).
    pub fn new(mut handlers: Vec<Arc<dyn OccurrenceHandler>>) -> Self {
        handlers.sort_by_key(|h| h.priority());
        Self {
            handlers: handlers.into(),
        }
    }

    /// Creates a registry with the default set of handlers.
    ///
    /// Default handlers:
    /// - KillHandler: kills on the killer's weapon
    /// - MiningHandler: blocks mined on the breaking tool
    /// - DamageHandler: damage taken across worn armor
    pub fn default_handlers() -> Self {
        use super::{DamageHandler, KillHandler, MiningHandler};

        Self::new(vec![
            Arc::new(KillHandler) as Arc<dyn OccurrenceHandler>,
            Arc::new(MiningHandler) as Arc<dyn OccurrenceHandler>,
            Arc::new(DamageHandler) as Arc<dyn OccurrenceHandler>,
        ])
    }

    /// Offers `occurrence` to every matching handler and returns the total
    /// number of objects updated.
    pub fn dispatch(&self, occurrence: &mut Occurrence<'_>, ctx: &HandlerContext<'_>) -> usize {
        let kind = occurrence.kind();

        self.handlers
            .iter()
            .filter(|handler| handler.handles(kind))
            .map(|handler| {
                let updated = handler.apply(occurrence, ctx);
                debug!(
                    target: "runtime::handlers",
                    handler = handler.name(),
                    %kind,
                    updated,
                    "Handler applied"
                );
                updated
            })
            .sum()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns handler names and priorities in dispatch order.
    pub fn handlers(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.handlers.iter().map(|h| (h.name(), h.priority()))
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::default_handlers()
    }
}
