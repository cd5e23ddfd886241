//! Occurrence router.
//!
//! The router owns the only long-lived state of the system, the dedup window,
//! and wires it to the ledger and handlers. It is `Send + Sync`; share one
//! instance behind an `Arc` across every thread that receives notifications.

use std::sync::Arc;

use stattrak_core::StatLedger;
use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::config::{RuntimeConfig, StatNames};
use crate::dedup::DeduplicationWindow;
use crate::error::{Result, RuntimeError};
use crate::events::{Occurrence, OccurrenceKey};
use crate::handlers::{HandlerContext, HandlerRegistry, OccurrenceHandler};
use crate::metrics::RouterMetrics;

/// Result of routing one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// At least one object's lore was rewritten.
    Applied { updated: usize },
    /// Already handled within the dedup window; nothing was done.
    Duplicate,
    /// Handled, but no object qualified for an update.
    Ignored,
}

/// Routes occurrences through dedup, classification and the ledger.
///
/// ```text
/// occurrence ─► window.claim(key) ──false──► Duplicate
///                    │ true / no key
///                    ▼
///              handlers (category check, decode, allocate, encode)
///                    ▼
///              commit_lore on each qualifying object
/// ```
pub struct EventRouter {
    window: DeduplicationWindow<OccurrenceKey>,
    ledger: StatLedger,
    names: StatNames,
    handlers: HandlerRegistry,
    metrics: Arc<RouterMetrics>,
}

impl EventRouter {
    pub fn builder() -> EventRouterBuilder {
        EventRouterBuilder::new()
    }

    /// Router with default handlers, scheduling on the current tokio runtime.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Handles one occurrence.
    ///
    /// Never blocks and never fails: duplicates and occurrences that touch no
    /// trackable object are reported through the outcome.
    pub fn route(&self, mut occurrence: Occurrence<'_>) -> RouteOutcome {
        let kind = occurrence.kind();

        if let Some(key) = occurrence.key()
            && !self.window.claim(key)
        {
            self.metrics.record_duplicate();
            debug!(target: "runtime::router", %kind, ?key, "Skipping duplicate occurrence");
            return RouteOutcome::Duplicate;
        }

        let ctx = HandlerContext {
            ledger: &self.ledger,
            names: &self.names,
        };
        let updated = self.handlers.dispatch(&mut occurrence, &ctx);
        self.metrics.record_routed(updated);

        if updated == 0 {
            trace!(target: "runtime::router", %kind, "No trackable objects");
            RouteOutcome::Ignored
        } else {
            RouteOutcome::Applied { updated }
        }
    }

    pub fn window(&self) -> &DeduplicationWindow<OccurrenceKey> {
        &self.window
    }

    pub fn ledger(&self) -> &StatLedger {
        &self.ledger
    }

    pub fn names(&self) -> &StatNames {
        &self.names
    }

    pub fn metrics(&self) -> Arc<RouterMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// Builder for [`EventRouter`].
#[derive(Default)]
pub struct EventRouterBuilder {
    config: RuntimeConfig,
    scheduler: Option<Handle>,
    handlers: Vec<Arc<dyn OccurrenceHandler>>,
}

impl EventRouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Runtime on which dedup releases are scheduled. Defaults to the current
    /// runtime at [`build`](Self::build) time.
    pub fn scheduler(mut self, handle: Handle) -> Self {
        self.scheduler = Some(handle);
        self
    }

    /// Adds a handler. When no handler is added the default set is used.
    pub fn handler(mut self, handler: impl OccurrenceHandler + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn build(self) -> Result<EventRouter> {
        let scheduler = match self.scheduler {
            Some(handle) => handle,
            None => Handle::try_current().map_err(RuntimeError::NoScheduler)?,
        };

        let handlers = if self.handlers.is_empty() {
            HandlerRegistry::default_handlers()
        } else {
            HandlerRegistry::new(self.handlers)
        };

        debug!(
            target: "runtime::router",
            handlers = ?handlers.handlers().map(|(name, _)| name).collect::<Vec<_>>(),
            release_delay_ms = self.config.release_delay.as_millis() as u64,
            "Router built"
        );

        Ok(EventRouter {
            window: DeduplicationWindow::new(scheduler, self.config.release_delay),
            ledger: self.config.ledger(),
            names: self.config.names,
            handlers,
            metrics: Arc::new(RouterMetrics::new()),
        })
    }
}
