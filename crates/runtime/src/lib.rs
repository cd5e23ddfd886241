//! Runtime orchestration for statistic tracking.
//!
//! This crate connects occurrence delivery to the pure ledger in
//! `stattrak-core`. Consumers build an [`EventRouter`], share it across the
//! threads that receive host notifications, and hand it each [`Occurrence`]
//! together with the objects it touches.
//!
//! Modules are organized by responsibility:
//! - [`router`] hosts the router and its builder
//! - [`dedup`] keeps redelivered occurrences from being counted twice
//! - [`events`] defines the occurrences the router understands
//! - [`handlers`] turn occurrences into ledger updates
//! - [`config`] and [`metrics`] cover tuning and observability
pub mod config;
pub mod dedup;
pub mod error;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod router;

pub use config::{RuntimeConfig, StatNames};
pub use dedup::DeduplicationWindow;
pub use error::{Result, RuntimeError};
pub use events::{BlockPos, Occurrence, OccurrenceKey, OccurrenceKind};
pub use handlers::{
    DamageHandler, HandlerContext, HandlerRegistry, KillHandler, MiningHandler, OccurrenceHandler,
};
pub use metrics::{MetricsSnapshot, RouterMetrics};
pub use router::{EventRouter, EventRouterBuilder, RouteOutcome};
