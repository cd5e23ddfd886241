//! Pure statistic bookkeeping shared by the runtime and offline tools.
//!
//! `stattrak-core` owns the lore encoding of tracked statistics and the
//! arithmetic applied to them. Nothing here holds shared state: every function
//! takes the caller's lines and values and hands back new ones.
//!
//! - [`ledger`] reads and writes `"<marker> <name>: <value>"` lines
//! - [`allocator`] splits one damage amount across several targets
//! - [`category`] classifies objects by material name
//! - [`item`] defines the [`LoreHolder`] seam plus an in-memory [`Item`]
pub mod allocator;
pub mod category;
pub mod error;
pub mod item;
pub mod ledger;
pub mod value;

pub use allocator::{Allocation, allocate, round_tenths};
pub use category::ItemCategory;
pub use error::StatParseError;
pub use item::{Item, LoreHolder};
pub use ledger::StatLedger;
pub use value::StatValue;
