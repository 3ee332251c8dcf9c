//! Cache Module
//!
//! Provides in-memory, type-erased caching with lazy TTL expiration.

mod clock;
mod entry;
pub mod keys;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use keys::{Category, UnknownCategory};
pub use stats::CacheStats;
pub use store::{EntryInfo, TtlCache};

// == Public Constants ==
/// TTL applied to entries stored without an explicit one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);
