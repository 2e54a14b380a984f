//! Cache Module
//!
//! Short-TTL in-memory response cache in front of the Text-TV upstream.

mod entry;
pub mod keys;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Default interval between background sweeps, in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
