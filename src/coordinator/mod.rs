//! Strategy cache and request coordination.
//!
//! - `cache`: fingerprint-keyed LRU with monotone inserts
//! - `flight`: a solve other requests can wait on
//! - `stats`: lock-free counters and their snapshot
//! - `coordinator`: hit, join or lead

mod cache;
mod coordinator;
mod flight;
mod stats;

pub use cache::*;
pub use coordinator::*;
pub use flight::*;
pub use stats::*;
