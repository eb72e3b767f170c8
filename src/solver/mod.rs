//! The poker side of the solver.
//!
//! Adapts a validated [`Game`](crate::gameplay::Game) snapshot to the
//! game-agnostic trainer in [`cfr`](crate::cfr) and reads advice back out.
//!
//! - `spot`: a game bounded by a street horizon
//! - `encoder`: bucket and history keyed information sets
//! - `fingerprint`: coarse cache keys for snapshots
//! - `config`: process-wide solver parameters
//! - `result`: recommendation, distribution and status
//! - `engine`: the [`solve`] entry point

mod config;
mod encoder;
mod engine;
mod fingerprint;
mod result;
mod spot;

pub use config::*;
pub use encoder::*;
pub use engine::*;
pub use fingerprint::*;
pub use result::*;
pub use spot::*;
