//! Hand abstraction: equity buckets and sampled chance worlds.
pub mod bucket;
pub use bucket::*;

pub mod info;
pub use info::*;

pub mod pool;
pub use pool::*;

pub mod world;
pub use world::*;
