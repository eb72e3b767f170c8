/// Information set: what a player knows at a decision point.
///
/// All states sharing an information set must offer the same menu, so one
/// strategy is learned per key. Keys are ordered so that frozen profiles
/// iterate deterministically.
pub trait CfrInfo:
    Clone + Copy + PartialEq + Eq + Ord + Send + Sync + std::hash::Hash + std::fmt::Debug
{
}
