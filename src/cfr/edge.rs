/// An action in the game tree.
///
/// Edges label the slots of a [`Menu`](super::Menu) and are hashed into the
/// public [`History`](super::History). The bounds let them key strategy
/// tables and cross thread boundaries.
pub trait CfrEdge:
    Copy
    + Clone
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Send
    + Sync
    + std::hash::Hash
    + std::fmt::Debug
    + std::fmt::Display
{
}
