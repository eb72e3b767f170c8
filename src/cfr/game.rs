use super::edge::CfrEdge;
use super::menu::Menu;
use super::turn::Turn;
use crate::Utility;

/// A memoryless game state.
///
/// States never mutate; every transition returns a new value. Hidden
/// chance (private cards, future board) lives in a world `W` sampled once
/// per iteration, so the same public state can be revealed or paid out
/// differently depending on which world is being walked.
///
/// States are hashable so that best response can group worlds whose
/// chance outcomes lead to the same public successor.
pub trait CfrGame: Clone + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync {
    type E: CfrEdge;
    type W: Send + Sync;

    /// Number of players who receive payoffs.
    fn players(&self) -> usize;
    /// Decision, chance, or terminal.
    fn turn(&self) -> Turn;
    /// Legal actions at a decision node. Empty elsewhere.
    fn menu(&self) -> Menu<Self::E>;
    /// Successor after the acting player takes an edge from the menu.
    fn apply(&self, edge: Self::E) -> Self;
    /// Successor after chance is resolved by this world.
    fn reveal(&self, world: &Self::W) -> Self;
    /// Net utility for a player at a terminal state in this world.
    fn payoff(&self, world: &Self::W, player: usize) -> Utility;
    /// Scale that exploitability is reported in.
    fn unit(&self) -> Utility {
        1.0
    }
}
