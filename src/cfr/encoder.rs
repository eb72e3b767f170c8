use super::game::CfrGame;
use super::history::History;
use super::info::CfrInfo;

/// Maps game states to information sets and supplies chance worlds.
///
/// The encoder owns the world pool a solve draws from. Worlds are drawn
/// uniformly, so a pool generated from the true chance distribution gives
/// unbiased samples, and a prefix of it gives a fixed evaluation set.
pub trait Encoder: Send + Sync {
    type G: CfrGame;
    type I: CfrInfo;

    /// The sampled chance realisations for this solve.
    fn worlds(&self) -> &[<Self::G as CfrGame>::W];
    /// What the acting player knows at this state in this world.
    fn info(&self, game: &Self::G, world: &<Self::G as CfrGame>::W, history: &History) -> Self::I;
}

/// The world type an encoder's game is played over.
pub type World<N> = <<N as Encoder>::G as CfrGame>::W;
