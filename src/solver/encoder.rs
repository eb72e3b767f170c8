use super::spot::Spot;
use crate::abstraction::Info;
use crate::abstraction::Pool;
use crate::abstraction::World;
use crate::cfr::CfrGame;
use crate::cfr::Encoder;
use crate::cfr::History;

/// Poker information abstraction over a sampled world pool.
///
/// A decision is keyed by the actor's equity bucket on the current street
/// in the world being walked, the public action digest, and the menu width.
pub struct Abstraction {
    pool: Pool,
}

impl From<Pool> for Abstraction {
    fn from(pool: Pool) -> Self {
        Self { pool }
    }
}

impl Abstraction {
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

impl Encoder for Abstraction {
    type G = Spot;
    type I = Info;

    fn worlds(&self) -> &[World] {
        self.pool.worlds()
    }
    fn info(&self, spot: &Spot, world: &World, history: &History) -> Info {
        let game = spot.game();
        let bucket = world.bucket(game.actor_index(), game.street());
        Info::new(bucket, *history, spot.menu().len())
    }
}
