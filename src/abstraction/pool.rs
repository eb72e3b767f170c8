use super::bucket::Bucket;
use super::world::World;
use crate::Error;
use crate::Result;
use crate::cards::Observation;
use crate::cards::Street;
use crate::gameplay::Game;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::collections::HashSet;

/// The chance worlds a single solve draws from.
///
/// Worlds are dealt in parallel, each from its own rng seeded by the solve
/// seed and its index, so the pool does not depend on thread scheduling.
/// Buckets are then assigned for every street the subgame spans. Equity is
/// the expensive part and many worlds share observations (the hero's own
/// preflop hand, for one), so distinct observations are evaluated once.
#[derive(Debug, Clone)]
pub struct Pool {
    worlds: Vec<World>,
    streets: Vec<Street>,
}

impl Pool {
    pub fn sample(game: &Game, horizon: usize, count: usize, seed: u64) -> Result<Self> {
        let streets = Self::streets(game.street(), horizon);
        let mut worlds = (0..count.max(1))
            .into_par_iter()
            .map(|i| World::deal(game, &mut SmallRng::seed_from_u64(Self::mix(seed, i))))
            .collect::<Option<Vec<World>>>()
            .ok_or_else(|| Error::internal("deck ran out while dealing worlds"))?;
        let lookup = worlds
            .iter()
            .flat_map(|w| w.observations(&streets))
            .collect::<HashSet<Observation>>()
            .into_par_iter()
            .map(|o| (o, Bucket::from(o)))
            .collect::<HashMap<Observation, Bucket>>();
        worlds.par_iter_mut().for_each(|world| {
            world.classify(&streets, |o| lookup.get(o).copied().unwrap_or_default())
        });
        log::debug!(
            "dealt {} worlds over {:?} with {} distinct observations",
            worlds.len(),
            streets,
            lookup.len()
        );
        Ok(Self { worlds, streets })
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }
    /// Streets the pool has buckets for.
    pub fn streets(root: Street, horizon: usize) -> Vec<Street> {
        Street::all()
            .iter()
            .copied()
            .filter(|s| *s >= root)
            .take(horizon.max(1))
            .collect()
    }
    pub fn covered(&self) -> &[Street] {
        &self.streets
    }

    /// Per-world seed: the solve seed mixed with the index by a
    /// golden-ratio multiply so neighbouring indices land far apart.
    fn mix(seed: u64, index: usize) -> u64 {
        seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::gameplay::Position;
    use crate::gameplay::Seat;
    use crate::gameplay::State;

    fn river() -> Game {
        let seat = |pocket: &str| {
            let pocket = Pocket::try_from(pocket).unwrap();
            Seat::new(Position::Unlabeled, 100, 10, State::Betting, pocket)
        };
        Game::new(
            Street::Rive,
            20,
            Board::try_from("2c7d9hTsJs").unwrap(),
            vec![seat("AsAh"), seat("XX")],
            0,
            2,
        )
        .unwrap()
    }

    #[test]
    fn streets_respect_horizon() {
        assert_eq!(Pool::streets(Street::Flop, 1), vec![Street::Flop]);
        assert_eq!(Pool::streets(Street::Flop, 2), vec![Street::Flop, Street::Turn]);
        assert_eq!(Pool::streets(Street::Turn, 4), vec![Street::Turn, Street::Rive]);
        assert_eq!(Pool::streets(Street::Rive, 0), vec![Street::Rive]);
    }

    #[test]
    fn pool_is_reproducible() {
        let a = Pool::sample(&river(), 1, 32, 7).unwrap();
        let b = Pool::sample(&river(), 1, 32, 7).unwrap();
        let c = Pool::sample(&river(), 1, 32, 8).unwrap();
        assert_eq!(a.worlds(), b.worlds());
        assert_ne!(a.worlds(), c.worlds());
        assert_eq!(a.worlds().len(), 32);
    }

    #[test]
    fn hero_bucket_is_fixed() {
        let pool = Pool::sample(&river(), 1, 16, 0).unwrap();
        let hero = pool.worlds()[0].bucket(0, Street::Rive);
        assert!(pool.worlds().iter().all(|w| w.bucket(0, Street::Rive) == hero));
        assert_eq!(hero.street(), Street::Rive);
    }
}
