use crate::Chips;
use crate::abstraction::Bucket;
use crate::cards::Observation;
use crate::gameplay::Game;
use crate::gameplay::State;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

/// Cache key for an abstracted decision.
///
/// Concrete chip counts are coarsened so that nearby states share a key:
/// the pot in whole big blinds, each stack as a stack-to-pot band, and the
/// price to call in tenths of the pot. The street's raise count and the
/// acted flags stand in for the action since the street began, which keeps
/// the shape of the root menu fixed within one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// The acting player's equity bucket, when their cards are known.
    pub fn bucket(game: &Game) -> Option<Bucket> {
        game.actor()
            .pocket()
            .hole()
            .map(|hole| Bucket::from(Observation::from((hole, game.board()))))
    }

    /// Stack-to-pot band. Bands double in width so deep stacks coarsen.
    fn spr(stack: Chips, pot: Chips) -> u8 {
        let ratio = stack as f32 / pot.max(1) as f32;
        [0.0, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0]
            .iter()
            .take_while(|&&edge| ratio > edge)
            .count() as u8
    }

    fn tenths(numer: Chips, denom: Chips) -> i32 {
        (10.0 * numer as f32 / denom.max(1) as f32).round() as i32
    }

    /// Key a state whose actor bucket is already known.
    pub fn new(game: &Game, bucket: Option<Bucket>) -> Self {
        let ref mut hasher = DefaultHasher::new();
        game.street().hash(hasher);
        Self::tenths(game.pot(), 10 * game.bblind()).hash(hasher);
        for seat in game.seats() {
            Self::spr(seat.stack(), game.pot()).hash(hasher);
            seat.state().hash(hasher);
            seat.acted().hash(hasher);
            (seat.stake() < game.max_stake() && seat.state() != State::Folding).hash(hasher);
        }
        game.actor_index().hash(hasher);
        Self::tenths(game.to_call(), game.pot()).hash(hasher);
        game.raises().hash(hasher);
        bucket.hash(hasher);
        Self(hasher.finish())
    }
}

impl From<&Game> for Fingerprint {
    fn from(game: &Game) -> Self {
        Self::new(game, Self::bucket(game))
    }
}

impl From<Fingerprint> for u64 {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::gameplay::Edge;
    use crate::gameplay::Position;
    use crate::gameplay::Seat;

    fn river(hero: &str, pot: Chips, stack: Chips) -> Game {
        let seat = |pocket: &str| {
            let pocket = Pocket::try_from(pocket).unwrap();
            Seat::new(Position::Unlabeled, stack, pot / 2, State::Betting, pocket)
        };
        Game::new(
            Street::Rive,
            pot,
            Board::try_from("2c7d9hJsQd").unwrap(),
            vec![seat(hero), seat("XX")],
            0,
            2,
        )
        .unwrap()
    }

    #[test]
    fn same_state_same_key() {
        let a = Fingerprint::from(&river("AsAh", 40, 100));
        let b = Fingerprint::from(&river("AsAh", 40, 100));
        assert_eq!(a, b);
    }

    #[test]
    fn nearby_chips_share_a_key() {
        let a = Fingerprint::from(&river("AsAh", 40, 100));
        let b = Fingerprint::from(&river("AsAh", 40, 101));
        assert_eq!(a, b);
    }

    #[test]
    fn different_shapes_differ() {
        let game = river("AsAh", 40, 100);
        let key = Fingerprint::from(&game);
        assert_ne!(key, Fingerprint::from(&game.apply(Edge::Check)));
        assert_ne!(key, Fingerprint::from(&river("AsAh", 200, 100)));
        assert_ne!(key, Fingerprint::from(&river("3s4h", 40, 100)));
        assert_ne!(key, Fingerprint::from(&river("XX", 40, 100)));
    }

    #[test]
    fn unknown_actor_has_no_bucket() {
        assert!(Fingerprint::bucket(&river("XX", 40, 100)).is_none());
        assert!(Fingerprint::bucket(&river("AsAh", 40, 100)).is_some());
    }
}
