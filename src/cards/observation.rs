use super::board::Board;
use super::deck::Deck;
use super::hand::Hand;
use super::hands::HandIterator;
use super::hole::Hole;
use super::street::Street;
use super::strength::Strength;
use crate::EQUITY_TRIALS;
use crate::Equity;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cmp::Ordering;
use std::hash::Hash;
use std::hash::Hasher;

/// One player's view of the cards: their pocket and the public board.
///
/// Equity is measured against a single uniformly random opponent holding.
/// On the river every holding is enumerated. Earlier streets sample
/// runouts with an rng seeded from the cards themselves, so the same
/// observation always produces the same equity.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, PartialOrd, Ord)]
pub struct Observation {
    pocket: Hand,
    public: Hand,
}

impl Observation {
    pub fn street(&self) -> Street {
        Street::try_from(self.public.size()).expect("public cards form a board")
    }
    pub fn pocket(&self) -> &Hand {
        &self.pocket
    }
    pub fn public(&self) -> &Hand {
        &self.public
    }
    pub fn strength(&self) -> Strength {
        Strength::from(Hand::from(*self))
    }

    pub fn equity(&self) -> Equity {
        match self.street() {
            Street::Rive => self.enumerate(),
            _ => self.simulate(EQUITY_TRIALS),
        }
    }

    /// exact showdown equity against every remaining two-card holding
    fn enumerate(&self) -> Equity {
        let hand = Hand::from(*self);
        let hero = Strength::from(hand);
        let (won, sum) = HandIterator::from((2, hand))
            .map(|villain| Hand::add(self.public, villain))
            .map(Strength::from)
            .map(|villain| hero.cmp(&villain))
            .fold((0u32, 0u32), |(won, sum), ord| match ord {
                Ordering::Greater => (won + 2, sum + 2),
                Ordering::Equal => (won + 1, sum + 2),
                Ordering::Less => (won, sum + 2),
            });
        match sum {
            0 => 0.5,
            _ => won as Equity / sum as Equity,
        }
    }

    /// deterministic Monte Carlo over opponent holdings and runouts
    fn simulate(&self, trials: usize) -> Equity {
        let ref mut rng = SmallRng::seed_from_u64(self.seed());
        let dead = Hand::from(*self);
        let n = Street::Rive.n_observed() - self.public.size();
        let won = (0..trials)
            .filter_map(|_| {
                let mut deck = Deck::without(dead);
                let villain = deck.deal(2, rng)?;
                let runout = deck.deal(n, rng)?;
                let board = Hand::add(self.public, runout);
                let hero = Strength::from(Hand::add(self.pocket, board));
                let them = Strength::from(Hand::add(villain, board));
                Some(match hero.cmp(&them) {
                    Ordering::Greater => 2,
                    Ordering::Equal => 1,
                    Ordering::Less => 0,
                })
            })
            .sum::<u32>();
        won as Equity / (2 * trials.max(1)) as Equity
    }

    fn seed(&self) -> u64 {
        let ref mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.hash(hasher);
        hasher.finish()
    }
}

/// assemble Observation from private + public Hands
impl From<(Hand, Hand)> for Observation {
    fn from((pocket, public): (Hand, Hand)) -> Self {
        debug_assert!(pocket.size() == 2);
        debug_assert!(public.size() <= 5);
        debug_assert!(!pocket.overlaps(&public));
        Self { pocket, public }
    }
}

impl From<(Hole, Board)> for Observation {
    fn from((hole, board): (Hole, Board)) -> Self {
        Self::from((Hand::from(hole), Hand::from(board)))
    }
}

/// coalesce public + private cards into single Hand
impl From<Observation> for Hand {
    fn from(observation: Observation) -> Self {
        Self::add(observation.pocket, observation.public)
    }
}

impl crate::Arbitrary for Observation {
    fn random() -> Self {
        use crate::Arbitrary;
        let ref mut rng = rand::rng();
        let mut deck = Deck::new();
        let n = Street::random().n_observed();
        let public = deck.deal(n, rng).unwrap_or_default();
        let pocket = deck.deal(2, rng).unwrap_or_default();
        Self::from((pocket, public))
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.pocket, self.public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    fn observe(pocket: &str, public: &str) -> Observation {
        let hole = Hole::try_from(pocket).unwrap();
        let board = Board::try_from(public).unwrap();
        Observation::from((hole, board))
    }

    #[test]
    fn nuts_on_river() {
        let equity = observe("AsKs", "QsJsTs2c3d").equity();
        assert_eq!(equity, 1.0);
    }

    #[test]
    fn board_plays_splits() {
        let equity = observe("2c3d", "AsKsQsJsTs").equity();
        assert_eq!(equity, 0.5);
    }

    #[test]
    fn aces_preflop() {
        let equity = observe("AsAh", "").equity();
        assert!(equity > 0.78 && equity < 0.92, "{}", equity);
    }

    #[test]
    fn trash_preflop() {
        let equity = observe("7c2d", "").equity();
        assert!(equity < 0.45, "{}", equity);
    }

    #[test]
    fn sampling_is_deterministic() {
        let obs = Observation::random();
        assert_eq!(obs.equity(), obs.equity());
    }
}
