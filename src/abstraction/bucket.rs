use crate::Equity;
use crate::cards::Observation;
use crate::cards::Street;

/// A band of showdown equity on one street.
///
/// Hands whose equity against a random holding falls in the same band share
/// a strategy. Every street has its own threshold table: preflop equities
/// cluster between one third and nine tenths, so its bands are narrow there,
/// while the river is cut evenly and a little finer since its equity is exact.
///
/// # Encoding
///
/// Packed as `[8 bits street][8 bits index]` in a `u16`, so buckets from
/// different streets never compare equal.
#[derive(Default, Copy, Clone, Hash, Eq, PartialEq, Debug, PartialOrd, Ord)]
pub struct Bucket(u16);

const INDEX_MASK: u16 = 0xFF;
const STREET_BITS: u16 = 8;

impl Bucket {
    const PREF: [Equity; 9] = [0.36, 0.40, 0.44, 0.48, 0.52, 0.56, 0.60, 0.66, 0.74];
    const FLOP: [Equity; 9] = [0.10, 0.20, 0.30, 0.40, 0.50, 0.60, 0.70, 0.80, 0.90];
    const TURN: [Equity; 9] = [0.10, 0.20, 0.30, 0.40, 0.50, 0.60, 0.70, 0.80, 0.90];
    const RIVE: [Equity; 10] = [0.05, 0.15, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75, 0.85, 0.95];

    /// Upper band edges for a street. A street has one more band than edges.
    pub fn thresholds(street: Street) -> &'static [Equity] {
        match street {
            Street::Pref => &Self::PREF,
            Street::Flop => &Self::FLOP,
            Street::Turn => &Self::TURN,
            Street::Rive => &Self::RIVE,
        }
    }
    /// Number of buckets on a street.
    pub fn count(street: Street) -> usize {
        Self::thresholds(street).len() + 1
    }
    pub fn street(&self) -> Street {
        Street::all()
            .get((self.0 >> STREET_BITS) as usize)
            .copied()
            .unwrap_or_default()
    }
    pub fn index(&self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }
}

impl From<(Street, Equity)> for Bucket {
    fn from((street, equity): (Street, Equity)) -> Self {
        let index = Self::thresholds(street)
            .iter()
            .take_while(|&&edge| equity >= edge)
            .count();
        Self::from((street, index))
    }
}

impl From<(Street, usize)> for Bucket {
    fn from((street, index): (Street, usize)) -> Self {
        let hi = (street as u16) << STREET_BITS;
        let lo = index as u16 & INDEX_MASK;
        Self(hi | lo)
    }
}

impl From<Observation> for Bucket {
    fn from(observation: Observation) -> Self {
        Self::from((observation.street(), observation.equity()))
    }
}

impl From<Bucket> for u16 {
    fn from(bucket: Bucket) -> Self {
        bucket.0
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}::{:02}", self.street(), self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Board;
    use crate::cards::Hole;

    #[test]
    fn bands_are_ordered() {
        for &street in Street::all() {
            let edges = Bucket::thresholds(street);
            assert!(edges.windows(2).all(|w| w[0] < w[1]));
            assert!((10..=11).contains(&Bucket::count(street)));
        }
    }

    #[test]
    fn equity_selects_band() {
        assert_eq!(Bucket::from((Street::Flop, 0.0)).index(), 0);
        assert_eq!(Bucket::from((Street::Flop, 0.55)).index(), 5);
        assert_eq!(Bucket::from((Street::Flop, 1.0)).index(), 9);
        assert_eq!(Bucket::from((Street::Rive, 1.0)).index(), 10);
        assert_eq!(Bucket::from((Street::Pref, 0.85)).index(), 9);
    }

    #[test]
    fn streets_never_collide() {
        let flop = Bucket::from((Street::Flop, 3usize));
        let turn = Bucket::from((Street::Turn, 3usize));
        assert_ne!(flop, turn);
        assert_eq!(flop.street(), Street::Flop);
        assert_eq!(turn.index(), 3);
    }

    #[test]
    fn nuts_land_in_top_band() {
        let hole = Hole::try_from("AsKs").unwrap();
        let board = Board::try_from("QsJsTs2h3d").unwrap();
        let bucket = Bucket::from(Observation::from((hole, board)));
        assert_eq!(bucket.index(), Bucket::count(Street::Rive) - 1);
    }
}
