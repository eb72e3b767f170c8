use crate::Chips;
use crate::Probability;

/// Pot-relative raise sizing as a fraction.
///
/// `Odds::new(1, 2)` is a half-pot raise, `Odds::new(3, 2)` an overbet of
/// one and a half pots. Fractions are kept reduced so that equal sizes
/// compare and hash equal.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub struct Odds(Chips, Chips);

impl Odds {
    pub const fn new(n: Chips, d: Chips) -> Self {
        Self(n, d)
    }
    /// Numerator (pot multiplier).
    pub fn numer(&self) -> Chips {
        self.0
    }
    /// Denominator (pot divisor).
    pub fn denom(&self) -> Chips {
        self.1
    }
    /// Chips this fraction of `pot` amounts to, rounded down.
    pub fn of(&self, pot: Chips) -> Chips {
        (pot as i64 * self.0 as i64 / self.1.max(1) as i64) as Chips
    }
    fn gcd(a: Chips, b: Chips) -> (Chips, Chips) {
        let (mut x, mut y) = (a, b);
        while y != 0 {
            (x, y) = (y, x % y);
        }
        match x {
            0 => (a, b),
            x => (a / x, b / x),
        }
    }

    /// Sizes available at the first raise of a street.
    pub const OPENS: [Self; 5] = [
        Self(1, 3), // 0.33 pot
        Self(1, 2), // 0.50 pot
        Self(3, 4), // 0.75 pot
        Self(1, 1), // 1.00 pot
        Self(3, 2), // 1.50 pot
    ];
    /// Sizes available for the first re-raise, and on later streets.
    pub const RERAISES: [Self; 2] = [
        Self(1, 2), // 0.50 pot
        Self(1, 1), // 1.00 pot
    ];
    /// Sizes available once a street has seen two raises.
    pub const CAPS: [Self; 1] = [
        Self(1, 1), // 1.00 pot
    ];

    /// Raise sizes by how many raises the street has seen. Streets dealt
    /// inside the subgame never offer more than the re-raise grid.
    pub fn grid(depth: usize, later: bool) -> &'static [Self] {
        match (depth, later) {
            (0, false) => &Self::OPENS,
            (0, true) | (1, _) => &Self::RERAISES,
            _ => &Self::CAPS,
        }
    }
}

impl Ord for Odds {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.0 as i64 * other.1 as i64).cmp(&(other.0 as i64 * self.1 as i64))
    }
}

impl PartialOrd for Odds {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Odds> for Probability {
    fn from(odds: Odds) -> Self {
        odds.0 as Probability / odds.1 as Probability
    }
}

impl From<(Chips, Chips)> for Odds {
    fn from((a, b): (Chips, Chips)) -> Self {
        let (a, b) = Self::gcd(a, b);
        Self(a, b)
    }
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_reduce() {
        assert_eq!(Odds::from((4, 8)), Odds::new(1, 2));
        assert_eq!(Odds::from((6, 4)), Odds::new(3, 2));
    }

    #[test]
    fn ordering_is_by_value() {
        assert!(Odds::new(1, 3) < Odds::new(1, 2));
        assert!(Odds::new(3, 4) < Odds::new(1, 1));
        assert!(Odds::new(3, 2) > Odds::new(1, 1));
        assert!(Odds::OPENS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn grid_narrows_with_depth() {
        assert_eq!(Odds::grid(0, false).len(), 5);
        assert_eq!(Odds::grid(0, true), &Odds::RERAISES);
        assert_eq!(Odds::grid(1, false), &Odds::RERAISES);
        assert_eq!(Odds::grid(2, false), &Odds::CAPS);
        assert_eq!(Odds::grid(7, true), &Odds::CAPS);
    }

    #[test]
    fn fraction_of_pot() {
        assert_eq!(Odds::new(1, 3).of(100), 33);
        assert_eq!(Odds::new(3, 2).of(100), 150);
        assert_eq!(Probability::from(Odds::new(3, 4)), 0.75);
    }
}
