use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// Hand represents an unordered set of Cards, stored as the 52 least
/// significant bits of a u64. Each bit is one card, so set operations are
/// single instructions and nothing is heap allocated.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hand(u64);

impl Hand {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub fn add(lhs: Self, rhs: Self) -> Self {
        debug_assert!(lhs.0 & rhs.0 == 0, "cards overlap: {} {}", lhs, rhs);
        Self(lhs.0 | rhs.0)
    }
    pub fn complement(&self) -> Self {
        Self(self.0 ^ Self::mask())
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn overlaps(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }
    /// the cards of one suit
    pub fn of(&self, suit: &Suit) -> Hand {
        Self(self.0 & u64::from(*suit))
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }

    const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// we can empty a hand from low to high
/// by removing the lowest card until the hand is empty
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        match self.0 {
            0 => None,
            bits => {
                let card = Card::from(bits.trailing_zeros() as u8);
                self.remove(card);
                Some(card)
            }
        }
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// Vec<Card> isomorphism (up to permutation, this always comes out sorted)
impl From<Hand> for Vec<Card> {
    fn from(h: Hand) -> Self {
        h.into_iter().collect()
    }
}
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0u64, |a, b| a | b))
    }
}

/// one-way conversion to u16 rank masks
/// a rank bit is set if any suit of that rank is held
impl From<Hand> for u16 {
    fn from(h: Hand) -> Self {
        Rank::all()
            .into_iter()
            .filter(|r| h.0 & u64::from(*r) != 0)
            .map(u16::from)
            .fold(0u16, |a, b| a | b)
    }
}

/// str isomorphism, rejecting duplicates
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = Card::parse(s)?;
        let n = cards.len();
        let hand = Self::from(cards);
        match hand.size() == n {
            true => Ok(hand),
            false => Err(format!("duplicate cards in {}", s)),
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in *self {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_iteration() {
        let mut iter = Hand::try_from("Jc Ts 2c Js").unwrap().into_iter();
        assert_eq!(iter.next(), Card::try_from("2c").ok());
        assert_eq!(iter.next(), Card::try_from("Ts").ok());
        assert_eq!(iter.next(), Card::try_from("Jc").ok());
        assert_eq!(iter.next(), Card::try_from("Js").ok());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn ranks_in_suit() {
        let hand = Hand::try_from("2c 3d 4h 5s 6c 7d 8h 9s Tc Jd Qh Ks Ac").unwrap();
        assert_eq!(u16::from(hand.of(&Suit::Club)), 0b_1000100010001);
        assert_eq!(u16::from(hand.of(&Suit::Diamond)), 0b_0001000100010);
        assert_eq!(u16::from(hand.of(&Suit::Heart)), 0b_0010001000100);
        assert_eq!(u16::from(hand.of(&Suit::Spade)), 0b_0100010001000);
    }

    #[test]
    fn duplicates_rejected() {
        assert!(Hand::try_from("As Kd As").is_err());
    }

    #[test]
    fn complement_is_disjoint() {
        let hand = Hand::try_from("As Kd").unwrap();
        assert_eq!(hand.complement().size(), 50);
        assert!(!hand.complement().overlaps(&hand));
    }
}
