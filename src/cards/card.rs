use super::rank::Rank;
use super::suit::Suit;

/// A playing card encoded as a single byte.
///
/// The 52 cards are bijectively mapped to `0..52` where the encoding is
/// `rank * 4 + suit`. Cards sort first by rank, then by suit within each rank.
///
/// Cards are parsed from two-character strings like `"As"` (ace of spades)
/// or `"Tc"` (ten of clubs). Use [`Card::parse`] for several cards at once.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub fn rank(&self) -> Rank {
        Rank::from(self.0 / 4)
    }
    pub fn suit(&self) -> Suit {
        Suit::from(self.0 % 4)
    }
    /// Parses concatenated card notations, ignoring whitespace.
    pub fn parse(s: &str) -> Result<Vec<Self>, String> {
        s.replace(char::is_whitespace, "")
            .chars()
            .collect::<Vec<_>>()
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>())
            .map(|pair| Self::try_from(pair.as_str()))
            .collect::<Result<Vec<Self>, _>>()
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self(u8::from(r) * 4 + u8::from(s))
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0..52
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self(n % 52)
    }
}

/// u64 representation
/// each card is just one bit turned on
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars = s.trim().chars().map(String::from).collect::<Vec<_>>();
        match chars.as_slice() {
            [rank, suit] => {
                let rank = Rank::try_from(rank.as_str())?;
                let suit = Suit::try_from(suit.as_str())?;
                Ok(Card::from((rank, suit)))
            }
            _ => Err(format!("card needs 2 characters: {:?}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_rank_suit() {
        for n in 0..52u8 {
            let card = Card::from(n);
            assert_eq!(card, Card::from((card.rank(), card.suit())));
        }
    }

    #[test]
    fn canonical_display() {
        let card = Card::try_from("as").unwrap();
        assert_eq!(card.to_string(), "As");
        assert_eq!(Card::try_from("Tc").unwrap().to_string(), "Tc");
    }

    #[test]
    fn parse_many() {
        let cards = Card::parse("AsKd 7h").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1], Card::from((Rank::King, Suit::Diamond)));
    }

    #[test]
    fn reject_garbage() {
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Ax").is_err());
        assert!(Card::try_from("1s").is_err());
        assert!(Card::parse("AsK").is_err());
    }
}
