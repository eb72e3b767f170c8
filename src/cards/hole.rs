use super::card::Card;
use super::hand::Hand;
use crate::Error;

/// Two distinct private cards.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Hole(Hand);

impl Hole {
    pub fn cards(&self) -> (Card, Card) {
        let mut hand = self.0;
        let lo = hand.next().expect("hole holds two cards");
        let hi = hand.next().expect("hole holds two cards");
        (hi, lo)
    }
}

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

impl TryFrom<Hand> for Hole {
    type Error = Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        match hand.size() {
            2 => Ok(Self(hand)),
            n => Err(Error::malformed(format!("hole needs 2 cards, got {}", n))),
        }
    }
}

impl TryFrom<(Card, Card)> for Hole {
    type Error = Error;
    fn try_from((a, b): (Card, Card)) -> Result<Self, Self::Error> {
        match a == b {
            true => Err(Error::malformed(format!("hole repeats {}", a))),
            false => Ok(Self(Hand::from(vec![a, b]))),
        }
    }
}

impl TryFrom<&str> for Hole {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = Card::parse(s).map_err(Error::MalformedHand)?;
        match cards.as_slice() {
            [a, b] => Self::try_from((*a, *b)),
            _ => Err(Error::malformed(format!("hole needs 2 cards: {:?}", s))),
        }
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (hi, lo) = self.cards();
        write!(f, "{}{}", hi, lo)
    }
}

/// A seat's private cards as far as the requester can see them.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
pub enum Pocket {
    Known(Hole),
    #[default]
    Unknown,
}

impl Pocket {
    pub fn hole(&self) -> Option<Hole> {
        match self {
            Self::Known(hole) => Some(*hole),
            Self::Unknown => None,
        }
    }
    pub fn hand(&self) -> Hand {
        self.hole().map(Hand::from).unwrap_or_default()
    }
}

/// hidden cards arrive as "", "XX" or "??"
impl TryFrom<&str> for Pocket {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.replace(char::is_whitespace, "");
        match s.to_uppercase().as_str() {
            "" | "XX" | "??" | "XXXX" | "????" => Ok(Self::Unknown),
            _ => Hole::try_from(s.as_str()).map(Self::Known),
        }
    }
}

impl std::fmt::Display for Pocket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Known(hole) => write!(f, "{}", hole),
            Self::Unknown => write!(f, "XX"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hole() {
        let hole = Hole::try_from("Kd As").unwrap();
        assert_eq!(hole.to_string(), "AsKd");
    }

    #[test]
    fn reject_pair_of_same_card() {
        assert!(Hole::try_from("AsAs").unwrap_err().is_malformed());
        assert!(Hole::try_from("AsKdQc").is_err());
    }

    #[test]
    fn hidden_pockets() {
        assert_eq!(Pocket::try_from("XX"), Ok(Pocket::Unknown));
        assert_eq!(Pocket::try_from("??"), Ok(Pocket::Unknown));
        assert_eq!(Pocket::try_from(""), Ok(Pocket::Unknown));
        assert!(matches!(Pocket::try_from("7h7d"), Ok(Pocket::Known(_))));
    }
}
