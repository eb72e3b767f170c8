use super::card::Card;
use super::hand::Hand;
use super::street::Street;
use crate::Error;

/// Community cards. Order is irrelevant to evaluation so only the set is kept.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Board(Hand);

impl Board {
    pub fn empty() -> Self {
        Self(Hand::empty())
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn street(&self) -> Street {
        Street::try_from(self.size()).expect("board size validated on construction")
    }
    /// deal more cards on top of this board
    pub fn extend(&self, cards: Hand) -> crate::Result<Self> {
        match self.0.overlaps(&cards) {
            true => Err(Error::internal(format!("{} already on {}", cards, self))),
            false => Self::try_from(Hand::add(self.0, cards)),
        }
    }
}

impl From<Board> for Hand {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl TryFrom<Hand> for Board {
    type Error = Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        Street::try_from(hand.size())
            .map(|_| Self(hand))
            .map_err(Error::MalformedHand)
    }
}

impl TryFrom<&str> for Board {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = Card::parse(s).map_err(Error::MalformedHand)?;
        let n = cards.len();
        let hand = Hand::from(cards);
        match hand.size() == n {
            true => Self::try_from(hand),
            false => Err(Error::malformed(format!("board repeats a card: {}", s))),
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
