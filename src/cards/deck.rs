use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use rand::Rng;

/// The cards not yet seen by anyone. Draws are driven by a caller-supplied
/// rng so that seeded sampling stays reproducible.
#[derive(Debug, Clone, Copy)]
pub struct Deck(Hand);

impl Deck {
    pub fn new() -> Self {
        Self(Hand::empty().complement())
    }
    /// a full deck minus the given cards
    pub fn without(dead: Hand) -> Self {
        Self(dead.complement())
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn remove(&mut self, card: Card) {
        self.0.remove(card);
    }

    /// remove a uniformly random card
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        let n = self.0.size();
        if n == 0 {
            return None;
        }
        let i = rng.random_range(0..n);
        let mut bits = u64::from(self.0);
        for _ in 0..i {
            bits &= bits - 1;
        }
        let card = Card::from(bits.trailing_zeros() as u8);
        self.remove(card);
        Some(card)
    }

    /// remove n random cards
    pub fn deal<R: Rng>(&mut self, n: usize, rng: &mut R) -> Option<Hand> {
        (0..n)
            .map(|_| self.draw(rng))
            .try_fold(Hand::empty(), |hand, card| {
                card.map(|c| Hand::add(hand, Hand::from(c)))
            })
    }

    /// remove two random cards to deal as a Hole
    pub fn hole<R: Rng>(&mut self, rng: &mut R) -> Option<Hole> {
        self.deal(2, rng).and_then(|hand| Hole::try_from(hand).ok())
    }
}

impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn draws_every_card_once() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::new();
        let mut seen = Hand::empty();
        while let Some(card) = deck.draw(rng) {
            assert!(!seen.contains(&card));
            seen = Hand::add(seen, Hand::from(card));
        }
        assert_eq!(seen.size(), 52);
    }

    #[test]
    fn never_draws_dead_cards() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        let dead = Hand::try_from("AsKsQsJsTs").unwrap();
        let mut deck = Deck::without(dead);
        let dealt = deck.deal(47, rng).unwrap();
        assert!(!dealt.overlaps(&dead));
        assert_eq!(deck.deal(1, rng), None);
    }

    #[test]
    fn seeded_draws_repeat() {
        let a = Deck::new().deal(5, &mut SmallRng::seed_from_u64(3));
        let b = Deck::new().deal(5, &mut SmallRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
