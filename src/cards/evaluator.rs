use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

const WHEEL: u16 = 0b_1000000001111;

/// A lazy evaluator for a hand's strength.
///
/// Using the bitset representation of the Hand, we search for the
/// highest Ranking from the top category down with bitwise operations.
/// Works for any number of cards from 1 to 7.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_straight_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_flush())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
            .unwrap_or(Ranking::HighCard(Rank::Two))
    }

    /// keep the highest n remaining ranks by clearing the lowest bit
    pub fn find_kickers(&self, ranking: Ranking) -> Kickers {
        let n = ranking.n_kickers();
        let pool = match ranking {
            Ranking::Flush(_) => self
                .find_suit_of_flush()
                .map(|suit| u16::from(self.0.of(&suit)))
                .unwrap_or_default(),
            _ => u16::from(self.0),
        };
        let mut bits = pool & ranking.mask();
        while bits.count_ones() as usize > n {
            bits &= bits - 1;
        }
        Kickers::from(bits)
    }

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).and_then(|hi| {
            self.find_rank_of_n_oak_skip(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).and_then(|triple| {
            self.find_rank_of_n_oak_skip(2, Some(triple))
                .map(|paired| Ranking::FullHouse(triple, paired))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.0).map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush()
            .map(|suit| Rank::from(u16::from(self.0.of(&suit))))
            .map(Ranking::Flush)
    }
    fn find_straight_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush()
            .and_then(|suit| self.find_rank_of_straight(self.0.of(&suit)))
            .map(Ranking::StraightFlush)
    }

    fn find_rank_of_straight(&self, hand: Hand) -> Option<Rank> {
        let ranks = u16::from(hand);
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|suit| self.0.of(suit).size() >= 5)
    }
    fn find_rank_of_n_oak(&self, n: usize) -> Option<Rank> {
        self.find_rank_of_n_oak_skip(n, None)
    }
    fn find_rank_of_n_oak_skip(&self, n: usize, skip: Option<Rank>) -> Option<Rank> {
        let cards = u64::from(self.0);
        Rank::all()
            .into_iter()
            .rev()
            .filter(|rank| Some(*rank) != skip)
            .find(|rank| (cards & u64::from(*rank)).count_ones() as usize >= n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(cards: &str) -> (Ranking, Kickers) {
        let eval = Evaluator::from(Hand::try_from(cards).unwrap());
        let ranking = eval.find_ranking();
        let kickers = eval.find_kickers(ranking);
        (ranking, kickers)
    }

    #[rustfmt::skip]
    #[test]
    fn high_card() {
        let (ranking, kickers) = eval("As Kh Qd Jc 9s");
        assert_eq!(ranking, Ranking::HighCard(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]));
    }

    #[test]
    fn one_pair() {
        let (ranking, kickers) = eval("As Ah Kd Qc Js");
        assert_eq!(ranking, Ranking::OnePair(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack]));
    }

    #[test]
    fn two_pair() {
        let (ranking, kickers) = eval("As Ah Kd Kc Qs");
        assert_eq!(ranking, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn three_pair_keeps_best_kicker() {
        let (ranking, kickers) = eval("As Ah Kd Kc Qs Qh Jd");
        assert_eq!(ranking, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn straight() {
        let (ranking, kickers) = eval("Ts Jh Qd Kc As");
        assert_eq!(ranking, Ranking::Straight(Rank::Ace));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn wheel_straight() {
        let (ranking, _) = eval("As 2h 3d 4c 5s");
        assert_eq!(ranking, Ranking::Straight(Rank::Five));
    }

    #[test]
    fn six_high_beats_wheel() {
        let (ranking, _) = eval("As 2s 3h 4d 5c 6s");
        assert_eq!(ranking, Ranking::Straight(Rank::Six));
    }

    #[test]
    fn flush_kickers_come_from_suit() {
        let (ranking, kickers) = eval("Ah Jh 8h 6h 2h Ks Qd");
        assert_eq!(ranking, Ranking::Flush(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::Jack, Rank::Eight, Rank::Six, Rank::Two]));
    }

    #[test]
    fn flush_over_straight() {
        let (ranking, _) = eval("4h 6h 7h 8h 9h Ts");
        assert_eq!(ranking, Ranking::Flush(Rank::Nine));
    }

    #[test]
    fn full_house_over_flush() {
        let (ranking, kickers) = eval("Kh Ah Ad As Ks Qs Js");
        assert_eq!(ranking, Ranking::FullHouse(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn two_trips_make_full_house() {
        let (ranking, _) = eval("As Ah Ad Kc Ks Kh Qd");
        assert_eq!(ranking, Ranking::FullHouse(Rank::Ace, Rank::King));
    }

    #[test]
    fn four_oak() {
        let (ranking, kickers) = eval("As Ah Ad Ac Ks Kh Qd");
        assert_eq!(ranking, Ranking::FourOAK(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King]));
    }

    #[test]
    fn wheel_straight_flush() {
        let (ranking, _) = eval("As 2s 3s 4s 5s Kd");
        assert_eq!(ranking, Ranking::StraightFlush(Rank::Five));
    }
}
