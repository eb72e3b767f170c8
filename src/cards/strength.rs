use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's showdown strength: ranking first, kickers to break ties.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(evaluator: Evaluator) -> Self {
        let ranking = evaluator.find_ranking();
        let kickers = evaluator.find_kickers(ranking);
        Self { ranking, kickers }
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kickers): (Ranking, Kickers)) -> Self {
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{}", self.ranking, self.kickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(cards: &str) -> Strength {
        Strength::from(Hand::try_from(cards).unwrap())
    }

    #[test]
    fn kicker_breaks_tie() {
        assert!(strength("As Ad Kc 7h 2s") > strength("Ah Ac Qc 7d 2d"));
    }

    #[test]
    fn board_plays() {
        let board = "Ts Js Qd Kc Ad";
        assert_eq!(strength(&format!("{} 2c 3h", board)), strength(&format!("{} 4c 5h", board)));
    }
}
