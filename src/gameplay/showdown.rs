use crate::Chips;
use crate::Utility;
use crate::cards::Strength;

/// Computes chip distributions at showdown.
///
/// Handles side pots from all-ins, split pots between equal hands, and
/// folded players receiving nothing. The pot is cut into layers at each
/// contender's total investment:
///
/// 1. Sort the distinct investment levels of players still in the hand
/// 2. Each layer collects what every player put in between the previous level and this one
/// 3. The layer goes to the strongest hand among contenders who reached the level, split on ties
/// 4. Money no contender layer claims (dead money, folded overpayment) joins the main pot
///
/// Rewards are fractional so that odd chips split evenly in expectation.
#[derive(Debug, Clone)]
pub struct Showdown {
    pot: Chips,
    entries: Vec<(Chips, Option<Strength>)>,
}

impl Showdown {
    /// `entries` holds each seat's total investment and its strength,
    /// or `None` for a folded seat.
    pub fn new(pot: Chips, entries: Vec<(Chips, Option<Strength>)>) -> Self {
        Self { pot, entries }
    }

    /// Gross chips returned to each seat. Sums to the pot.
    pub fn rewards(&self) -> Vec<Utility> {
        let mut rewards = vec![0.0 as Utility; self.entries.len()];
        let mut levels = self
            .entries
            .iter()
            .filter(|(_, strength)| strength.is_some())
            .map(|(spent, _)| *spent)
            .collect::<Vec<_>>();
        levels.sort_unstable();
        levels.dedup();
        let mut floor = 0;
        let mut claimed = 0;
        for level in levels {
            let layer = self
                .entries
                .iter()
                .map(|(spent, _)| (*spent).min(level) - (*spent).min(floor))
                .sum::<Chips>();
            self.award(&mut rewards, layer, level);
            claimed += layer;
            floor = level;
        }
        self.award(&mut rewards, self.pot - claimed, 0);
        rewards
    }

    /// Splits `amount` among the strongest contenders who invested at least `level`.
    fn award(&self, rewards: &mut [Utility], amount: Chips, level: Chips) {
        if amount <= 0 {
            return;
        }
        let eligible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (spent, _))| *spent >= level)
            .filter_map(|(i, (_, strength))| strength.map(|s| (i, s)))
            .collect::<Vec<_>>();
        let Some(best) = eligible.iter().map(|(_, s)| *s).max() else {
            return;
        };
        let winners = eligible
            .iter()
            .filter(|(_, s)| *s == best)
            .map(|(i, _)| *i)
            .collect::<Vec<_>>();
        let share = amount as Utility / winners.len() as Utility;
        for i in winners {
            rewards[i] += share;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Hand;

    fn strength(cards: &str) -> Option<Strength> {
        Some(Strength::from(Hand::try_from(cards).unwrap()))
    }

    #[test]
    fn heads_up_showdown() {
        let showdown = Showdown::new(
            200,
            vec![
                (100, strength("AsAhKdQc7s2h3d")),
                (100, strength("KsKhKdQc7s2h3d")),
            ],
        );
        assert_eq!(showdown.rewards(), vec![0.0, 200.0]);
    }

    #[test]
    fn winners_folded() {
        let showdown = Showdown::new(
            130,
            vec![
                (50, None),
                (40, strength("2c3d7h9sJcQdKh")),
                (40, strength("4c4d7h9sJcQdKh")),
            ],
        );
        assert_eq!(showdown.rewards(), vec![0.0, 0.0, 130.0]);
    }

    #[test]
    fn multiway_pot_split() {
        let showdown = Showdown::new(
            300,
            vec![
                (100, strength("AsKsQsJsTs2c3d")),
                (100, strength("AhKhQhJhTh2c3d")),
                (100, strength("2h3h4h5h7d8c9s")),
            ],
        );
        assert_eq!(showdown.rewards(), vec![150.0, 150.0, 0.0]);
    }

    #[test]
    fn multiway_winner_takes_all() {
        let showdown = Showdown::new(
            300,
            vec![
                (100, strength("AsKsQsJsTs2c3d")),
                (100, strength("KhKdKcQh7d2c3d")),
                (100, strength("2h3h4h6h8d9cJs")),
            ],
        );
        assert_eq!(showdown.rewards(), vec![300.0, 0.0, 0.0]);
    }

    #[test]
    fn multiway_all_in_with_uneven_stacks() {
        // short stack wins the main pot, middle stack the side pot
        let showdown = Showdown::new(
            350,
            vec![
                (50, strength("AsAdAcKhKd2s3c")),
                (150, strength("QsQdQcJhJd2s3c")),
                (150, strength("2h3h4d6c8s9dJc")),
            ],
        );
        assert_eq!(showdown.rewards(), vec![150.0, 200.0, 0.0]);
    }

    #[test]
    fn dead_money_joins_main_pot() {
        let showdown = Showdown::new(
            130,
            vec![
                (50, strength("AsAdAcKhKd2s3c")),
                (50, strength("2h3h4d6c8s9dJc")),
            ],
        );
        assert_eq!(showdown.rewards(), vec![130.0, 0.0]);
    }

    #[test]
    fn odd_chips_split_fractionally() {
        let showdown = Showdown::new(
            5,
            vec![
                (2, strength("AsKsQsJsTs2c3d")),
                (2, strength("AhKhQhJhTh2c3d")),
                (1, None),
            ],
        );
        assert_eq!(showdown.rewards(), vec![2.5, 2.5, 0.0]);
    }
}
