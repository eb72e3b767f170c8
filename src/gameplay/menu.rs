use super::edge::Edge;
use super::game::Game;
use super::odds::Odds;
use crate::Chips;
use crate::MAX_RAISE_REPEATS;
use crate::cfr::Menu;
use crate::cfr::Turn;

/// Action abstraction.
impl Game {
    /// The discretized legal actions at a decision node, in a fixed order:
    /// fold, check or call, raises from smallest to largest, then all-in.
    ///
    /// Empty at chance and terminal nodes.
    pub fn menu(&self) -> Menu<Edge> {
        let mut menu = Menu::new();
        if !matches!(self.turn(), Turn::Choice(_)) {
            return menu;
        }
        if self.to_call() == 0 {
            menu.push(Edge::Check);
        } else {
            menu.push(Edge::Fold);
            menu.push(Edge::Call);
        }
        if self.may_raise() {
            self.raises_into(&mut menu);
        }
        menu
    }

    /// Chips the actor puts in by taking this edge.
    pub fn amount(&self, edge: Edge) -> Chips {
        let stack = self.actor().stack();
        let call = self.to_call();
        match edge {
            Edge::Fold | Edge::Check => 0,
            Edge::Call => call.min(stack),
            Edge::Raise(odds) => (call + odds.of(self.pot() + call)).min(stack),
            Edge::Shove => stack,
        }
    }

    /// Raising needs chips beyond a call, raises left on the street, and
    /// someone else still able to respond.
    fn may_raise(&self) -> bool {
        let actor = self.actor_index();
        self.raises() < MAX_RAISE_REPEATS
            && self.actor().stack() > self.to_call()
            && self
                .seats()
                .iter()
                .enumerate()
                .any(|(i, s)| i != actor && s.state().is_betting())
    }

    fn raises_into(&self, menu: &mut Menu<Edge>) {
        let stack = self.actor().stack();
        let min = self.to_raise();
        let mut sizes = Vec::<Chips>::new();
        let mut shove = false;
        for &odds in Odds::grid(self.raises(), self.dealt() > 0) {
            let chips = self.to_call() + odds.of(self.pot() + self.to_call());
            if chips < min {
                continue;
            }
            if stack - chips < self.bblind() {
                shove = true;
                continue;
            }
            if sizes.contains(&chips) {
                continue;
            }
            sizes.push(chips);
            menu.push(Edge::Raise(odds));
        }
        if shove || sizes.is_empty() {
            menu.push(Edge::Shove);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MENU_CAPACITY;
    use crate::cards::*;
    use crate::gameplay::Position;
    use crate::gameplay::Seat;
    use crate::gameplay::State;

    fn seat(stack: Chips, spent: Chips) -> Seat {
        Seat::new(Position::Unlabeled, stack, spent, State::Betting, Pocket::Unknown)
    }

    fn flop(stacks: [Chips; 2]) -> Game {
        Game::new(
            Street::Flop,
            20,
            Board::try_from("7c8d9h").unwrap(),
            vec![seat(stacks[0], 10), seat(stacks[1], 10)],
            0,
            2,
        )
        .unwrap()
    }

    fn edges(game: &Game) -> Vec<Edge> {
        game.menu().iter().collect()
    }

    #[test]
    fn unopened_pot_offers_every_size() {
        assert_eq!(
            edges(&flop([190, 190])),
            vec![
                Edge::Check,
                Edge::Raise(Odds::new(1, 3)),
                Edge::Raise(Odds::new(1, 2)),
                Edge::Raise(Odds::new(3, 4)),
                Edge::Raise(Odds::new(1, 1)),
                Edge::Raise(Odds::new(3, 2)),
            ]
        );
    }

    #[test]
    fn facing_a_bet_narrows_the_grid() {
        let game = flop([190, 190]).apply(Edge::Raise(Odds::new(1, 2)));
        assert_eq!(
            edges(&game),
            vec![
                Edge::Fold,
                Edge::Call,
                Edge::Raise(Odds::new(1, 2)),
                Edge::Raise(Odds::new(1, 1)),
            ]
        );
        assert_eq!(game.amount(Edge::Call), 10);
        assert_eq!(game.amount(Edge::Raise(Odds::new(1, 1))), 50);
    }

    #[test]
    fn short_stack_gets_shove() {
        let menu = edges(&flop([25, 190]));
        assert_eq!(menu.last(), Some(&Edge::Shove));
        assert!(!menu.contains(&Edge::Raise(Odds::new(3, 2))));
        assert!(menu.contains(&Edge::Raise(Odds::new(1, 1))));
    }

    #[test]
    fn raise_cap_stops_raising() {
        let game = flop([190, 190]).raised(MAX_RAISE_REPEATS);
        assert_eq!(edges(&game), vec![Edge::Check]);
    }

    #[test]
    fn no_raise_against_all_in() {
        let game = flop([190, 50]);
        let game = game.apply(Edge::Check).apply(Edge::Shove);
        assert_eq!(edges(&game), vec![Edge::Fold, Edge::Call]);
    }

    #[test]
    fn later_streets_use_fewer_sizes() {
        let game = flop([190, 190])
            .apply(Edge::Check)
            .apply(Edge::Check)
            .reveal(Board::try_from("7c8d9hTs").unwrap());
        assert_eq!(
            edges(&game),
            vec![
                Edge::Check,
                Edge::Raise(Odds::new(1, 2)),
                Edge::Raise(Odds::new(1, 1)),
            ]
        );
    }

    #[test]
    fn menus_fit_capacity() {
        let mut game = flop([1000, 1000]);
        while let Turn::Choice(_) = game.turn() {
            let menu = game.menu();
            assert!(!menu.is_empty());
            assert!(menu.len() <= MENU_CAPACITY);
            game = game.apply(menu.iter().find(|e| e.is_aggro()).unwrap_or(Edge::Call));
        }
    }
}
