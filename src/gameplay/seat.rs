use super::position::Position;
use crate::Chips;
use crate::cards::*;

/// A player's state at the table.
///
/// Tracks chips, betting status, and hole cards. Opponents' cards are usually
/// [`Pocket::Unknown`]; the solver fills them in per sampled world.
///
/// # Fields
///
/// - `state`: Betting, Shoving (all-in), or Folding
/// - `stack`: Chips behind (not yet committed)
/// - `stake`: Chips committed this street
/// - `spent`: Total chips committed this hand
/// - `acted`: Whether the seat has acted since the last aggression
/// - `pocket`: Hole cards, if known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seat {
    position: Position,
    state: State,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    acted: bool,
    pocket: Pocket,
}

impl Seat {
    /// A seat entering the snapshot street. Chips invested so far count
    /// toward both the hand total and the amount a caller must match.
    pub fn new(
        position: Position,
        stack: Chips,
        spent: Chips,
        state: State,
        pocket: Pocket,
    ) -> Self {
        let state = match (state, stack) {
            (State::Betting, 0) => State::Shoving,
            (state, _) => state,
        };
        Self {
            position,
            state,
            stack,
            stake: spent,
            spent,
            acted: false,
            pocket,
        }
    }
    pub fn acting(mut self, acted: bool) -> Self {
        self.acted = acted;
        self
    }
}

impl Seat {
    pub fn position(&self) -> Position {
        self.position
    }
    /// Chips behind (not committed to pot).
    pub fn stack(&self) -> Chips {
        self.stack
    }
    /// Chips committed this street.
    pub fn stake(&self) -> Chips {
        self.stake
    }
    /// Total chips committed this hand.
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn acted(&self) -> bool {
        self.acted
    }
    pub fn pocket(&self) -> Pocket {
        self.pocket
    }
}

impl Seat {
    /// Commits chips from stack to pot, going all-in if nothing is left.
    pub(crate) fn bet(&mut self, bet: Chips) {
        self.stack -= bet;
        self.stake += bet;
        self.spent += bet;
        if self.stack == 0 && self.state == State::Betting {
            self.state = State::Shoving;
        }
    }
    pub(crate) fn fold(&mut self) {
        self.state = State::Folding;
    }
    pub(crate) fn reset_acted(&mut self, acted: bool) {
        self.acted = acted;
    }
    pub(crate) fn reset_stake(&mut self) {
        self.stake = 0;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<5}{}{:>6}{:>6} {}",
            self.position.to_string(),
            self.state,
            self.stack,
            self.stake,
            self.pocket
        )
    }
}

/// Player status within a hand.
///
/// - `Betting`: Active and can take actions
/// - `Shoving`: All-in, no more actions but still in the pot
/// - `Folding`: Folded, out of the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Betting,
    Shoving,
    Folding,
}

impl State {
    /// Still contesting the pot.
    pub fn is_active(&self) -> bool {
        matches!(self, State::Betting | State::Shoving)
    }
    /// Able to take actions.
    pub fn is_betting(&self) -> bool {
        matches!(self, State::Betting)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            State::Betting => write!(f, "P"),
            State::Shoving => write!(f, "S"),
            State::Folding => write!(f, "F"),
        }
    }
}
