use super::edge::Edge;
use super::seat::Seat;
use super::seat::State;
use super::showdown::Showdown;
use crate::Chips;
use crate::Error;
use crate::MAX_PLAYERS;
use crate::Result;
use crate::Utility;
use crate::cards::*;
use crate::cfr::Turn;

/// How a finished hand is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Everyone else folded; the seat takes the pot uncontested.
    FoldWin(usize),
    /// Two or more seats reach showdown, possibly after an all-in runout.
    Showdown,
}

/// The memoryless state of a hand in progress.
///
/// `Game` holds everything needed to list legal actions and compute payoffs
/// from a snapshot onward: seats, pot, board, whose turn it is, and how much
/// raising the current street has seen. It does not remember the actions
/// that led here.
///
/// State transitions are functional: [`apply`](Self::apply) and
/// [`reveal`](Self::reveal) return a new `Game` rather than mutating in
/// place, so a solver can branch without undo logic.
///
/// # Fields
///
/// - `pot`: Total chips in the center, including dead money
/// - `board`: Community cards (0, 3, 4 or 5)
/// - `seats`: Per-player state, in post-flop action order
/// - `actor`: Index of the seat to act
/// - `bblind`: Big blind, the minimum bet and minimum raise increment
/// - `raises`: Raises made on the current street
/// - `increment`: Largest raise increment on the current street
/// - `dealt`: Streets dealt since the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Game {
    pot: Chips,
    board: Board,
    seats: Vec<Seat>,
    actor: usize,
    bblind: Chips,
    raises: usize,
    increment: Chips,
    dealt: usize,
}

/// Construction and validation.
impl Game {
    /// Validates a snapshot into a playable state.
    ///
    /// Fails with [`Error::MalformedHand`] when the board does not match the
    /// street, a card appears twice, chips are negative, the seat count or
    /// actor index is out of range, or the actor cannot act in a live hand.
    pub fn new(
        street: Street,
        pot: Chips,
        board: Board,
        seats: Vec<Seat>,
        actor: usize,
        bblind: Chips,
    ) -> Result<Self> {
        if !(2..=MAX_PLAYERS).contains(&seats.len()) {
            return Err(Error::malformed(format!(
                "{} players, expected 2 to {}",
                seats.len(),
                MAX_PLAYERS
            )));
        }
        if board.street() != street {
            return Err(Error::malformed(format!(
                "{} cards on the board for the {}",
                board.size(),
                street
            )));
        }
        if bblind <= 0 {
            return Err(Error::malformed(format!("big blind {}", bblind)));
        }
        if pot < 0 {
            return Err(Error::malformed(format!("negative pot {}", pot)));
        }
        if actor >= seats.len() {
            return Err(Error::malformed(format!("actor {} of {} seats", actor, seats.len())));
        }
        let mut seen = Hand::from(board);
        for (i, seat) in seats.iter().enumerate() {
            if seat.stack() < 0 || seat.spent() < 0 {
                return Err(Error::malformed(format!("negative chips at seat {}", i)));
            }
            let pocket = seat.pocket().hand();
            if seen.overlaps(&pocket) {
                return Err(Error::malformed(format!("seat {} shares a card: {}", i, pocket)));
            }
            seen = Hand::add(seen, pocket);
        }
        if seats.iter().all(|s| s.state() == State::Folding) {
            return Err(Error::malformed("every seat has folded"));
        }
        let invested = seats.iter().map(Seat::spent).sum::<Chips>();
        if invested > pot {
            return Err(Error::malformed(format!(
                "pot {} is smaller than the {} invested",
                pot, invested
            )));
        }
        let game = Self {
            pot,
            board,
            seats,
            actor,
            bblind,
            raises: 0,
            increment: 0,
            dealt: 0,
        };
        let game = game.with_increment();
        match game.turn() {
            Turn::Choice(i) if !game.seats[i].state().is_betting() => Err(Error::malformed(format!(
                "seat {} is {} and cannot act",
                i,
                game.seats[i].state()
            ))),
            _ => Ok(game),
        }
    }
    /// Marks how many raises the street has already seen.
    pub fn raised(mut self, raises: usize) -> Self {
        self.raises = raises;
        self
    }
    /// The last increment is read off the two highest stakes.
    fn with_increment(mut self) -> Self {
        let mut stakes = self
            .seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .map(Seat::stake)
            .collect::<Vec<_>>();
        stakes.sort_unstable_by(|a, b| b.cmp(a));
        self.increment = match stakes.as_slice() {
            [hi, lo, ..] => hi - lo,
            _ => 0,
        };
        self
    }
}

/// Public state accessors.
impl Game {
    pub fn n(&self) -> usize {
        self.seats.len()
    }
    /// Total chips in the pot.
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn board(&self) -> Board {
        self.board
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn bblind(&self) -> Chips {
        self.bblind
    }
    pub fn raises(&self) -> usize {
        self.raises
    }
    pub fn dealt(&self) -> usize {
        self.dealt
    }
    /// Current street based on board cards.
    pub fn street(&self) -> Street {
        self.board.street()
    }
    /// Index of the seat whose turn it is, or would be.
    pub fn actor_index(&self) -> usize {
        self.actor
    }
    pub fn actor(&self) -> &Seat {
        &self.seats[self.actor]
    }
    /// Determines whether it's a player's turn, chance node, or terminal.
    pub fn turn(&self) -> Turn {
        if self.must_stop() {
            Turn::Terminal
        } else if self.must_deal() {
            Turn::Chance
        } else {
            Turn::Choice(self.actor)
        }
    }
    /// How the hand ends, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.must_stop() {
            false => None,
            true => Some(self.resolution()),
        }
    }
    /// Highest stake on the current street.
    pub fn max_stake(&self) -> Chips {
        self.seats.iter().map(Seat::stake).max().unwrap_or_default()
    }
    /// Chips the actor needs to put in to continue, before capping at the stack.
    pub fn to_call(&self) -> Chips {
        (self.max_stake() - self.actor().stake()).max(0)
    }
    /// Smallest legal raise, as chips put in by the actor.
    pub fn to_raise(&self) -> Chips {
        self.to_call() + self.increment.max(self.bblind)
    }
    /// Seats still contesting the pot.
    pub fn contenders(&self) -> usize {
        self.seats.iter().filter(|s| s.state().is_active()).count()
    }
    /// Seats that can still put chips in.
    pub fn bettors(&self) -> usize {
        self.seats.iter().filter(|s| s.state().is_betting()).count()
    }
}

/// Action validation and application.
impl Game {
    /// Returns a new game state with the edge applied.
    ///
    /// The edge should come from [`menu`](Self::menu); chip amounts are
    /// clamped to the actor's stack either way.
    pub fn apply(&self, edge: Edge) -> Self {
        let mut child = self.clone();
        child.act(edge);
        child
    }
    /// Fallible version of [`apply`](Self::apply) that rejects edges off the menu.
    pub fn try_apply(&self, edge: Edge) -> Result<Self> {
        match self.is_allowed(&edge) {
            true => Ok(self.apply(edge)),
            false => Err(Error::malformed(format!(
                "{} is not legal in state {} with menu {}",
                edge,
                self.turn(),
                self.menu()
            ))),
        }
    }
    pub fn is_allowed(&self, edge: &Edge) -> bool {
        self.menu().contains(edge)
    }
    /// Deals the next street. `board` is the complete board after the deal.
    pub fn reveal(&self, board: Board) -> Self {
        debug_assert!(board.street() > self.street(), "reveal must advance the street");
        debug_assert!(
            u64::from(Hand::from(self.board)) & !u64::from(Hand::from(board)) == 0,
            "reveal must extend the board"
        );
        let mut child = self.clone();
        child.board = board;
        child.next_street();
        child
    }
}

/// Terminal values.
impl Game {
    /// Net chips won by each seat: reward minus everything it put in.
    ///
    /// `strengths` gives every seat's final hand strength on the complete
    /// board. On a non-terminal state this values checking the hand down.
    pub fn settle(&self, strengths: &[Strength]) -> Vec<Utility> {
        self.rewards(strengths)
            .into_iter()
            .zip(self.seats.iter())
            .map(|(reward, seat)| reward - seat.spent() as Utility)
            .collect()
    }
    fn rewards(&self, strengths: &[Strength]) -> Vec<Utility> {
        match self.resolution() {
            Outcome::FoldWin(winner) => self
                .seats
                .iter()
                .enumerate()
                .map(|(i, _)| if i == winner { self.pot as Utility } else { 0.0 })
                .collect(),
            Outcome::Showdown => Showdown::new(
                self.pot,
                self.seats
                    .iter()
                    .zip(strengths.iter())
                    .map(|(seat, strength)| {
                        (seat.spent(), seat.state().is_active().then_some(*strength))
                    })
                    .collect(),
            )
            .rewards(),
        }
    }
    fn resolution(&self) -> Outcome {
        let mut active = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state().is_active());
        match (active.next(), active.next()) {
            (Some((winner, _)), None) => Outcome::FoldWin(winner),
            _ => Outcome::Showdown,
        }
    }
}

/// Private mutation methods.
impl Game {
    fn act(&mut self, edge: Edge) {
        let chips = self.amount(edge);
        let stake = self.max_stake();
        let actor = self.actor;
        match edge {
            Edge::Fold => self.seats[actor].fold(),
            Edge::Check => {}
            Edge::Call | Edge::Raise(_) | Edge::Shove => self.bet(chips),
        }
        self.seats[actor].reset_acted(true);
        let raise = self.seats[actor].stake() - stake;
        if edge.is_aggro() && raise > 0 {
            self.raises += 1;
            self.increment = self.increment.max(raise);
            self.seats
                .iter_mut()
                .enumerate()
                .filter(|(i, _)| *i != actor)
                .for_each(|(_, seat)| seat.reset_acted(false));
        }
        self.next_player();
    }
    fn bet(&mut self, chips: Chips) {
        debug_assert!(self.actor().stack() >= chips);
        self.pot += chips;
        self.seats[self.actor].bet(chips);
    }
}

/// Street and player advancement.
impl Game {
    fn next_street(&mut self) {
        self.raises = 0;
        self.increment = 0;
        self.dealt += 1;
        for seat in self.seats.iter_mut() {
            seat.reset_stake();
            seat.reset_acted(false);
        }
        self.actor = self
            .seats
            .iter()
            .position(|s| s.state().is_betting())
            .unwrap_or_default();
    }
    /// Advances to the next seat that still owes a decision.
    fn next_player(&mut self) {
        let n = self.n();
        let stake = self.max_stake();
        let actor = self.actor;
        self.actor = (1..=n)
            .map(|k| (actor + k) % n)
            .find(|&i| {
                let seat = &self.seats[i];
                seat.state().is_betting() && !(seat.acted() && seat.stake() == stake)
            })
            .unwrap_or(actor);
    }
}

/// Termination and continuation predicates.
impl Game {
    /// True if the hand is over: one contender left, or the betting is
    /// closed with nothing left to bet on.
    pub fn must_stop(&self) -> bool {
        self.contenders() <= 1
            || (self.is_everyone_alright()
                && (self.street() == Street::Rive || self.bettors() <= 1))
    }
    /// True if the round is closed and the next street must be dealt.
    pub fn must_deal(&self) -> bool {
        self.is_everyone_alright() && !self.must_stop()
    }
    /// The betting round is closed.
    fn is_everyone_alright(&self) -> bool {
        let stake = self.max_stake();
        let mut betting = self.seats.iter().filter(|s| s.state().is_betting());
        match self.bettors() {
            0 => true,
            1 => betting.all(|s| s.stake() >= stake),
            _ => betting.all(|s| s.acted() && s.stake() == stake),
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{} {} pot {} bb {}", self.street(), self.board, self.pot, self.bblind)?;
        for (i, seat) in self.seats.iter().enumerate() {
            let marker = if i == self.actor { '>' } else { ' ' };
            writeln!(f, "{}{}", marker, seat)?;
        }
        Ok(())
    }
}
