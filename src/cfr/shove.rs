//! A one-street clairvoyance game with a known equilibrium.
//!
//! Each player antes 1. The bettor is dealt the nuts or air with equal
//! probability; the caller holds a bluff catcher. The bettor may check,
//! bet half the pot, or shove the pot; facing a bet the caller folds or
//! calls. At equilibrium the nuts always shove, air shoves half the time
//! and never bets half, and the caller calls a shove half the time.
//! The bettor's value is half an ante.

use super::edge::CfrEdge;
use super::encoder::Encoder;
use super::game::CfrGame;
use super::history::History;
use super::info::CfrInfo;
use super::menu::Menu;
use super::turn::Turn;
use crate::Utility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Holding {
    Nuts,
    Air,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    Check,
    Half,
    Shove,
    Fold,
    Call,
}

impl CfrEdge for Move {}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Half => write!(f, "half"),
            Self::Shove => write!(f, "shove"),
            Self::Fold => write!(f, "fold"),
            Self::Call => write!(f, "call"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShoveFold {
    holding: Option<Holding>,
    bet: Option<Move>,
    reply: Option<Move>,
}

impl ShoveFold {
    const ANTE: Utility = 1.0;

    fn size(bet: Move) -> Utility {
        match bet {
            Move::Half => Self::ANTE,
            Move::Shove => Self::ANTE * 2.0,
            _ => 0.0,
        }
    }
    /// the bettor's net winnings
    fn bettor(&self, holding: Holding) -> Utility {
        let showdown = |stake: Utility| match holding {
            Holding::Nuts => stake,
            Holding::Air => -stake,
        };
        match (self.bet, self.reply) {
            (Some(Move::Check), _) => showdown(Self::ANTE),
            (Some(_), Some(Move::Fold)) => Self::ANTE,
            (Some(bet), Some(Move::Call)) => showdown(Self::ANTE + Self::size(bet)),
            _ => 0.0,
        }
    }
}

impl CfrGame for ShoveFold {
    type E = Move;
    type W = Holding;

    fn players(&self) -> usize {
        2
    }
    fn turn(&self) -> Turn {
        match (self.holding, self.bet, self.reply) {
            (None, _, _) => Turn::Chance,
            (Some(_), None, _) => Turn::Choice(0),
            (Some(_), Some(Move::Check), _) => Turn::Terminal,
            (Some(_), Some(_), None) => Turn::Choice(1),
            (Some(_), Some(_), Some(_)) => Turn::Terminal,
        }
    }
    fn menu(&self) -> Menu<Move> {
        match self.turn() {
            Turn::Choice(0) => [Move::Check, Move::Half, Move::Shove].into_iter().collect(),
            Turn::Choice(_) => [Move::Fold, Move::Call].into_iter().collect(),
            _ => Menu::new(),
        }
    }
    fn apply(&self, edge: Move) -> Self {
        match self.bet {
            None => Self {
                bet: Some(edge),
                ..*self
            },
            Some(_) => Self {
                reply: Some(edge),
                ..*self
            },
        }
    }
    fn reveal(&self, world: &Holding) -> Self {
        Self {
            holding: Some(*world),
            ..*self
        }
    }
    fn payoff(&self, world: &Holding, player: usize) -> Utility {
        match player {
            0 => self.bettor(*world),
            _ => -self.bettor(*world),
        }
    }
    fn unit(&self) -> Utility {
        Self::ANTE * 2.0
    }
}

/// The bettor sees their holding; the caller sees only the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShoveInfo {
    holding: Option<Holding>,
    history: History,
}

impl CfrInfo for ShoveInfo {}

/// Deals nuts and air with equal weight.
#[derive(Debug, Clone)]
pub struct Dealer(Vec<Holding>);

impl Default for Dealer {
    fn default() -> Self {
        Self(vec![Holding::Nuts, Holding::Air])
    }
}

impl Encoder for Dealer {
    type G = ShoveFold;
    type I = ShoveInfo;

    fn worlds(&self) -> &[Holding] {
        &self.0
    }
    fn info(&self, game: &ShoveFold, world: &Holding, history: &History) -> ShoveInfo {
        ShoveInfo {
            holding: (game.turn() == Turn::Choice(0)).then_some(*world),
            history: *history,
        }
    }
}
