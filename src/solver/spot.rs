use crate::Chips;
use crate::Utility;
use crate::abstraction::World;
use crate::cards::Street;
use crate::cfr::CfrGame;
use crate::cfr::Menu;
use crate::cfr::Turn;
use crate::gameplay::Edge;
use crate::gameplay::Game;

/// A [`Game`] bounded by a street horizon, as seen by the trainer.
///
/// Inside the horizon chance deals the next street from the world's
/// runout. The first chance node past the horizon is a frontier and is
/// treated as terminal: the hand is checked down to showdown on the
/// world's runout and paid out from there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spot {
    game: Game,
    limit: Street,
    scale: Chips,
}

impl Spot {
    /// `horizon` counts streets, the snapshot street included.
    pub fn new(game: Game, horizon: usize) -> Self {
        let limit = (1..horizon.max(1))
            .try_fold(game.street(), |street, _| street.next())
            .unwrap_or(Street::Rive);
        let scale = game.pot().max(game.bblind()).max(1);
        Self { game, limit, scale }
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
    /// Last street dealt inside the subgame.
    pub fn limit(&self) -> Street {
        self.limit
    }
    /// A chance node on the last street of the subgame.
    pub fn is_frontier(&self) -> bool {
        self.game.turn() == Turn::Chance && self.game.street() >= self.limit
    }
}

impl CfrGame for Spot {
    type E = Edge;
    type W = World;

    fn players(&self) -> usize {
        self.game.n()
    }
    fn turn(&self) -> Turn {
        match self.is_frontier() {
            true => Turn::Terminal,
            false => self.game.turn(),
        }
    }
    fn menu(&self) -> Menu<Edge> {
        self.game.menu()
    }
    fn apply(&self, edge: Edge) -> Self {
        Self {
            game: self.game.apply(edge),
            ..self.clone()
        }
    }
    fn reveal(&self, world: &World) -> Self {
        let next = self.game.street().next().unwrap_or(Street::Rive);
        Self {
            game: self.game.reveal(world.board(next)),
            ..self.clone()
        }
    }
    fn payoff(&self, world: &World, player: usize) -> Utility {
        self.game
            .settle(world.strengths())
            .get(player)
            .copied()
            .unwrap_or_default()
    }
    fn unit(&self) -> Utility {
        self.scale as Utility
    }
}
