use crate::B_BLIND;
use crate::Chips;
use crate::Error;
use crate::MAX_ITERATIONS;
use crate::MAX_WALLCLOCK_MS;
use crate::cards::Board;
use crate::cards::Pocket;
use crate::cards::Street;
use crate::cfr::Budget;
use crate::gameplay::Game;
use crate::gameplay::Position;
use crate::gameplay::Seat;
use crate::gameplay::State;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Players may be identified by number or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Number(i64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(default)]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub position: String,
    pub stack: Chips,
    /// chips put in on the current street
    #[serde(default)]
    pub invested: Chips,
    #[serde(default, alias = "hole_cards")]
    pub hole_cards: String,
    #[serde(default)]
    pub folded: bool,
    #[serde(default, alias = "all_in")]
    pub all_in: bool,
}

/// One action taken on the current street, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: Option<Chips>,
    #[serde(default)]
    pub player: Option<usize>,
}

impl ActionRequest {
    fn is_aggro(&self) -> crate::Result<bool> {
        match self.kind.trim().to_lowercase().as_str() {
            "bet" | "raise" | "allin" | "all-in" | "all_in" | "shove" => Ok(true),
            "fold" | "check" | "call" | "post" | "blind" => Ok(false),
            other => Err(Error::malformed(format!("unknown action type {:?}", other))),
        }
    }
}

/// A snapshot of a hand in progress, as posted by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub street: String,
    pub pot: Chips,
    #[serde(default, alias = "community_cards")]
    pub community_cards: String,
    pub players: Vec<PlayerRequest>,
    #[serde(alias = "current_player")]
    pub current_player: usize,
    #[serde(default)]
    pub history: Vec<ActionRequest>,
    #[serde(default, alias = "big_blind")]
    pub big_blind: Option<Chips>,
}

impl GameRequest {
    /// Which seats have already acted since the last bet or raise.
    ///
    /// With a history, that is everyone who acted at or after the last
    /// aggressive action. Without one it is inferred from stakes: a seat
    /// other than the actor that has matched the high stake has acted if
    /// it sits before the actor, or if the actor is facing a bet.
    fn acted(&self) -> crate::Result<Vec<bool>> {
        let n = self.players.len();
        let mut acted = vec![false; n];
        if self.history.is_empty() {
            let high = self.players.iter().map(|p| p.invested).max().unwrap_or_default();
            let mine = self
                .players
                .get(self.current_player)
                .map(|p| p.invested)
                .unwrap_or_default();
            for (i, player) in self.players.iter().enumerate() {
                acted[i] = i != self.current_player
                    && player.invested == high
                    && (i < self.current_player || high > mine);
            }
            return Ok(acted);
        }
        let mut last = 0;
        for (i, action) in self.history.iter().enumerate() {
            if action.is_aggro()? {
                last = i;
            }
        }
        for action in self.history.iter().skip(last) {
            match action.player {
                Some(p) if p < n => acted[p] = true,
                Some(p) => return Err(Error::malformed(format!("action by seat {} of {}", p, n))),
                None => {}
            }
        }
        if let Some(flag) = acted.get_mut(self.current_player) {
            *flag = false;
        }
        Ok(acted)
    }

    fn raises(&self) -> crate::Result<usize> {
        let mut raises = 0;
        for action in self.history.iter() {
            if action.is_aggro()? {
                raises += 1;
            }
        }
        Ok(raises)
    }
}

impl TryFrom<&PlayerRequest> for Seat {
    type Error = Error;
    fn try_from(player: &PlayerRequest) -> Result<Self, Self::Error> {
        let state = match (player.folded, player.all_in) {
            (true, _) => State::Folding,
            (false, true) => State::Shoving,
            (false, false) => State::Betting,
        };
        Ok(Seat::new(
            Position::try_from(player.position.as_str())?,
            player.stack,
            player.invested,
            state,
            Pocket::try_from(player.hole_cards.as_str())?,
        ))
    }
}

impl TryFrom<&GameRequest> for Game {
    type Error = Error;
    fn try_from(request: &GameRequest) -> Result<Self, Self::Error> {
        let street = Street::try_from(request.street.as_str()).map_err(Error::MalformedHand)?;
        let board = Board::try_from(request.community_cards.as_str())?;
        let acted = request.acted()?;
        let seats = request
            .players
            .iter()
            .zip(acted)
            .map(|(player, acted)| Seat::try_from(player).map(|seat| seat.acting(acted)))
            .collect::<Result<Vec<Seat>, Error>>()?;
        let game = Game::new(
            street,
            request.pot,
            board,
            seats,
            request.current_player,
            request.big_blind.unwrap_or(B_BLIND),
        )?;
        Ok(game.raised(request.raises()?))
    }
}

/// Budget overrides accepted as query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetQuery {
    #[serde(default)]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub millis: Option<u64>,
}

impl From<BudgetQuery> for Budget {
    fn from(query: BudgetQuery) -> Self {
        Budget::new(
            query.iterations.unwrap_or(MAX_ITERATIONS),
            Duration::from_millis(query.millis.unwrap_or(MAX_WALLCLOCK_MS)),
        )
    }
}

/// Many snapshots solved in the background under one budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub scenarios: Vec<GameRequest>,
    #[serde(default)]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub millis: Option<u64>,
}

impl BatchRequest {
    pub fn budget(&self) -> Budget {
        Budget::from(BudgetQuery {
            iterations: self.iterations,
            millis: self.millis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::Turn;

    const CAMEL: &str = r#"{
        "street": "flop",
        "pot": 20,
        "communityCards": "2c7d9h",
        "players": [
            {
                "id": 1, "position": "BB", "stack": 190, "invested": 0,
                "holeCards": "AsAh", "folded": false, "allIn": false
            },
            {
                "id": "villain", "position": "BTN", "stack": 180, "invested": 10,
                "holeCards": "", "folded": false, "allIn": false
            }
        ],
        "currentPlayer": 0,
        "history": [{"type": "check", "player": 0}, {"type": "bet", "amount": 10, "player": 1}]
    }"#;

    #[test]
    fn camel_case_parses() {
        let request = serde_json::from_str::<GameRequest>(CAMEL).unwrap();
        assert_eq!(request.players[0].id, Some(PlayerId::Number(1)));
        assert_eq!(request.players[1].id, Some(PlayerId::Name("villain".to_string())));
        let game = Game::try_from(&request).unwrap();
        assert_eq!(game.street(), Street::Flop);
        assert_eq!(game.to_call(), 10);
        assert_eq!(game.raises(), 1);
        assert_eq!(game.turn(), Turn::Choice(0));
        assert!(game.seats()[1].acted());
        assert!(!game.seats()[0].acted());
    }

    #[test]
    fn snake_case_aliases_parse() {
        let json = r#"{
            "street": "river",
            "pot": 40,
            "community_cards": "2c7d9hJsQd",
            "players": [
                {"position": "SB", "stack": 80, "invested": 0, "hole_cards": "AsAh"},
                {"position": "BB", "stack": 80, "invested": 0, "hole_cards": "XX", "all_in": false}
            ],
            "current_player": 1,
            "big_blind": 4
        }"#;
        let request = serde_json::from_str::<GameRequest>(json).unwrap();
        let game = Game::try_from(&request).unwrap();
        assert_eq!(game.bblind(), 4);
        assert_eq!(game.actor_index(), 1);
        assert!(game.seats()[0].acted());
    }

    #[test]
    fn stakes_imply_acted_without_history() {
        let mut request = serde_json::from_str::<GameRequest>(CAMEL).unwrap();
        request.history.clear();
        let game = Game::try_from(&request).unwrap();
        assert_eq!(game.raises(), 0);
        assert!(game.seats()[1].acted());
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let mut request = serde_json::from_str::<GameRequest>(CAMEL).unwrap();
        request.street = "preflop".to_string();
        request.community_cards = "2c7d9hTs".to_string();
        assert!(Game::try_from(&request).unwrap_err().is_malformed());
        let mut request = serde_json::from_str::<GameRequest>(CAMEL).unwrap();
        request.players[1].hole_cards = "As2d".to_string();
        assert!(Game::try_from(&request).unwrap_err().is_malformed());
        let mut request = serde_json::from_str::<GameRequest>(CAMEL).unwrap();
        request.history[0].kind = "teleport".to_string();
        assert!(Game::try_from(&request).unwrap_err().is_malformed());
        let mut request = serde_json::from_str::<GameRequest>(CAMEL).unwrap();
        request.street = "fourth".to_string();
        assert!(Game::try_from(&request).unwrap_err().is_malformed());
    }

    #[test]
    fn budget_defaults_and_overrides() {
        let budget = Budget::from(BudgetQuery::default());
        assert_eq!(budget.max_iterations(), MAX_ITERATIONS);
        let budget = Budget::from(BudgetQuery {
            iterations: Some(10),
            millis: Some(5),
        });
        assert_eq!(budget.max_iterations(), 10);
        assert_eq!(budget.max_wallclock(), Duration::from_millis(5));
    }
}
