use crate::Chips;
use crate::Equity;
use crate::Probability;
use crate::Utility;
use crate::abstraction::Bucket;
use crate::cards::Observation;
use crate::gameplay::Edge;
use crate::gameplay::Game;
use crate::solver::Recommendation;
use crate::solver::SolveResult;
use crate::solver::Status;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Advice for one snapshot: the strategy projected onto its own menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResponse {
    pub strategy: BTreeMap<String, Probability>,
    pub recommended_action: String,
    pub exploitability: Option<Utility>,
    pub converged: bool,
    pub iterations: usize,
    pub confidence: Probability,
    pub status: String,
    pub info_set: String,
    pub bucket: Option<String>,
}

/// The distribution a cached result implies for this particular game.
fn advise(game: &Game, result: &SolveResult) -> (Recommendation, Vec<(Edge, Probability)>) {
    match result.status {
        Status::Terminal => (result.recommendation, result.distribution.clone()),
        _ => {
            let distribution = result.projected(&game.menu());
            (SolveResult::argmax(&distribution), distribution)
        }
    }
}

impl From<(&Game, &SolveResult)> for StrategyResponse {
    fn from((game, result): (&Game, &SolveResult)) -> Self {
        let (recommendation, distribution) = advise(game, result);
        Self {
            strategy: distribution
                .iter()
                .map(|(edge, p)| (edge.to_string(), *p))
                .collect(),
            recommended_action: recommendation.to_string(),
            exploitability: result.exploitability,
            converged: result.converged,
            iterations: result.iterations,
            confidence: result.confidence(),
            status: result.status.to_string(),
            info_set: result.fingerprint.to_string(),
            bucket: result.bucket.map(|b| b.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub action: String,
    pub probability: Probability,
    /// probability gap to the recommended action, scaled by the pot
    pub ev_difference: Utility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub action: String,
    pub amount: Option<Chips>,
    pub probability: Probability,
    pub alternatives: Vec<Alternative>,
    pub reasoning: String,
    pub exploitability: Option<Utility>,
    pub confidence: Probability,
}

/// A decision with the numbers a player would weigh it against.
///
/// Hand strength and equity need the actor's cards and are null when
/// they are hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub decision: Decision,
    pub hand_strength: Option<Probability>,
    pub position: String,
    pub pot_odds: Probability,
    pub equity: Option<Equity>,
    pub expected_value: Option<Utility>,
}

impl From<(&Game, &SolveResult)> for AnalysisResponse {
    fn from((game, result): (&Game, &SolveResult)) -> Self {
        let (recommendation, mut distribution) = advise(game, result);
        distribution.sort_by(|a, b| b.1.total_cmp(&a.1));
        let pot = game.pot() as Utility;
        let (action, amount, best) = match recommendation {
            Recommendation::Act(edge) => (
                Some(edge),
                Some(game.amount(edge)).filter(|&chips| chips > 0),
                result_probability(&distribution, &edge),
            ),
            Recommendation::NoneNeeded => (None, None, 1.0),
        };
        let alternatives = distribution
            .iter()
            .filter(|(edge, _)| Some(*edge) != action)
            .map(|(edge, p)| Alternative {
                action: edge.to_string(),
                probability: *p,
                ev_difference: (best - p) * pot,
            })
            .collect();
        let call = game.to_call().min(game.actor().stack());
        let pot_odds = match call {
            0 => 0.0,
            _ => call as Probability / (game.pot() + call) as Probability,
        };
        let equity = game
            .actor()
            .pocket()
            .hole()
            .map(|hole| Observation::from((hole, game.board())).equity());
        let hand_strength = equity.map(|e| {
            let street = game.street();
            let bucket = Bucket::from((street, e));
            bucket.index() as Probability / (Bucket::count(street) - 1).max(1) as Probability
        });
        Self {
            decision: Decision {
                action: recommendation.to_string(),
                amount,
                probability: best,
                alternatives,
                reasoning: reasoning(action, equity, pot_odds),
                exploitability: result.exploitability,
                confidence: result.confidence(),
            },
            hand_strength,
            position: game.actor().position().to_string(),
            pot_odds,
            equity,
            expected_value: equity.map(|e| e * pot),
        }
    }
}

fn result_probability(distribution: &[(Edge, Probability)], edge: &Edge) -> Probability {
    distribution
        .iter()
        .find(|(e, _)| e == edge)
        .map(|(_, p)| *p)
        .unwrap_or_default()
}

/// One line of plain-language rationale for the recommended action.
fn reasoning(action: Option<Edge>, equity: Option<Equity>, pot_odds: Probability) -> String {
    match (action, equity) {
        (None, _) => "no decision to make: the hand is already settled".to_string(),
        (Some(Edge::Fold), Some(e)) if e < pot_odds => format!(
            "fold: {:.1}% equity falls short of the {:.1}% price",
            100.0 * e,
            100.0 * pot_odds
        ),
        (Some(Edge::Fold), _) => "fold: continuing loses against this range".to_string(),
        (Some(Edge::Check), _) => {
            "check to keep the range balanced and the pot controlled".to_string()
        }
        (Some(Edge::Call), _) => format!("call priced at {:.1}% pot odds", 100.0 * pot_odds),
        (Some(_), Some(e)) if e > 0.7 => format!("bet for value with {:.1}% equity", 100.0 * e),
        (Some(_), _) => "bet as a bluff or semi-bluff to balance the value range".to_string(),
    }
}

/// Acknowledgement of a background batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAccepted {
    pub batch_id: String,
    pub status: String,
    pub total_scenarios: usize,
    pub check_url: String,
}

/// How far a background batch has come.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub failed: usize,
    pub current_exploitability: Option<Utility>,
    /// mean confidence of finished solves
    pub average_convergence_rate: Probability,
    /// seconds, extrapolated from the mean solve time so far
    pub estimated_time_remaining: u64,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&crate::Error> for ErrorResponse {
    fn from(error: &crate::Error) -> Self {
        Self {
            error: error.to_string(),
            kind: match error {
                crate::Error::MalformedHand(_) => "malformed_hand".to_string(),
                crate::Error::InternalSolver(_) => "internal_solver".to_string(),
            },
        }
    }
}
