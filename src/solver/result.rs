use super::fingerprint::Fingerprint;
use crate::Probability;
use crate::Utility;
use crate::abstraction::Bucket;
use crate::abstraction::Info;
use crate::cfr::Menu;
use crate::cfr::StrategyProfile;
use crate::gameplay::Edge;
use std::sync::Arc;

/// What the engine advises at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    Act(Edge),
    /// The hand is already decided, or it is not a player's turn.
    NoneNeeded,
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Converged,
    BudgetExhausted,
    Terminal,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Act(edge) => write!(f, "{}", edge),
            Self::NoneNeeded => write!(f, "none"),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::BudgetExhausted => write!(f, "budget_exhausted"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

/// The output of one solve, as cached and shared between requests.
///
/// The distribution lists the root menu in menu order and sums to one.
/// Exploitability is in pots; it is absent when the best response was
/// not computed or the public tree was too large to expand.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub recommendation: Recommendation,
    pub distribution: Vec<(Edge, Probability)>,
    pub exploitability: Option<Utility>,
    pub iterations: usize,
    pub converged: bool,
    pub status: Status,
    pub fingerprint: Fingerprint,
    pub bucket: Option<Bucket>,
    pub profile: Arc<StrategyProfile<Info>>,
}

impl SolveResult {
    /// `1 - exploitability`, clamped. Unknown exploitability scores zero
    /// unless the spot needed no solving at all.
    pub fn confidence(&self) -> Probability {
        match (self.status, self.exploitability) {
            (Status::Terminal, _) => 1.0,
            (_, Some(x)) => (1.0 - x).clamp(0.0, 1.0),
            (_, None) => 0.0,
        }
    }

    pub fn probability(&self, edge: &Edge) -> Probability {
        self.distribution
            .iter()
            .find(|(e, _)| e == edge)
            .map(|(_, p)| *p)
            .unwrap_or_default()
    }

    /// The distribution restricted to another state's menu.
    ///
    /// Results are shared across states that fingerprint alike, whose menus
    /// can differ at the margin. Edges off the menu are dropped and the rest
    /// renormalized; with no overlap the menu is played uniformly.
    pub fn projected(&self, menu: &Menu<Edge>) -> Vec<(Edge, Probability)> {
        let kept = menu
            .iter()
            .map(|edge| (edge, self.probability(&edge)))
            .collect::<Vec<_>>();
        let mass = kept.iter().map(|(_, p)| p).sum::<Probability>();
        match mass > 0.0 {
            true => kept.into_iter().map(|(e, p)| (e, p / mass)).collect(),
            false => kept
                .into_iter()
                .map(|(e, _)| (e, 1.0 / menu.len().max(1) as Probability))
                .collect(),
        }
    }

    /// Most likely edge of a projected distribution.
    pub fn argmax(distribution: &[(Edge, Probability)]) -> Recommendation {
        distribution
            .iter()
            .fold(None::<(Edge, Probability)>, |best, &(e, p)| match best {
                Some((_, q)) if q >= p => best,
                _ => Some((e, p)),
            })
            .map(|(edge, _)| Recommendation::Act(edge))
            .unwrap_or(Recommendation::NoneNeeded)
    }
}

impl std::fmt::Display for SolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} [{}", self.recommendation, self.status)?;
        for (edge, p) in self.distribution.iter() {
            write!(f, " {}:{:.3}", edge, p)?;
        }
        write!(f, "] {} its", self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::gameplay::Game;
    use crate::gameplay::Odds;
    use crate::gameplay::Position;
    use crate::gameplay::Seat;
    use crate::gameplay::State;

    fn blinds() -> Game {
        let sb = Seat::new(Position::SB, 99, 1, State::Betting, Pocket::Unknown);
        let bb = Seat::new(Position::BB, 98, 2, State::Betting, Pocket::Unknown);
        Game::new(Street::Pref, 3, Board::empty(), vec![sb, bb], 0, 2).unwrap()
    }

    fn result(distribution: Vec<(Edge, Probability)>) -> SolveResult {
        SolveResult {
            recommendation: SolveResult::argmax(&distribution),
            distribution,
            exploitability: Some(0.25),
            iterations: 10,
            converged: false,
            status: Status::BudgetExhausted,
            fingerprint: Fingerprint::from(&blinds()),
            bucket: None,
            profile: Arc::default(),
        }
    }

    #[test]
    fn argmax_prefers_first_of_ties() {
        let r = result(vec![(Edge::Fold, 0.4), (Edge::Call, 0.4), (Edge::Shove, 0.2)]);
        assert_eq!(r.recommendation, Recommendation::Act(Edge::Fold));
    }

    #[test]
    fn confidence_clamps() {
        let mut r = result(vec![(Edge::Check, 1.0)]);
        assert!((r.confidence() - 0.75).abs() < 1e-6);
        r.exploitability = Some(3.0);
        assert_eq!(r.confidence(), 0.0);
        r.exploitability = None;
        assert_eq!(r.confidence(), 0.0);
    }

    #[test]
    fn projection_drops_and_renormalizes() {
        let half = Edge::Raise(Odds::new(1, 2));
        let r = result(vec![(Edge::Fold, 0.2), (Edge::Call, 0.3), (half, 0.5)]);
        let menu = [Edge::Fold, Edge::Call, Edge::Shove].into_iter().collect::<Menu<Edge>>();
        let projected = r.projected(&menu);
        assert_eq!(projected.len(), 3);
        assert!((projected[0].1 - 0.4).abs() < 1e-6);
        assert!((projected[1].1 - 0.6).abs() < 1e-6);
        assert_eq!(projected[2].1, 0.0);
    }
}
