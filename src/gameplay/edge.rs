use super::odds::Odds;
use crate::Chips;
use crate::cfr::CfrEdge;

/// An abstracted betting decision.
///
/// Raises carry a pot fraction rather than chips, so the same edge names
/// comparable decisions across stack depths. Chip amounts are resolved
/// against a concrete state by [`Game::amount`](super::Game::amount).
#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, PartialEq, Eq)]
pub enum Edge {
    Fold,
    Check,
    Call,
    Raise(Odds),
    Shove,
}

impl CfrEdge for Edge {}

impl Edge {
    pub fn is_shove(&self) -> bool {
        matches!(self, Edge::Shove)
    }
    pub fn is_raise(&self) -> bool {
        matches!(self, Edge::Raise(_))
    }
    pub fn is_folded(&self) -> bool {
        matches!(self, Edge::Fold)
    }
    /// True if this puts in more than a call.
    pub fn is_aggro(&self) -> bool {
        self.is_raise() || self.is_shove()
    }
    pub fn is_passive(&self) -> bool {
        matches!(self, Edge::Check | Edge::Call)
    }
}

impl From<Odds> for Edge {
    fn from(odds: Odds) -> Self {
        Edge::Raise(odds)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Edge::Fold => write!(f, "fold"),
            Edge::Check => write!(f, "check"),
            Edge::Call => write!(f, "call"),
            Edge::Raise(odds) => write!(f, "raise:{}", odds),
            Edge::Shove => write!(f, "allin"),
        }
    }
}

impl TryFrom<&str> for Edge {
    type Error = crate::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "fold" => Ok(Edge::Fold),
            "check" => Ok(Edge::Check),
            "call" => Ok(Edge::Call),
            "allin" | "all-in" | "all_in" | "shove" => Ok(Edge::Shove),
            _ => s
                .strip_prefix("raise:")
                .and_then(|x| x.split_once('/'))
                .and_then(|(n, d)| Some((n.parse::<Chips>().ok()?, d.parse::<Chips>().ok()?)))
                .filter(|&(_, d)| d > 0)
                .map(|(n, d)| Edge::Raise(Odds::from((n, d))))
                .ok_or_else(|| crate::Error::malformed(format!("unknown action {:?}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips() {
        for edge in [
            Edge::Fold,
            Edge::Check,
            Edge::Call,
            Edge::Raise(Odds::new(3, 4)),
            Edge::Shove,
        ] {
            assert_eq!(Edge::try_from(edge.to_string().as_str()).unwrap(), edge);
        }
    }

    #[test]
    fn classification() {
        assert!(Edge::Raise(Odds::new(1, 2)).is_aggro());
        assert!(Edge::Shove.is_aggro());
        assert!(Edge::Call.is_passive());
        assert!(!Edge::Fold.is_passive());
        assert!(Edge::try_from("raise:1/0").is_err());
    }
}
