/// Who moves next.
///
/// CFR distinguishes three node types: player decisions, chance nodes,
/// and terminal nodes with payoffs.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Turn {
    /// The player at this seat index decides.
    Choice(usize),
    /// Cards are dealt.
    Chance,
    /// The hand is over.
    Terminal,
}

impl Turn {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }
    pub fn is_chance(&self) -> bool {
        matches!(self, Self::Chance)
    }
    pub fn player(&self) -> Option<usize> {
        match self {
            Self::Choice(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Choice(p) => write!(f, "P{}", p),
            Self::Chance => write!(f, "??"),
            Self::Terminal => write!(f, "--"),
        }
    }
}
