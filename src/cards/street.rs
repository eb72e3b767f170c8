#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Street {
    #[default]
    Pref = 0isize,
    Flop = 1isize,
    Turn = 2isize,
    Rive = 3isize,
}

impl Street {
    pub const fn all() -> &'static [Self] {
        &[Self::Pref, Self::Flop, Self::Turn, Self::Rive]
    }
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Pref => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::Rive),
            Self::Rive => None,
        }
    }
    /// cards on the board once this street is dealt
    pub const fn n_observed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
        }
    }
    /// cards dealt to reach the next street
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Pref => 3,
            Self::Flop => 1,
            Self::Turn => 1,
            Self::Rive => 0,
        }
    }
    /// streets between self and a later street
    pub fn distance(&self, later: &Self) -> usize {
        (*later as usize).saturating_sub(*self as usize)
    }
}

/// board size to street
impl TryFrom<usize> for Street {
    type Error = String;
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Self::Pref),
            3 => Ok(Self::Flop),
            4 => Ok(Self::Turn),
            5 => Ok(Self::Rive),
            n => Err(format!("no street has {} board cards", n)),
        }
    }
}

impl TryFrom<&str> for Street {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "preflop" | "pref" => Ok(Self::Pref),
            "flop" => Ok(Self::Flop),
            "turn" => Ok(Self::Turn),
            "river" | "rive" => Ok(Self::Rive),
            _ => Err(format!("unknown street: {}", s)),
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
        }
    }
}

impl crate::Arbitrary for Street {
    fn random() -> Self {
        use rand::Rng;
        Self::all()[rand::rng().random_range(0..4)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trip() {
        for street in Street::all() {
            assert_eq!(Street::try_from(street.to_string().as_str()), Ok(*street));
        }
    }

    #[test]
    fn river_is_last() {
        assert_eq!(Street::Rive.next(), None);
        assert_eq!(Street::Pref.distance(&Street::Turn), 2);
        assert_eq!(Street::Turn.distance(&Street::Flop), 0);
    }
}
