/// Named position at a poker table.
///
/// Labels are carried through from the request for display and analysis;
/// action order comes from seat order, not from the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    BTN,
    SB,
    BB,
    UTG(usize),
    MP(usize),
    LJ,
    HJ,
    CO,
    #[default]
    Unlabeled,
}

impl TryFrom<&str> for Position {
    type Error = crate::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let label = s.trim().to_uppercase();
        match label.as_str() {
            "" => Ok(Self::Unlabeled),
            "BTN" | "BU" | "D" | "DEALER" | "BUTTON" => Ok(Self::BTN),
            "SB" => Ok(Self::SB),
            "BB" => Ok(Self::BB),
            "UTG" => Ok(Self::UTG(0)),
            "MP" => Ok(Self::MP(0)),
            "LJ" => Ok(Self::LJ),
            "HJ" => Ok(Self::HJ),
            "CO" => Ok(Self::CO),
            _ => {
                let offset = |prefix: &str| {
                    label
                        .strip_prefix(prefix)
                        .map(|n| n.trim_start_matches('+'))
                        .and_then(|n| n.parse::<usize>().ok())
                };
                offset("UTG")
                    .map(Self::UTG)
                    .or_else(|| offset("MP").map(Self::MP))
                    .ok_or_else(|| crate::Error::malformed(format!("unknown position {:?}", s)))
            }
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BTN => write!(f, "BTN"),
            Self::SB => write!(f, "SB"),
            Self::BB => write!(f, "BB"),
            Self::UTG(0) => write!(f, "UTG"),
            Self::UTG(n) => write!(f, "UTG+{}", n),
            Self::MP(0) => write!(f, "MP"),
            Self::MP(n) => write!(f, "MP+{}", n),
            Self::LJ => write!(f, "LJ"),
            Self::HJ => write!(f, "HJ"),
            Self::CO => write!(f, "CO"),
            Self::Unlabeled => write!(f, "--"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse() {
        assert_eq!(Position::try_from("btn").unwrap(), Position::BTN);
        assert_eq!(Position::try_from("UTG+2").unwrap(), Position::UTG(2));
        assert_eq!(Position::try_from("mp1").unwrap(), Position::MP(1));
        assert_eq!(Position::try_from("").unwrap(), Position::Unlabeled);
        assert!(Position::try_from("XYZ").is_err());
    }

    #[test]
    fn display_round_trips() {
        for label in ["BTN", "SB", "BB", "UTG", "UTG+1", "MP+2", "HJ", "CO"] {
            assert_eq!(Position::try_from(label).unwrap().to_string(), label);
        }
    }
}
