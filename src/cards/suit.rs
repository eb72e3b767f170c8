#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const fn all() -> [Self; 4] {
        [Self::Club, Self::Diamond, Self::Heart, Self::Spade]
    }
}

impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        Self::all()[n as usize % 4]
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

/// u64 injection
///
/// every card of this suit in a Hand bitset
impl From<Suit> for u64 {
    fn from(s: Suit) -> u64 {
        0x0001111111111111 << u8::from(s)
    }
}

impl TryFrom<&str> for Suit {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "c" | "♣" => Ok(Suit::Club),
            "d" | "♦" => Ok(Suit::Diamond),
            "h" | "♥" => Ok(Suit::Heart),
            "s" | "♠" => Ok(Suit::Spade),
            _ => Err(format!("invalid suit: {}", s)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Club => "c",
                Suit::Diamond => "d",
                Suit::Heart => "h",
                Suit::Spade => "s",
            }
        )
    }
}
