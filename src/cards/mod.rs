pub mod board;
pub use board::*;

pub mod card;
pub use card::*;

pub mod deck;
pub use deck::*;

pub mod evaluator;
pub use evaluator::*;

pub mod hand;
pub use hand::*;

pub mod hands;
pub use hands::*;

pub mod hole;
pub use hole::*;

pub mod kicks;
pub use kicks::*;

pub mod observation;
pub use observation::*;

pub mod rank;
pub use rank::*;

pub mod ranking;
pub use ranking::*;

pub mod street;
pub use street::*;

pub mod strength;
pub use strength::*;

pub mod suit;
pub use suit::*;
