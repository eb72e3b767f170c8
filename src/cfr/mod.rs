//! Game-agnostic CFR abstractions and machinery.
//!
//! Everything here is independent of poker. A game supplies its state
//! transitions through [`CfrGame`] and its information abstraction through
//! [`Encoder`]; the [`Trainer`] runs external-sampling MCCFR over them.
//!
//! # Module Structure
//!
//! - `turn`, `edge`, `info`, `game`, `encoder`: traits a game implements
//! - `menu`: fixed-capacity action lists
//! - `history`: public action path digests
//! - `regret`, `policy`: accumulation schedules
//! - `profile`: regret and strategy tables, frozen average strategies
//! - `tree`: index-addressed traversal arena
//! - `budget`, `trainer`: the iteration loop and its phases
//! - `response`: best response and exploitability
//! - `shove`: a toy game with a closed-form equilibrium

mod budget;
mod edge;
mod encoder;
mod game;
mod history;
mod info;
mod menu;
mod policy;
mod profile;
mod regret;
mod response;
mod shove;
mod trainer;
mod tree;
mod turn;

pub use budget::*;
pub use edge::*;
pub use encoder::*;
pub use game::*;
pub use history::*;
pub use info::*;
pub use menu::*;
pub use policy::*;
pub use profile::*;
pub use regret::*;
pub use response::*;
pub use shove::*;
pub use trainer::*;
pub use tree::*;
pub use turn::*;
