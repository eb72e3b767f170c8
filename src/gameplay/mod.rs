//! No-Limit Hold'em betting: seats, action menus, transitions, side pots.
pub mod edge;
pub use edge::*;

pub mod game;
pub use game::*;

pub mod menu;

pub mod odds;
pub use odds::*;

pub mod position;
pub use position::*;

pub mod seat;
pub use seat::*;

pub mod showdown;
pub use showdown::*;
