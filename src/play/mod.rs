//! Console play against a solved table.
mod human;
mod player;
mod robot;
mod session;

pub use human::*;
pub use player::*;
pub use robot::*;
pub use session::*;
