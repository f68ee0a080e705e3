mod action;
mod probabilities;
mod rules;
mod space;
mod state;

pub use action::*;
pub use probabilities::*;
pub use rules::*;
pub use space::*;
pub use state::*;
