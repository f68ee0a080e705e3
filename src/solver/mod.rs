mod pipeline;
mod pool;
mod progress;
mod selector;
mod solver;
mod worker;

pub use pipeline::*;
pub use pool::*;
pub use progress::*;
pub use selector::*;
pub use solver::*;
pub use worker::*;
