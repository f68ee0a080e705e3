mod catalog;
mod roll;
pub mod score;

pub use catalog::*;
pub use roll::*;
