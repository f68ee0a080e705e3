mod enumerator;
mod mask;

pub use enumerator::*;
pub use mask::*;
