mod record;
mod sorter;
mod stream;

pub use record::*;
pub use sorter::*;
pub use stream::*;
