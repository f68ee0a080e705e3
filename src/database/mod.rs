mod table;

pub use table::*;

use crate::game::Probabilities;
use crate::game::State;
use anyhow::Result;

/// Read access to solved win probabilities.
pub trait Lookup {
    /// The stored vector, or all zeros if the state has none yet.
    fn get(&self, state: &State) -> Probabilities;
}

/// Storage for the solver's output, shared across worker threads.
///
/// A reader holds a consistent view for as many lookups as one state
/// evaluation needs; a commit stores a whole batch so that no reader
/// observes it half-applied.
pub trait Database: Sync {
    type Reader<'a>: Lookup
    where
        Self: 'a;
    fn reader(&self) -> Self::Reader<'_>;
    fn commit(&self, batch: &[(State, Probabilities)]) -> Result<()>;
}
