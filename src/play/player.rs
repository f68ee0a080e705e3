/// Anyone who can pick a move after a roll.
///
/// `choices` are the allowed (action, successor) pairs for the roll,
/// never empty, in catalog order.
pub trait Player: Debug {
    fn act(&self, state: &State, roll: RollId, choices: &[(Action, State)]) -> Result<Action>;
    /// whether the session should grade this player's moves
    fn critiqued(&self) -> bool {
        false
    }
}

use crate::RollId;
use crate::game::Action;
use crate::game::State;
use anyhow::Result;
use std::fmt::Debug;
