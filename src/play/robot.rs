use super::Player;
use crate::RollId;
use crate::database::Table;
use crate::game::Action;
use crate::game::State;
use crate::solver::Selector;
use anyhow::Result;

/// Plays the optimal move according to a solved table.
pub struct Robot<'a> {
    table: &'a Table,
}

impl<'a> Robot<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }
}

impl Player for Robot<'_> {
    fn act(&self, state: &State, roll: RollId, _: &[(Action, State)]) -> Result<Action> {
        let rules = self.table.rules();
        Ok(Selector::new(rules, self.table).choose(state, roll).0)
    }
}

impl std::fmt::Debug for Robot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Robot")
    }
}
