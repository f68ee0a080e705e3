pub struct Human;

impl Player for Human {
    fn act(&self, state: &State, roll: RollId, choices: &[(Action, State)]) -> Result<Action> {
        if let [(action, _)] = choices {
            if action.is_farkle() {
                return Ok(*action);
            }
        }
        let options = Self::options(choices);
        let labels = options
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<String>>();
        let selection = Select::new()
            .with_prompt(format!(
                "\nYOU ROLLED {} WITH {} ON THE TABLE",
                Catalog::get().roll(roll),
                state.round() as u32 * INCREMENT
            ))
            .report(false)
            .items(labels.as_slice())
            .default(0)
            .interact()?;
        Ok(options[selection])
    }
    fn critiqued(&self) -> bool {
        true
    }
}

impl Human {
    /// distinct actions in menu order. a saturated round turns every
    /// continue into the matching stop, which would otherwise show twice.
    fn options(choices: &[(Action, State)]) -> Vec<Action> {
        choices.iter().fold(Vec::new(), |mut options, (action, _)| {
            if !options.contains(action) {
                options.push(*action);
            }
            options
        })
    }
}

impl Debug for Human {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Human")
    }
}

use super::Player;
use crate::INCREMENT;
use crate::RollId;
use crate::dice::Catalog;
use crate::game::Action;
use crate::game::State;
use anyhow::Result;
use dialoguer::Select;
use std::fmt::Debug;
use std::fmt::Formatter;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Roll;
    use crate::game::Rules;

    fn roll(s: &str) -> RollId {
        Catalog::get().id(&Roll::try_from(s).unwrap())
    }

    #[test]
    fn saturated_round_lists_each_stop_once() {
        let rules = Rules::new(2, 30, 5, 40).unwrap();
        let state = State::new(&[10, 0], 40, 4);
        let choices = rules.choices(&state, roll("1 5 2 3"));
        let options = Human::options(&choices);
        assert!(choices.len() == 6);
        assert!(options.len() == 3);
        assert!(options.iter().all(|action| !action.continues()));
    }

    #[test]
    fn distinct_choices_are_kept_in_order() {
        let rules = Rules::new(2, 30, 5, 40).unwrap();
        let state = State::new(&[10, 0], 4, 4);
        let choices = rules.choices(&state, roll("1 5 2 3"));
        let options = Human::options(&choices);
        assert!(options == choices.iter().map(|(a, _)| *a).collect::<Vec<_>>());
    }
}
