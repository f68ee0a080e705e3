use super::Roll;
use super::score;
use crate::MAX_DICE;
use crate::Probability;
use crate::RollId;
use crate::Score;
use crate::game::Action;
use std::collections::HashMap;
use std::sync::LazyLock;

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::new);

/// One possible result of rolling some number of dice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub roll: RollId,
    pub probability: Probability,
}

/// Every dice multiset of up to six dice, with its scores and legal holds.
///
/// Roll IDs are dense, ordered by dice count and then by face counts,
/// so ID 0 is the empty roll. Built once per process and shared by reference.
pub struct Catalog {
    rolls: Vec<Roll>,
    index: HashMap<Roll, RollId>,
    exact: Vec<Option<Score>>,
    base: Vec<Score>,
    outcomes: Vec<Vec<Outcome>>,
    actions: Vec<Vec<Action>>,
}

impl Catalog {
    /// the process-wide catalog
    pub fn get() -> &'static Self {
        &CATALOG
    }

    pub fn new() -> Self {
        let rolls = (0..=MAX_DICE).flat_map(Roll::all).collect::<Vec<Roll>>();
        let index = rolls
            .iter()
            .enumerate()
            .map(|(i, r)| (*r, i as RollId))
            .collect::<HashMap<Roll, RollId>>();
        let exact = rolls.iter().map(score::exact).collect::<Vec<_>>();
        let base = rolls
            .iter()
            .map(|roll| {
                roll.subsets()
                    .iter()
                    .filter(|held| !held.is_empty())
                    .filter_map(|held| exact[index[held] as usize])
                    .max()
                    .unwrap_or(0)
            })
            .collect::<Vec<Score>>();
        let outcomes = (0..=MAX_DICE)
            .map(|n| {
                Roll::all(n)
                    .into_iter()
                    .map(|roll| Outcome {
                        roll: index[&roll],
                        probability: roll.probability(),
                    })
                    .collect::<Vec<Outcome>>()
            })
            .collect::<Vec<_>>();
        let actions = rolls
            .iter()
            .map(|roll| {
                let mut held = roll
                    .subsets()
                    .into_iter()
                    .filter(|held| !held.is_empty())
                    .map(|held| index[&held])
                    .filter(|&id| exact[id as usize].is_some())
                    .collect::<Vec<RollId>>();
                held.sort_unstable();
                held.into_iter()
                    .flat_map(|id| [Action::new(id, true), Action::new(id, false)])
                    .collect::<Vec<Action>>()
            })
            .collect::<Vec<_>>();
        log::debug!("built dice catalog with {} rolls", rolls.len());
        Self {
            rolls,
            index,
            exact,
            base,
            outcomes,
            actions,
        }
    }

    pub fn size(&self) -> usize {
        self.rolls.len()
    }
    pub fn roll(&self, id: RollId) -> Roll {
        self.rolls[id as usize]
    }
    pub fn id(&self, roll: &Roll) -> RollId {
        self.index[roll]
    }
    /// score of holding exactly these dice, None if some die cannot score
    pub fn held(&self, id: RollId) -> Option<Score> {
        self.exact[id as usize]
    }
    /// best score available in the roll, zero for a Farkle
    pub fn base(&self, id: RollId) -> Score {
        self.base[id as usize]
    }
    /// every distinct result of rolling `dice` dice
    pub fn outcomes(&self, dice: usize) -> &[Outcome] {
        &self.outcomes[dice]
    }
    /// legal holds of the roll, ascending by held ID, continue before stop.
    /// empty for a Farkle.
    pub fn actions(&self, id: RollId) -> &[Action] {
        &self.actions[id as usize]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
