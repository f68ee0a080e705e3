use crate::RollId;
use crate::database::Lookup;
use crate::dice::Catalog;
use crate::game::Action;
use crate::game::Probabilities;
use crate::game::Rules;
use crate::game::State;

/// Expectimax move choice against a table of solved states.
///
/// Used by the solver to value each state and by play clients to pick
/// and grade moves.
pub struct Selector<'a, L: Lookup> {
    rules: &'a Rules,
    lookup: &'a L,
}

impl<'a, L: Lookup> Selector<'a, L> {
    pub fn new(rules: &'a Rules, lookup: &'a L) -> Self {
        Self { rules, lookup }
    }

    /// Win probabilities after taking `action` into `next`, seen from the
    /// player who acted. Terminal successors are valued directly.
    pub fn outcome(&self, action: &Action, next: &State) -> Probabilities {
        let p = match self.rules.is_over(next) {
            true => Probabilities::terminal(next),
            false => self.lookup.get(next),
        };
        match action.continues() {
            true => p,
            false => p.unrotate(self.rules.players()),
        }
    }

    /// The best allowed action for the roll and its win probabilities.
    /// Ties go to the earliest action in catalog order.
    pub fn choose(&self, state: &State, roll: RollId) -> (Action, Probabilities) {
        self.rules
            .choices(state, roll)
            .into_iter()
            .map(|(action, next)| (action, self.outcome(&action, &next)))
            .fold(None, |best: Option<(Action, Probabilities)>, (action, p)| match best {
                Some(b) if p.mover() <= b.1.mover() => Some(b),
                _ => Some((action, p)),
            })
            .expect("every roll allows at least one action")
    }

    /// The value of an action the player might take instead of the best one.
    /// None if the action is not allowed here.
    pub fn grade(&self, state: &State, action: &Action) -> Option<Probabilities> {
        self.rules
            .transition(state, action)
            .map(|(action, next)| self.outcome(&action, &next))
    }

    /// Expected win probabilities of a state before its roll.
    pub fn evaluate(&self, state: &State) -> Probabilities {
        if self.rules.is_over(state) {
            return Probabilities::terminal(state);
        }
        let mut total = Probabilities::zero();
        for outcome in Catalog::get().outcomes(state.dice()) {
            total += self.choose(state, outcome.roll).1 * outcome.probability;
        }
        total
    }
}
