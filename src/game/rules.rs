use super::Action;
use super::State;
use crate::DEFAULT_CEILING;
use crate::DEFAULT_ENTRY;
use crate::DEFAULT_TARGET;
use crate::INCREMENT;
use crate::MAX_DICE;
use crate::MAX_PLAYERS;
use crate::RollId;
use crate::Score;
use crate::dice::Catalog;
use anyhow::Result;
use anyhow::bail;
use serde::Deserialize;
use serde::Serialize;

/// Table configuration of a Farkle game, in units of `INCREMENT` points.
///
/// - `target`: the first player to bank at least this much ends the game
/// - `entry`: a player with nothing banked may only stop with at least this much
/// - `ceiling`: round and banked scores saturate here instead of overflowing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    players: usize,
    target: Score,
    entry: Score,
    ceiling: Score,
}

impl Rules {
    pub fn new(players: usize, target: Score, entry: Score, ceiling: Score) -> Result<Self> {
        if !(2..=MAX_PLAYERS).contains(&players) {
            bail!("players must be between 2 and {}, got {}", MAX_PLAYERS, players);
        }
        if target == 0 {
            bail!("target must be positive");
        }
        if entry > target {
            bail!("entry {} exceeds target {}", entry, target);
        }
        if target > ceiling {
            bail!("target {} exceeds ceiling {}", target, ceiling);
        }
        Ok(Self {
            players,
            target,
            entry,
            ceiling,
        })
    }
    /// rules from raw point values, which must be multiples of `INCREMENT`
    pub fn from_points(players: usize, target: u32, entry: u32) -> Result<Self> {
        Self::new(
            players,
            Self::units(target)?,
            Self::units(entry)?,
            DEFAULT_CEILING,
        )
    }
    fn units(points: u32) -> Result<Score> {
        if points % INCREMENT != 0 {
            bail!("{} points is not a multiple of {}", points, INCREMENT);
        }
        match Score::try_from(points / INCREMENT) {
            Ok(units) if units < DEFAULT_CEILING => Ok(units),
            _ => bail!("{} points exceeds the representable range", points),
        }
    }

    pub fn players(&self) -> usize {
        self.players
    }
    pub fn target(&self) -> Score {
        self.target
    }
    pub fn entry(&self) -> Score {
        self.entry
    }
    pub fn ceiling(&self) -> Score {
        self.ceiling
    }
    pub fn initial(&self) -> State {
        State::initial(self.players)
    }
    /// someone has banked the target
    pub fn is_over(&self, state: &State) -> bool {
        state.highest() >= self.target
    }
    fn saturate(&self, a: Score, b: Score) -> Score {
        (a as u16 + b as u16).min(self.ceiling as u16) as Score
    }
}

// transitions
impl Rules {
    /// Apply an action to a state.
    ///
    /// Held points join the round score, held dice leave the roll
    /// (all six come back on hot dice), and a stop banks the round and
    /// passes the turn. The Farkle discards the round.
    /// Holding dice that are unavailable or do not all score is a bug.
    pub fn apply(&self, state: &State, action: &Action) -> State {
        let catalog = Catalog::get();
        let held = catalog.roll(action.held());
        assert!(
            held.size() <= state.dice(),
            "held {} dice with {} available",
            held.size(),
            state.dice()
        );
        let next = match action.is_farkle() {
            true => state.with_round(0),
            false => {
                let score = catalog
                    .held(action.held())
                    .unwrap_or_else(|| panic!("held dice {} do not score", held));
                let dice = match state.dice() - held.size() {
                    0 => MAX_DICE,
                    n => n,
                };
                state
                    .with_round(self.saturate(state.round(), score))
                    .with_dice(dice)
            }
        };
        match action.continues() {
            true => next,
            false => next
                .with_mover(self.saturate(next.mover(), next.round()))
                .rotated(),
        }
    }

    /// The effective action and successor, or None if the action is not
    /// allowed here.
    ///
    /// At a saturated round score rolling on is treated as stopping.
    /// A player with nothing banked may not stop below the entry score.
    pub fn transition(&self, state: &State, action: &Action) -> Option<(Action, State)> {
        let action = match state.round() == self.ceiling && action.continues() {
            true => action.stop(),
            false => *action,
        };
        let next = self.apply(state, &action);
        let blocked = state.mover() == 0
            && !action.continues()
            && !action.is_farkle()
            && next.banked()[self.players - 1] < self.entry;
        match blocked {
            true => None,
            false => Some((action, next)),
        }
    }

    /// Every allowed (action, successor) after rolling `roll`,
    /// in catalog order. A roll with nothing to hold yields the Farkle alone.
    pub fn choices(&self, state: &State, roll: RollId) -> Vec<(Action, State)> {
        let choices = Catalog::get()
            .actions(roll)
            .iter()
            .filter_map(|action| self.transition(state, action))
            .collect::<Vec<_>>();
        match choices.is_empty() {
            true => vec![(Action::farkle(), self.apply(state, &Action::farkle()))],
            false => choices,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            players: 2,
            target: DEFAULT_TARGET,
            entry: DEFAULT_ENTRY,
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl std::fmt::Display for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} players, target {}, entry {}, ceiling {}",
            self.players,
            self.target as u32 * INCREMENT,
            self.entry as u32 * INCREMENT,
            self.ceiling as u32 * INCREMENT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Roll;

    fn held(s: &str) -> RollId {
        Catalog::get().id(&Roll::try_from(s).unwrap())
    }

    #[test]
    fn validation() {
        assert!(Rules::new(1, 10, 5, 20).is_err());
        assert!(Rules::new(5, 10, 5, 20).is_err());
        assert!(Rules::new(2, 10, 11, 20).is_err());
        assert!(Rules::new(2, 30, 5, 20).is_err());
        assert!(Rules::new(2, 0, 0, 20).is_err());
        assert!(Rules::new(4, 10, 10, 10).is_ok());
    }

    #[test]
    fn from_points() {
        let rules = Rules::from_points(3, 10000, 500).unwrap();
        assert!(rules.target() == 200);
        assert!(rules.entry() == 10);
        assert!(Rules::from_points(2, 10025, 500).is_err());
        assert!(Rules::from_points(2, 20000, 500).is_err());
        assert!(Rules::default() == Rules::from_points(2, 10000, 500).unwrap());
    }

    #[test]
    fn continue_accumulates_round() {
        let rules = Rules::default();
        let state = State::new(&[0, 0], 4, 6);
        let next = rules.apply(&state, &Action::new(held("1 5"), true));
        assert!(next == State::new(&[0, 0], 7, 4));
    }

    #[test]
    fn hot_dice_resets_to_six() {
        let rules = Rules::default();
        let state = State::new(&[0, 0], 4, 2);
        let next = rules.apply(&state, &Action::new(held("1 5"), true));
        assert!(next.dice() == 6);
        assert!(next.round() == 7);
    }

    #[test]
    fn stop_banks_and_rotates() {
        let rules = Rules::new(3, 200, 10, 255).unwrap();
        let state = State::new(&[10, 20, 30], 5, 3);
        let next = rules.apply(&state, &Action::new(held("5"), false));
        assert!(next == State::new(&[20, 30, 16], 0, 6));
    }

    #[test]
    fn farkle_discards_round() {
        let rules = Rules::default();
        let state = State::new(&[10, 20], 15, 2);
        let next = rules.apply(&state, &Action::farkle());
        assert!(next == State::new(&[20, 10], 0, 6));
    }

    #[test]
    fn scores_saturate_at_ceiling() {
        let rules = Rules::new(2, 30, 5, 40).unwrap();
        let state = State::new(&[25, 0], 35, 3);
        let next = rules.apply(&state, &Action::new(held("1 1 1"), false));
        assert!(next == State::new(&[0, 40], 0, 6));
    }

    #[test]
    #[should_panic]
    fn holding_too_many_dice_panics() {
        let rules = Rules::default();
        rules.apply(&State::new(&[0, 0], 4, 1), &Action::new(held("1 5"), true));
    }

    #[test]
    #[should_panic]
    fn holding_non_scoring_dice_panics() {
        let rules = Rules::default();
        rules.apply(&State::initial(2), &Action::new(held("1 2"), true));
    }

    #[test]
    fn saturated_round_must_stop() {
        let rules = Rules::new(2, 30, 5, 40).unwrap();
        let state = State::new(&[10, 0], 40, 4);
        let (action, next) = rules
            .transition(&state, &Action::new(held("5"), true))
            .unwrap();
        assert!(!action.continues());
        assert!(next == State::new(&[0, 40], 0, 6));
    }

    #[test]
    fn entry_rule_blocks_small_first_bank() {
        let rules = Rules::default();
        let state = State::new(&[0, 0], 3, 5);
        let stop = Action::new(held("5"), false);
        assert!(rules.transition(&state, &stop).is_none());
        assert!(rules.transition(&state, &Action::new(held("5"), true)).is_some());
        let state = State::new(&[0, 0], 9, 5);
        assert!(rules.transition(&state, &stop).is_some());
        let state = State::new(&[12, 0], 0, 5);
        assert!(rules.transition(&state, &stop).is_some());
    }

    #[test]
    fn forced_farkle_from_initial_state() {
        let rules = Rules::default();
        let roll = held("2 2 3 3 4 6");
        let choices = rules.choices(&rules.initial(), roll);
        assert!(choices.len() == 1);
        assert!(choices[0].0 == Action::farkle());
        assert!(choices[0].1 == rules.initial());
    }

    #[test]
    fn game_over_at_target() {
        let rules = Rules::new(2, 10, 5, 20).unwrap();
        assert!(!rules.is_over(&State::new(&[9, 9], 0, 6)));
        assert!(rules.is_over(&State::new(&[0, 10], 0, 6)));
    }
}
