use super::Rules;
use super::State;
use crate::MAX_DICE;
use crate::Score;
use crate::dice::Catalog;
use std::collections::VecDeque;

/// Canonical dense numbering of every reachable state.
///
/// Non-terminal states combine an in-turn (round, dice) pair with banked
/// scores drawn from {0} ∪ [entry, target). Terminal states always sit at
/// the start of a turn, with the last mover holding a score in
/// [target, ceiling]. Each family is a mixed-radix number:
///
/// ```text
/// live id     = turn · |B|^N + Σ digit(b_i) · |B|^i
/// terminal id = |turns| · |B|^N + (b_{N-1} - target) · |B|^(N-1) + Σ_{i<N-1} digit(b_i) · |B|^i
/// ```
#[derive(Debug, Clone)]
pub struct Space {
    rules: Rules,
    floor: Score,
    radix: usize,
    turns: Vec<(Score, u8)>,
    lookup: Vec<Option<u32>>,
}

impl Space {
    pub fn new(rules: Rules) -> Self {
        let floor = rules.entry().max(1);
        let radix = 1 + rules.target().saturating_sub(floor) as usize;
        let turns = Self::turns(&rules);
        let mut lookup = vec![None; Self::slots(&rules)];
        for (i, &(round, dice)) in turns.iter().enumerate() {
            lookup[round as usize * (MAX_DICE + 1) + dice as usize] = Some(i as u32);
        }
        log::debug!("{} in-turn positions for {}", turns.len(), rules);
        Self {
            rules,
            floor,
            radix,
            turns,
            lookup,
        }
    }

    /// (round, dice) pairs reachable by rolling on from a fresh turn.
    /// a saturated round cannot roll on, so it is never expanded.
    fn turns(rules: &Rules) -> Vec<(Score, u8)> {
        let catalog = Catalog::get();
        let mut seen = vec![false; Self::slots(rules)];
        let mut queue = VecDeque::from([(0 as Score, MAX_DICE as u8)]);
        seen[MAX_DICE] = true;
        let mut turns = Vec::new();
        while let Some((round, dice)) = queue.pop_front() {
            turns.push((round, dice));
            if round == rules.ceiling() {
                continue;
            }
            let probe = State::new(&[0], round, dice);
            for outcome in catalog.outcomes(dice as usize) {
                for action in catalog.actions(outcome.roll).iter().filter(|a| a.continues()) {
                    let next = rules.apply(&probe, action);
                    let slot = next.round() as usize * (MAX_DICE + 1) + next.dice();
                    if !seen[slot] {
                        seen[slot] = true;
                        queue.push_back((next.round(), next.dice() as u8));
                    }
                }
            }
        }
        turns.sort_unstable();
        turns
    }
    fn slots(rules: &Rules) -> usize {
        (rules.ceiling() as usize + 1) * (MAX_DICE + 1)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    /// exact number of reachable states
    pub fn capacity(&self) -> usize {
        self.live() + self.finals() * self.radix.pow(self.rules.players() as u32 - 1)
    }
    fn live(&self) -> usize {
        self.turns.len() * self.radix.pow(self.rules.players() as u32)
    }
    fn finals(&self) -> usize {
        (self.rules.ceiling() - self.rules.target()) as usize + 1
    }

    fn digit(&self, score: Score) -> Option<usize> {
        match score {
            0 => Some(0),
            s if s >= self.floor && s < self.rules.target() => Some((s - self.floor) as usize + 1),
            _ => None,
        }
    }
    fn score(&self, digit: usize) -> Score {
        match digit {
            0 => 0,
            d => self.floor + (d - 1) as Score,
        }
    }
    fn turn(&self, state: &State) -> Option<usize> {
        self.lookup
            .get(state.round() as usize * (MAX_DICE + 1) + state.dice())
            .copied()
            .flatten()
            .map(|i| i as usize)
    }

    /// canonical id, or None if the state is not in the space
    pub fn find(&self, state: &State) -> Option<usize> {
        let n = self.rules.players();
        if state.players() != n {
            return None;
        }
        let banked = state.banked();
        match self.rules.is_over(state) {
            false => {
                let digits = banked
                    .iter()
                    .rev()
                    .try_fold(0, |acc, &b| self.digit(b).map(|d| acc * self.radix + d))?;
                Some(self.turn(state)? * self.radix.pow(n as u32) + digits)
            }
            true => {
                if !state.at_turn_start() || banked[n - 1] < self.rules.target() {
                    return None;
                }
                let digits = banked[..n - 1]
                    .iter()
                    .rev()
                    .try_fold(0, |acc, &b| self.digit(b).map(|d| acc * self.radix + d))?;
                let last = (banked[n - 1] - self.rules.target()) as usize;
                Some(self.live() + last * self.radix.pow(n as u32 - 1) + digits)
            }
        }
    }
    /// canonical id of a reachable state
    pub fn index(&self, state: &State) -> usize {
        self.find(state)
            .unwrap_or_else(|| panic!("state {} outside the state space", state))
    }
    pub fn contains(&self, state: &State) -> bool {
        self.find(state).is_some()
    }
    /// inverse of `index`
    pub fn state(&self, id: usize) -> State {
        assert!(id < self.capacity(), "id {} outside the state space", id);
        let n = self.rules.players();
        let mut banked = vec![0; n];
        match id < self.live() {
            true => {
                let mut rest = id % self.radix.pow(n as u32);
                let (round, dice) = self.turns[id / self.radix.pow(n as u32)];
                for b in banked.iter_mut() {
                    *b = self.score(rest % self.radix);
                    rest /= self.radix;
                }
                State::new(&banked, round, dice)
            }
            false => {
                let id = id - self.live();
                let mut rest = id % self.radix.pow(n as u32 - 1);
                banked[n - 1] = self.rules.target() + (id / self.radix.pow(n as u32 - 1)) as Score;
                for b in banked[..n - 1].iter_mut() {
                    *b = self.score(rest % self.radix);
                    rest /= self.radix;
                }
                State::new(&banked, 0, MAX_DICE as u8)
            }
        }
    }
}
