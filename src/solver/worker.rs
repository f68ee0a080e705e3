use super::Selector;
use crate::Probability;
use crate::database::Database;
use crate::database::Lookup;
use crate::game::Probabilities;
use crate::game::Rules;
use crate::game::State;
use anyhow::Result;
use crossbeam_channel::Receiver;

/// What a worker (or a whole generation) got through.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tally {
    /// states solved
    pub states: usize,
    /// largest change of any stored probability
    pub delta: Probability,
}

impl Tally {
    pub fn merge(self, other: Self) -> Self {
        Self {
            states: self.states + other.states,
            delta: self.delta.max(other.delta),
        }
    }
}

/// Drains states from a queue, values each one, and commits the results
/// in batches so the write lock is taken once per batch.
pub struct Worker<'a, D: Database> {
    rules: &'a Rules,
    db: &'a D,
    batch: usize,
}

impl<'a, D: Database> Worker<'a, D> {
    pub fn new(rules: &'a Rules, db: &'a D, batch: usize) -> Self {
        assert!(batch > 0);
        Self { rules, db, batch }
    }

    pub fn run(&self, queue: Receiver<State>) -> Result<Tally> {
        let mut tally = Tally::default();
        let mut pending = Vec::with_capacity(self.batch);
        for state in queue.iter() {
            let (value, delta) = self.solve(&state);
            tally = tally.merge(Tally { states: 1, delta });
            pending.push((state, value));
            if pending.len() >= self.batch {
                self.db.commit(&pending)?;
                pending.clear();
            }
        }
        if !pending.is_empty() {
            self.db.commit(&pending)?;
        }
        Ok(tally)
    }

    /// new value of a state, and how far it moved from the stored one.
    /// the read section ends before anything is committed.
    fn solve(&self, state: &State) -> (Probabilities, Probability) {
        let reader = self.db.reader();
        let value = Selector::new(self.rules, &reader).evaluate(state);
        (value, value.delta(&reader.get(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Table;

    #[test]
    fn commits_every_state() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let table = Table::new(rules);
        let terminal = State::new(&[0, 9], 0, 6);
        let live = rules.initial();
        let (tx, rx) = crossbeam_channel::bounded(4);
        tx.send(terminal).unwrap();
        tx.send(live).unwrap();
        drop(tx);
        let tally = Worker::new(&rules, &table, 1).run(rx).unwrap();
        assert!(tally.states == 2);
        assert!(tally.delta == 1.);
        assert!(table.get(&terminal) == Probabilities::terminal(&terminal));
    }

    /// a table that remembers the size of every committed batch
    struct Recorder {
        table: Table,
        batches: std::sync::Mutex<Vec<usize>>,
    }
    impl Database for Recorder {
        type Reader<'a> = crate::database::Snapshot<'a>;
        fn reader(&self) -> Self::Reader<'_> {
            self.table.reader()
        }
        fn commit(&self, batch: &[(State, Probabilities)]) -> Result<()> {
            self.batches.lock().unwrap().push(batch.len());
            self.table.commit(batch)
        }
    }

    #[test]
    fn partial_batch_is_committed() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let db = Recorder {
            table: Table::new(rules),
            batches: std::sync::Mutex::new(Vec::new()),
        };
        let states = [
            State::new(&[0, 8], 0, 6),
            State::new(&[0, 9], 0, 6),
            State::new(&[0, 10], 0, 6),
            State::new(&[7, 8], 0, 6),
            State::new(&[7, 9], 0, 6),
        ];
        let (tx, rx) = crossbeam_channel::bounded(states.len());
        states.iter().for_each(|s| tx.send(*s).unwrap());
        drop(tx);
        let tally = Worker::new(&rules, &db, 2).run(rx).unwrap();
        assert!(tally.states == 5);
        assert!(*db.batches.lock().unwrap() == vec![2, 2, 1]);
        assert!(
            states
                .iter()
                .all(|s| db.table.get(s) == Probabilities::terminal(s))
        );
    }

    #[test]
    fn merge_keeps_largest_delta() {
        let a = Tally { states: 3, delta: 0.5 };
        let b = Tally { states: 4, delta: 0.25 };
        assert!(a.merge(b) == Tally { states: 7, delta: 0.5 });
    }
}
