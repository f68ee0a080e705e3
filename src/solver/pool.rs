use super::Tally;
use super::Worker;
use crate::database::Database;
use crate::game::Rules;
use crate::game::State;
use anyhow::Result;
use crossbeam_channel::Sender;

/// Fixed-size set of workers, spun up fresh for each depth generation.
///
/// The driver fills a bounded queue and blocks while it is full. Closing
/// the queue and joining every worker is the barrier between generations.
#[derive(Debug, Clone, Copy)]
pub struct Pool {
    workers: usize,
    batch: usize,
    queue: usize,
}

impl Pool {
    pub fn new(workers: usize, batch: usize) -> Self {
        assert!(workers > 0);
        assert!(batch > 0);
        Self {
            workers,
            batch,
            queue: workers * 4,
        }
    }
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one generation: `feed` sends every state of the generation on
    /// the queue, then the queue closes and all workers are joined.
    /// A worker panic is re-raised here.
    pub fn run<D, F>(&self, rules: &Rules, db: &D, feed: F) -> Result<Tally>
    where
        D: Database,
        F: FnOnce(&Sender<State>),
    {
        let (tx, rx) = crossbeam_channel::bounded::<State>(self.queue);
        let batch = self.batch;
        std::thread::scope(|scope| {
            let handles = (0..self.workers)
                .map(|_| rx.clone())
                .map(|rx| scope.spawn(move || Worker::new(rules, db, batch).run(rx)))
                .collect::<Vec<_>>();
            drop(rx);
            feed(&tx);
            drop(tx);
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect::<Vec<Result<Tally>>>()
                .into_iter()
                .try_fold(Tally::default(), |total, tally| tally.map(|t| total.merge(t)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Lookup;
    use crate::database::Snapshot;
    use crate::database::Table;
    use crate::game::Probabilities;
    use crate::game::Space;

    /// reads from a table, but every commit fails
    struct Faulty(Table);
    impl Database for Faulty {
        type Reader<'a> = Snapshot<'a>;
        fn reader(&self) -> Self::Reader<'_> {
            self.0.reader()
        }
        fn commit(&self, _: &[(State, Probabilities)]) -> Result<()> {
            Err(anyhow::anyhow!("disk full"))
        }
    }

    /// reads from a table, but every commit panics
    struct Crashing(Table);
    impl Database for Crashing {
        type Reader<'a> = Snapshot<'a>;
        fn reader(&self) -> Self::Reader<'_> {
            self.0.reader()
        }
        fn commit(&self, _: &[(State, Probabilities)]) -> Result<()> {
            panic!("store crashed")
        }
    }

    fn feed(rules: &Rules, queue: &Sender<State>) {
        let space = Space::new(*rules);
        for state in (0..space.capacity()).map(|id| space.state(id)) {
            if queue.send(state).is_err() {
                break;
            }
        }
    }

    #[test]
    fn commit_errors_fail_the_generation() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let db = Faulty(Table::new(rules));
        let result = Pool::new(3, 4).run(&rules, &db, |queue| feed(&rules, queue));
        assert!(result.is_err());
    }

    #[test]
    #[should_panic(expected = "store crashed")]
    fn worker_panics_are_reraised() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let db = Crashing(Table::new(rules));
        let _ = Pool::new(3, 4).run(&rules, &db, |queue| feed(&rules, queue));
    }

    #[test]
    fn solves_every_fed_state() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let table = Table::new(rules);
        let space = Space::new(rules);
        let terminals = (0..space.capacity())
            .map(|id| space.state(id))
            .filter(|s| rules.is_over(s))
            .collect::<Vec<_>>();
        let tally = Pool::new(3, 2)
            .run(&rules, &table, |queue| {
                terminals.iter().for_each(|s| queue.send(*s).unwrap())
            })
            .unwrap();
        assert!(tally.states == terminals.len());
        assert!(
            terminals
                .iter()
                .all(|s| table.get(s) == Probabilities::terminal(s))
        );
    }

    #[test]
    fn empty_generation() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let table = Table::new(rules);
        let tally = Pool::new(2, 8).run(&rules, &table, |_| {}).unwrap();
        assert!(tally == Tally::default());
    }
}
