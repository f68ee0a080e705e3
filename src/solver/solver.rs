use super::Pool;
use super::Progress;
use super::Tally;
use crate::Depth;
use crate::Probability;
use crate::SOLVER_SWEEPS;
use crate::SOLVER_TOLERANCE;
use crate::database::Database;
use crate::dice::Catalog;
use crate::disk::Record;
use crate::game::Rules;
use anyhow::Result;
use std::iter::Peekable;
use std::time::Duration;
use std::time::Instant;

/// Backward induction over a depth-sorted state stream.
///
/// States are solved one depth generation at a time, deepest first, and a
/// generation starts only after the previous one is committed. Farkles pass
/// the turn without changing any score, so the state graph has cycles and a
/// single pass can read successors that are not solved yet. Further sweeps
/// over the same stream refine those values until nothing moves by more
/// than the tolerance.
pub struct Solver<'a, D: Database> {
    rules: Rules,
    db: &'a D,
    pool: Pool,
    sweeps: usize,
    tolerance: Probability,
}

/// Totals over a whole solve.
#[derive(Debug, Default, Clone, Copy)]
pub struct Summary {
    pub sweeps: usize,
    pub generations: usize,
    pub states: usize,
    pub delta: Probability,
    pub elapsed: Duration,
}

impl<'a, D: Database> Solver<'a, D> {
    pub fn new(rules: Rules, db: &'a D, pool: Pool) -> Self {
        Self {
            rules,
            db,
            pool,
            sweeps: SOLVER_SWEEPS,
            tolerance: SOLVER_TOLERANCE,
        }
    }
    /// at most this many passes over the stream
    pub fn sweeps(self, sweeps: usize) -> Self {
        assert!(sweeps > 0);
        Self { sweeps, ..self }
    }
    /// stop early once a sweep changes nothing by more than this
    pub fn tolerance(self, tolerance: Probability) -> Self {
        Self { tolerance, ..self }
    }

    /// Run sweeps over the stream produced by `open`, which is called once
    /// per sweep. `total` is the number of records, used for progress only.
    pub fn solve<F, I>(&self, total: usize, mut open: F) -> Result<Summary>
    where
        F: FnMut() -> Result<I>,
        I: Iterator<Item = Result<Record>>,
    {
        let start = Instant::now();
        log::info!("solving with {} workers", self.pool.workers());
        let mut summary = Summary::default();
        for sweep in 1..=self.sweeps {
            let (tally, generations) = self.sweep(open()?, total)?;
            log::info!(
                "sweep {:>4} solved {} states in {} generations, largest change {:.3e}",
                sweep,
                tally.states,
                generations,
                tally.delta
            );
            summary.sweeps = sweep;
            summary.generations += generations;
            summary.states += tally.states;
            summary.delta = tally.delta;
            if tally.delta <= self.tolerance {
                break;
            }
        }
        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    /// One full pass, returning its tally and generation count.
    /// Records must arrive in non-increasing depth order.
    pub fn sweep<I>(&self, records: I, total: usize) -> Result<(Tally, usize)>
    where
        I: Iterator<Item = Result<Record>>,
    {
        let _ = Catalog::get();
        let mut records = records.peekable();
        let mut progress = Progress::new("solving", total, 20);
        let mut tally = Tally::default();
        let mut generations = 0;
        while let Some(depth) = Self::head(&mut records)? {
            let generation = self.pool.run(&self.rules, self.db, |queue| {
                while let Some(Ok(record)) =
                    records.next_if(|r| matches!(r, Ok(r) if r.depth == depth))
                {
                    progress.tick();
                    if queue.send(record.state).is_err() {
                        break;
                    }
                }
            })?;
            if let Some(Ok(next)) = records.peek() {
                assert!(
                    next.depth < depth,
                    "state stream is not sorted: depth {} follows {}",
                    next.depth,
                    depth
                );
            }
            log::debug!(
                "generation {:>6} depth {:>6} states {:>10}",
                generations,
                depth,
                generation.states
            );
            generations += 1;
            tally = tally.merge(generation);
        }
        Ok((tally, generations))
    }

    /// depth of the next record, or the read error in its place
    fn head<I>(records: &mut Peekable<I>) -> Result<Option<Depth>>
    where
        I: Iterator<Item = Result<Record>>,
    {
        match records.peek() {
            None => Ok(None),
            Some(Ok(record)) => Ok(Some(record.depth)),
            Some(Err(_)) => match records.next() {
                Some(Err(e)) => Err(e),
                _ => unreachable!("peeked an error"),
            },
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<20}{:<24}{:<24}{:<24}{:<20}",
            format!("sweeps {}", self.sweeps),
            format!("generations {}", self.generations),
            format!("states {}", self.states),
            format!("change {:.3e}", self.delta),
            format!("elapsed {:.1?}", self.elapsed),
        )
    }
}
