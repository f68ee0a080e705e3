use super::Pool;
use super::Progress;
use super::Solver;
use crate::Probability;
use crate::SOLVER_BATCH_SIZE;
use crate::SOLVER_SWEEPS;
use crate::SOLVER_TOLERANCE;
use crate::SORT_BUFFER_RECORDS;
use crate::database::Table;
use crate::disk::Record;
use crate::disk::Sorter;
use crate::disk::Stream;
use crate::enumerate::Enumerator;
use crate::game::Rules;
use anyhow::Result;
use std::path::PathBuf;

/// Tuning of a full solve.
#[derive(Debug, Clone)]
pub struct Config {
    pub workers: usize,
    pub batch: usize,
    pub buffer: usize,
    pub sweeps: usize,
    pub tolerance: Probability,
    /// scratch runs and the sorted state stream live here
    pub workdir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            batch: SOLVER_BATCH_SIZE,
            buffer: SORT_BUFFER_RECORDS,
            sweeps: SOLVER_SWEEPS,
            tolerance: SOLVER_TOLERANCE,
            workdir: PathBuf::from("work"),
        }
    }
}

impl Config {
    /// where the depth-sorted states are saved
    pub fn stream(&self) -> PathBuf {
        self.workdir.join("states.bin")
    }
}

/// Enumerate, sort, save, and solve every state of the game.
pub fn run(rules: Rules, config: &Config) -> Result<Table> {
    log::info!("solving {}", rules);
    let mut enumerator = Enumerator::new(rules);
    let capacity = enumerator.space().capacity();
    log::info!("enumerating {} states", capacity);
    let mut progress = Progress::new("enumerate", capacity, 20);
    let merge = Sorter::sort(
        &config.workdir,
        rules.players(),
        config.buffer,
        enumerator
            .by_ref()
            .inspect(|_| progress.tick())
            .map(Record::from),
    )?;
    assert!(
        enumerator.visited() == capacity,
        "visited {} of {} states",
        enumerator.visited(),
        capacity
    );
    let ref path = config.stream();
    let total = Stream::save(path, rules.players(), merge)?;
    assert!(total == capacity, "enumerated {} of {} states", total, capacity);
    let table = Table::new(rules);
    let summary = Solver::new(rules, &table, Pool::new(config.workers, config.batch))
        .sweeps(config.sweeps)
        .tolerance(config.tolerance)
        .solve(total, || Stream::open(path))?;
    log::info!("{}", summary);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Lookup;
    use crate::game::Probabilities;

    #[test]
    fn end_to_end() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let workdir = tempfile::tempdir().unwrap();
        let config = Config {
            workers: 2,
            batch: 8,
            buffer: 64,
            sweeps: 3,
            tolerance: 0.,
            workdir: workdir.path().to_path_buf(),
        };
        let table = run(rules, &config).unwrap();
        let opening = table.get(&rules.initial());
        assert!(config.stream().exists());
        assert!(opening.mover() > 0.);
        assert!(opening != Probabilities::zero());
        assert!(opening.sum() <= 1. + 1e-9);
    }
}
