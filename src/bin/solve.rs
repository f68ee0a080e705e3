//! Solve Binary
//!
//! Enumerates, sorts, and solves every state of a Farkle game, then saves
//! the win probabilities for the play client.

use clap::Parser;
use robofarkle::game::Rules;
use robofarkle::solver::Config;
use robofarkle::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Solve Farkle exactly", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 2)]
    players: usize,
    /// points needed to win
    #[arg(long, default_value_t = DEFAULT_TARGET as u32 * INCREMENT)]
    target: u32,
    /// points needed to get on the board
    #[arg(long, default_value_t = DEFAULT_ENTRY as u32 * INCREMENT)]
    entry: u32,
    /// saturation limit of round and banked scores, in units of 50 points
    #[arg(long, default_value_t = DEFAULT_CEILING)]
    ceiling: Score,
    #[arg(long, default_value_t = num_cpus::get())]
    workers: usize,
    #[arg(long, default_value_t = SOLVER_BATCH_SIZE)]
    batch: usize,
    /// records sorted in memory before spilling a run
    #[arg(long, default_value_t = SORT_BUFFER_RECORDS)]
    buffer: usize,
    /// passes over the state stream. one pass is plain backward induction and
    /// leaves states inside farkle cycles short of summing to one; repeat
    /// until the largest change drops below --tolerance for full distributions
    #[arg(long, default_value_t = SOLVER_SWEEPS)]
    sweeps: usize,
    #[arg(long, default_value_t = SOLVER_TOLERANCE)]
    tolerance: Probability,
    #[arg(long, default_value = "work")]
    workdir: PathBuf,
    #[arg(long, default_value = "farkle.db")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log();
    let points = Rules::from_points(args.players, args.target, args.entry)?;
    let rules = Rules::new(args.players, points.target(), points.entry(), args.ceiling)?;
    let config = Config {
        workers: args.workers,
        batch: args.batch,
        buffer: args.buffer,
        sweeps: args.sweeps,
        tolerance: args.tolerance,
        workdir: args.workdir,
    };
    let table = solver::run(rules, &config)?;
    table.save(&args.output)?;
    log::info!("saved solution to {}", args.output.display());
    Ok(())
}
