//! Play Binary
//!
//! Console Farkle against the solver, with every human move graded
//! against the optimal one.

use clap::Parser;
use robofarkle::database::Table;
use robofarkle::play::Human;
use robofarkle::play::Player;
use robofarkle::play::Robot;
use robofarkle::play::Session;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Play Farkle against the solver", long_about = None)]
struct Args {
    /// solution saved by the solve binary
    #[arg(long, default_value = "farkle.db")]
    db: PathBuf,
    /// how many of the seats are human, starting from the first
    #[arg(long, default_value_t = 1)]
    humans: usize,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    robofarkle::log();
    let table = Table::load(&args.db)?;
    let seats = (0..table.rules().players())
        .map(|i| match i < args.humans {
            true => Box::new(Human) as Box<dyn Player + '_>,
            false => Box::new(Robot::new(&table)) as Box<dyn Player + '_>,
        })
        .collect::<Vec<_>>();
    let seed = args.seed.unwrap_or_else(rand::random);
    Session::new(&table, seats, seed)?.play()?;
    Ok(())
}
