//! Exact optimal-play solution of the dice game Farkle.
//!
//! The crate enumerates every reachable game configuration, orders the
//! configurations by depth with an external merge sort, and runs a
//! generation-barriered backward induction over them to compute each
//! player's probability of winning under perfect play.

pub mod database;
pub mod dice;
pub mod disk;
pub mod enumerate;
pub mod game;
#[cfg(feature = "server")]
pub mod play;
pub mod solver;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Win probabilities and roll likelihoods.
pub type Probability = f64;
/// Scores in units of `INCREMENT` points, saturating at the ceiling.
pub type Score = u8;
/// Actions taken from the initial state along the discovering path.
pub type Depth = u16;
/// Dense identifier of a multiset of dice faces.
pub type RollId = u16;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and live play.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Points represented by one unit of `Score`.
pub const INCREMENT: u32 = 50;
/// Dice rolled at the start of every turn and after hot dice.
pub const MAX_DICE: usize = 6;
/// Faces on each die.
pub const FACES: usize = 6;
/// Width of every probability vector; games may seat fewer players.
pub const MAX_PLAYERS: usize = 4;
/// Banked score that ends the game (10,000 points).
pub const DEFAULT_TARGET: Score = 200;
/// Minimum first bank to get on the board (500 points).
pub const DEFAULT_ENTRY: Score = 10;
/// Saturation sentinel for round and banked scores.
pub const DEFAULT_CEILING: Score = Score::MAX;

// ============================================================================
// EXTERNAL SORT
// Depth-tagged states spill to disk in sorted runs, merged on read.
// ============================================================================
/// Records held in memory before a run is sorted and spilled.
pub const SORT_BUFFER_RECORDS: usize = 1 << 22;
/// Buffered reader and writer capacity for every file stream.
pub const IO_BUFFER_BYTES: usize = 4 << 20;

// ============================================================================
// BACKWARD INDUCTION
// ============================================================================
/// Solved states a worker accumulates before taking the write lock.
pub const SOLVER_BATCH_SIZE: usize = 1024;
/// Full passes over the sorted stream. One pass is plain backward induction.
pub const SOLVER_SWEEPS: usize = 1;
/// Largest per-entry change below which refinement sweeps stop early.
pub const SOLVER_TOLERANCE: Probability = 1e-9;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
