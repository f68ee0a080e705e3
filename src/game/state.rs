use crate::MAX_DICE;
use crate::MAX_PLAYERS;
use crate::Score;

/// A snapshot of the game between rolls.
///
/// Banked scores are ordered from the player to move: index 0 is always
/// the mover and index `players - 1` is whoever moved last.
/// `round` is the unbanked score accumulated this turn, `dice` how many
/// dice the mover is about to roll.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct State {
    players: u8,
    banked: [Score; MAX_PLAYERS],
    round: Score,
    dice: u8,
}

impl State {
    pub fn new(banked: &[Score], round: Score, dice: u8) -> Self {
        assert!((1..=MAX_PLAYERS).contains(&banked.len()), "invalid player count");
        assert!((1..=MAX_DICE as u8).contains(&dice), "invalid dice count {}", dice);
        let mut scores = [0; MAX_PLAYERS];
        scores[..banked.len()].copy_from_slice(banked);
        Self {
            players: banked.len() as u8,
            banked: scores,
            round,
            dice,
        }
    }
    /// start of the game: nobody has banked, six dice to roll
    pub fn initial(players: usize) -> Self {
        Self::new(&[0; MAX_PLAYERS][..players], 0, MAX_DICE as u8)
    }
    pub fn players(&self) -> usize {
        self.players as usize
    }
    pub fn banked(&self) -> &[Score] {
        &self.banked[..self.players()]
    }
    pub fn round(&self) -> Score {
        self.round
    }
    pub fn dice(&self) -> usize {
        self.dice as usize
    }
    /// banked score of the player to move
    pub fn mover(&self) -> Score {
        self.banked[0]
    }
    /// highest banked score among the players
    pub fn highest(&self) -> Score {
        self.banked().iter().copied().max().unwrap_or(0)
    }
    /// is the board the same for everyone but the turn in progress
    pub fn at_turn_start(&self) -> bool {
        self.round == 0 && self.dice() == MAX_DICE
    }
}

// transition helpers
impl State {
    pub(crate) fn with_round(self, round: Score) -> Self {
        Self { round, ..self }
    }
    pub(crate) fn with_dice(self, dice: usize) -> Self {
        assert!((1..=MAX_DICE).contains(&dice));
        Self {
            dice: dice as u8,
            ..self
        }
    }
    pub(crate) fn with_mover(self, score: Score) -> Self {
        let mut banked = self.banked;
        banked[0] = score;
        Self { banked, ..self }
    }
    /// pass the turn: the next player moves to index 0
    pub(crate) fn rotated(self) -> Self {
        let mut banked = self.banked;
        banked[..self.players()].rotate_left(1);
        Self {
            banked,
            round: 0,
            dice: MAX_DICE as u8,
            ..self
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let banked = self
            .banked()
            .iter()
            .map(|s| format!("{:>5}", *s as u32 * crate::INCREMENT))
            .collect::<Vec<_>>();
        write!(
            f,
            "[{}] round {:>5} dice {}",
            banked.join(" "),
            self.round as u32 * crate::INCREMENT,
            self.dice
        )
    }
}
