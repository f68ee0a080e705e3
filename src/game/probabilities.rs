use super::State;
use crate::MAX_PLAYERS;
use crate::Probability;

/// Win probability of each player, indexed from the player to move
/// in the state the vector describes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Probabilities([Probability; MAX_PLAYERS]);

impl Probabilities {
    pub fn zero() -> Self {
        Self::default()
    }
    /// final standing: the highest banked score wins, ties split evenly
    pub fn terminal(state: &State) -> Self {
        let highest = state.highest();
        let winners = state.banked().iter().filter(|&&b| b == highest).count();
        let mut p = [0.; MAX_PLAYERS];
        state
            .banked()
            .iter()
            .zip(p.iter_mut())
            .filter(|(b, _)| **b == highest)
            .for_each(|(_, p)| *p = 1. / winners as Probability);
        Self(p)
    }
    /// probability that the player to move wins
    pub fn mover(&self) -> Probability {
        self.0[0]
    }
    pub fn sum(&self) -> Probability {
        self.0.iter().sum()
    }
    /// largest absolute difference between entries
    pub fn delta(&self, other: &Self) -> Probability {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0., Probability::max)
    }
    pub fn values(&self) -> &[Probability; MAX_PLAYERS] {
        &self.0
    }

    /// Re-index a vector seen from the next player back to the player
    /// who just ended their turn: entry i moves to i + 1, the last wraps to 0.
    pub fn unrotate(self, players: usize) -> Self {
        let mut p = self.0;
        p[..players].rotate_right(1);
        Self(p)
    }
    /// inverse of `unrotate`
    pub fn rotate(self, players: usize) -> Self {
        let mut p = self.0;
        p[..players].rotate_left(1);
        Self(p)
    }
}

impl From<[Probability; MAX_PLAYERS]> for Probabilities {
    fn from(p: [Probability; MAX_PLAYERS]) -> Self {
        Self(p)
    }
}

impl std::ops::Index<usize> for Probabilities {
    type Output = Probability;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl std::ops::AddAssign for Probabilities {
    fn add_assign(&mut self, rhs: Self) {
        self.0.iter_mut().zip(rhs.0).for_each(|(a, b)| *a += b);
    }
}

impl std::ops::Mul<Probability> for Probabilities {
    type Output = Self;
    fn mul(self, rhs: Probability) -> Self::Output {
        Self(self.0.map(|p| p * rhs))
    }
}

impl std::fmt::Display for Probabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let entries = self
            .0
            .iter()
            .map(|p| format!("{:5.1}%", p * 100.))
            .collect::<Vec<_>>();
        write!(f, "[{}]", entries.join(" "))
    }
}
