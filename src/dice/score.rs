use super::Roll;
use crate::Score;

/// Score of a single scoring combination, in units of 50 points,
/// or None if these dice do not form exactly one combination.
///
/// | combination                  | points |
/// |------------------------------|--------|
/// | single 1                     | 100    |
/// | single 5                     | 50     |
/// | three 1s                     | 1000   |
/// | three of a kind, face f      | 100·f  |
/// | four of a kind               | 1000   |
/// | five of a kind               | 2000   |
/// | six of a kind                | 3000   |
/// | straight 1-6                 | 1500   |
/// | three pairs                  | 1500   |
/// | four of a kind and a pair    | 1500   |
/// | two triplets                 | 2500   |
pub fn combination(roll: &Roll) -> Option<Score> {
    let counts = roll.counts();
    let mut groups = counts
        .iter()
        .copied()
        .filter(|&c| c > 0)
        .collect::<Vec<u8>>();
    groups.sort_unstable();
    match groups.as_slice() {
        [1] if roll.count(1) == 1 => Some(2),
        [1] if roll.count(5) == 1 => Some(1),
        [3] if roll.count(1) == 3 => Some(20),
        [3] => Some(2 * face(&counts)),
        [4] => Some(20),
        [5] => Some(40),
        [6] => Some(60),
        [1, 1, 1, 1, 1, 1] => Some(30),
        [2, 2, 2] => Some(30),
        [2, 4] => Some(30),
        [3, 3] => Some(50),
        _ => None,
    }
}

/// Best score using every die in some partition into combinations.
/// None if any die would be left over. The empty roll scores zero.
pub fn exact(roll: &Roll) -> Option<Score> {
    if roll.is_empty() {
        return Some(0);
    }
    roll.subsets()
        .into_iter()
        .filter(|part| !part.is_empty())
        .filter_map(|part| combination(&part).map(|s| (part, s)))
        .filter_map(|(part, s)| exact(&roll.without(&part)).map(|rest| s + rest))
        .max()
}

/// Best score available from any non-empty holdable subset.
/// Zero means the roll is a Farkle.
pub fn best(roll: &Roll) -> Score {
    roll.subsets()
        .iter()
        .filter(|held| !held.is_empty())
        .filter_map(exact)
        .max()
        .unwrap_or(0)
}

fn face(counts: &[u8]) -> u8 {
    counts
        .iter()
        .position(|&c| c > 0)
        .map(|i| i as u8 + 1)
        .unwrap_or(0)
}
