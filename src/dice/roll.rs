use crate::FACES;
use crate::MAX_DICE;
use crate::Probability;

/// Roll represents an unordered multiset of die faces.
/// stored as the count of each face, so permutations of the
/// same dice collapse onto one value. index 0 counts ones, index 5 counts sixes.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Roll([u8; FACES]);

impl Roll {
    pub fn empty() -> Self {
        Self([0; FACES])
    }
    /// how many dice show this face (1 through 6)
    pub fn count(&self, face: u8) -> u8 {
        assert!((1..=FACES as u8).contains(&face), "invalid face {}", face);
        self.0[face as usize - 1]
    }
    pub fn counts(&self) -> [u8; FACES] {
        self.0
    }
    pub fn size(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
    /// sub-multiset test
    pub fn contains(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }
    pub fn without(&self, other: &Self) -> Self {
        assert!(self.contains(other), "{} does not contain {}", self, other);
        let mut counts = self.0;
        counts
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a -= b);
        Self(counts)
    }
    /// faces in ascending order, with repetition
    pub fn faces(&self) -> impl Iterator<Item = u8> + '_ {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, &c)| std::iter::repeat_n(i as u8 + 1, c as usize))
    }

    /// multinomial probability of rolling exactly this multiset
    /// with `self.size()` fair dice: n! / (c1! ... c6! 6^n)
    pub fn probability(&self) -> Probability {
        let n = self.size();
        let denom = self
            .0
            .iter()
            .map(|&c| FACTORIALS[c as usize])
            .product::<u32>()
            * (FACES as u32).pow(n as u32);
        FACTORIALS[n] as Probability / denom as Probability
    }

    /// every sub-multiset, including the empty one and self
    pub fn subsets(&self) -> Vec<Self> {
        self.0.iter().enumerate().fold(vec![Self::empty()], |subsets, (i, &c)| {
            subsets
                .into_iter()
                .flat_map(|s| {
                    (0..=c).map(move |k| {
                        let mut counts = s.0;
                        counts[i] = k;
                        Self(counts)
                    })
                })
                .collect()
        })
    }

    /// every distinct outcome of rolling n dice, ascending by face counts
    pub fn all(n: usize) -> Vec<Self> {
        assert!(n <= MAX_DICE);
        let mut rolls = Vec::new();
        Self::fill(&mut rolls, [0; FACES], 0, n as u8);
        rolls
    }
    fn fill(rolls: &mut Vec<Self>, mut counts: [u8; FACES], face: usize, left: u8) {
        if face == FACES - 1 {
            counts[face] = left;
            rolls.push(Self(counts));
        } else {
            for k in 0..=left {
                counts[face] = k;
                Self::fill(rolls, counts, face + 1, left - k);
            }
        }
    }

    /// throw n fair dice
    pub fn throw<R: rand::Rng>(n: usize, rng: &mut R) -> Self {
        assert!(n <= MAX_DICE);
        let mut counts = [0; FACES];
        for _ in 0..n {
            counts[rng.random_range(0..FACES)] += 1;
        }
        Self(counts)
    }
}

impl crate::Arbitrary for Roll {
    fn random() -> Self {
        Self::throw(MAX_DICE, &mut rand::rng())
    }
}

const FACTORIALS: [u32; MAX_DICE + 1] = [1, 1, 2, 6, 24, 120, 720];

/// counts isomorphism
impl From<[u8; FACES]> for Roll {
    fn from(counts: [u8; FACES]) -> Self {
        assert!(counts.iter().map(|&c| c as usize).sum::<usize>() <= MAX_DICE);
        Self(counts)
    }
}
impl From<Roll> for [u8; FACES] {
    fn from(roll: Roll) -> Self {
        roll.0
    }
}

/// faces isomorphism (up to permutation)
impl From<&[u8]> for Roll {
    fn from(faces: &[u8]) -> Self {
        assert!(faces.len() <= MAX_DICE);
        let mut counts = [0; FACES];
        for &face in faces {
            assert!((1..=FACES as u8).contains(&face), "invalid face {}", face);
            counts[face as usize - 1] += 1;
        }
        Self(counts)
    }
}

/// str parsing, one digit per die, separators ignored: "1 5 5" or "155"
impl TryFrom<&str> for Roll {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let faces = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| match c.to_digit(10) {
                Some(d @ 1..=6) => Ok(d as u8),
                _ => Err(anyhow::anyhow!("invalid die face {:?}", c)),
            })
            .collect::<Result<Vec<u8>, _>>()?;
        anyhow::ensure!(faces.len() <= MAX_DICE, "too many dice: {}", faces.len());
        Ok(Self::from(faces.as_slice()))
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let faces = self.faces().map(|d| d.to_string()).collect::<Vec<_>>();
        write!(f, "{}", faces.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_counts() {
        // C(n + 5, 5) multisets of n dice
        let counts = (0..=MAX_DICE).map(|n| Roll::all(n).len()).collect::<Vec<_>>();
        assert!(counts == vec![1, 6, 21, 56, 126, 252, 462]);
    }

    #[test]
    fn outcomes_ascending() {
        let rolls = Roll::all(4);
        assert!(rolls.windows(2).all(|w| w[0] < w[1]));
        assert!(rolls.iter().all(|r| r.size() == 4));
    }

    #[test]
    fn probabilities_sum_to_one() {
        for n in 0..=MAX_DICE {
            let total = Roll::all(n).iter().map(Roll::probability).sum::<Probability>();
            assert!((total - 1.).abs() < 1e-12, "n = {} sums to {}", n, total);
        }
    }

    #[test]
    fn multinomial_probability() {
        let straight = Roll::from([1, 1, 1, 1, 1, 1]);
        let sixes = Roll::from([0, 0, 0, 0, 0, 6]);
        assert!((straight.probability() - 720. / 46656.).abs() < 1e-15);
        assert!((sixes.probability() - 1. / 46656.).abs() < 1e-15);
    }

    #[test]
    fn subsets_of_pair() {
        let roll = Roll::try_from("1 1 5").unwrap();
        let subsets = roll.subsets();
        assert!(subsets.len() == 6);
        assert!(subsets.iter().all(|s| roll.contains(s)));
        assert!(subsets.contains(&Roll::empty()));
        assert!(subsets.contains(&roll));
    }

    #[test]
    fn without_removes_held() {
        let roll = Roll::try_from("1 2 5 5").unwrap();
        let held = Roll::try_from("5 1").unwrap();
        assert!(roll.without(&held) == Roll::try_from("2 5").unwrap());
    }

    #[test]
    fn parse_and_display() {
        let roll = Roll::try_from("5,1, 3").unwrap();
        assert!(roll.to_string() == "1 3 5");
        assert!(Roll::empty().to_string() == "-");
        assert!(Roll::try_from("7").is_err());
        assert!(Roll::try_from("1111111").is_err());
    }

    #[test]
    fn throw_has_size() {
        let ref mut rng = rand::rng();
        assert!((0..=MAX_DICE).all(|n| Roll::throw(n, rng).size() == n));
        assert!(<Roll as crate::Arbitrary>::random().size() == MAX_DICE);
    }
}
