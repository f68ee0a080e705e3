use crate::RollId;
use crate::Score;
use crate::dice::Catalog;

/// A decision after a roll: which dice to set aside, and whether to roll again.
/// The all-zero action is the forced Farkle.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Action {
    held: RollId,
    continues: bool,
}

impl Action {
    pub fn new(held: RollId, continues: bool) -> Self {
        Self { held, continues }
    }
    pub fn farkle() -> Self {
        Self::default()
    }
    pub fn held(&self) -> RollId {
        self.held
    }
    pub fn continues(&self) -> bool {
        self.continues
    }
    pub fn is_farkle(&self) -> bool {
        self.held == 0
    }
    /// same dice, but end the turn
    pub fn stop(self) -> Self {
        Self {
            continues: false,
            ..self
        }
    }
    /// dice set aside
    pub fn dice(&self) -> usize {
        Catalog::get().roll(self.held).size()
    }
    /// points earned by the held dice
    pub fn score(&self) -> Score {
        Catalog::get().held(self.held).unwrap_or(0)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.is_farkle() {
            true => write!(f, "FARKLE!"),
            false => write!(
                f,
                "{{held: {}, {}}}",
                Catalog::get().roll(self.held),
                match self.continues {
                    true => "continue",
                    false => "stop",
                }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Roll;

    #[test]
    fn farkle_is_default() {
        assert!(Action::farkle() == Action::default());
        assert!(Action::farkle().is_farkle());
        assert!(!Action::farkle().continues());
        assert!(Action::farkle().to_string() == "FARKLE!");
    }

    #[test]
    fn display_held_dice() {
        let held = Catalog::get().id(&Roll::try_from("5 1").unwrap());
        assert!(Action::new(held, true).to_string() == "{held: 1 5, continue}");
        assert!(Action::new(held, true).stop().to_string() == "{held: 1 5, stop}");
        assert!(Action::new(held, false).score() == 3);
        assert!(Action::new(held, false).dice() == 2);
    }
}
