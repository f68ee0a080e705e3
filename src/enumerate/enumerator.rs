use super::Mask;
use crate::Depth;
use crate::dice::Catalog;
use crate::game::Rules;
use crate::game::Space;
use crate::game::State;

/// Depth-first walk over every state reachable from the start of the game.
///
/// Each state is yielded exactly once, tagged with the depth at which the
/// walk first discovered it. Terminal states are yielded on discovery,
/// live states once their whole subtree has been walked.
pub struct Enumerator {
    rules: Rules,
    space: Space,
    mask: Mask,
    stack: Vec<Frame>,
}

/// a live state whose rolls are still being expanded
struct Frame {
    state: State,
    depth: Depth,
    rolls: usize,
    pending: Vec<State>,
}

impl Frame {
    fn new(state: State, depth: Depth) -> Self {
        Self {
            state,
            depth,
            rolls: 0,
            pending: Vec::new(),
        }
    }
}

impl Enumerator {
    pub fn new(rules: Rules) -> Self {
        let space = Space::new(rules);
        let mut mask = Mask::new(space.capacity());
        let root = rules.initial();
        mask.insert(space.index(&root));
        Self {
            rules,
            space,
            mask,
            stack: vec![Frame::new(root, 0)],
        }
    }
    pub fn space(&self) -> &Space {
        &self.space
    }
    /// distinct states discovered so far
    pub fn visited(&self) -> usize {
        self.mask.count()
    }
}

impl Iterator for Enumerator {
    type Item = (Depth, State);
    fn next(&mut self) -> Option<Self::Item> {
        let catalog = Catalog::get();
        loop {
            let frame = self.stack.last_mut()?;
            if let Some(child) = frame.pending.pop() {
                let depth = frame
                    .depth
                    .checked_add(1)
                    .expect("enumeration depth overflow");
                if !self.mask.insert(self.space.index(&child)) {
                    continue;
                }
                match self.rules.is_over(&child) {
                    true => return Some((depth, child)),
                    false => self.stack.push(Frame::new(child, depth)),
                }
                continue;
            }
            let outcomes = catalog.outcomes(frame.state.dice());
            if let Some(outcome) = outcomes.get(frame.rolls) {
                frame.rolls += 1;
                frame.pending = self
                    .rules
                    .choices(&frame.state, outcome.roll)
                    .into_iter()
                    .rev()
                    .map(|(_, next)| next)
                    .collect();
                continue;
            }
            return self.stack.pop().map(|done| (done.depth, done.state));
        }
    }
}
