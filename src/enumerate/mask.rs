/// Dense visited set over canonical state ids, one bit per state.
pub struct Mask {
    bits: Vec<u64>,
    size: usize,
    ones: usize,
}

impl Mask {
    pub fn new(size: usize) -> Self {
        Self {
            bits: vec![0; size.div_ceil(64)],
            size,
            ones: 0,
        }
    }
    /// number of ids marked so far
    pub fn count(&self) -> usize {
        self.ones
    }
    pub fn contains(&self, id: usize) -> bool {
        assert!(id < self.size, "id {} outside mask of {}", id, self.size);
        self.bits[id / 64] & (1 << (id % 64)) != 0
    }
    /// mark the id, returning true if it was not already marked
    pub fn insert(&mut self, id: usize) -> bool {
        assert!(id < self.size, "id {} outside mask of {}", id, self.size);
        let word = &mut self.bits[id / 64];
        let bit = 1 << (id % 64);
        let fresh = *word & bit == 0;
        *word |= bit;
        self.ones += fresh as usize;
        fresh
    }
}
