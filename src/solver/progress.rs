use std::time::Instant;

/// A struct to track and display progress of a long-running operation.
pub struct Progress {
    label: &'static str,
    total: usize,
    check: usize,
    ticks: usize,
    begin: Instant,
    delta: Instant,
}

impl Progress {
    /// log roughly `n` times over `total` ticks
    pub fn new(label: &'static str, total: usize, n: usize) -> Self {
        let check = (total / n.max(1)).max(1);
        let now = Instant::now();
        Self {
            label,
            total,
            check,
            ticks: 0,
            begin: now,
            delta: now,
        }
    }
    pub fn ticks(&self) -> usize {
        self.ticks
    }
    pub fn tick(&mut self) {
        self.ticks += 1;
        if self.ticks % self.check == 0 {
            let now = Instant::now();
            let total_t = now.duration_since(self.begin);
            let delta_t = now.duration_since(self.delta);
            self.delta = now;
            log::info!(
                "{:<10} {:8.0?} {:>12} {:6.2}%   mean {:8.0}/s   last {:8.0}/s",
                self.label,
                total_t,
                self.ticks,
                self.ticks as f32 / self.total.max(1) as f32 * 100f32,
                self.ticks as f32 / total_t.as_secs_f32().max(f32::EPSILON),
                self.check as f32 / delta_t.as_secs_f32().max(f32::EPSILON),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ticks() {
        let mut progress = Progress::new("test", 10, 100);
        (0..25).for_each(|_| progress.tick());
        assert!(progress.ticks() == 25);
        assert!(progress.check == 1);
    }
}
