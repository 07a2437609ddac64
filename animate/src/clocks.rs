/// Animation time of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockIndex {
    /// Accumulated animation time.
    pub time: f32,
    pub delta: f32,
    /// Zero-based tick number.
    pub frame: u64,
}

/// Fixed-step animation time accumulator.
///
/// Time is derived from the tick count in `f64`, so it neither drifts nor
/// stalls on long runs, and is narrowed to `f32` per tick.
#[derive(Clone, Debug)]
pub struct Clocks {
    step: f32,
    frame: u64,
}

impl Clocks {
    pub const DEFAULT_STEP: f32 = 0.01;

    pub fn new(step: f32) -> Self {
        Clocks { step, frame: 0 }
    }

    /// Time reached by the last step.
    pub fn time(&self) -> f32 {
        self.elapsed() as f32
    }

    /// Same as [`Clocks::time`] at full precision.
    pub fn elapsed(&self) -> f64 {
        self.frame as f64 * f64::from(self.step)
    }

    pub fn step_size(&self) -> f32 {
        self.step
    }

    /// Advances time by one step.
    pub fn step(&mut self) -> ClockIndex {
        let frame = self.frame;
        self.frame += 1;
        ClockIndex {
            time: self.time(),
            delta: self.step,
            frame,
        }
    }
}

impl Default for Clocks {
    fn default() -> Self {
        Clocks::new(Clocks::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, approx::assert_relative_eq};

    #[test]
    fn first_step_advances_before_use() {
        let mut clocks = Clocks::default();
        let first = clocks.step();
        assert_eq!(first.frame, 0);
        assert_eq!(first.time, 0.01);
        assert_eq!(first.delta, 0.01);
    }

    #[test]
    fn steps_accumulate() {
        let mut clocks = Clocks::new(0.25);
        for _ in 0..7 {
            let _ = clocks.step();
        }
        let index = clocks.step();
        assert_eq!(index.frame, 7);
        assert_relative_eq!(index.time, 2.0);
        assert_relative_eq!(clocks.time(), 2.0);
    }

    #[test]
    fn long_runs_keep_advancing() {
        let mut clocks = Clocks::default();
        let mut last = 0.0;
        for _ in 0..1_000_000 {
            let index = clocks.step();
            assert!(index.time >= last);
            last = index.time;
        }

        assert_relative_eq!(last, 10_000.0, max_relative = 1e-6);
        assert_relative_eq!(clocks.elapsed(), 10_000.0, max_relative = 1e-6);

        // Far beyond the point where summing f32 steps stops moving.
        let mut late = Clocks::default();
        late.frame = 30_000_000;
        let before = late.time();
        let mut after = before;
        for _ in 0..10 {
            after = late.step().time;
        }
        assert_relative_eq!(before, 300_000.0, max_relative = 1e-6);
        assert!(after > before);
        assert_relative_eq!(late.elapsed(), 300_000.1, max_relative = 1e-6);
    }
}
