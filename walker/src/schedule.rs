use {
    animate::Scheduler,
    std::time::{Duration, Instant},
};

/// Paces ticks to wall-clock frame rate.
pub struct RealTimeScheduler {
    start: Instant,
    next: Instant,
    interval: Duration,
    frames: Option<u64>,
    ticks: u64,
}

impl RealTimeScheduler {
    /// Non-positive `frame_rate` disables pacing.
    /// `frames` limits number of ticks, unlimited when `None`.
    pub fn new(frame_rate: f32, frames: Option<u64>) -> Self {
        let interval = if frame_rate > 0.0 && frame_rate.is_finite() {
            Duration::from_secs_f32(1.0 / frame_rate)
        } else {
            Duration::from_secs(0)
        };

        let start = Instant::now();
        RealTimeScheduler {
            start,
            next: start,
            interval,
            frames,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Scheduler for RealTimeScheduler {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn schedule_next(&mut self) -> bool {
        self.ticks += 1;
        if let Some(frames) = self.frames {
            if self.ticks >= frames {
                return false;
            }
        }

        self.next += self.interval;
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        } else {
            // Running late, do not try to catch up on missed ticks.
            self.next = now;
        }
        true
    }
}
