use std::{collections::VecDeque, time::Duration};

/// Rolling average over the last `window` tick durations.
pub struct FrameTimer {
    samples: VecDeque<Duration>,
    sum: Duration,
    window: usize,
}

impl FrameTimer {
    pub fn new(window: usize) -> Self {
        FrameTimer {
            samples: VecDeque::with_capacity(window),
            sum: Duration::from_secs(0),
            window: window.max(1),
        }
    }

    pub fn add_sample(&mut self, sample: Duration) {
        self.samples.push_back(sample);
        self.sum += sample;

        while self.samples.len() > self.window {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
            }
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn average(&self) -> Duration {
        match self.samples.len() {
            0 => Duration::from_secs(0),
            len => self.sum / len as u32,
        }
    }

    /// Ticks per second implied by the average duration.
    /// Zero when nothing was measured or ticks take no time.
    pub fn rate(&self) -> f32 {
        let average = self.average().as_secs_f32();
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }
}
