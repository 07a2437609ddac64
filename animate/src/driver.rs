use {
    crate::{
        clocks::{ClockIndex, Clocks},
        frame_timer::FrameTimer,
        rig::Rig,
        segment::SegmentRegistry,
        system::FrameReport,
    },
    std::time::Duration,
};

/// Source of ticks for [`FrameDriver::run`].
pub trait Scheduler {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;

    /// Waits until the next tick is due.
    /// Returns `false` when no further ticks should happen.
    fn schedule_next(&mut self) -> bool;
}

/// Everything a renderer gets to see for one tick.
pub struct FrameContext<'a> {
    pub segments: &'a SegmentRegistry,
    pub clocks: ClockIndex,
    pub report: FrameReport,
}

/// Consumer of posed segments, called once per tick.
pub trait Render {
    fn render(&mut self, ctx: FrameContext<'_>);
}

impl<F> Render for F
where
    F: FnMut(FrameContext<'_>),
{
    fn render(&mut self, ctx: FrameContext<'_>) {
        self(ctx)
    }
}

/// Advances animation time, poses the rig and hands it to the renderer.
pub struct FrameDriver {
    clocks: Clocks,
    timer: FrameTimer,
}

impl FrameDriver {
    /// Number of ticks averaged for frame time reports.
    pub const TIMER_WINDOW: usize = 120;

    pub fn new(time_step: f32) -> Self {
        FrameDriver {
            clocks: Clocks::new(time_step),
            timer: FrameTimer::new(Self::TIMER_WINDOW),
        }
    }

    pub fn clocks(&self) -> &Clocks {
        &self.clocks
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Runs single tick.
    pub fn tick<R>(&mut self, rig: &mut Rig, renderer: &mut R) -> ClockIndex
    where
        R: Render + ?Sized,
    {
        let clocks = self.clocks.step();
        let report = rig.update(clocks.time);

        if report.skipped > 0 {
            tracing::trace!(
                "Frame {}: {} joints skipped",
                clocks.frame,
                report.skipped
            );
        }

        renderer.render(FrameContext {
            segments: &rig.segments,
            clocks,
            report,
        });

        clocks
    }

    /// Ticks until `scheduler` declines to schedule another one.
    /// Returns number of ticks run.
    pub fn run<R, S>(
        &mut self,
        rig: &mut Rig,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> u64
    where
        R: Render + ?Sized,
        S: Scheduler + ?Sized,
    {
        let mut ticks = 0u64;

        loop {
            let start = scheduler.now();
            self.tick(rig, renderer);
            ticks += 1;

            let elapsed = scheduler
                .now()
                .checked_sub(start)
                .unwrap_or_else(|| Duration::from_secs(0));
            self.timer.add_sample(elapsed);

            if ticks % self.timer.window() as u64 == 0 {
                tracing::debug!(
                    "Average tick {:?} ({:.1} ticks/s possible)",
                    self.timer.average(),
                    self.timer.rate()
                );
            }

            if !scheduler.schedule_next() {
                break;
            }
        }

        tracing::info!(
            "Frame driver stopped after {} ticks at time {} (step {})",
            ticks,
            self.clocks.time(),
            self.clocks.step_size()
        );
        ticks
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        FrameDriver::new(Clocks::DEFAULT_STEP)
    }
}
