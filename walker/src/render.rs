use {
    crate::camera::OrbitCamera,
    animate::{pose, FrameContext, Render, Rig, SegmentId},
    nalgebra as na,
};

/// Segments whose tips are reported periodically.
const TRACKED: [&str; 6] = [
    "head_upper",
    "r_fingers",
    "l_fingers",
    "r_toes",
    "l_toes",
    "neck",
];

/// Headless renderer.
/// Computes everything a GPU pass would consume and traces it.
pub struct TraceRenderer {
    camera: OrbitCamera,
    tracked: Vec<(String, SegmentId)>,
    report_every: u64,
    drawn: u64,
}

impl TraceRenderer {
    pub fn new(camera: OrbitCamera, rig: &Rig) -> Self {
        let tracked = TRACKED
            .iter()
            .filter_map(|&name| {
                rig.segment_id(name).map(|id| (name.to_owned(), id))
            })
            .collect();

        TraceRenderer {
            camera,
            tracked,
            report_every: 60,
            drawn: 0,
        }
    }

    pub fn with_report_interval(mut self, frames: u64) -> Self {
        self.report_every = frames.max(1);
        self
    }

    /// Total number of segment draws so far.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl Render for TraceRenderer {
    fn render(&mut self, ctx: FrameContext<'_>) {
        let time = ctx.clocks.time;
        let view = self.camera.view(time).to_homogeneous();
        tracing::trace!("Camera at {}", self.camera.eye(time));

        for (id, _) in ctx.segments.iter() {
            if let Some(model) = pose::model_matrix(ctx.segments, id) {
                let model_view: na::Matrix4<f32> = view * model;
                tracing::trace!(?id, "Model-view {}", model_view);
                self.drawn += 1;
            }
        }

        if ctx.clocks.frame % self.report_every == 0 {
            for (name, id) in &self.tracked {
                if let Some(tip) = pose::tip_point(ctx.segments, *id) {
                    tracing::debug!(
                        "t={:.2} {} tip at ({:.3}, {:.3}, {:.3})",
                        time,
                        name,
                        tip.x,
                        tip.y,
                        tip.z
                    );
                }
            }
        }
    }
}
