use {
    crate::{
        segment::{Segment, SegmentId, SegmentRegistry},
        system::{FrameReport, JointSystem, TopologyIssue},
    },
    std::collections::HashMap,
};

/// Segment registry together with the joints that animate it.
#[derive(Default)]
pub struct Rig {
    pub segments: SegmentRegistry,
    pub joints: JointSystem,
    names: HashMap<String, SegmentId>,
}

impl Rig {
    pub fn new() -> Self {
        Rig::default()
    }

    /// Creates named segment.
    /// Replaces earlier mapping of the same name, segment itself is kept.
    pub fn insert_segment(
        &mut self,
        name: impl Into<String>,
        segment: Segment,
    ) -> SegmentId {
        let id = self.segments.create(segment);
        self.names.insert(name.into(), id);
        id
    }

    pub fn segment_id(&self, name: &str) -> Option<SegmentId> {
        self.names.get(name).copied()
    }

    pub fn segment_name(&self, id: SegmentId) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, named)| **named == id)
            .map(|(name, _)| name.as_str())
    }

    /// Poses the skeleton for `time`.
    pub fn update(&mut self, time: f32) -> FrameReport {
        self.joints.update_all(time, &mut self.segments)
    }

    pub fn validate(&self) -> Vec<TopologyIssue> {
        self.joints.validate(&self.segments)
    }
}
