use {
    crate::{math::rotate, segment::SegmentId},
    nalgebra as na,
    smallvec::SmallVec,
};

/// Indices of joints that depend on a joint's rotation.
pub type Dependents = SmallVec<[usize; 4]>;

/// Parameters of a joint registered with [`JointSystem::add_joint`].
///
/// [`JointSystem::add_joint`]: crate::system::JointSystem::add_joint
#[derive(Clone, Debug, PartialEq)]
pub struct JointConfig {
    pub segment: SegmentId,
    pub axis: na::Vector3<f32>,
    pub base_dir: na::Vector3<f32>,
    pub min: f32,
    pub max: f32,
    pub speed: f32,
    pub offset: f32,
    pub children: Dependents,
}

impl JointConfig {
    pub fn new(
        segment: SegmentId,
        axis: na::Vector3<f32>,
        base_dir: na::Vector3<f32>,
    ) -> Self {
        JointConfig {
            segment,
            axis,
            base_dir,
            min: 0.0,
            max: 0.0,
            speed: 1.0,
            offset: 0.0,
            children: Dependents::new(),
        }
    }

    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_phase(mut self, speed: f32, offset: f32) -> Self {
        self.speed = speed;
        self.offset = offset;
        self
    }

    pub fn with_children(
        mut self,
        children: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.children = children.into_iter().collect();
        self
    }
}

/// Sinusoidal rotational driver of one segment.
#[derive(Clone, Debug)]
pub struct Joint {
    segment: SegmentId,
    axis: na::Vector3<f32>,
    base_dir: na::Vector3<f32>,
    min: f32,
    max: f32,
    speed: f32,
    offset: f32,
    children: Dependents,

    // Rest frame as carried by an ancestor joint this frame.
    pub(crate) current_axis: na::Vector3<f32>,
    pub(crate) current_base_dir: na::Vector3<f32>,
}

impl Joint {
    pub fn new(config: JointConfig) -> Self {
        Joint {
            segment: config.segment,
            axis: config.axis,
            base_dir: config.base_dir,
            min: config.min,
            max: config.max,
            speed: config.speed,
            offset: config.offset,
            children: config.children,
            current_axis: config.axis,
            current_base_dir: config.base_dir,
        }
    }

    pub fn segment(&self) -> SegmentId {
        self.segment
    }

    /// Rotation axis in the rest frame.
    pub fn axis(&self) -> na::Vector3<f32> {
        self.axis
    }

    /// Segment direction at zero angle in the rest frame.
    pub fn base_dir(&self) -> na::Vector3<f32> {
        self.base_dir
    }

    pub fn current_axis(&self) -> na::Vector3<f32> {
        self.current_axis
    }

    pub fn current_base_dir(&self) -> na::Vector3<f32> {
        self.current_base_dir
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Angle at `time`.
    /// Oscillates smoothly between `min` and `max`, never leaving the range.
    pub fn angle(&self, time: f32) -> f32 {
        let t = (time * self.speed + self.offset).sin() * 0.5 + 0.5;
        self.min + (self.max - self.min) * t
    }

    /// Segment direction for `angle` in the current frame.
    pub fn direction(&self, angle: f32) -> na::Vector3<f32> {
        rotate(&self.current_base_dir, &self.current_axis, angle)
    }
}
