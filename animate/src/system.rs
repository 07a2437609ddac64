use {
    crate::{
        joint::{Joint, JointConfig},
        math::rotate,
        segment::SegmentRegistry,
    },
    nalgebra as na,
    std::fmt::{self, Display, Formatter},
};

/// Dependent joint axis is carried along by its owner's rotation only when
/// the two rest axes are this close to (anti)parallel.
///
/// Tunable heuristic, kept for parity with existing rigs.
pub const COAXIAL_THRESHOLD: f32 = 0.9;

/// Summary of one [`JointSystem::update_all`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub updated: usize,
    pub skipped: usize,
}

/// Problem in joint topology found by [`JointSystem::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TopologyIssue {
    /// Joint drives a segment that is not in the registry.
    MissingSegment { joint: usize },
    /// Dependent index does not name a registered joint.
    DanglingChild { joint: usize, child: usize },
    /// Joint lists itself as dependent.
    SelfDependency { joint: usize },
    /// Joint is reachable from its own dependents.
    Cycle { joint: usize },
    /// `min` is greater than `max`.
    InvertedRange { joint: usize },
}

impl Display for TopologyIssue {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            TopologyIssue::MissingSegment { joint } => {
                write!(fmt, "Joint {} drives missing segment", joint)
            }
            TopologyIssue::DanglingChild { joint, child } => write!(
                fmt,
                "Joint {} lists dependent {} which does not exist",
                joint, child
            ),
            TopologyIssue::SelfDependency { joint } => {
                write!(fmt, "Joint {} lists itself as dependent", joint)
            }
            TopologyIssue::Cycle { joint } => {
                write!(fmt, "Joint {} depends on itself transitively", joint)
            }
            TopologyIssue::InvertedRange { joint } => {
                write!(fmt, "Joint {} has min greater than max", joint)
            }
        }
    }
}

/// Owns all joints of a skeleton and drives segment directions from time.
#[derive(Clone, Debug, Default)]
pub struct JointSystem {
    joints: Vec<Joint>,
}

impl JointSystem {
    pub fn new() -> Self {
        JointSystem { joints: Vec::new() }
    }

    /// Registers a joint and returns its index.
    pub fn add_joint(&mut self, config: JointConfig) -> usize {
        self.joints.push(Joint::new(config));
        self.joints.len() - 1
    }

    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Sets every joint's angle for `time` and writes resulting directions
    /// into `segments`.
    ///
    /// Joints are processed in declaration order. Joints whose segment is
    /// gone are skipped.
    pub fn update_all(
        &mut self,
        time: f32,
        segments: &mut SegmentRegistry,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        for index in 0..self.joints.len() {
            let joint = &self.joints[index];
            let mut segment = match segments.get(joint.segment()) {
                Some(segment) => segment,
                None => {
                    tracing::trace!("Joint {} has no segment, skipped", index);
                    report.skipped += 1;
                    continue;
                }
            };

            let angle = joint.angle(time);
            segment.direction = joint.direction(angle);

            if segments.update(joint.segment(), segment).is_applied() {
                report.updated += 1;
            } else {
                report.skipped += 1;
            }

            if !joint.children().is_empty() {
                self.propagate(index, angle);
            }
        }

        report
    }

    /// Carries rotation of joint `owner` by `angle` into rest frames of all
    /// its dependents, transitively.
    ///
    /// Every joint is carried at most once per call, so repeated or cyclic
    /// dependents cost no more than a plain chain.
    pub fn propagate(&mut self, owner: usize, angle: f32) {
        let axis = match self.joints.get(owner) {
            Some(joint) => joint.axis(),
            None => return,
        };

        let mut visited = vec![false; self.joints.len()];
        visited[owner] = true;
        self.propagate_from(owner, owner, &axis, angle, &mut visited);
    }

    fn propagate_from(
        &mut self,
        owner: usize,
        index: usize,
        axis: &na::Vector3<f32>,
        angle: f32,
        visited: &mut [bool],
    ) {
        let children = self.joints[index].children().to_vec();
        for child in children {
            match visited.get_mut(child) {
                None => continue,
                Some(seen) if *seen => {
                    if child == owner {
                        tracing::warn!(
                            "Dependents of joint {} form a cycle, propagation stopped",
                            owner
                        );
                    }
                    continue;
                }
                Some(seen) => *seen = true,
            }

            let joint = &mut self.joints[child];
            joint.current_base_dir = rotate(&joint.base_dir(), axis, angle);
            joint.current_axis =
                if joint.axis().dot(axis).abs() > COAXIAL_THRESHOLD {
                    rotate(&joint.axis(), axis, angle)
                } else {
                    joint.axis()
                };

            self.propagate_from(owner, child, axis, angle, visited);
        }
    }

    /// Checks joint topology against `segments`.
    /// Issues are reported, never fixed, update keeps running regardless.
    pub fn validate(&self, segments: &SegmentRegistry) -> Vec<TopologyIssue> {
        let mut issues = Vec::new();

        for (index, joint) in self.joints.iter().enumerate() {
            if !segments.contains(joint.segment()) {
                issues.push(TopologyIssue::MissingSegment { joint: index });
            }

            let (min, max) = joint.range();
            if min > max {
                issues.push(TopologyIssue::InvertedRange { joint: index });
            }

            for &child in joint.children() {
                if child == index {
                    issues.push(TopologyIssue::SelfDependency { joint: index });
                } else if child >= self.joints.len() {
                    issues.push(TopologyIssue::DanglingChild {
                        joint: index,
                        child,
                    });
                }
            }

            if self.reaches_itself(index) {
                issues.push(TopologyIssue::Cycle { joint: index });
            }
        }

        for issue in &issues {
            tracing::warn!("{}", issue);
        }

        issues
    }

    fn reaches_itself(&self, start: usize) -> bool {
        let mut visited = vec![false; self.joints.len()];
        let mut stack: Vec<usize> = self.joints[start]
            .children()
            .iter()
            .copied()
            .filter(|&child| child != start)
            .collect();

        while let Some(index) = stack.pop() {
            let joint = match self.joints.get(index) {
                Some(joint) => joint,
                None => continue,
            };

            if visited[index] {
                continue;
            }
            visited[index] = true;

            for &child in joint.children() {
                if child == start {
                    return true;
                }
                stack.push(child);
            }
        }

        false
    }
}
