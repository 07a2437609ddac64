use {
    crate::pose,
    hecs::{Entity, World},
    nalgebra as na,
};

/// Handle of a segment stored in [`SegmentRegistry`].
///
/// Handles are generational: once a segment is removed its handle never
/// refers to another segment.
pub type SegmentId = Entity;

/// Elliptical cross-section radii at the base and at the tip of a segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Taper {
    pub width_start: f32,
    pub depth_start: f32,
    pub width_end: f32,
    pub depth_end: f32,
}

impl Taper {
    pub fn new(
        width_start: f32,
        depth_start: f32,
        width_end: f32,
        depth_end: f32,
    ) -> Self {
        Taper {
            width_start,
            depth_start,
            width_end,
            depth_end,
        }
    }

    /// Uniform circular cross-section.
    pub fn uniform(radius: f32) -> Self {
        Taper::new(radius, radius, radius, radius)
    }

    /// Radii `(width, depth)` of the start or end ring.
    pub fn ring(&self, at_end: bool) -> (f32, f32) {
        if at_end {
            (self.width_end, self.depth_end)
        } else {
            (self.width_start, self.depth_start)
        }
    }
}

/// Vertex on the parent's cross-section ring that pins a segment's base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
pub struct AttachVertex {
    /// Ring vertex index in `0..RING_SIDES`.
    pub index: u32,
    /// Pick the ring at the parent's tip instead of its base.
    pub at_end: bool,
}

/// Single rigid tapered sub-body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Base point of a root segment. Ignored when `parent` is set.
    pub anchor: na::Point3<f32>,
    pub direction: na::Vector3<f32>,
    pub length: f32,
    pub taper: Taper,
    pub parent: Option<SegmentId>,
    pub attach: Option<AttachVertex>,
}

impl Segment {
    pub fn root(
        anchor: na::Point3<f32>,
        direction: na::Vector3<f32>,
        length: f32,
        taper: Taper,
    ) -> Self {
        Segment {
            anchor,
            direction,
            length,
            taper,
            parent: None,
            attach: None,
        }
    }

    /// Segment whose base sits on the tip of `parent`.
    pub fn child(
        parent: SegmentId,
        direction: na::Vector3<f32>,
        length: f32,
        taper: Taper,
    ) -> Self {
        Segment {
            anchor: na::Point3::origin(),
            direction,
            length,
            taper,
            parent: Some(parent),
            attach: None,
        }
    }

    pub fn with_attach(mut self, attach: AttachVertex) -> Self {
        self.attach = Some(attach);
        self
    }
}

/// Result of a mutation addressed by [`SegmentId`].
///
/// A stale id is not an error for the animation loop, the caller decides
/// whether it cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome {
    Applied,
    Stale,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Storage of all segments of a skeleton.
pub struct SegmentRegistry {
    world: World,
    len: usize,
}

impl SegmentRegistry {
    pub fn new() -> Self {
        SegmentRegistry {
            world: World::new(),
            len: 0,
        }
    }

    pub fn create(&mut self, segment: Segment) -> SegmentId {
        self.len += 1;
        self.world.spawn((segment,))
    }

    /// Replaces the full state of the segment.
    pub fn update(&mut self, id: SegmentId, segment: Segment) -> Outcome {
        match self.world.get_mut::<Segment>(id) {
            Ok(mut slot) => {
                *slot = segment;
                Outcome::Applied
            }
            Err(_) => Outcome::Stale,
        }
    }

    pub fn remove(&mut self, id: SegmentId) -> Outcome {
        match self.world.despawn(id) {
            Ok(()) => {
                self.len -= 1;
                Outcome::Applied
            }
            Err(hecs::NoSuchEntity) => Outcome::Stale,
        }
    }

    pub fn get(&self, id: SegmentId) -> Option<Segment> {
        self.world.get::<Segment>(id).ok().map(|segment| *segment)
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.world.get::<Segment>(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Snapshot of all live segments.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, Segment)> {
        self.world
            .query::<&Segment>()
            .iter()
            .map(|(id, segment)| (id, *segment))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// World-space base point of the segment.
    /// Returns `None` only if `id` itself is stale.
    pub fn resolve_base_point(&self, id: SegmentId) -> Option<na::Point3<f32>> {
        let segment = self.get(id)?;
        Some(pose::base_point(self, &segment))
    }
}

impl Default for SegmentRegistry {
    fn default() -> Self {
        SegmentRegistry::new()
    }
}
