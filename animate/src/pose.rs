use {
    crate::{
        math::normalize,
        segment::{Segment, SegmentId, SegmentRegistry},
    },
    nalgebra as na,
    std::f32::consts::TAU,
};

/// Number of vertices on a segment's cross-section ring.
pub const RING_SIDES: u32 = 6;

/// Orthonormal basis of a segment's cross-section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub right: na::Vector3<f32>,
    pub up: na::Vector3<f32>,
    pub forward: na::Vector3<f32>,
}

impl Frame {
    pub fn from_direction(direction: &na::Vector3<f32>) -> Self {
        let forward = normalize(direction);

        // World up is almost collinear with the segment, cross product
        // would vanish.
        if forward.y.abs() > 0.999 {
            return Frame {
                right: na::Vector3::x(),
                up: na::Vector3::new(0.0, 0.0, forward.y.signum()),
                forward,
            };
        }

        let right = normalize(&na::Vector3::y().cross(&forward));
        let up = forward.cross(&right);
        Frame { right, up, forward }
    }
}

/// Resolves world-space base point of the segment by walking parent chain.
///
/// Dangling parents fall back to the segment's own anchor.
pub fn base_point(
    registry: &SegmentRegistry,
    segment: &Segment,
) -> na::Point3<f32> {
    resolve(registry, segment, 0)
}

fn resolve(
    registry: &SegmentRegistry,
    segment: &Segment,
    depth: usize,
) -> na::Point3<f32> {
    let parent_id = match segment.parent {
        None => return segment.anchor,
        Some(parent_id) => parent_id,
    };

    let parent = match registry.get(parent_id) {
        Some(parent) => parent,
        None => {
            tracing::trace!("Parent {:?} is gone, using anchor", parent_id);
            return segment.anchor;
        }
    };

    // Longer chain than there are segments means parents form a loop.
    if depth >= registry.len() {
        tracing::warn!(
            "Parent chain of segment {:?} is cyclic, using anchor",
            parent_id
        );
        return segment.anchor;
    }

    let parent_base = resolve(registry, &parent, depth + 1);
    match segment.attach {
        None => parent_base + normalize(&parent.direction) * parent.length,
        Some(attach) => {
            ring_vertex(&parent, &parent_base, attach.index, attach.at_end)
        }
    }
}

fn ring_vertex(
    segment: &Segment,
    base: &na::Point3<f32>,
    index: u32,
    at_end: bool,
) -> na::Point3<f32> {
    let frame = Frame::from_direction(&segment.direction);
    let (width, depth) = segment.taper.ring(at_end);
    let offset = if at_end { segment.length } else { 0.0 };

    let angle = index as f32 * TAU / RING_SIDES as f32;
    let (z, x) = angle.sin_cos();

    base + frame.right * (x * width)
        + frame.up * (z * depth)
        + frame.forward * offset
}

/// World position of ring vertex `index` at the segment's base or tip.
pub fn vertex_position(
    registry: &SegmentRegistry,
    id: SegmentId,
    index: u32,
    at_end: bool,
) -> Option<na::Point3<f32>> {
    let segment = registry.get(id)?;
    let base = base_point(registry, &segment);
    Some(ring_vertex(&segment, &base, index, at_end))
}

/// World position of the segment's tip.
pub fn tip_point(
    registry: &SegmentRegistry,
    id: SegmentId,
) -> Option<na::Point3<f32>> {
    let segment = registry.get(id)?;
    let base = base_point(registry, &segment);
    Some(base + normalize(&segment.direction) * segment.length)
}

/// Maps unit segment space (ring in XZ, extrusion along Y from 0 to 1)
/// into world space.
pub fn model_matrix(
    registry: &SegmentRegistry,
    id: SegmentId,
) -> Option<na::Matrix4<f32>> {
    let segment = registry.get(id)?;
    let base = base_point(registry, &segment);
    let frame = Frame::from_direction(&segment.direction);
    let extrusion = frame.forward * segment.length;

    Some(na::Matrix4::from_columns(&[
        frame.right.to_homogeneous(),
        extrusion.to_homogeneous(),
        frame.up.to_homogeneous(),
        base.to_homogeneous(),
    ]))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::segment::{AttachVertex, Taper},
        approx::assert_relative_eq,
    };

    fn assert_point_eq(a: na::Point3<f32>, b: na::Point3<f32>) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    fn lower_torso() -> Segment {
        Segment::root(
            na::Point3::new(0.5, -1.0, 2.0),
            na::Vector3::y(),
            0.6,
            Taper::new(0.25, 0.2, 0.32, 0.24),
        )
    }

    #[test]
    fn root_resolves_to_anchor() {
        let mut registry = SegmentRegistry::new();
        let id = registry.create(lower_torso());
        assert_eq!(
            registry.resolve_base_point(id),
            Some(na::Point3::new(0.5, -1.0, 2.0))
        );
    }

    #[test]
    fn child_sits_on_parent_tip() {
        let mut registry = SegmentRegistry::new();
        let mut root = lower_torso();
        root.direction = na::Vector3::new(0.0, 2.0, 0.0);
        let root = registry.create(root);
        let upper = registry.create(Segment::child(
            root,
            na::Vector3::new(0.8, -0.2, 0.0),
            0.8,
            Taper::uniform(0.15),
        ));
        let forearm = registry.create(Segment::child(
            upper,
            na::Vector3::x(),
            0.7,
            Taper::uniform(0.1),
        ));

        let elbow = na::Point3::new(0.5, -0.4, 2.0);
        assert_point_eq(registry.resolve_base_point(upper).unwrap(), elbow);

        let dir = normalize(&na::Vector3::new(0.8, -0.2, 0.0));
        assert_point_eq(
            registry.resolve_base_point(forearm).unwrap(),
            elbow + dir * 0.8,
        );
    }

    #[test]
    fn missing_parent_falls_back_to_anchor() {
        let mut registry = SegmentRegistry::new();
        let root = registry.create(lower_torso());
        let mut neck =
            Segment::child(root, na::Vector3::y(), 0.3, Taper::uniform(0.15));
        neck.anchor = na::Point3::new(7.0, 8.0, 9.0);
        let neck = registry.create(neck);
        let _ = registry.remove(root);

        assert_eq!(
            registry.resolve_base_point(neck),
            Some(na::Point3::new(7.0, 8.0, 9.0))
        );
    }

    #[test]
    fn attach_vertex_on_start_ring() {
        let mut registry = SegmentRegistry::new();
        let root = registry.create(lower_torso());
        let thigh = registry.create(
            Segment::child(
                root,
                na::Vector3::new(0.1, -1.0, 0.0),
                0.9,
                Taper::uniform(0.18),
            )
            .with_attach(AttachVertex {
                index: 0,
                at_end: false,
            }),
        );

        // Vertical parent uses the fixed (x, +z) basis.
        assert_point_eq(
            registry.resolve_base_point(thigh).unwrap(),
            na::Point3::new(0.75, -1.0, 2.0),
        );

        let opposite = vertex_position(&registry, root, 3, false).unwrap();
        assert_point_eq(opposite, na::Point3::new(0.25, -1.0, 2.0));
    }

    #[test]
    fn attach_vertex_on_end_ring() {
        let mut registry = SegmentRegistry::new();
        let root = registry.create(lower_torso());
        let arm = registry.create(
            Segment::child(root, na::Vector3::x(), 0.8, Taper::uniform(0.15))
                .with_attach(AttachVertex {
                    index: 0,
                    at_end: true,
                }),
        );

        assert_point_eq(
            registry.resolve_base_point(arm).unwrap(),
            na::Point3::new(0.82, -0.4, 2.0),
        );
    }

    #[test]
    fn attach_vertex_on_tilted_parent() {
        let mut registry = SegmentRegistry::new();
        let arm = registry.create(Segment::root(
            na::Point3::new(1.0, 2.0, 3.0),
            na::Vector3::new(2.0, 0.0, 0.0),
            0.8,
            Taper::new(0.1, 0.2, 0.3, 0.4),
        ));
        let hand = registry.create(
            Segment::child(arm, na::Vector3::y(), 0.2, Taper::uniform(0.05))
                .with_attach(AttachVertex {
                    index: 1,
                    at_end: true,
                }),
        );

        // Along +x: right = y × x = -z, up = x × right = +y.
        let frame = Frame::from_direction(&na::Vector3::x());
        assert_eq!(frame.right, na::Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(frame.up, na::Vector3::y());

        // Vertex 1 sits at 60 degrees: cos * width_end along right,
        // sin * depth_end along up, pushed to the tip.
        let half_sqrt3 = 3.0f32.sqrt() / 2.0;
        assert_point_eq(
            registry.resolve_base_point(hand).unwrap(),
            na::Point3::new(1.8, 2.0 + half_sqrt3 * 0.4, 3.0 - 0.5 * 0.3),
        );

        // Along +z: right = y × z = +x.
        let leg = registry.create(Segment::root(
            na::Point3::origin(),
            na::Vector3::z(),
            0.5,
            Taper::new(0.1, 0.2, 0.3, 0.4),
        ));
        assert_point_eq(
            vertex_position(&registry, leg, 0, false).unwrap(),
            na::Point3::new(0.1, 0.0, 0.0),
        );
        assert_point_eq(
            vertex_position(&registry, leg, 2, true).unwrap(),
            na::Point3::new(-0.5 * 0.3, half_sqrt3 * 0.4, 0.5),
        );
    }

    #[test]
    fn frame_is_orthonormal() {
        for direction in &[
            na::Vector3::new(0.8, -0.2, 0.0),
            na::Vector3::new(0.0, -0.05, 0.5),
            na::Vector3::new(0.0, -3.0, 0.0),
        ] {
            let frame = Frame::from_direction(direction);
            assert_relative_eq!(frame.right.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(frame.up.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(frame.right.dot(&frame.up), 0.0, epsilon = 1e-5);
            assert_relative_eq!(
                frame.right.dot(&frame.forward),
                0.0,
                epsilon = 1e-5
            );
        }

        let down = Frame::from_direction(&na::Vector3::new(0.0, -3.0, 0.0));
        assert_eq!(down.right, na::Vector3::x());
        assert_eq!(down.up, na::Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn model_matrix_maps_unit_segment() {
        let mut registry = SegmentRegistry::new();
        let root = registry.create(lower_torso());
        let matrix = model_matrix(&registry, root).unwrap();

        let tip = matrix.transform_point(&na::Point3::new(0.0, 1.0, 0.0));
        assert_point_eq(tip, tip_point(&registry, root).unwrap());

        let vertex = matrix.transform_point(&na::Point3::new(1.0, 0.0, 0.0));
        assert_point_eq(vertex, na::Point3::new(1.5, -1.0, 2.0));
    }

    #[test]
    fn cyclic_parents_do_not_overflow() {
        let mut registry = SegmentRegistry::new();
        let a = registry.create(lower_torso());
        let b = registry.create(Segment::child(
            a,
            na::Vector3::y(),
            1.0,
            Taper::uniform(0.1),
        ));

        let mut looped = lower_torso();
        looped.parent = Some(b);
        let _ = registry.update(a, looped);

        assert!(registry.resolve_base_point(b).is_some());
    }
}
