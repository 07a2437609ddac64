use {
    animate::{AttachVertex, JointDef, RigConfig, SegmentDef, Taper},
    std::f32::consts::PI,
};

fn segment(
    name: &str,
    parent: Option<&str>,
    direction: [f32; 3],
    length: f32,
    [width_start, depth_start, width_end, depth_end]: [f32; 4],
) -> SegmentDef {
    SegmentDef {
        name: name.to_owned(),
        anchor: [0.0; 3],
        direction,
        length,
        taper: Taper::new(width_start, depth_start, width_end, depth_end),
        parent: parent.map(str::to_owned),
        attach: None,
    }
}

fn attached(mut def: SegmentDef, index: u32, at_end: bool) -> SegmentDef {
    def.attach = Some(AttachVertex { index, at_end });
    def
}

fn joint(
    segment: &str,
    axis: [f32; 3],
    (min, max): (f32, f32),
    (speed, offset): (f32, f32),
) -> JointDef {
    JointDef {
        segment: segment.to_owned(),
        axis,
        base_dir: None,
        min,
        max,
        speed,
        offset,
        children: Vec::new(),
    }
}

#[rustfmt::skip]
fn body() -> Vec<SegmentDef> {
    vec![
        segment("lower_torso", None, [0.0, 1.0, 0.0], 0.6, [0.25, 0.2, 0.32, 0.24]),
        segment("upper_torso", Some("lower_torso"), [0.0, 1.0, 0.0], 0.6, [0.32, 0.24, 0.45, 0.26]),
        segment("neck", Some("upper_torso"), [0.0, 1.0, 0.0], 0.3, [0.15, 0.15, 0.15, 0.15]),
        segment("head_lower", Some("neck"), [0.0, 1.0, 0.0], 0.25, [0.24, 0.22, 0.26, 0.23]),
        segment("head_upper", Some("head_lower"), [0.0, 1.0, 0.0], 0.2, [0.26, 0.23, 0.28, 0.24]),
        attached(segment("r_upper_arm", Some("upper_torso"), [0.8, -0.2, 0.0], 0.8, [0.15, 0.15, 0.12, 0.12]), 0, true),
        segment("r_lower_arm", Some("r_upper_arm"), [0.7, -0.3, 0.0], 0.7, [0.12, 0.12, 0.1, 0.1]),
        segment("r_hand", Some("r_lower_arm"), [0.4, 0.0, 0.0], 0.15, [0.18, 0.04, 0.15, 0.03]),
        segment("r_fingers", Some("r_hand"), [0.35, 0.0, 0.0], 0.12, [0.15, 0.025, 0.12, 0.02]),
        attached(segment("l_upper_arm", Some("upper_torso"), [-0.8, -0.2, 0.0], 0.8, [0.15, 0.15, 0.12, 0.12]), 3, true),
        segment("l_lower_arm", Some("l_upper_arm"), [-0.7, -0.3, 0.0], 0.7, [0.12, 0.12, 0.1, 0.1]),
        segment("l_hand", Some("l_lower_arm"), [-0.4, 0.0, 0.0], 0.15, [0.18, 0.04, 0.15, 0.03]),
        segment("l_fingers", Some("l_hand"), [-0.35, 0.0, 0.0], 0.12, [0.15, 0.025, 0.12, 0.02]),
        attached(segment("r_thigh", Some("lower_torso"), [0.1, -1.0, 0.0], 0.9, [0.18, 0.18, 0.15, 0.15]), 0, false),
        segment("r_shin", Some("r_thigh"), [0.0, -1.0, 0.1], 0.9, [0.15, 0.15, 0.12, 0.12]),
        segment("r_foot", Some("r_shin"), [0.0, -0.05, 0.5], 0.18, [0.13, 0.1, 0.12, 0.06]),
        segment("r_toes", Some("r_foot"), [0.0, 0.02, 0.6], 0.14, [0.12, 0.05, 0.1, 0.04]),
        attached(segment("l_thigh", Some("lower_torso"), [-0.1, -1.0, 0.0], 0.9, [0.18, 0.18, 0.15, 0.15]), 3, false),
        segment("l_shin", Some("l_thigh"), [0.0, -1.0, 0.1], 0.9, [0.15, 0.15, 0.12, 0.12]),
        segment("l_foot", Some("l_shin"), [0.0, -0.05, 0.5], 0.18, [0.13, 0.1, 0.12, 0.06]),
        segment("l_toes", Some("l_foot"), [0.0, 0.02, 0.6], 0.14, [0.12, 0.05, 0.1, 0.04]),
    ]
}

fn limbs(left_hip_axis: [f32; 3]) -> Vec<JointDef> {
    let x = [1.0, 0.0, 0.0];
    let y = [0.0, 1.0, 0.0];
    let z = [0.0, 0.0, 1.0];

    vec![
        joint("neck", y, (-0.3, 0.3), (0.5, 0.0)),
        joint("r_upper_arm", z, (-0.4, 0.6), (0.6, 0.0)),
        joint("r_lower_arm", z, (0.1, 2.0), (0.7, PI)),
        joint("r_hand", x, (-0.2, 0.3), (0.8, 0.5)),
        joint("l_upper_arm", z, (-0.4, 0.6), (0.6, PI)),
        joint("l_lower_arm", z, (-2.0, -0.1), (0.7, 0.0)),
        joint("l_hand", x, (-0.3, 0.2), (0.8, 2.5)),
        joint("r_thigh", x, (-0.3, 0.5), (0.55, 0.0)),
        joint("r_shin", x, (-1.8, -0.1), (0.65, 0.3)),
        joint("r_foot", x, (-0.2, 0.3), (0.75, 1.0)),
        joint("l_thigh", left_hip_axis, (-0.3, 0.5), (0.55, PI)),
        joint("l_shin", x, (-1.8, -0.1), (0.65, PI + 0.3)),
        joint("l_foot", x, (-0.2, 0.3), (0.75, PI + 1.0)),
    ]
}

/// Body with every joint swinging independently from its rest pose.
pub fn standing() -> RigConfig {
    RigConfig {
        segments: body(),
        joints: limbs([1.0, 0.0, 0.0]),
    }
}

/// Body with hip joints carrying knees and ankles.
///
/// Dependent lists and the zero left hip axis are kept exactly as authored,
/// they refer past the leg they were meant for.
pub fn walking() -> RigConfig {
    let mut joints = limbs([0.0, 0.0, 0.0]);
    joints[7].children = vec![10, 11];
    joints[8].children = vec![11];
    joints[10].children = vec![13, 14];
    joints[11].children = vec![14];

    RigConfig {
        segments: body(),
        joints,
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        animate::{math::rotate, TopologyIssue},
        approx::assert_relative_eq,
        nalgebra as na,
    };

    #[test]
    fn presets_build() {
        for config in &[standing(), walking()] {
            let rig = config.build().unwrap();
            assert_eq!(rig.segments.len(), 21);
            assert_eq!(rig.joints.len(), 13);
        }
    }

    #[test]
    fn standing_is_consistent() {
        let rig = standing().build().unwrap();
        assert!(rig.validate().is_empty());
    }

    #[test]
    fn walking_reports_dangling_dependents() {
        let rig = walking().build().unwrap();
        assert_eq!(
            rig.validate(),
            vec![
                TopologyIssue::DanglingChild { joint: 10, child: 13 },
                TopologyIssue::DanglingChild { joint: 10, child: 14 },
                TopologyIssue::DanglingChild { joint: 11, child: 14 },
            ]
        );
    }

    #[test]
    fn shoulders_attach_to_torso_ring() {
        let rig = standing().build().unwrap();
        let right = rig.segment_id("r_upper_arm").unwrap();
        let left = rig.segment_id("l_upper_arm").unwrap();

        let right = rig.segments.resolve_base_point(right).unwrap();
        let left = rig.segments.resolve_base_point(left).unwrap();
        assert_relative_eq!(right.x, 0.45, epsilon = 1e-5);
        assert_relative_eq!(right.y, 1.2, epsilon = 1e-5);
        assert_relative_eq!(left.x, -0.45, epsilon = 1e-5);
        assert_relative_eq!(left.y, 1.2, epsilon = 1e-5);
    }

    #[test]
    fn zero_hip_axis_only_scales_carried_direction() {
        let mut rig = walking().build().unwrap();
        let time = 1.3;
        let _ = rig.update(time);

        let right_hip = rig.joints.joint(7).unwrap().angle(time);
        let left_hip = rig.joints.joint(10).unwrap().angle(time);
        let carried = rotate(
            &na::Vector3::new(-0.1, -1.0, 0.0),
            &na::Vector3::x(),
            right_hip,
        );

        let thigh = rig.segment_id("l_thigh").unwrap();
        let direction = rig.segments.get(thigh).unwrap().direction;
        let expected = carried * left_hip.cos();
        assert_relative_eq!(direction.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(direction.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(direction.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn standing_joints_swing_from_rest() {
        let mut rig = standing().build().unwrap();
        let time = 2.0;
        let _ = rig.update(time);
        let _ = rig.update(time);

        let shin = rig.segment_id("r_shin").unwrap();
        let knee = rig.joints.joint(8).unwrap();
        let expected = rotate(
            &na::Vector3::new(0.0, -1.0, 0.1),
            &na::Vector3::x(),
            knee.angle(time),
        );
        let direction = rig.segments.get(shin).unwrap().direction;
        assert_relative_eq!(direction.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(direction.z, expected.z, epsilon = 1e-5);
    }
}
