use nalgebra as na;

/// Camera circling around a target at fixed height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub radius: f32,
    pub height: f32,
    /// Angular speed in radians per unit of animation time.
    pub speed: f32,
    pub target: na::Point3<f32>,
}

impl OrbitCamera {
    pub fn eye(&self, time: f32) -> na::Point3<f32> {
        let (sin, cos) = (time * self.speed).sin_cos();
        na::Point3::new(cos * self.radius, self.height, sin * self.radius)
    }

    /// World to view transform at `time`.
    pub fn view(&self, time: f32) -> na::Isometry3<f32> {
        na::Isometry3::look_at_rh(
            &self.eye(time),
            &self.target,
            &na::Vector3::y(),
        )
    }
}
