use nalgebra as na;

/// Rotates `v` about `axis` by `angle` radians (Rodrigues' formula).
///
/// `axis` is expected to be unit length. A non-unit axis silently scales the
/// result and a zero axis degenerates to `v * cos(angle)`.
pub fn rotate(
    v: &na::Vector3<f32>,
    axis: &na::Vector3<f32>,
    angle: f32,
) -> na::Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}

/// Returns unit vector pointing along `v`.
/// Zero vector is returned unchanged.
pub fn normalize(v: &na::Vector3<f32>) -> na::Vector3<f32> {
    let len = v.norm();
    if len > 0.0 {
        v / len
    } else {
        *v
    }
}
