//! Stateless builders for the 4x4 matrices fed into shader uniforms.

use cgmath::{InnerSpace, Matrix4, One, Rad, SquareMatrix, Vector3};

/// Builds a homogeneous rotation of `angle` radians around the axis `(x, y, z)`.
///
/// The axis does not need to be normalized. A zero-length axis has no
/// direction to rotate around and yields the identity matrix.
pub fn rotate(angle: f32, x: f32, y: f32, z: f32) -> Matrix4<f32> {
    let axis = Vector3::new(x, y, z);
    if axis.magnitude2() <= ::std::f32::EPSILON {
        return Matrix4::identity();
    }

    Matrix4::from_axis_angle(axis.normalize(), Rad(angle))
}

/// Builds a translation matrix.
#[inline]
pub fn translate(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Builds a right-handed perspective projection with a vertical field of view
/// of `fov` radians.
#[inline]
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    cgmath::perspective(Rad(fov), aspect, near, far)
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Multiplies `matrices` left to right, so `chain(&[a, b, c]) == a * b * c`.
///
/// # Panics
///
/// Panics if `matrices` is empty.
pub fn chain(matrices: &[Matrix4<f32>]) -> Matrix4<f32> {
    assert!(
        !matrices.is_empty(),
        "transform::chain requires at least one matrix."
    );

    matrices
        .iter()
        .fold(Matrix4::one(), |product, m| product * *m)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[should_panic]
    fn chain_nothing() {
        chain(&[]);
    }

    #[test]
    fn zero_axis() {
        assert_eq!(rotate(1.0, 0.0, 0.0, 0.0), Matrix4::identity());
    }
}
