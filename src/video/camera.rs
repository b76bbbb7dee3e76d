use crate::math::{EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

/// A first-person camera described by its position and the direction it faces.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    /// Unit vector the camera looks along.
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            position: Vector3::new(0.0, 0.0, 3.0),
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

impl Camera {
    /// Returns the look-at matrix from `position` towards `position + front`.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at(eye, eye + self.front, self.up)
    }

    /// Unit vector pointing to the right of the camera.
    pub fn right(&self) -> Vector3<f32> {
        self.front.cross(self.up).normalize()
    }

    /// Moves along `front`, backwards with a negative `distance`.
    pub fn advance(&mut self, distance: f32) {
        self.position += self.front * distance;
    }

    /// Moves along `right()`, to the left with a negative `distance`.
    pub fn strafe(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Points the camera by yaw and pitch in degrees. A yaw of -90 looks down
    /// the negative z axis.
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }
}
