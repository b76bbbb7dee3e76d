//! Free-look camera control: held W/A/S/D keys move, the cursor turns.

use std::collections::HashSet;

use crate::input::Key;
use crate::math::Vector2;
use crate::video::Camera;

use super::CameraParams;

const SENSITIVITY_STEP: f32 = 0.01;
const MAX_PITCH: f32 = 89.0;

pub struct FreeLook {
    params: CameraParams,
    sensitivity: f32,
    yaw: f32,
    pitch: f32,
    last_cursor: Option<Vector2<f32>>,
    pressed: HashSet<Key>,
}

impl FreeLook {
    pub fn new(params: CameraParams) -> Self {
        FreeLook {
            sensitivity: params.sensitivity,
            yaw: params.yaw,
            pitch: params.pitch,
            last_cursor: None,
            pressed: HashSet::new(),
            params,
        }
    }

    #[inline]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Returns the (yaw, pitch) in degrees.
    #[inline]
    pub fn orientation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Records a key press. Returns false if the key was already held, which
    /// is the case for platform key repeats.
    pub fn key_pressed(&mut self, key: Key) -> bool {
        if !self.pressed.insert(key) {
            return false;
        }

        match key {
            Key::Equals | Key::Add => self.adjust_sensitivity(SENSITIVITY_STEP),
            Key::Minus | Key::Subtract => self.adjust_sensitivity(-SENSITIVITY_STEP),
            _ => {}
        }

        true
    }

    pub fn key_released(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    fn adjust_sensitivity(&mut self, delta: f32) {
        // Kept on the 0.01 grid so repeated steps land exactly on the bounds.
        let v = ((self.sensitivity + delta) * 100.0).round() / 100.0;
        if v <= 0.0 || v > 1.0 {
            warn!(
                "Sensitivity {:.2} is out of range (0, 1], reset to {:.2}.",
                v, self.params.sensitivity
            );
            self.sensitivity = self.params.sensitivity;
        } else {
            info!("Sensitivity {:.2}", v);
            self.sensitivity = v;
        }
    }

    /// Turns `camera` by the cursor offset since the previous call. The first
    /// position only becomes the reference.
    pub fn cursor_moved(&mut self, position: Vector2<f32>, camera: &mut Camera) {
        let last = match self.last_cursor.replace(position) {
            Some(last) => last,
            None => return,
        };

        let offset = (position - last) * self.sensitivity;
        self.yaw += offset.x;
        self.pitch = (self.pitch + offset.y).max(-MAX_PITCH).min(MAX_PITCH);
        camera.look(self.yaw, self.pitch);
    }

    /// Applies the held movement keys once.
    pub fn update(&self, camera: &mut Camera) {
        let speed = self.params.speed;
        if self.is_key_down(Key::W) {
            camera.advance(speed);
        }

        if self.is_key_down(Key::S) {
            camera.advance(-speed);
        }

        if self.is_key_down(Key::A) {
            camera.strafe(-speed);
        }

        if self.is_key_down(Key::D) {
            camera.strafe(speed);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sensitivity_wraps_to_default() {
        let mut v = FreeLook::new(CameraParams::default());
        assert!(v.key_pressed(Key::Minus));
        assert!((v.sensitivity() - 0.09).abs() < 1e-5);
        v.key_released(Key::Minus);

        for _ in 0..9 {
            v.key_pressed(Key::Subtract);
            v.key_released(Key::Subtract);
        }

        assert!((v.sensitivity() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn repeats_are_ignored() {
        let mut v = FreeLook::new(CameraParams::default());
        assert!(v.key_pressed(Key::Equals));
        assert!(!v.key_pressed(Key::Equals));
        assert!((v.sensitivity() - 0.11).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut v = FreeLook::new(CameraParams::default());
        let mut camera = Camera::default();
        v.cursor_moved(Vector2::new(0.0, 0.0), &mut camera);
        assert_eq!(camera, Camera::default());

        v.cursor_moved(Vector2::new(0.0, 10_000.0), &mut camera);
        assert_eq!(v.orientation().1, 89.0);
        assert!(camera.front.y > 0.99);
    }

    #[test]
    fn held_keys_move() {
        let mut v = FreeLook::new(CameraParams::default());
        let mut camera = Camera::default();
        v.key_pressed(Key::W);
        v.update(&mut camera);
        assert!((camera.position.z - 2.95).abs() < 1e-5);

        v.key_released(Key::W);
        v.key_pressed(Key::D);
        v.update(&mut camera);
        assert!((camera.position.x - 0.05).abs() < 1e-5);
    }
}
