extern crate openvoxel;

use openvoxel::math::*;
use openvoxel::video::Camera;

fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
    (a - b).magnitude() < 1e-4
}

#[test]
fn default_view() {
    let camera = Camera::default();
    let p = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!(close(p.truncate(), Vector3::new(0.0, 0.0, -3.0)));
    assert!(close(camera.right(), Vector3::new(1.0, 0.0, 0.0)));
}

#[test]
fn look() {
    let mut camera = Camera::default();
    camera.look(-90.0, 0.0);
    assert!(close(camera.front, Vector3::new(0.0, 0.0, -1.0)));

    camera.look(0.0, 0.0);
    assert!(close(camera.front, Vector3::new(1.0, 0.0, 0.0)));

    camera.look(-90.0, 90.0);
    assert!(close(camera.front, Vector3::new(0.0, 1.0, 0.0)));
}

#[test]
fn movement() {
    let mut camera = Camera::default();
    camera.advance(1.0);
    assert!(close(camera.position, Vector3::new(0.0, 0.0, 2.0)));

    camera.advance(-2.0);
    assert!(close(camera.position, Vector3::new(0.0, 0.0, 4.0)));

    camera.strafe(0.5);
    assert!(close(camera.position, Vector3::new(0.5, 0.0, 4.0)));

    camera.strafe(-1.0);
    assert!(close(camera.position, Vector3::new(-0.5, 0.0, 4.0)));
}
