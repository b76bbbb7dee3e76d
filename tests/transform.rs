extern crate openvoxel;

use openvoxel::math::transform::{
    chain, degrees_to_radians, perspective, radians_to_degrees, rotate, translate,
};
use openvoxel::math::{Matrix4, SquareMatrix, Vector4};

fn assert_close(a: Vector4<f32>, b: Vector4<f32>) {
    let d = a - b;
    assert!(
        d.x.abs() < 1e-4 && d.y.abs() < 1e-4 && d.z.abs() < 1e-4 && d.w.abs() < 1e-4,
        "{:?} != {:?}",
        a,
        b
    );
}

#[test]
fn chain_single() {
    let m = translate(1.0, 2.0, 3.0);
    assert_eq!(chain(&[m]), m);
}

#[test]
fn chain_multiplies_in_order() {
    let a = translate(1.0, -2.0, 0.5);
    let b = rotate(0.7, 0.0, 1.0, 0.0);
    let c = perspective(1.2, 4.0 / 3.0, 0.1, 100.0);
    let p = Vector4::new(0.3, -1.2, -4.0, 1.0);

    assert_close(chain(&[a, b, c]) * p, a * (b * (c * p)));
}

#[test]
#[should_panic]
fn chain_empty() {
    chain(&[]);
}

#[test]
fn angles() {
    for &x in &[0.0f32, 0.5, -1.25, 3.14159, 10.0] {
        assert!((degrees_to_radians(radians_to_degrees(x)) - x).abs() < 1e-5);
    }

    assert!((degrees_to_radians(180.0) - ::std::f32::consts::PI).abs() < 1e-6);
    assert!((radians_to_degrees(::std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
}

#[test]
fn rotate_nothing() {
    let p = Vector4::new(1.0, 2.0, 3.0, 1.0);
    for axis in &[(1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)] {
        assert_close(rotate(0.0, axis.0, axis.1, axis.2) * p, p);
    }

    assert_eq!(rotate(1.0, 0.0, 0.0, 0.0), Matrix4::identity());
}

#[test]
fn rotate_quarter_turn() {
    let quarter = degrees_to_radians(90.0);
    let x = Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert_close(rotate(quarter, 0.0, 0.0, 1.0) * x, Vector4::new(0.0, 1.0, 0.0, 1.0));
    // The axis is normalized.
    assert_close(rotate(quarter, 0.0, 0.0, 5.0) * x, Vector4::new(0.0, 1.0, 0.0, 1.0));
}

#[test]
fn translate_points() {
    let p = translate(1.0, 2.0, 3.0) * Vector4::new(1.0, 1.0, 1.0, 1.0);
    assert_close(p, Vector4::new(2.0, 3.0, 4.0, 1.0));

    // Directions are not affected.
    let v = translate(1.0, 2.0, 3.0) * Vector4::new(1.0, 1.0, 1.0, 0.0);
    assert_close(v, Vector4::new(1.0, 1.0, 1.0, 0.0));
}

#[test]
fn perspective_near_plane() {
    let m = perspective(degrees_to_radians(90.0), 1.0, 1.0, 10.0);
    let p = m * Vector4::new(0.0, 0.0, -1.0, 1.0);
    assert!((p.z / p.w + 1.0).abs() < 1e-5);

    let p = m * Vector4::new(0.0, 0.0, -10.0, 1.0);
    assert!((p.z / p.w - 1.0).abs() < 1e-5);
}
