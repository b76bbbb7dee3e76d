extern crate image;
extern crate openvoxel;

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use openvoxel::errors::Error;
use openvoxel::math::Color;
use openvoxel::video::backends::headless::{Call, Recorder};
use openvoxel::video::{DrawCall, MeshIndex, Scene, Shader, Texture, VertexLayout, VideoContext};

#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

#[rustfmt::skip]
const QUAD: [f32; 20] = [
     0.5,  0.5, 0.0,  1.0, 1.0,
     0.5, -0.5, 0.0,  1.0, 0.0,
    -0.5, -0.5, 0.0,  0.0, 0.0,
    -0.5,  0.5, 0.0,  0.0, 1.0,
];

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

#[test]
fn draw_arrays() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut scene = Scene::new(&video);

    scene.add_vertices(&TRIANGLE, VertexLayout::Position).unwrap();
    assert_eq!(scene.layout(), Some(VertexLayout::Position));
    scene.draw(None).unwrap();

    assert_eq!(
        recorder.draws(),
        vec![DrawCall {
            texture: None,
            wireframe: false,
            index: MeshIndex::Arrays(3),
        }]
    );
}

#[test]
fn draw_elements() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut scene = Scene::new(&video);

    scene
        .add_indexed_triangles(&QUAD, &[0, 1, 3, 1, 2, 3], VertexLayout::PositionTexcoord)
        .unwrap();
    scene.set_wireframe(true);
    scene.draw(None).unwrap();

    // Replacing the vertices switches back to plain triangles.
    scene.add_vertices(&QUAD[..15], VertexLayout::PositionTexcoord).unwrap();
    scene.draw(None).unwrap();

    let draws = recorder.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].index, MeshIndex::Elements(6));
    assert!(draws[0].wireframe);
    assert_eq!(draws[1].index, MeshIndex::Arrays(3));
}

#[test]
fn index_out_of_range() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut scene = Scene::new(&video);

    scene.add_vertices(&TRIANGLE, VertexLayout::Position).unwrap();
    recorder.clear();

    match scene.add_indexed_triangles(&TRIANGLE, &[0, 1, 7], VertexLayout::Position) {
        Err(Error::IndexOutOfRange {
            index: 7,
            vertices: 3,
        }) => {}
        other => panic!("unexpected {:?}", other),
    }

    // The rejected upload never reaches the backend.
    assert!(recorder.calls().is_empty());
    scene.draw(None).unwrap();
    assert_eq!(recorder.draws()[0].index, MeshIndex::Arrays(3));
}

#[test]
fn draw_with_shader() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut shader = Shader::new(&video)
        .vertex_shader("void main() { gl_Position = vec4(0.0); }")
        .fragment_shader("out vec4 c; void main() { c = vec4(1.0); }");
    shader.link().unwrap();

    let mut scene = Scene::new(&video);
    scene.add_vertices(&TRIANGLE, VertexLayout::Position).unwrap();
    recorder.clear();
    scene.draw(Some(&shader)).unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 2);
    match calls[0] {
        Call::BindShader(_) => {}
        ref other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn draw_nothing() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut scene = Scene::new(&video);

    scene.draw(None).unwrap();
    scene.add_vertices(&[], VertexLayout::Position).unwrap();
    scene.draw(None).unwrap();

    assert!(recorder.draws().is_empty());
}

#[test]
fn vertex_layout_mismatch() {
    let video = VideoContext::headless();
    let mut scene = Scene::new(&video);

    match scene.add_vertices(&TRIANGLE[..8], VertexLayout::Position) {
        Err(Error::VertexLayout { len: 8, stride: 3 }) => {}
        other => panic!("unexpected {:?}", other),
    }

    match scene.add_vertices(&TRIANGLE, VertexLayout::PositionColorTexcoord) {
        Err(Error::VertexLayout { len: 9, stride: 8 }) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(scene.layout(), None);
}

#[test]
fn clear() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut scene = Scene::new(&video);

    assert_eq!(scene.clear_color(), Color::sky_blue());
    scene.clear().unwrap();

    scene.set_clear_color(Color::black());
    scene.set_depth_test(false);
    scene.clear().unwrap();

    assert_eq!(
        recorder.calls(),
        vec![
            Call::Clear(Some(Color::sky_blue()), true),
            Call::Clear(Some(Color::black()), false),
        ]
    );
}

#[test]
fn textures() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut scene = Scene::new(&video);
    scene.add_vertices(&QUAD, VertexLayout::PositionTexcoord).unwrap();

    let texture = Texture::from_bytes(&video, &png(4, 4)).unwrap();
    scene.attach_texture(&texture);
    assert_eq!(scene.texture(), Some(texture.handle()));
    scene.draw(None).unwrap();
    assert_eq!(recorder.draws()[0].texture, Some(texture.handle()));

    scene.detach_texture();
    scene.draw(None).unwrap();
    assert_eq!(recorder.draws()[1].texture, None);

    scene.attach_texture(&texture);
    let handle = texture.handle();
    drop(texture);

    match scene.draw(None) {
        Err(Error::TextureHandleInvalid(v)) => assert_eq!(v, handle),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn drop_releases_mesh() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());

    {
        let mut scene = Scene::new(&video);
        scene.add_vertices(&TRIANGLE, VertexLayout::Position).unwrap();
        scene.add_vertices(&TRIANGLE, VertexLayout::Position).unwrap();
    }

    let calls = recorder.calls();
    let created: Vec<_> = calls
        .iter()
        .filter_map(|v| match *v {
            Call::CreateMesh(h) => Some(h),
            _ => None,
        })
        .collect();

    assert_eq!(created.len(), 1);
    assert_eq!(calls.last(), Some(&Call::DeleteMesh(created[0])));
}
