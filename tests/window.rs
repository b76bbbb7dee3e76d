extern crate openvoxel;

use std::cell::Cell;
use std::rc::Rc;

use openvoxel::errors::Error;
use openvoxel::input::Key;
use openvoxel::math::Vector2;
use openvoxel::video::backends::headless::{Call, Recorder};
use openvoxel::video::{Shader, Texture};
use openvoxel::window::{self, EventQueue, Window, WindowParams, WindowState};

fn headless() -> (Window, EventQueue, Recorder) {
    let queue = EventQueue::new();
    let recorder = Recorder::new();
    let window =
        Window::headless_with(WindowParams::default(), queue.clone(), recorder.clone()).unwrap();
    (window, queue, recorder)
}

#[test]
fn open() {
    let (window, _, recorder) = headless();
    assert_eq!(window.dimensions(), Vector2::new(800, 600));
    assert_eq!(window.version().unwrap(), "Headless");
    assert_eq!(window.state(), WindowState::Open);
    assert!(window.time() >= 0.0);
    assert_eq!(
        recorder.calls(),
        vec![Call::SetViewport(Vector2::new(800, 600))]
    );

    window.close();
}

#[test]
fn escape() {
    let (mut window, queue, _) = headless();
    window.poll_events().unwrap();
    assert!(!window.should_close());

    queue.tap(Key::Escape);
    window.poll_events().unwrap();
    assert!(window.should_close());
    assert_eq!(window.state(), WindowState::CloseRequested);

    window.swap_buffers().unwrap();
    window.close();
}

#[test]
fn close_button() {
    let (mut window, queue, _) = headless();
    queue.close();
    assert_eq!(queue.len(), 1);

    window.poll_events().unwrap();
    assert!(queue.is_empty());
    assert!(window.should_close());
    window.close();
}

#[test]
fn wireframe() {
    let (mut window, queue, _) = headless();
    assert!(!window.scene().wireframe());

    queue.tap(Key::F10);
    window.poll_events().unwrap();
    assert!(window.scene().wireframe());

    // Repeated presses while the key is held do nothing.
    queue.press(Key::F10);
    queue.press(Key::F10);
    queue.press(Key::F10);
    window.poll_events().unwrap();
    assert!(!window.scene().wireframe());

    queue.release(Key::F10);
    queue.tap(Key::F10);
    window.poll_events().unwrap();
    assert!(window.scene().wireframe());
    window.close();
}

#[test]
fn resize() {
    let (mut window, queue, recorder) = headless();
    recorder.clear();

    queue.resize(1024, 768);
    window.poll_events().unwrap();

    assert_eq!(window.dimensions(), Vector2::new(1024, 768));
    assert_eq!(
        recorder.calls(),
        vec![Call::SetViewport(Vector2::new(1024, 768))]
    );
    window.close();
}

#[test]
fn sensitivity() {
    let (mut window, queue, _) = headless();
    assert!((window.controller().sensitivity() - 0.1).abs() < 1e-6);

    queue.tap(Key::Equals);
    queue.tap(Key::Add);
    window.poll_events().unwrap();
    assert!((window.controller().sensitivity() - 0.12).abs() < 1e-6);

    for _ in 0..12 {
        queue.tap(Key::Minus);
    }

    window.poll_events().unwrap();
    assert!((window.controller().sensitivity() - 0.1).abs() < 1e-6);
    window.close();
}

#[test]
fn free_look() {
    let (mut window, queue, _) = headless();
    let front = window.scene().camera().front;

    queue.move_cursor(400.0, 300.0);
    window.poll_events().unwrap();
    assert_eq!(window.scene().camera().front, front);

    queue.move_cursor(410.0, 300.0);
    window.poll_events().unwrap();
    assert_eq!(window.controller().orientation(), (-89.0, 0.0));
    assert!(window.scene().camera().front.x > 0.0);

    queue.move_cursor(410.0, 320.0);
    window.poll_events().unwrap();
    assert!(window.scene().camera().front.y > 0.0);
    window.close();
}

#[test]
fn movement() {
    let (mut window, queue, _) = headless();
    let z = window.scene().camera().position.z;

    queue.press(Key::W);
    window.poll_events().unwrap();
    window.poll_events().unwrap();
    assert!((window.scene().camera().position.z - (z - 0.1)).abs() < 1e-5);

    queue.release(Key::W);
    window.poll_events().unwrap();
    window.poll_events().unwrap();
    assert!((window.scene().camera().position.z - (z - 0.1)).abs() < 1e-5);
    window.close();
}

#[test]
fn run_until_closed() {
    let (window, _, recorder) = headless();
    let frames = Rc::new(Cell::new(0));

    let counter = frames.clone();
    window::run(window, move |w| {
        counter.set(counter.get() + 1);
        w.scene().clear()?;
        if counter.get() == 3 {
            w.request_close();
        }

        Ok(())
    })
    .unwrap();

    assert_eq!(frames.get(), 3);
    let clears = recorder
        .calls()
        .into_iter()
        .filter(|v| match v {
            Call::Clear(..) => true,
            _ => false,
        })
        .count();
    assert_eq!(clears, 3);
}

#[test]
fn run_fails() {
    let (window, queue, _) = headless();
    queue.press(Key::A);

    let result = window::run(window, |_| Err(Error::NotImplemented));
    match result {
        Err(Error::NotImplemented) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn resources_outlive_window() {
    let (window, _, recorder) = headless();
    let video = window.video().clone();

    let mut shader = Shader::new(&video)
        .vertex_shader("void main() {}")
        .fragment_shader("void main() {}");
    shader.link().unwrap();

    let pixels = vec![0xFF; 4 * 4 * 4];
    let texture = Texture::from_data(
        &video,
        &openvoxel::video::TextureData {
            width: 4,
            height: 4,
            pixels,
        },
    )
    .unwrap();

    window.close();
    assert!(video.is_discarded());
    recorder.clear();

    drop(texture);
    drop(shader);
    assert!(recorder.calls().is_empty());
}

#[test]
fn drop_without_close() {
    let (window, _, _) = headless();
    let video = window.video().clone();
    drop(window);
    assert!(video.is_discarded());
}
