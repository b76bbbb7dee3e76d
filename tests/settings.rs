extern crate openvoxel;

use std::fs;

use openvoxel::errors::Error;
use openvoxel::math::Vector2;
use openvoxel::settings::Settings;
use openvoxel::window::WindowParams;

#[test]
fn defaults() {
    let settings = Settings::default();
    assert_eq!(settings.window, WindowParams::default());
    assert_eq!(settings.window.size, Vector2::new(800, 600));
    assert_eq!(settings.window.camera.speed, 0.05);
    assert_eq!(settings.window.camera.sensitivity, 0.1);

    assert_eq!(Settings::from_str("{}").unwrap(), settings);
}

#[test]
fn json() {
    let mut settings = Settings::default();
    settings.window.title = "Cubes".to_owned();
    settings.window.size = Vector2::new(1024, 768);
    settings.window.camera.grab_cursor = false;

    let text = settings.to_string_pretty().unwrap();
    assert_eq!(Settings::from_str(&text).unwrap(), settings);
}

#[test]
fn load() {
    let path = std::env::temp_dir().join(format!("openvoxel-settings-{}.json", std::process::id()));
    fs::write(&path, r#"{ "window": { "title": "Voxels", "vsync": false } }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.window.title, "Voxels");
    assert!(!settings.window.vsync);
    assert_eq!(settings.window.multisample, WindowParams::default().multisample);

    fs::write(&path, "{ not json").unwrap();
    match Settings::load(&path) {
        Err(Error::Settings(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(Settings::load_or_default(&path), Settings::default());
    fs::remove_file(&path).unwrap();

    assert_eq!(Settings::load_or_default(&path), Settings::default());
    match Settings::load(&path) {
        Err(Error::Io(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn demo_settings() {
    let settings = Settings::load("demos/cubes.json").unwrap();
    assert_eq!(settings.window.title, "Cubes");
    assert_eq!(settings.window.multisample, 4);
}
