extern crate image;
extern crate openvoxel;

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use openvoxel::errors::Error;
use openvoxel::math::Vector2;
use openvoxel::video::backends::headless::{Call, Recorder};
use openvoxel::video::texture::{decode, TextureData};
use openvoxel::video::{Texture, TextureFilter, TextureWrap, VideoContext};

/// Every row gets its own color, so flips are visible.
fn striped_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8 * 40, 7, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

#[test]
fn decode_flips_rows() {
    let (w, h) = (3, 5);
    let data = decode(&striped_png(w, h)).unwrap();

    assert_eq!((data.width, data.height), (w, h));
    assert_eq!(data.pixels.len(), (w * h * 4) as usize);

    let row = (w * 4) as usize;
    let first = &data.pixels[..row];
    let last = &data.pixels[data.pixels.len() - row..];
    assert_eq!(first, &[0, 160, 7, 255, 1, 160, 7, 255, 2, 160, 7, 255][..]);
    assert_eq!(last, &[0, 0, 7, 255, 1, 0, 7, 255, 2, 0, 7, 255][..]);
}

#[test]
fn decode_garbage() {
    match decode(b"definitely not a png") {
        Err(Error::Image(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn upload() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());

    let texture = Texture::from_bytes(&video, &striped_png(8, 2)).unwrap();
    assert_eq!(texture.dimensions(), Vector2::new(8, 2));

    match recorder.calls()[0] {
        Call::CreateTexture(handle, params) => {
            assert_eq!(handle, texture.handle());
            assert_eq!(params.dimensions, Vector2::new(8, 2));
            assert_eq!(params.wrap, TextureWrap::Repeat);
            assert_eq!(params.filter, TextureFilter::Nearest);
            assert!(params.mipmap);
        }
        ref other => panic!("unexpected {:?}", other),
    }

    let handle = texture.handle();
    drop(texture);
    assert_eq!(recorder.calls().last(), Some(&Call::DeleteTexture(handle)));
}

#[test]
fn missing_file() {
    let video = VideoContext::headless();
    match Texture::from_file(&video, "tests/_invalid_path_.png") {
        Err(Error::Io(_)) => {}
        Err(other) => panic!("unexpected {:?}", other),
        Ok(_) => panic!("loaded a missing file"),
    }
}

#[test]
fn from_file() {
    let path = std::env::temp_dir().join(format!("openvoxel-texture-{}.png", std::process::id()));
    std::fs::write(&path, striped_png(4, 4)).unwrap();

    let video = VideoContext::headless();
    let texture = Texture::from_file(&video, &path).unwrap();
    assert_eq!(texture.dimensions(), Vector2::new(4, 4));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn oversized_dimensions() {
    let video = VideoContext::headless();
    let data = TextureData {
        width: 65536,
        height: 65536,
        pixels: vec![0; 16],
    };

    match Texture::from_data(&video, &data) {
        Err(Error::UnsupportedStride) => {}
        Err(other) => panic!("unexpected {:?}", other),
        Ok(_) => panic!("uploaded mismatched pixels"),
    }
}
