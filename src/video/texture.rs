//! RGBA8 textures decoded from PNG or JPEG images.

use std::path::Path;

use crate::errors::*;
use crate::math::Vector2;

use super::{TextureHandle, TextureParams, VideoContext};

/// Decoded pixels, flipped so the first row is the bottom of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub pixels: Vec<u8>,
}

/// Decodes an image and flips it vertically, so its origin matches the
/// bottom-left origin of texture coordinates.
pub fn decode(bytes: &[u8]) -> Result<TextureData> {
    let img = image::load_from_memory(bytes)?.flipv().to_rgba8();
    let (width, height) = img.dimensions();
    let pixels = img.into_raw();

    if pixels.len() != (width as usize) * (height as usize) * 4 {
        return Err(Error::UnsupportedStride);
    }

    debug!("Decoded image ({}x{}) from {} bytes.", width, height, bytes.len());
    Ok(TextureData {
        width,
        height,
        pixels,
    })
}

/// A texture uploaded to the GPU with repeat wrapping, nearest filtering and
/// mipmaps. The GPU object is released when the `Texture` is dropped.
pub struct Texture {
    video: VideoContext,
    handle: TextureHandle,
    dimensions: Vector2<u32>,
}

impl Texture {
    pub fn from_bytes(video: &VideoContext, bytes: &[u8]) -> Result<Self> {
        let data = decode(bytes)?;
        Self::from_data(video, &data)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file<T: AsRef<Path>>(video: &VideoContext, path: T) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let texture = Self::from_bytes(video, &bytes)?;
        info!(
            "Loaded texture {:?} ({}x{}).",
            path, texture.dimensions.x, texture.dimensions.y
        );
        Ok(texture)
    }

    /// There is no filesystem in the browser, textures must be embedded and
    /// loaded with `from_bytes` instead.
    #[cfg(target_arch = "wasm32")]
    pub fn from_file<T: AsRef<Path>>(_: &VideoContext, _: T) -> Result<Self> {
        Err(Error::NotImplemented)
    }

    pub fn from_data(video: &VideoContext, data: &TextureData) -> Result<Self> {
        let params = TextureParams {
            dimensions: Vector2::new(data.width, data.height),
            ..TextureParams::default()
        };

        let handle = video.create_texture(params, &data.pixels)?;
        Ok(Texture {
            video: video.clone(),
            handle,
            dimensions: params.dimensions,
        })
    }

    #[inline]
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if let Err(err) = self.video.delete_texture(self.handle) {
            warn!("Failed to release {}: {}", self.handle, err);
        }
    }
}
