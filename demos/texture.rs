//! Draws a textured quad through an index buffer.
//!
//! Usage: `texture [path/to/image.png]`. Without a path a generated
//! checkerboard is used.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use log::{error, info};
use openvoxel::prelude::*;

const VERTEX: &str = "
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;
layout (location = 2) in vec2 aTexCoord;

out vec3 ourColor;
out vec2 TexCoord;

void main() {
    gl_Position = vec4(aPos, 1.0);
    ourColor = aColor;
    TexCoord = aTexCoord;
}
";

const FRAGMENT: &str = "
out vec4 FragColor;

in vec3 ourColor;
in vec2 TexCoord;

uniform sampler2D ourTexture;

void main() {
    FragColor = texture(ourTexture, TexCoord) * vec4(ourColor, 1.0);
}
";

#[rustfmt::skip]
const VERTICES: [f32; 32] = [
    // positions       colors           texture coords
     0.5,  0.5, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0,
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   1.0, 0.0,
    -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0,
    -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0,
];

const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

fn main() {
    openvoxel::sys::init();
    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn checkerboard(size: u32, cell: u32) -> Result<Vec<u8>> {
    let img = RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([0xFF, 0xFF, 0xFF, 0xFF])
        } else {
            Rgba([0x40, 0x40, 0x40, 0xFF])
        }
    });

    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

fn run() -> Result<()> {
    let mut params = WindowParams::default();
    params.title = "Texture".to_owned();
    params.camera.grab_cursor = false;

    let mut window = Window::from_params(params)?;

    let texture = match std::env::args().nth(1) {
        Some(path) => Texture::from_file(window.video(), path)?,
        None => {
            info!("No image given, using a generated checkerboard.");
            Texture::from_bytes(window.video(), &checkerboard(256, 32)?)?
        }
    };

    let mut shader = Shader::new(window.video())
        .vertex_shader(format!("{}{}", GLSL_VERSION, VERTEX))
        .fragment_shader(format!("{}{}", GLSL_VERSION, FRAGMENT));
    shader.link()?;
    shader.set_uniform_ints("ourTexture", &[0])?;

    let scene = window.scene_mut();
    scene.set_depth_test(false);
    scene.add_indexed_triangles(&VERTICES, &INDICES, VertexLayout::PositionColorTexcoord)?;
    scene.attach_texture(&texture);

    window::run(window, move |w| {
        w.scene().clear()?;
        w.scene().draw(Some(&shader))?;
        // Keeps the texture alive for as long as the scene samples it.
        let _ = &texture;
        Ok(())
    })
}
