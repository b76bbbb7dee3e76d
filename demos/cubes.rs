//! Ten textured cubes spinning in front of a free-look camera.
//!
//! W/A/S/D move, the mouse looks around, `=` and `-` change the mouse
//! sensitivity, F10 toggles wireframe and Escape quits. Window settings are
//! read from `demos/cubes.json` when present.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use log::{error, info};
use openvoxel::prelude::*;

const VERTEX: &str = "
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec2 aTexCoord;

out vec2 TexCoord;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

void main() {
    gl_Position = projection * view * model * vec4(aPos, 1.0);
    TexCoord = aTexCoord;
}
";

const FRAGMENT: &str = "
out vec4 FragColor;

in vec2 TexCoord;

uniform sampler2D ourTexture;
uniform float time;

void main() {
    float pulse = 0.85 + 0.15 * sin(time);
    FragColor = texture(ourTexture, TexCoord) * vec4(vec3(pulse), 1.0);
}
";

#[rustfmt::skip]
const VERTICES: [f32; 180] = [
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,

    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,

    -0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 0.0,

     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,

    -0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,

    -0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
];

const POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

fn main() {
    openvoxel::sys::init();
    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn crate_texture() -> Result<Vec<u8>> {
    let img = RgbaImage::from_fn(64, 64, |x, y| {
        let edge = x < 4 || y < 4 || x >= 60 || y >= 60;
        if edge {
            Rgba([0x5C, 0x3A, 0x1E, 0xFF])
        } else if (x + y) % 16 < 2 {
            Rgba([0x8B, 0x5A, 0x2B, 0xFF])
        } else {
            Rgba([0xC1, 0x9A, 0x6B, 0xFF])
        }
    });

    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

fn run() -> Result<()> {
    let settings = Settings::load_or_default("demos/cubes.json");
    let mut window = Window::from_params(settings.window)?;
    info!("Running on {}.", window.version()?);

    let texture = Texture::from_bytes(window.video(), &crate_texture()?)?;

    let mut shader = Shader::new(window.video())
        .vertex_shader(format!("{}{}", GLSL_VERSION, VERTEX))
        .fragment_shader(format!("{}{}", GLSL_VERSION, FRAGMENT));
    shader.link()?;
    shader.set_uniform_ints("ourTexture", &[0])?;

    let scene = window.scene_mut();
    scene.add_vertices(&VERTICES, VertexLayout::PositionTexcoord)?;
    scene.attach_texture(&texture);

    // The scene only keeps a handle, the frame closure owns the texture.
    let resources = (shader, texture);
    window::run(window, move |w| {
        let (shader, _texture) = &resources;
        let time = w.time() as f32;
        let dims = w.dimensions();
        let aspect = dims.x as f32 / dims.y.max(1) as f32;

        let projection =
            transform::perspective(transform::degrees_to_radians(45.0), aspect, 0.1, 100.0);

        shader.set_uniform_matrix("projection", &projection)?;
        shader.set_uniform_matrix("view", &w.scene().view_matrix())?;
        shader.set_uniform_floats("time", &[time])?;

        w.scene().clear()?;
        for (i, p) in POSITIONS.iter().enumerate() {
            let angle = transform::degrees_to_radians(20.0 * i as f32) + time;
            let model = transform::chain(&[
                transform::translate(p[0], p[1], p[2]),
                transform::rotate(angle, 1.0, 0.3, 0.5),
            ]);

            shader.set_uniform_matrix("model", &model)?;
            w.scene().draw(Some(shader))?;
        }

        Ok(())
    })
}
