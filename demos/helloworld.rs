//! Draws one orange triangle on a sky blue background.

use log::error;
use openvoxel::prelude::*;

const VERTEX: &str = "
layout (location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos, 1.0);
}
";

const FRAGMENT: &str = "
out vec4 FragColor;

void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

#[rustfmt::skip]
const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

fn main() {
    openvoxel::sys::init();
    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut params = WindowParams::default();
    params.title = "Hello, World!".to_owned();
    params.camera.grab_cursor = false;

    let mut window = Window::from_params(params)?;

    let mut shader = Shader::new(window.video())
        .vertex_shader(format!("{}{}", GLSL_VERSION, VERTEX))
        .fragment_shader(format!("{}{}", GLSL_VERSION, FRAGMENT));
    shader.link()?;

    let scene = window.scene_mut();
    scene.set_depth_test(false);
    scene.add_vertices(&VERTICES, VertexLayout::Position)?;

    window::run(window, move |w| {
        w.scene().clear()?;
        w.scene().draw(Some(&shader))
    })
}
