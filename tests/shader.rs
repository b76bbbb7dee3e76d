extern crate openvoxel;

use std::fs;

use openvoxel::errors::Error;
use openvoxel::math::transform::translate;
use openvoxel::math::{Matrix4, SquareMatrix};
use openvoxel::video::backends::headless::{Call, Recorder};
use openvoxel::video::{Shader, UniformVariable, VideoContext};

const VS: &str = "
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos, 1.0);
}
";

const FS: &str = "
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

fn shader(video: &VideoContext) -> Shader {
    Shader::new(video).vertex_shader(VS).fragment_shader(FS)
}

#[test]
fn link() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());

    let mut shader = shader(&video);
    assert!(!shader.is_linked());
    shader.link().unwrap();
    assert!(shader.is_linked());
    shader.use_program().unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 2);
    match (&calls[0], &calls[1]) {
        (Call::CreateShader(a), Call::BindShader(b)) => assert_eq!(a, b),
        other => panic!("unexpected calls {:?}", other),
    }
}

#[test]
fn link_invalid_fragment() {
    let video = VideoContext::headless();
    let mut shader = Shader::new(&video)
        .vertex_shader(VS)
        .fragment_shader("out vec4 FragColor;\nvoid main() {\n    FragColor = vec4(1.0;\n}\n");

    match shader.link() {
        Err(Error::ShaderCompile(ref msg)) => {
            assert!(!msg.is_empty());
            assert!(msg.contains("Fragment"));
        }
        other => panic!("unexpected {:?}", other.err()),
    }

    assert!(!shader.is_linked());
}

#[test]
fn link_missing_stage() {
    let video = VideoContext::headless();

    let mut shader = Shader::new(&video);
    match shader.link() {
        Err(Error::ShaderInvalid(_)) => {}
        other => panic!("unexpected {:?}", other.err()),
    }

    let mut shader = Shader::new(&video).vertex_shader(VS);
    match shader.link() {
        Err(Error::ShaderInvalid(_)) => {}
        other => panic!("unexpected {:?}", other.err()),
    }
}

#[test]
fn link_files() {
    let dir = std::env::temp_dir().join(format!("openvoxel-shader-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("triangle.vs"), VS).unwrap();
    fs::write(dir.join("triangle.fs"), FS).unwrap();

    let video = VideoContext::headless();
    let mut shader = Shader::new(&video)
        .vertex_shader_file(dir.join("triangle.vs"))
        .fragment_shader_file(dir.join("triangle.fs"));
    shader.link().unwrap();

    let mut shader = Shader::new(&video)
        .vertex_shader_file(dir.join("triangle.vs"))
        .fragment_shader_file(dir.join("missing.fs"));
    match shader.link() {
        Err(Error::ShaderSource { ref path, .. }) => assert!(path.ends_with("missing.fs")),
        other => panic!("unexpected {:?}", other.err()),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn uniforms_before_link() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let shader = shader(&video);

    match shader.set_uniform_floats("time", &[1.0]) {
        Err(Error::ShaderNotLinked) => {}
        other => panic!("unexpected {:?}", other),
    }

    match shader.set_uniform_ints("ourTexture", &[0]) {
        Err(Error::ShaderNotLinked) => {}
        other => panic!("unexpected {:?}", other),
    }

    match shader.set_uniform_matrix("model", &Matrix4::identity()) {
        Err(Error::ShaderNotLinked) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(recorder.calls().is_empty());
}

#[test]
fn uniforms() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut shader = shader(&video);
    shader.link().unwrap();
    recorder.clear();

    shader.set_uniform_floats("color", &[0.1, 0.2, 0.3]).unwrap();
    shader.set_uniform_ints("offset", &[1, 2]).unwrap();

    let variables: Vec<_> = recorder
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::UpdateUniform(_, name, v) => Some((name, v)),
            _ => None,
        })
        .collect();

    assert_eq!(
        variables,
        vec![
            ("color".to_owned(), UniformVariable::Vector3f([0.1, 0.2, 0.3])),
            ("offset".to_owned(), UniformVariable::Vector2i([1, 2])),
        ]
    );

    match shader.set_uniform_floats("color", &[0.0; 5]) {
        Err(Error::UniformArity(5)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match shader.set_uniform_ints("color", &[]) {
        Err(Error::UniformArity(0)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn uniform_matrix() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());
    let mut shader = shader(&video);
    shader.link().unwrap();
    recorder.clear();

    shader.set_uniform_matrix("model", &translate(1.0, 2.0, 3.0)).unwrap();

    match recorder.calls().last() {
        Some(Call::UpdateUniform(_, name, UniformVariable::Matrix4f(columns))) => {
            assert_eq!(name, "model");
            assert_eq!(columns[3], [1.0, 2.0, 3.0, 1.0]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
#[should_panic]
fn use_before_link() {
    let video = VideoContext::headless();
    let _ = shader(&video).use_program();
}

#[test]
fn relink_and_drop() {
    let recorder = Recorder::new();
    let video = VideoContext::headless_with(recorder.clone());

    let mut shader = shader(&video);
    shader.link().unwrap();
    shader.link().unwrap();
    drop(shader);

    let calls = recorder.calls();
    let created = calls
        .iter()
        .filter(|v| match v {
            Call::CreateShader(_) => true,
            _ => false,
        })
        .count();
    let deleted = calls
        .iter()
        .filter(|v| match v {
            Call::DeleteShader(_) => true,
            _ => false,
        })
        .count();

    assert_eq!(created, 2);
    assert_eq!(deleted, 2);
}
