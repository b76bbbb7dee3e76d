use std::io;
use std::path::PathBuf;

use crate::video::{MeshHandle, ShaderHandle, TextureHandle};

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Window: {}", _0)]
    Window(String),
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "Failed to compile shader: {}", _0)]
    ShaderCompile(String),
    #[fail(display = "Failed to create shader program: \n{}", _0)]
    ShaderLink(String),
    #[fail(display = "shader: invalid state: uniform called before Link()")]
    ShaderNotLinked,
    #[fail(display = "shader: {}", _0)]
    ShaderInvalid(String),
    #[fail(display = "Can not read shader source {:?}: {}", path, cause)]
    ShaderSource {
        path: PathBuf,
        #[cause]
        cause: io::Error,
    },
    #[fail(display = "invalid argument count: {}, expected up to 4 values", _0)]
    UniformArity(usize),
    #[fail(display = "{} floats can not be split into vertices of {} floats", len, stride)]
    VertexLayout { len: usize, stride: usize },
    #[fail(display = "index {} is out of range for {} vertices", index, vertices)]
    IndexOutOfRange { index: u32, vertices: u32 },
    #[fail(display = "IO: {}", _0)]
    Io(#[cause] io::Error),
    #[fail(display = "Image: {}", _0)]
    Image(String),
    #[fail(display = "unsupported stride")]
    UnsupportedStride,
    #[fail(display = "not implemented")]
    NotImplemented,
    #[fail(display = "{} is invalid.", _0)]
    ShaderHandleInvalid(ShaderHandle),
    #[fail(display = "{} is invalid.", _0)]
    MeshHandleInvalid(MeshHandle),
    #[fail(display = "{} is invalid.", _0)]
    TextureHandleInvalid(TextureHandle),
    #[fail(display = "Invalid web color '{}', must be #RRGGBB or #RGB", _0)]
    InvalidColor(String),
    #[fail(display = "Settings: {}", _0)]
    Settings(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Error {
        Error::Image(format!("{}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Settings(format!("{}", err))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<glutin::CreationError> for Error {
    fn from(err: glutin::CreationError) -> Error {
        Error::Window(format!("{}", err))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<glutin::ContextError> for Error {
    fn from(err: glutin::ContextError) -> Error {
        Error::Window(format!("{}", err))
    }
}
