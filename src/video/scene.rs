use crate::errors::*;
use crate::math::{Color, Matrix4};

use super::camera::Camera;
use super::shader::Shader;
use super::texture::Texture;
use super::{DrawCall, MeshHandle, MeshIndex, TextureHandle, VertexLayout, VideoContext};

/// The renderable state of a window: one vertex/index buffer pair, at most one
/// texture, draw settings and the camera.
///
/// Per-object transforms are not stored here, they are set as shader uniforms
/// before each `draw`.
pub struct Scene {
    video: VideoContext,
    mesh: Option<MeshHandle>,
    layout: Option<VertexLayout>,
    index: Option<MeshIndex>,
    texture: Option<TextureHandle>,
    clear_color: Color,
    depth_test: bool,
    wireframe: bool,
    camera: Camera,
}

impl Scene {
    /// Creates an empty scene. GPU buffers are allocated on first upload.
    pub fn new(video: &VideoContext) -> Self {
        Scene {
            video: video.clone(),
            mesh: None,
            layout: None,
            index: None,
            texture: None,
            clear_color: Color::sky_blue(),
            depth_test: true,
            wireframe: false,
            camera: Camera::default(),
        }
    }

    /// Replaces the vertex buffer and draws it as a plain triangle list.
    pub fn add_vertices(&mut self, vertices: &[f32], layout: VertexLayout) -> Result<()> {
        let len = Self::vertex_count(vertices, layout)?;
        let mesh = self.mesh()?;

        self.index = None;
        self.video.update_vertex_buffer(mesh, layout, vertices)?;
        self.layout = Some(layout);
        self.index = Some(MeshIndex::Arrays(len));
        Ok(())
    }

    /// Replaces both buffers and draws the vertices through `indices`. Every
    /// index must refer to one of `vertices`.
    pub fn add_indexed_triangles(
        &mut self,
        vertices: &[f32],
        indices: &[u32],
        layout: VertexLayout,
    ) -> Result<()> {
        let len = Self::vertex_count(vertices, layout)?;
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::IndexOutOfRange {
                index,
                vertices: len,
            });
        }

        let mesh = self.mesh()?;

        // Nothing is drawn until both buffers agree again.
        self.index = None;
        self.video.update_vertex_buffer(mesh, layout, vertices)?;
        self.layout = Some(layout);
        self.video.update_index_buffer(mesh, indices)?;
        self.index = Some(MeshIndex::Elements(indices.len() as u32));
        Ok(())
    }

    fn vertex_count(vertices: &[f32], layout: VertexLayout) -> Result<u32> {
        let stride = layout.stride();
        if vertices.len() % stride != 0 {
            return Err(Error::VertexLayout {
                len: vertices.len(),
                stride,
            });
        }

        Ok((vertices.len() / stride) as u32)
    }

    fn mesh(&mut self) -> Result<MeshHandle> {
        if let Some(mesh) = self.mesh {
            return Ok(mesh);
        }

        let mesh = self.video.create_mesh()?;
        debug!("Allocated buffers for {}.", mesh);
        self.mesh = Some(mesh);
        Ok(mesh)
    }

    /// Samples `texture` from unit 0 in subsequent draws. The scene does not
    /// own the texture, it must outlive every draw it is attached to.
    pub fn attach_texture(&mut self, texture: &Texture) {
        self.texture = Some(texture.handle());
    }

    pub fn detach_texture(&mut self) {
        self.texture = None;
    }

    #[inline]
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    #[inline]
    pub fn layout(&self) -> Option<VertexLayout> {
        self.layout
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_depth_test(&mut self, enable: bool) {
        self.depth_test = enable;
    }

    /// Clears the color buffer, and the depth buffer when depth testing is on.
    pub fn clear(&self) -> Result<()> {
        self.video.clear(Some(self.clear_color), self.depth_test)
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    #[inline]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;
        self.wireframe
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.view_matrix()
    }

    /// Draws the uploaded triangles, with `shader` bound first if given.
    ///
    /// Without an attached texture, unit 0 is left unbound. Nothing is drawn
    /// before the first upload.
    ///
    /// # Panics
    ///
    /// Panics if `shader` has not been linked.
    pub fn draw(&self, shader: Option<&Shader>) -> Result<()> {
        if let Some(shader) = shader {
            shader.use_program()?;
        }

        let (mesh, index) = match (self.mesh, self.index) {
            (_, Some(MeshIndex::Arrays(0))) | (_, Some(MeshIndex::Elements(0))) => return Ok(()),
            (Some(mesh), Some(index)) => (mesh, index),
            _ => return Ok(()),
        };

        let dc = DrawCall {
            texture: self.texture,
            wireframe: self.wireframe,
            index,
        };

        self.video.draw(mesh, dc)?;
        Ok(())
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        if let Some(mesh) = self.mesh.take() {
            if let Err(err) = self.video.delete_mesh(mesh) {
                warn!("Failed to release {}: {}", mesh, err);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::backends::headless::Recorder;

    const TRIANGLE: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];

    #[test]
    fn failed_upload_draws_nothing() {
        let recorder = Recorder::new();
        let video = VideoContext::headless_with(recorder.clone());
        let mut scene = Scene::new(&video);

        scene.add_vertices(&TRIANGLE, VertexLayout::Position).unwrap();
        video.discard();

        assert!(scene
            .add_indexed_triangles(&TRIANGLE, &[0, 1, 2], VertexLayout::Position)
            .is_err());
        assert_eq!(scene.index, None);

        scene.draw(None).unwrap();
        assert!(recorder.draws().is_empty());
    }
}
