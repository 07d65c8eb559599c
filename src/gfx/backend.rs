//! # Backend Collaborator Traits
//!
//! The renderer core never talks to a graphics API directly. Everything GPU
//! shaped sits behind three traits implemented by the embedding application:
//!
//! - [`ShaderCompiler`] turns vertex + fragment source text into a linked
//!   program handle
//! - [`RenderBackend`] accepts vertex/normal/uv/index data, answers
//!   named-uniform writes and issues indexed draws
//! - [`TextureLoader`] decodes an image file into a 2D texture handle
//!
//! ## Uniform and attribute name contract
//!
//! The core writes uniforms by name into whatever program is bound:
//!
//! | name            | type   | written by                 |
//! |-----------------|--------|----------------------------|
//! | `model`         | mat4   | [`SceneObject::draw`]      |
//! | `view`          | mat4   | [`Camera::apply`]          |
//! | `projection`    | mat4   | [`Camera::apply`]          |
//! | `lightPosition` | vec3   | [`Light::apply`]           |
//! | `I_a` `I_d` `I_s` | vec3 | [`Light::apply`]           |
//! | `k_a` `k_d` `k_s` | vec3 | [`SceneObject::draw`]      |
//! | `n`             | float  | [`SceneObject::draw`]      |
//! | `tex`           | sampler| [`SceneObject::draw`]      |
//!
//! and expects the attributes `vPosition`, `vNormal` and `vTexCoords` when it
//! uploads mesh buffers. Renaming either side breaks rendering silently; no
//! validation is performed.
//!
//! [`SceneObject::draw`]: crate::gfx::object::SceneObject::draw
//! [`Camera::apply`]: crate::gfx::camera::Camera::apply
//! [`Light::apply`]: crate::gfx::light::Light::apply

use std::path::Path;

use thiserror::Error;

/// Opaque handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Opaque handle to an uploaded mesh (vertex + index buffers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Opaque handle to a decoded 2D texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Errors surfaced by a [`ShaderCompiler`].
///
/// Compile and link failures carry the backend's info log verbatim. The scene
/// assembler logs these and keeps going with whatever program handle it has;
/// they are never fatal (see [`crate::gfx::scene::link_program_or_log`]).
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source `{path}`: {reason}")]
    Source { path: String, reason: String },
    #[error("shader compilation failed:\n{log}")]
    Compile { log: String },
    #[error("program link failed:\n{log}")]
    Link { log: String },
}

/// Errors surfaced by a [`TextureLoader`].
///
/// A failed load leaves the affected object textureless; the caller decides
/// whether that is acceptable (the Stonehenge assembler logs a warning and
/// continues).
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read texture image `{path}`: {reason}")]
    Io { path: String, reason: String },
    #[error("failed to decode texture image `{path}`: {reason}")]
    Decode { path: String, reason: String },
}

/// Orientation and wrap flags handed to the texture loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureOptions {
    /// Flip the image vertically on load.
    pub invert_y: bool,
    /// Repeat-wrap in both directions instead of clamping.
    pub repeat: bool,
}

impl Default for TextureOptions {
    /// The flags every texture in the scene is loaded with.
    fn default() -> Self {
        Self {
            invert_y: true,
            repeat: true,
        }
    }
}

/// Borrowed view of tessellated geometry, ready for upload.
///
/// `positions` and `normals` are parallel; `tex_coords`, when present, is
/// parallel too. An object without a texture omits the UV buffer entirely
/// rather than uploading zeroes.
#[derive(Debug, Clone, Copy)]
pub struct MeshBuffers<'a> {
    pub positions: &'a [[f32; 3]],
    pub normals: &'a [[f32; 3]],
    pub tex_coords: Option<&'a [[f32; 2]]>,
    pub indices: &'a [u16],
}

impl<'a> MeshBuffers<'a> {
    /// Position data as raw bytes, for backends that buffer byte slices.
    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    /// Normal data as raw bytes.
    pub fn normal_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.normals)
    }

    /// UV data as raw bytes, if this mesh carries any.
    pub fn tex_coord_bytes(&self) -> Option<&'a [u8]> {
        self.tex_coords.map(|uv| bytemuck::cast_slice(uv))
    }

    /// Index data as raw bytes.
    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }
}

/// Compiles and links shader programs from source text.
pub trait ShaderCompiler {
    fn compile(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ShaderError>;
}

/// Decodes an image file into a 2D texture.
pub trait TextureLoader {
    fn load(&mut self, path: &Path, options: TextureOptions) -> Result<TextureId, TextureError>;
}

/// GL-style rendering backend.
///
/// Buffers are uploaded exactly once per object; uniforms are written by name
/// into the given program every frame; draws are indexed u16 triangles. Index
/// validity is the caller's responsibility and is not re-checked here.
pub trait RenderBackend {
    /// Uploads mesh buffers and wires them to the program's `vPosition`,
    /// `vNormal` and (when UVs are present) `vTexCoords` attributes.
    fn upload_mesh(&mut self, program: ProgramId, buffers: &MeshBuffers<'_>) -> MeshId;

    /// Writes a column-major 4x4 matrix uniform.
    fn set_mat4(&mut self, program: ProgramId, name: &str, value: [[f32; 4]; 4]);

    /// Writes a vec3 uniform.
    fn set_vec3(&mut self, program: ProgramId, name: &str, value: [f32; 3]);

    /// Writes a float uniform.
    fn set_scalar(&mut self, program: ProgramId, name: &str, value: f32);

    /// Writes a sampler uniform, pointing it at a texture unit.
    fn set_sampler(&mut self, program: ProgramId, name: &str, unit: u32);

    /// Binds a texture to a texture unit.
    fn bind_texture(&mut self, unit: u32, texture: TextureId);

    /// Issues one indexed triangle draw over a previously uploaded mesh.
    fn draw_indexed(&mut self, program: ProgramId, mesh: MeshId, index_count: u32);
}

/// One uniform write captured by the [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum UniformWrite {
    Mat4 {
        program: ProgramId,
        name: String,
        value: [[f32; 4]; 4],
    },
    Vec3 {
        program: ProgramId,
        name: String,
        value: [f32; 3],
    },
    Scalar {
        program: ProgramId,
        name: String,
        value: f32,
    },
    Sampler {
        program: ProgramId,
        name: String,
        unit: u32,
    },
}

impl UniformWrite {
    /// The uniform name this write targets.
    pub fn name(&self) -> &str {
        match self {
            UniformWrite::Mat4 { name, .. }
            | UniformWrite::Vec3 { name, .. }
            | UniformWrite::Scalar { name, .. }
            | UniformWrite::Sampler { name, .. } => name,
        }
    }
}

/// Shape of a mesh the [`RecordingBackend`] received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadedMesh {
    pub program: ProgramId,
    pub vertex_count: usize,
    pub index_count: usize,
    pub has_tex_coords: bool,
}

/// One indexed draw captured by the [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub program: ProgramId,
    pub mesh: MeshId,
    pub index_count: u32,
}

/// In-memory backend that records every call instead of touching a GPU.
///
/// Used by the test suite and the headless demo to observe exactly what a
/// real backend would have received.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub meshes: Vec<UploadedMesh>,
    pub uniforms: Vec<UniformWrite>,
    pub bound_textures: Vec<(u32, TextureId)>,
    pub draws: Vec<DrawCall>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured writes to a named uniform, in call order.
    pub fn writes_to(&self, name: &str) -> Vec<&UniformWrite> {
        self.uniforms.iter().filter(|w| w.name() == name).collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_mesh(&mut self, program: ProgramId, buffers: &MeshBuffers<'_>) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(UploadedMesh {
            program,
            vertex_count: buffers.positions.len(),
            index_count: buffers.indices.len(),
            has_tex_coords: buffers.tex_coords.is_some(),
        });
        id
    }

    fn set_mat4(&mut self, program: ProgramId, name: &str, value: [[f32; 4]; 4]) {
        self.uniforms.push(UniformWrite::Mat4 {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn set_vec3(&mut self, program: ProgramId, name: &str, value: [f32; 3]) {
        self.uniforms.push(UniformWrite::Vec3 {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn set_scalar(&mut self, program: ProgramId, name: &str, value: f32) {
        self.uniforms.push(UniformWrite::Scalar {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn set_sampler(&mut self, program: ProgramId, name: &str, unit: u32) {
        self.uniforms.push(UniformWrite::Sampler {
            program,
            name: name.to_string(),
            unit,
        });
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) {
        self.bound_textures.push((unit, texture));
    }

    fn draw_indexed(&mut self, program: ProgramId, mesh: MeshId, index_count: u32) {
        self.draws.push(DrawCall {
            program,
            mesh,
            index_count,
        });
    }
}

/// Shader compiler stand-in that links nothing and hands out sequential ids.
#[derive(Debug, Default)]
pub struct StubCompiler {
    next_id: u32,
}

impl ShaderCompiler for StubCompiler {
    fn compile(
        &mut self,
        _vertex_source: &str,
        _fragment_source: &str,
    ) -> Result<ProgramId, ShaderError> {
        let id = ProgramId(self.next_id);
        self.next_id += 1;
        Ok(id)
    }
}

/// Texture loader stand-in that decodes nothing and hands out sequential ids,
/// starting at 1 so unit assignments stay distinct from unit 0.
#[derive(Debug)]
pub struct StubTextureLoader {
    next_id: u32,
}

impl Default for StubTextureLoader {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl StubTextureLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureLoader for StubTextureLoader {
    fn load(&mut self, _path: &Path, _options: TextureOptions) -> Result<TextureId, TextureError> {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        Ok(id)
    }
}
