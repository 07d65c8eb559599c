//! Renderable scene objects.
//!
//! A [`SceneObject`] owns its tessellated geometry, material, optional
//! texture and accumulated model transform. The GPU contract is upload-once,
//! draw-many: [`SceneObject::upload`] hands the buffers to the backend a
//! single time, and [`SceneObject::draw`] re-pushes the per-object uniforms
//! and issues one indexed draw each frame.

use std::path::Path;

use crate::gfx::backend::{
    MeshId, ProgramId, RenderBackend, TextureError, TextureId, TextureLoader, TextureOptions,
};
use crate::gfx::geometry::GeometryData;
use crate::gfx::material::Material;
use crate::gfx::transform::Transform;

/// A single renderable: geometry, material, optional texture, transform.
#[derive(Debug)]
pub struct SceneObject {
    geometry: GeometryData,
    material: Material,
    texture: Option<TextureId>,
    transform: Transform,
    /// Set by [`SceneObject::upload`]; `None` means not yet on the GPU.
    mesh: Option<MeshId>,
}

impl SceneObject {
    /// Creates an object from tessellated geometry and a material.
    ///
    /// The transform starts at identity and no texture is assigned; both are
    /// configured afterwards at scene-assembly time.
    pub fn new(geometry: GeometryData, material: Material) -> Self {
        Self {
            geometry,
            material,
            texture: None,
            transform: Transform::new(),
            mesh: None,
        }
    }

    /// Assigns an already-loaded texture.
    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = Some(texture);
    }

    /// Loads a texture through the external loader and assigns it.
    ///
    /// On failure the object stays textureless and the error is returned so
    /// the caller can decide whether that is fatal; the scene assembler logs
    /// it and carries on with the untextured draw path.
    pub fn load_texture(
        &mut self,
        loader: &mut dyn TextureLoader,
        path: &Path,
        options: TextureOptions,
    ) -> Result<(), TextureError> {
        let texture = loader.load(path, options)?;
        self.texture = Some(texture);
        Ok(())
    }

    /// Uploads the geometry buffers to the backend.
    ///
    /// Buffers are created exactly once for the life of the object; repeated
    /// calls are ignored. The UV buffer is only uploaded when the geometry
    /// carries texture coordinates.
    pub fn upload(&mut self, backend: &mut dyn RenderBackend, program: ProgramId) {
        if self.mesh.is_some() {
            return;
        }
        self.mesh = Some(backend.upload_mesh(program, &self.geometry.buffers()));
    }

    /// Pushes this object's uniforms and issues its indexed draw.
    ///
    /// Writes `model` (column-major), the material's `k_a`/`k_d`/`k_s`/`n`,
    /// and when textured binds the texture and points the `tex` sampler at
    /// its unit. Does nothing if the object was never uploaded. Index range
    /// validity is established at tessellation time and not re-checked here.
    pub fn draw(&self, backend: &mut dyn RenderBackend, program: ProgramId) {
        let mesh = match self.mesh {
            Some(mesh) => mesh,
            None => return,
        };

        backend.set_mat4(program, "model", self.transform.to_uniform());

        backend.set_vec3(program, "k_a", self.material.ambient());
        backend.set_vec3(program, "k_d", self.material.diffuse());
        backend.set_vec3(program, "k_s", self.material.specular());
        backend.set_scalar(program, "n", self.material.shininess());

        if let Some(texture) = self.texture {
            // One unit per texture id keeps the bindings distinct without a
            // unit allocator; ids are small in this scene.
            backend.bind_texture(texture.0, texture);
            backend.set_sampler(program, "tex", texture.0);
        }

        backend.draw_indexed(program, mesh, self.geometry.indices.len() as u32);
    }

    /// Prepends a scale onto the model transform.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.transform.scale(x, y, z);
    }

    /// Prepends a rotation (degrees, fixed Y then Z then X axis order).
    pub fn rotate(&mut self, x: f32, y: f32, z: f32) {
        self.transform.rotate(x, y, z);
    }

    /// Prepends a translation onto the model transform.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.transform.translate(x, y, z);
    }

    pub fn geometry(&self) -> &GeometryData {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::backend::{RecordingBackend, UniformWrite};
    use crate::gfx::geometry::tessellate_quad;

    fn test_object() -> SceneObject {
        let material = Material::new([0.3, 0.3, 0.3], [0.2, 0.2, 0.2], [0.1, 0.1, 0.1], 0.0);
        SceneObject::new(tessellate_quad(), material)
    }

    #[test]
    fn upload_happens_once() {
        let mut backend = RecordingBackend::new();
        let mut object = test_object();
        object.upload(&mut backend, ProgramId(1));
        object.upload(&mut backend, ProgramId(1));
        assert_eq!(backend.meshes.len(), 1);
        assert_eq!(backend.meshes[0].vertex_count, 4);
        assert!(backend.meshes[0].has_tex_coords);
    }

    #[test]
    fn draw_without_upload_is_a_no_op() {
        let mut backend = RecordingBackend::new();
        let object = test_object();
        object.draw(&mut backend, ProgramId(1));
        assert!(backend.draws.is_empty());
        assert!(backend.uniforms.is_empty());
    }

    #[test]
    fn draw_pushes_model_and_material_uniforms() {
        let mut backend = RecordingBackend::new();
        let mut object = test_object();
        object.scale(2.0, 1.0, 2.0);
        object.translate(0.0, 5.0, 0.0);
        object.upload(&mut backend, ProgramId(7));
        object.draw(&mut backend, ProgramId(7));

        let model = backend.writes_to("model");
        assert_eq!(model.len(), 1);
        match model[0] {
            UniformWrite::Mat4 { program, value, .. } => {
                assert_eq!(*program, ProgramId(7));
                // Scale on the diagonal, translation in the fourth column.
                assert_eq!(value[0][0], 2.0);
                assert_eq!(value[3][1], 5.0);
            }
            other => panic!("expected mat4 write, got {:?}", other),
        }

        for name in ["k_a", "k_d", "k_s", "n"] {
            assert_eq!(backend.writes_to(name).len(), 1, "missing uniform {name}");
        }

        assert_eq!(backend.draws.len(), 1);
        assert_eq!(backend.draws[0].index_count, 6);
    }

    #[test]
    fn untextured_draw_skips_sampler() {
        let mut backend = RecordingBackend::new();
        let mut object = test_object();
        object.upload(&mut backend, ProgramId(0));
        object.draw(&mut backend, ProgramId(0));
        assert!(backend.writes_to("tex").is_empty());
        assert!(backend.bound_textures.is_empty());
    }

    #[test]
    fn textured_draw_binds_unit_matching_texture() {
        let mut backend = RecordingBackend::new();
        let mut object = test_object();
        object.set_texture(TextureId(3));
        object.upload(&mut backend, ProgramId(0));
        object.draw(&mut backend, ProgramId(0));

        assert_eq!(backend.bound_textures, vec![(3, TextureId(3))]);
        match backend.writes_to("tex")[0] {
            UniformWrite::Sampler { unit, .. } => assert_eq!(*unit, 3),
            other => panic!("expected sampler write, got {:?}", other),
        }
    }
}
