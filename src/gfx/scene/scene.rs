//! The Stonehenge reconstruction itself.
//!
//! All placement values here are literal: the scene is a fixed composition,
//! tuned against the fixed camera, not data-driven. Assembly tessellates each
//! shape once, applies the per-object scale/rotate/translate sequence and
//! uploads the buffers; after that only the transforms ever change.

use std::path::Path;

use log::{error, warn};

use crate::gfx::backend::{
    ProgramId, RenderBackend, ShaderCompiler, TextureLoader, TextureOptions,
};
use crate::gfx::camera::Camera;
use crate::gfx::geometry::{tessellate_cuboid, tessellate_ground, tessellate_sphere};
use crate::gfx::light::Light;
use crate::gfx::material::Material;
use crate::gfx::object::SceneObject;

/// Half-extent the unit ground lattice is scaled to.
pub const GROUND_SIZE: f32 = 20.0;

const GROUND_DIVISIONS: u32 = 5;
const GROUND_TEX_REPETITIONS: f32 = 1.0;
const STONE_DIVISIONS: u32 = 10;
const BOULDER_DIVISIONS: u32 = 20;

/// Texture image the ground is wrapped with.
pub const GRASS_TEXTURE_PATH: &str = "GrassGreenTexture0006.jpg";
/// Texture image the stones are wrapped with.
pub const STONE_TEXTURE_PATH: &str = "stone_texture.jpg";

/// Placement of one megalith: scale, Y rotation in degrees, translation.
struct StonePlacement {
    scale: [f32; 3],
    rotate_y: f32,
    translate: [f32; 3],
}

/// The twelve sarsens: two arcs of uprights carrying lintels, and the tall
/// central trilithon at the back.
#[rustfmt::skip]
const STONE_PLACEMENTS: [StonePlacement; 12] = [
    StonePlacement { scale: [1.5, 3.0, 0.7], rotate_y: 20.0,  translate: [3.5, 3.0, 8.5] },
    StonePlacement { scale: [1.5, 3.0, 0.7], rotate_y: 45.0,  translate: [7.8, 3.0, 5.8] },
    StonePlacement { scale: [3.5, 0.5, 0.7], rotate_y: 32.5,  translate: [5.7, 6.5, 7.2] },
    StonePlacement { scale: [1.5, 3.0, 0.7], rotate_y: -25.0, translate: [-4.5, 3.0, 8.2] },
    StonePlacement { scale: [1.5, 3.0, 0.7], rotate_y: -40.0, translate: [-8.5, 3.0, 5.7] },
    StonePlacement { scale: [1.5, 3.0, 0.7], rotate_y: -55.0, translate: [-11.8, 3.0, 2.0] },
    StonePlacement { scale: [2.7, 0.5, 0.7], rotate_y: -32.5, translate: [-6.0, 6.5, 7.4] },
    StonePlacement { scale: [2.7, 0.5, 0.7], rotate_y: -47.5, translate: [-10.5, 6.5, 3.7] },
    StonePlacement { scale: [1.5, 3.2, 0.7], rotate_y: 77.0,  translate: [11.5, 3.2, 0.8] },
    StonePlacement { scale: [2.2, 4.0, 1.0], rotate_y: 3.0,   translate: [-3.0, 4.0, -6.0] },
    StonePlacement { scale: [2.2, 4.0, 1.0], rotate_y: -3.0,  translate: [3.0, 4.0, -6.0] },
    StonePlacement { scale: [5.5, 0.6, 0.9], rotate_y: 0.0,   translate: [0.0, 8.6, -6.0] },
];

/// Placement of one boulder: uniform scale and translation. Boulders sit
/// slightly below ground so only their caps show.
struct BoulderPlacement {
    scale: f32,
    translate: [f32; 3],
}

#[rustfmt::skip]
const BOULDER_PLACEMENTS: [BoulderPlacement; 5] = [
    BoulderPlacement { scale: 1.0, translate: [10.0, -0.2, -7.5] },
    BoulderPlacement { scale: 1.3, translate: [8.0, -0.4, -9.0] },
    BoulderPlacement { scale: 2.0, translate: [-0.8, -1.0, 1.3] },
    BoulderPlacement { scale: 1.7, translate: [-4.1, -0.8, 0.1] },
    BoulderPlacement { scale: 1.3, translate: [2.8, -0.5, 0.5] },
];

fn ground_material() -> Material {
    Material::new([0.4, 0.6, 0.2], [0.2, 0.3, 0.1], [0.1, 0.15, 0.05], 0.0)
}

fn stone_material() -> Material {
    Material::new([0.3, 0.3, 0.3], [0.2, 0.2, 0.2], [0.1, 0.1, 0.1], 0.0)
}

fn boulder_material() -> Material {
    Material::new([0.3, 0.3, 0.21], [0.4, 0.5, 0.35], [0.3, 0.3, 0.3], 7.0)
}

/// The full scene: camera, light, renderables and the two programs that
/// shade them.
pub struct Scene {
    pub camera: Camera,
    pub light: Light,
    objects: Vec<SceneObject>,
    ground_program: ProgramId,
    stone_program: ProgramId,
}

impl Scene {
    /// Builds the reconstruction and uploads every mesh.
    ///
    /// Geometry is tessellated once per shape and cloned per placement. A
    /// texture that fails to load is logged and skipped; the affected objects
    /// draw untextured.
    pub fn assemble(
        backend: &mut dyn RenderBackend,
        textures: &mut dyn TextureLoader,
        ground_program: ProgramId,
        stone_program: ProgramId,
    ) -> Self {
        let mut scene = Self {
            camera: Camera::default(),
            light: Light::default(),
            objects: Vec::new(),
            ground_program,
            stone_program,
        };
        scene.setup_ground(backend, textures);
        scene.setup_stones(backend, textures);
        scene.setup_boulders(backend);
        scene
    }

    fn setup_ground(&mut self, backend: &mut dyn RenderBackend, textures: &mut dyn TextureLoader) {
        let geometry = tessellate_ground(GROUND_DIVISIONS, GROUND_TEX_REPETITIONS);
        let mut ground = SceneObject::new(geometry, ground_material());
        if let Err(err) = ground.load_texture(
            textures,
            Path::new(GRASS_TEXTURE_PATH),
            TextureOptions::default(),
        ) {
            warn!("ground texture unavailable, drawing untextured: {err}");
        }
        ground.scale(GROUND_SIZE, 1.0, GROUND_SIZE);
        ground.upload(backend, self.ground_program);
        self.objects.push(ground);
    }

    fn setup_stones(&mut self, backend: &mut dyn RenderBackend, textures: &mut dyn TextureLoader) {
        let geometry = tessellate_cuboid(STONE_DIVISIONS);

        // One decoded texture, shared by every stone.
        let texture = match textures.load(Path::new(STONE_TEXTURE_PATH), TextureOptions::default())
        {
            Ok(texture) => Some(texture),
            Err(err) => {
                warn!("stone texture unavailable, drawing untextured: {err}");
                None
            }
        };

        for placement in &STONE_PLACEMENTS {
            let mut stone = SceneObject::new(geometry.clone(), stone_material());
            if let Some(texture) = texture {
                stone.set_texture(texture);
            }
            let [sx, sy, sz] = placement.scale;
            stone.scale(sx, sy, sz);
            stone.rotate(0.0, placement.rotate_y, 0.0);
            let [tx, ty, tz] = placement.translate;
            stone.translate(tx, ty, tz);
            stone.upload(backend, self.stone_program);
            self.objects.push(stone);
        }
    }

    fn setup_boulders(&mut self, backend: &mut dyn RenderBackend) {
        let geometry = tessellate_sphere(BOULDER_DIVISIONS);

        for placement in &BOULDER_PLACEMENTS {
            let mut boulder = SceneObject::new(geometry.clone(), boulder_material());
            boulder.scale(placement.scale, placement.scale, placement.scale);
            let [tx, ty, tz] = placement.translate;
            boulder.translate(tx, ty, tz);
            boulder.upload(backend, self.stone_program);
            self.objects.push(boulder);
        }
    }

    /// Draws one frame.
    ///
    /// The ground renders first under its own program, then the stones and
    /// boulders under the shared stone program, in insertion order. Camera
    /// and light uniforms are re-pushed into each program before its objects
    /// draw.
    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        let Some((ground, rest)) = self.objects.split_first() else {
            return;
        };

        self.camera.apply(backend, self.ground_program);
        self.light.apply(backend, self.ground_program);
        ground.draw(backend, self.ground_program);

        self.camera.apply(backend, self.stone_program);
        self.light.apply(backend, self.stone_program);
        for object in rest {
            object.draw(backend, self.stone_program);
        }
    }

    /// Spins the whole scene about the Y axis by the given degrees.
    ///
    /// Applies `rotate(0, degrees, 0)` to every object, which prepends onto
    /// each accumulated transform. External input handling calls this with
    /// +2 / -2 per keypress.
    pub fn rotate(&mut self, degrees: f32) {
        for object in &mut self.objects {
            object.rotate(0.0, degrees, 0.0);
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Aggregate mesh statistics, mainly for logging.
    pub fn statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            total_vertices: self
                .objects
                .iter()
                .map(|o| o.geometry().vertex_count())
                .sum(),
            total_triangles: self
                .objects
                .iter()
                .map(|o| o.geometry().triangle_count())
                .sum(),
        }
    }
}

/// Scene totals for logging and sanity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
}

/// Compiles and links a program, logging failure instead of propagating it.
///
/// A broken shader produces a log entry and the fallback handle 0; rendering
/// continues with the possibly-unusable program rather than aborting, which
/// matches how the original pipeline reported shader problems.
pub fn link_program_or_log(
    compiler: &mut dyn ShaderCompiler,
    vertex_source: &str,
    fragment_source: &str,
    label: &str,
) -> ProgramId {
    match compiler.compile(vertex_source, fragment_source) {
        Ok(program) => program,
        Err(err) => {
            error!("failed to build {label} shader program: {err}");
            ProgramId(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::backend::{
        RecordingBackend, ShaderError, StubTextureLoader, TextureError, TextureId,
    };

    fn assembled() -> (RecordingBackend, Scene) {
        let mut backend = RecordingBackend::new();
        let mut textures = StubTextureLoader::new();
        let scene = Scene::assemble(&mut backend, &mut textures, ProgramId(1), ProgramId(2));
        (backend, scene)
    }

    #[test]
    fn assembles_ground_stones_and_boulders() {
        let (backend, scene) = assembled();
        assert_eq!(scene.object_count(), 18);
        assert_eq!(backend.meshes.len(), 18);

        // Ground and stones carry UVs, boulders do not.
        assert!(backend.meshes[0].has_tex_coords);
        assert!(backend.meshes[1].has_tex_coords);
        assert!(!backend.meshes[17].has_tex_coords);

        // Ground uploads under its own program, the rest under the stone one.
        assert_eq!(backend.meshes[0].program, ProgramId(1));
        assert!(backend.meshes[1..].iter().all(|m| m.program == ProgramId(2)));
    }

    #[test]
    fn draw_issues_one_call_per_object() {
        let (mut backend, scene) = assembled();
        scene.draw(&mut backend);

        assert_eq!(backend.draws.len(), 18);
        assert_eq!(backend.draws[0].program, ProgramId(1));
        assert!(backend.draws[1..].iter().all(|d| d.program == ProgramId(2)));

        // Camera and light go out once per program.
        assert_eq!(backend.writes_to("view").len(), 2);
        assert_eq!(backend.writes_to("projection").len(), 2);
        assert_eq!(backend.writes_to("lightPosition").len(), 2);
    }

    #[test]
    fn ground_is_scaled_to_size() {
        let (_, scene) = assembled();
        let model = scene.objects()[0].transform().to_uniform();
        assert_eq!(model[0][0], GROUND_SIZE);
        assert_eq!(model[1][1], 1.0);
        assert_eq!(model[2][2], GROUND_SIZE);
    }

    #[test]
    fn stones_share_one_texture() {
        let (_, scene) = assembled();
        let stones = &scene.objects()[1..13];
        let texture = stones[0].texture();
        assert!(texture.is_some());
        assert!(stones.iter().all(|s| s.texture() == texture));
        // Boulders stay untextured.
        assert!(scene.objects()[13..].iter().all(|b| b.texture().is_none()));
    }

    #[test]
    fn rotate_spins_every_object() {
        let (_, mut scene) = assembled();
        let before: Vec<_> = scene
            .objects()
            .iter()
            .map(|o| o.transform().to_uniform())
            .collect();
        scene.rotate(2.0);
        for (object, previous) in scene.objects().iter().zip(before) {
            assert_ne!(object.transform().to_uniform(), previous);
        }
    }

    #[test]
    fn failed_textures_degrade_to_untextured_draws() {
        struct FailingLoader;
        impl TextureLoader for FailingLoader {
            fn load(
                &mut self,
                path: &Path,
                _options: TextureOptions,
            ) -> Result<TextureId, TextureError> {
                Err(TextureError::Io {
                    path: path.display().to_string(),
                    reason: "no such file".to_string(),
                })
            }
        }

        let mut backend = RecordingBackend::new();
        let scene = Scene::assemble(&mut backend, &mut FailingLoader, ProgramId(1), ProgramId(2));
        assert!(scene.objects().iter().all(|o| o.texture().is_none()));

        scene.draw(&mut backend);
        assert_eq!(backend.draws.len(), 18);
        assert!(backend.writes_to("tex").is_empty());
        assert!(backend.bound_textures.is_empty());
    }

    #[test]
    fn statistics_count_the_reconstruction() {
        let (_, scene) = assembled();
        let stats = scene.statistics();
        assert_eq!(stats.object_count, 18);
        // Ground lattice 36, twelve stones at 726, five boulders at 420.
        assert_eq!(stats.total_vertices, 36 + 12 * 726 + 5 * 420);
        assert_eq!(stats.total_triangles, 50 + 12 * 1200 + 5 * 800);
    }

    #[test]
    fn broken_shader_falls_back_to_program_zero() {
        struct FailingCompiler;
        impl ShaderCompiler for FailingCompiler {
            fn compile(
                &mut self,
                _vertex_source: &str,
                _fragment_source: &str,
            ) -> Result<ProgramId, ShaderError> {
                Err(ShaderError::Compile {
                    log: "0:1: syntax error".to_string(),
                })
            }
        }

        let program = link_program_or_log(&mut FailingCompiler, "", "", "stone");
        assert_eq!(program, ProgramId(0));
    }
}
