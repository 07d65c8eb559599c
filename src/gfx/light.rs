//! Scene light source.
//!
//! A single fixed point light: position plus ambient, diffuse and specular
//! intensities. Pushed per frame as the `lightPosition`, `I_a`, `I_d` and
//! `I_s` uniforms of whatever program is bound.

use crate::gfx::backend::{ProgramId, RenderBackend};

/// Fixed light position and intensities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    position: [f32; 3],
    ambient: [f32; 3],
    diffuse: [f32; 3],
    specular: [f32; 3],
}

impl Default for Light {
    /// The warm light the scene is lit with, low in the north-west.
    fn default() -> Self {
        Self {
            position: [-20.0, 20.0, -50.0],
            ambient: [1.0, 0.9, 0.9],
            diffuse: [1.0, 0.9, 0.9],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

impl Light {
    pub fn new(
        position: [f32; 3],
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
    ) -> Self {
        Self {
            position,
            ambient,
            diffuse,
            specular,
        }
    }

    /// Pushes the light uniforms into a program.
    pub fn apply(&self, backend: &mut dyn RenderBackend, program: ProgramId) {
        backend.set_vec3(program, "lightPosition", self.position);
        backend.set_vec3(program, "I_a", self.ambient);
        backend.set_vec3(program, "I_d", self.diffuse);
        backend.set_vec3(program, "I_s", self.specular);
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::backend::RecordingBackend;

    #[test]
    fn apply_pushes_position_and_intensities() {
        let mut backend = RecordingBackend::new();
        Light::default().apply(&mut backend, ProgramId(0));
        for name in ["lightPosition", "I_a", "I_d", "I_s"] {
            assert_eq!(backend.writes_to(name).len(), 1, "missing uniform {name}");
        }
    }
}
