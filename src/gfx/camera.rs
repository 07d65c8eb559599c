//! Fixed look-at camera with an off-axis perspective frustum.
//!
//! The camera is a parameter holder: eyepoint, lookat and up plus the six
//! frustum bounds. Each frame it recomputes the view and projection matrices
//! and pushes them as the `view` and `projection` uniforms of whatever
//! program is bound. Nothing is cached between frames.

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix3, Matrix4, Point3, Vector3};

use crate::gfx::backend::{ProgramId, RenderBackend};

/// Off-axis perspective frustum bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Frustum {
    /// The frustum the scene is framed with.
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: 3.0,
            far: 200.0,
        }
    }
}

/// View and projection parameter holder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eyepoint: Point3<f32>,
    lookat: Point3<f32>,
    up: Vector3<f32>,
    frustum: Frustum,
}

impl Default for Camera {
    /// The fixed viewpoint the scene is composed for: above and behind the
    /// circle, looking at its center.
    fn default() -> Self {
        Self {
            eyepoint: Point3::new(0.0, 38.0, 50.0),
            lookat: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            frustum: Frustum::default(),
        }
    }
}

impl Camera {
    pub fn new(eyepoint: Point3<f32>, lookat: Point3<f32>, up: Vector3<f32>, frustum: Frustum) -> Self {
        Self {
            eyepoint,
            lookat,
            up,
            frustum,
        }
    }

    /// Builds the look-at view matrix.
    ///
    /// The orthonormal basis comes from the usual cross-product chain:
    /// `n = normalize(eyepoint - lookat)`, `u = normalize(up x n)`,
    /// `v = n x u`.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let n = (self.eyepoint - self.lookat).normalize();
        let u = self.up.normalize().cross(n).normalize();
        let v = n.cross(u);
        let eye = self.eyepoint.to_vec();

        Matrix4::new(
            u.x,
            v.x,
            n.x,
            0.0,
            u.y,
            v.y,
            n.y,
            0.0,
            u.z,
            v.z,
            n.z,
            0.0,
            -u.dot(eye),
            -v.dot(eye),
            -n.dot(eye),
            1.0,
        )
    }

    /// Builds the off-axis perspective projection from the frustum bounds.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let Frustum {
            left,
            right,
            bottom,
            top,
            near,
            far,
        } = self.frustum;

        Matrix4::new(
            2.0 * near / (right - left),
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 * near / (top - bottom),
            0.0,
            0.0,
            (right + left) / (right - left),
            (top + bottom) / (top - bottom),
            -(far + near) / (far - near),
            -1.0,
            0.0,
            0.0,
            -2.0 * far * near / (far - near),
            0.0,
        )
    }

    /// Pushes the `view` and `projection` uniforms into a program.
    pub fn apply(&self, backend: &mut dyn RenderBackend, program: ProgramId) {
        backend.set_mat4(program, "view", self.view_matrix().into());
        backend.set_mat4(program, "projection", self.projection_matrix().into());
    }

    /// Spins the viewpoint about the world Y axis.
    ///
    /// Left-multiplies a Y rotation onto both eyepoint and up, mirroring the
    /// transform accumulator's prepend convention.
    pub fn rotate_y(&mut self, degrees: f32) {
        let rotation = Matrix3::from_angle_y(Deg(degrees));
        self.eyepoint = Point3::from_vec(rotation * self.eyepoint.to_vec());
        self.up = rotation * self.up;
    }

    pub fn eyepoint(&self) -> Point3<f32> {
        self.eyepoint
    }

    pub fn lookat(&self) -> Point3<f32> {
        self.lookat
    }

    pub fn frustum(&self) -> Frustum {
        self.frustum
    }
}
