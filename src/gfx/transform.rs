//! Model transform accumulation.
//!
//! Every renderable owns one 4x4 model matrix. Operations prepend: each call
//! builds the elementary affine matrix and left-multiplies it onto whatever
//! has accumulated, so calling `scale` then `rotate` then `translate` applies
//! translate ∘ rotate ∘ scale to local coordinates. That is the standard
//! model-matrix build order, and the per-object placement sequences depend on
//! it.

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

/// Accumulated model matrix with left-multiplying operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f32>,
}

impl Transform {
    /// Starts from the identity.
    pub fn new() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Prepends a scale along the three axes.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.matrix = Matrix4::from_nonuniform_scale(x, y, z) * self.matrix;
    }

    /// Prepends a rotation given per-axis angles in degrees.
    ///
    /// The three axis rotations compose in the fixed order Y then Z then X on
    /// every call (`Rx * Rz * Ry`), regardless of argument order. Callers that
    /// need a different order chain separate `rotate` calls.
    pub fn rotate(&mut self, x: f32, y: f32, z: f32) {
        let rotation = Matrix4::from_angle_x(Deg(x))
            * Matrix4::from_angle_z(Deg(z))
            * Matrix4::from_angle_y(Deg(y));
        self.matrix = rotation * self.matrix;
    }

    /// Prepends a translation.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.matrix = Matrix4::from_translation(Vector3::new(x, y, z)) * self.matrix;
    }

    /// The accumulated model matrix.
    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    /// The matrix in the column-major layout the backend uploads.
    pub fn to_uniform(&self) -> [[f32; 4]; 4] {
        self.matrix.into()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
