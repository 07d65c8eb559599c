// src/lib.rs
//! Sarsen
//!
//! A static Stonehenge scene renderer: procedural tessellation, model
//! transform accumulation and a GL-style named-uniform rendering contract.
//! The GPU itself sits behind the traits in [`gfx::backend`]; everything here
//! is synchronous and single-threaded.

pub mod gfx;

// Re-export main types for convenience
pub use gfx::backend::{ProgramId, RenderBackend, ShaderCompiler, TextureLoader};
pub use gfx::{Camera, Light, Material, Scene, SceneObject, Transform};
