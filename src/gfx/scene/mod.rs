//! # Scene Assembly and Frame Loop
//!
//! Builds the Stonehenge reconstruction out of the tessellated primitives and
//! drives the per-frame draw order: the ground under its own shader program,
//! then every stone and boulder under the shared stone program.

pub mod scene;

pub use scene::{link_program_or_log, Scene, SceneStatistics, GROUND_SIZE};
