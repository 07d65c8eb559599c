//! Headless Stonehenge demo.
//!
//! Assembles the full scene against the in-memory recording backend and logs
//! what a GPU-backed run would have received: mesh uploads, uniform writes
//! and draw calls.
//!
//! ```bash
//! cargo run --example stonehenge
//! ```

use anyhow::Result;
use log::info;

use sarsen::gfx::backend::{RecordingBackend, StubCompiler, StubTextureLoader};
use sarsen::gfx::scene::link_program_or_log;
use sarsen::Scene;

const GROUND_VERTEX_SHADER: &str = include_str!("../shaders/ground.vert");
const GROUND_FRAGMENT_SHADER: &str = include_str!("../shaders/ground.frag");
const STONE_VERTEX_SHADER: &str = include_str!("../shaders/stone.vert");
const STONE_FRAGMENT_SHADER: &str = include_str!("../shaders/stone.frag");

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut compiler = StubCompiler::default();
    let ground_program = link_program_or_log(
        &mut compiler,
        GROUND_VERTEX_SHADER,
        GROUND_FRAGMENT_SHADER,
        "ground",
    );
    let stone_program = link_program_or_log(
        &mut compiler,
        STONE_VERTEX_SHADER,
        STONE_FRAGMENT_SHADER,
        "stone",
    );

    let mut backend = RecordingBackend::new();
    let mut textures = StubTextureLoader::new();
    let mut scene = Scene::assemble(&mut backend, &mut textures, ground_program, stone_program);

    let stats = scene.statistics();
    info!(
        "assembled {} objects: {} vertices, {} triangles",
        stats.object_count, stats.total_vertices, stats.total_triangles
    );

    // Three frames: straight on, then nudged left and right like the
    // keyboard rotation would.
    scene.draw(&mut backend);
    scene.rotate(2.0);
    scene.draw(&mut backend);
    scene.rotate(-4.0);
    scene.draw(&mut backend);

    info!(
        "recorded {} mesh uploads, {} uniform writes, {} draw calls",
        backend.meshes.len(),
        backend.uniforms.len(),
        backend.draws.len()
    );

    Ok(())
}
