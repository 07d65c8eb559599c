//! # Primitive Shape Tessellation
//!
//! Generators for the shapes that make up the scene: the boulder sphere, the
//! stone cuboid and the ground plane. All of them emit grid meshes with two
//! triangles per cell, six indices per cell, and every generator is a pure
//! function of its division counts.

use super::GeometryData;

/// Triangle emission order within one grid cell.
///
/// `MinorFirst` walks the cell as `(a, b, c, c, d, a)` where `b` advances the
/// inner lattice coordinate; `MajorFirst` walks it as `(a, d, c, c, b, a)`
/// where `d` advances the outer one. The two orders produce opposite facing
/// triangles, which is what keeps every cuboid face front-facing outward.
#[derive(Debug, Clone, Copy)]
enum FaceWinding {
    MinorFirst,
    MajorFirst,
}

/// One cuboid face: the fixed axis, its sign, and the winding that keeps the
/// face outward under back-face culling.
struct Face {
    axis: usize,
    sign: f32,
    winding: FaceWinding,
}

/// Winding table for the six faces, in emission order. Do not "simplify" to a
/// uniform rule: flipping any single entry inverts that face under culling.
const CUBOID_FACES: [Face; 6] = [
    Face { axis: 0, sign: -1.0, winding: FaceWinding::MinorFirst }, // X = -1
    Face { axis: 0, sign: 1.0, winding: FaceWinding::MajorFirst },  // X = +1
    Face { axis: 1, sign: -1.0, winding: FaceWinding::MajorFirst }, // Y = -1
    Face { axis: 1, sign: 1.0, winding: FaceWinding::MinorFirst },  // Y = +1
    Face { axis: 2, sign: -1.0, winding: FaceWinding::MinorFirst }, // Z = -1
    Face { axis: 2, sign: 1.0, winding: FaceWinding::MajorFirst },  // Z = +1
];

/// Generates a unit UV sphere.
///
/// Walks `theta` over [0°, 360°) in `divisions` steps and `phi` over
/// [0°, 180°] in `divisions + 1` steps, producing `divisions * (divisions+1)`
/// vertices in theta-major order. Since the sphere has radius 1.0 each
/// position doubles as its own outward normal. Normals are not re-derived if
/// the object is later scaled non-uniformly; only uniform scaling keeps the
/// shading exact.
///
/// The boulders use `divisions = 20`.
pub fn tessellate_sphere(divisions: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let radius = 1.0_f32;

    for i in 0..divisions {
        let theta = (i as f32 * 360.0 / divisions as f32).to_radians();
        for j in 0..=divisions {
            let phi = (j as f32 * 180.0 / divisions as f32).to_radians();
            let position = [
                radius * theta.sin() * phi.sin(),
                radius * phi.cos(),
                radius * theta.cos() * phi.sin(),
            ];
            data.positions.push(position);
            // Unit sphere: the position is the outward normal.
            data.normals.push(position);
        }
    }

    let vertex_count = data.positions.len();
    let ring = (divisions + 1) as usize;

    for i in 0..divisions as usize {
        for j in 0..divisions as usize {
            // The modulo wraps the last theta ring back to the first,
            // stitching the seam closed. Intentional, not an off-by-one.
            let a = ((i * ring + j) % vertex_count) as u16;
            let b = ((i * ring + j + 1) % vertex_count) as u16;
            let c = (((i + 1) * ring + j + 1) % vertex_count) as u16;
            let d = (((i + 1) * ring + j) % vertex_count) as u16;
            data.indices.extend_from_slice(&[a, b, c, c, d, a]);
        }
    }

    data
}

/// Generates the unit cuboid [-1, 1]^3 from six independent face lattices.
///
/// Each face is a `(divisions+1) x (divisions+1)` grid on one fixed axis with
/// a constant outward normal and UVs remapped from [-1, 1] to [0, 1]. Faces
/// never share vertices: the index block of each face is offset by the vertex
/// count captured before that face is appended, so adjacent faces keep
/// independent normals at the shared edge (hard edges, no smooth shading).
///
/// Indices are u16, which caps `divisions` at 103 before the vertex count
/// overflows the index type. The stones use `divisions = 10`.
pub fn tessellate_cuboid(divisions: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let mut tex_coords = Vec::new();
    let step = 2.0 / divisions as f32;
    let side = (divisions + 1) as usize;

    for face in &CUBOID_FACES {
        let mut normal = [0.0; 3];
        normal[face.axis] = face.sign;

        let base = data.positions.len();

        for i in 0..side {
            let u = -1.0 + i as f32 * step;
            for j in 0..side {
                let v = -1.0 + j as f32 * step;
                let position = match face.axis {
                    0 => [face.sign, u, v],
                    1 => [u, face.sign, v],
                    _ => [u, v, face.sign],
                };
                data.positions.push(position);
                data.normals.push(normal);
                tex_coords.push([(u + 1.0) / 2.0, (v + 1.0) / 2.0]);
            }
        }

        emit_grid_cells(&mut data.indices, base, divisions as usize, side, face.winding);
    }

    data.tex_coords = Some(tex_coords);
    data
}

/// Generates the flat ground lattice at y = 0 over [-1, 1]^2.
///
/// The grid follows the same cell arithmetic as a single cuboid face with a
/// constant (0, 1, 0) normal. `tex_repetitions` scales the UVs so the ground
/// texture tiles N times across the plane.
///
/// The scene uses `divisions = 5` with one repetition.
pub fn tessellate_ground(divisions: u32, tex_repetitions: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let mut tex_coords = Vec::new();
    let step = 2.0 / divisions as f32;
    let side = (divisions + 1) as usize;

    for i in 0..side {
        let x = -1.0 + i as f32 * step;
        for j in 0..side {
            let z = -1.0 + j as f32 * step;
            data.positions.push([x, 0.0, z]);
            data.normals.push([0.0, 1.0, 0.0]);
            tex_coords.push([
                tex_repetitions / 2.0 * (x + 1.0),
                tex_repetitions / 2.0 * (z + 1.0),
            ]);
        }
    }

    emit_grid_cells(
        &mut data.indices,
        0,
        divisions as usize,
        side,
        FaceWinding::MinorFirst,
    );

    data.tex_coords = Some(tex_coords);
    data
}

/// Generates the degenerate single-quad ground: four corners, two triangles.
pub fn tessellate_quad() -> GeometryData {
    GeometryData {
        positions: vec![
            [-1.0, 0.0, -1.0],
            [-1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 0.0, -1.0],
        ],
        normals: vec![[0.0, 1.0, 0.0]; 4],
        tex_coords: Some(vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]),
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

/// Emits the two triangles of every cell in a `divisions x divisions` grid
/// whose vertices start at `base` and whose rows are `side` vertices long.
fn emit_grid_cells(
    indices: &mut Vec<u16>,
    base: usize,
    divisions: usize,
    side: usize,
    winding: FaceWinding,
) {
    for i in 0..divisions {
        for j in 0..divisions {
            let a = (base + i * side + j) as u16;
            let b = (base + i * side + j + 1) as u16;
            let c = (base + (i + 1) * side + j + 1) as u16;
            let d = (base + (i + 1) * side + j) as u16;
            let cell = match winding {
                FaceWinding::MinorFirst => [a, b, c, c, d, a],
                FaceWinding::MajorFirst => [a, d, c, c, b, a],
            };
            indices.extend_from_slice(&cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn max_index(data: &GeometryData) -> usize {
        data.indices.iter().copied().max().unwrap() as usize
    }

    /// Geometric normal of an indexed triangle, assuming counter-clockwise
    /// front faces.
    fn triangle_normal(data: &GeometryData, tri: &[u16]) -> Vector3<f32> {
        let p0 = Vector3::from(data.positions[tri[0] as usize]);
        let p1 = Vector3::from(data.positions[tri[1] as usize]);
        let p2 = Vector3::from(data.positions[tri[2] as usize]);
        (p1 - p0).cross(p2 - p1)
    }

    #[test]
    fn sphere_counts_hold_for_all_divisions() {
        for divisions in [3u32, 5, 8, 20] {
            let sphere = tessellate_sphere(divisions);
            let d = divisions as usize;
            assert_eq!(sphere.vertex_count(), d * (d + 1));
            assert_eq!(sphere.indices.len(), d * d * 6);
            assert!(max_index(&sphere) < sphere.vertex_count());
        }
    }

    #[test]
    fn sphere_at_boulder_resolution() {
        let sphere = tessellate_sphere(20);
        assert_eq!(sphere.vertex_count(), 420);
        assert_eq!(sphere.indices.len(), 2400);
        assert!(sphere.tex_coords.is_none());
    }

    #[test]
    fn sphere_last_ring_wraps_to_first() {
        let divisions = 8u32;
        let sphere = tessellate_sphere(divisions);
        let ring = (divisions + 1) as usize;
        // The final theta ring's cells must reference ring-0 vertices, or the
        // sphere would be left with an open seam.
        let tail = &sphere.indices[sphere.indices.len() - divisions as usize * 6..];
        assert!(tail.iter().any(|&i| (i as usize) < ring));
    }

    #[test]
    fn sphere_normals_equal_positions() {
        let sphere = tessellate_sphere(12);
        assert_eq!(sphere.positions, sphere.normals);
        for normal in &sphere.normals {
            let length = Vector3::from(*normal).magnitude();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn cuboid_counts_and_normal_grouping() {
        for divisions in [1u32, 4, 10] {
            let cuboid = tessellate_cuboid(divisions);
            let d = divisions as usize;
            let per_face = (d + 1) * (d + 1);
            assert_eq!(cuboid.vertex_count(), 6 * per_face);
            assert_eq!(cuboid.indices.len(), 6 * d * d * 6);
            assert!(max_index(&cuboid) < cuboid.vertex_count());

            // Each axis direction owns exactly one face worth of normals.
            for axis in 0..3 {
                for sign in [-1.0f32, 1.0] {
                    let mut expected = [0.0; 3];
                    expected[axis] = sign;
                    let count = cuboid.normals.iter().filter(|&&n| n == expected).count();
                    assert_eq!(count, per_face);
                }
            }
        }
    }

    #[test]
    fn cuboid_faces_wind_outward() {
        let cuboid = tessellate_cuboid(3);
        for tri in cuboid.indices.chunks(3) {
            let face_normal = Vector3::from(cuboid.normals[tri[0] as usize]);
            let winding = triangle_normal(&cuboid, tri);
            assert!(
                winding.dot(face_normal) > 0.0,
                "triangle {:?} faces against its stored normal {:?}",
                tri,
                face_normal
            );
        }
    }

    #[test]
    fn cuboid_uv_remap_covers_unit_range() {
        let cuboid = tessellate_cuboid(2);
        let uv = cuboid.tex_coords.as_ref().unwrap();
        // Local -1.0 maps to 0.0 and +1.0 maps to 1.0 on every face lattice.
        assert_eq!(uv[0], [0.0, 0.0]);
        assert_eq!(uv[8], [1.0, 1.0]);
        assert!(uv
            .iter()
            .all(|c| (0.0..=1.0).contains(&c[0]) && (0.0..=1.0).contains(&c[1])));
    }

    #[test]
    fn ground_lattice_counts_and_uv_repeat() {
        let ground = tessellate_ground(4, 3.0);
        assert_eq!(ground.vertex_count(), 25);
        assert_eq!(ground.indices.len(), 96);
        assert!(ground.normals.iter().all(|&n| n == [0.0, 1.0, 0.0]));

        // Three repetitions stretch the far corner to UV (3, 3).
        let uv = ground.tex_coords.as_ref().unwrap();
        assert_eq!(uv[0], [0.0, 0.0]);
        assert_eq!(uv[24], [3.0, 3.0]);
    }

    #[test]
    fn ground_triangles_face_up() {
        let ground = tessellate_ground(5, 1.0);
        for tri in ground.indices.chunks(3) {
            assert!(triangle_normal(&ground, tri).y > 0.0);
        }
    }

    #[test]
    fn quad_is_the_degenerate_ground() {
        let quad = tessellate_quad();
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.indices, vec![0, 1, 2, 2, 3, 0]);
        for tri in quad.indices.chunks(3) {
            assert!(triangle_normal(&quad, tri).y > 0.0);
        }
    }
}
