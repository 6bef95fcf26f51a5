// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Procedural meshes: the primitives a scene can spawn and the shapes used
//! for light glyphs.
//!
//! All shapes fit in a unit box centered on the origin, except [`PrimitiveShape::Quad`]
//! which stands on the XZ plane so it can be planted on a ground.

use super::api::Vertex;
use super::mesh::MeshData;
use glam::Vec3;
use std::f32::consts::PI;

/// A procedural shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveShape {
    /// A unit cube with per-face normals.
    Cube,
    /// A unit square on the XZ plane, facing +Y.
    Plane,
    /// A unit square on the XY plane, from `y = 0` to `y = 1`.
    Quad,
    /// A UV sphere of diameter 1.
    Sphere {
        /// Subdivisions around the Y axis (at least 3).
        segments: u32,
        /// Subdivisions from pole to pole (at least 2).
        rings: u32,
    },
    /// A square pyramid with its apex at the top, 18 indices.
    SquarePyramid,
}

impl PrimitiveShape {
    /// Generates the vertices and indices of this shape.
    pub fn mesh_data(&self) -> MeshData {
        match *self {
            PrimitiveShape::Cube => cube(),
            PrimitiveShape::Plane => {
                let mut data = MeshData::default();
                push_face(&mut data, Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::NEG_Z);
                data
            }
            PrimitiveShape::Quad => quad(),
            PrimitiveShape::Sphere { segments, rings } => sphere(segments.max(3), rings.max(2)),
            PrimitiveShape::SquarePyramid => square_pyramid(),
        }
    }
}

/// Appends a unit square centered on `center`. `u × v` must equal `normal`
/// for the triangles to wind counter-clockwise seen from the front.
fn push_face(data: &mut MeshData, center: Vec3, normal: Vec3, u: Vec3, v: Vec3) {
    let base = data.vertices.len() as u32;
    let corners = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
    for (cu, cv) in corners {
        let position = center + u * cu + v * cv;
        data.vertices.push(Vertex::new(
            position.to_array(),
            normal.to_array(),
            [cu + 0.5, cv + 0.5],
        ));
    }
    data.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

fn cube() -> MeshData {
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut data = MeshData::default();
    for (normal, u, v) in faces {
        push_face(&mut data, normal * 0.5, normal, u, v);
    }
    data
}

fn quad() -> MeshData {
    let normal = [0.0, 0.0, 1.0];
    MeshData::new(
        vec![
            Vertex::new([0.5, 1.0, 0.0], normal, [1.0, 1.0]),
            Vertex::new([0.5, 0.0, 0.0], normal, [1.0, 0.0]),
            Vertex::new([-0.5, 0.0, 0.0], normal, [0.0, 0.0]),
            Vertex::new([-0.5, 1.0, 0.0], normal, [0.0, 1.0]),
        ],
        vec![0, 1, 3, 1, 2, 3],
    )
}

fn sphere(segments: u32, rings: u32) -> MeshData {
    let mut data = MeshData::default();
    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        for segment in 0..=segments {
            let theta = 2.0 * PI * segment as f32 / segments as f32;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            data.vertices.push(Vertex::new(
                (normal * 0.5).to_array(),
                normal.to_array(),
                [
                    segment as f32 / segments as f32,
                    1.0 - ring as f32 / rings as f32,
                ],
            ));
        }
    }
    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            data.indices
                .extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    data
}

fn square_pyramid() -> MeshData {
    let positions = [
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(-0.5, -0.5, 0.5),
    ];
    let vertices = positions
        .iter()
        .map(|p| Vertex::new(p.to_array(), p.normalize().to_array(), [0.0, 0.0]))
        .collect();
    let indices = vec![
        0, 2, 1, // back
        0, 3, 2, // right
        0, 4, 3, // front
        0, 1, 4, // left
        1, 2, 3, // base
        1, 3, 4,
    ];
    MeshData::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_in_range(data: &MeshData) -> bool {
        data.indices
            .iter()
            .all(|&i| (i as usize) < data.vertices.len())
    }

    #[test]
    fn pyramid_has_eighteen_indices() {
        let data = PrimitiveShape::SquarePyramid.mesh_data();
        assert_eq!(data.vertices.len(), 5);
        assert_eq!(data.indices.len(), 18);
        assert!(indices_in_range(&data));
    }

    #[test]
    fn cube_has_one_quad_per_face() {
        let data = PrimitiveShape::Cube.mesh_data();
        assert_eq!(data.vertices.len(), 24);
        assert_eq!(data.indices.len(), 36);
        assert!(indices_in_range(&data));
        assert!(data
            .vertices
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() <= 0.5)));
    }

    #[test]
    fn plane_lies_flat() {
        let data = PrimitiveShape::Plane.mesh_data();
        assert!(data.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(data.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn sphere_is_clamped_to_minimum_subdivisions() {
        let data = PrimitiveShape::Sphere {
            segments: 1,
            rings: 1,
        }
        .mesh_data();
        assert_eq!(data.vertices.len(), 3 * 4);
        assert_eq!(data.indices.len(), 3 * 2 * 6);
        assert!(indices_in_range(&data));
    }

    #[test]
    fn quad_uses_the_grass_winding() {
        let data = PrimitiveShape::Quad.mesh_data();
        assert_eq!(data.indices, vec![0, 1, 3, 1, 2, 3]);
    }
}
