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

//! Stand-in meshes drawn at light positions.

use meadow_core::math::{Rotation, Transform, Vec3};
use meadow_core::renderer::{
    GraphicsDevice, Mesh, MeshData, PointLight, PrimitiveShape, RenderError, ResourceError,
    SpotLight,
};

/// Scale of the sphere drawn at point lights.
pub const POINT_GLYPH_SCALE: f32 = 0.1;
/// Scale of the pyramid drawn at spot lights.
pub const SPOT_GLYPH_SCALE: f32 = 0.2;

/// Placement of the sphere glyph of `light`.
pub fn point_glyph_transform(light: &PointLight) -> Transform {
    Transform::from_position(light.position).with_scale(Vec3::splat(POINT_GLYPH_SCALE))
}

/// Placement of the pyramid glyph of `light`, its apex at the light and its
/// base facing along the light direction.
pub fn spot_glyph_transform(light: &SpotLight) -> Transform {
    let dir = light.direction.normalize_or_zero();
    let yaw = dir.x.atan2(dir.z).to_degrees();
    let pitch = (-dir.y).clamp(-1.0, 1.0).asin().to_degrees() - 90.0;
    Transform::from_position(light.position)
        .with_rotation(Rotation::new(yaw, pitch, 0.0))
        .with_scale(Vec3::splat(SPOT_GLYPH_SCALE))
}

/// The sphere and pyramid meshes owned by the renderer.
#[derive(Debug)]
pub struct LightGlyphs {
    sphere: Option<Mesh>,
    pyramid: Mesh,
}

impl LightGlyphs {
    /// Uploads the pyramid and, when `sphere_segments` is non-zero, a
    /// procedural sphere.
    pub fn new(device: &dyn GraphicsDevice, sphere_segments: u32) -> Result<Self, ResourceError> {
        let mut pyramid = Mesh::from_data(PrimitiveShape::SquarePyramid.mesh_data());
        pyramid.create_buffers(device)?;
        let sphere = if sphere_segments == 0 {
            None
        } else {
            let shape = PrimitiveShape::Sphere {
                segments: sphere_segments,
                rings: (sphere_segments / 2).max(2),
            };
            let mut sphere = Mesh::from_data(shape.mesh_data());
            sphere.create_buffers(device)?;
            Some(sphere)
        };
        Ok(Self { sphere, pyramid })
    }

    /// Replaces the sphere glyph with the first sub-mesh of an imported model.
    pub fn set_sphere(
        &mut self,
        device: &dyn GraphicsDevice,
        data: &[MeshData],
    ) -> Result<(), ResourceError> {
        let first = data.first().ok_or_else(|| {
            ResourceError::InvalidData("sphere glyph model has no sub-mesh".to_string())
        })?;
        let mut sphere = Mesh::from_data(first.clone());
        sphere.create_buffers(device)?;
        if let Some(mut old) = self.sphere.replace(sphere) {
            old.delete_buffers(device)?;
        }
        Ok(())
    }

    /// The sphere glyph.
    /// ## Errors
    /// * `RenderError::MissingResource` - If no sphere was ever loaded.
    pub fn sphere(&self) -> Result<&Mesh, RenderError> {
        self.sphere
            .as_ref()
            .ok_or_else(|| RenderError::MissingResource("sphere glyph model".to_string()))
    }

    /// The pyramid glyph.
    pub fn pyramid(&self) -> &Mesh {
        &self.pyramid
    }

    /// Releases both meshes.
    pub fn destroy(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        if let Some(mut sphere) = self.sphere.take() {
            sphere.delete_buffers(device)?;
        }
        self.pyramid.delete_buffers(device)
    }
}
