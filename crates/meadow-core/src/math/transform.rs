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

//! Defines the [`Transform`] used to place game objects, glyphs and instances.

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// An orientation expressed as Euler angles, in **degrees**.
///
/// Angles are applied yaw (around Y), then pitch (around X), then roll
/// (around Z).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    /// Rotation around the Y axis, in degrees.
    pub yaw: f32,
    /// Rotation around the X axis, in degrees.
    pub pitch: f32,
    /// Rotation around the Z axis, in degrees.
    pub roll: f32,
}

impl Rotation {
    /// Creates a rotation from yaw, pitch and roll in degrees.
    #[inline]
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Converts these Euler angles into a quaternion.
    #[inline]
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }
}

/// Position, orientation and scale of an object in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Euler orientation in degrees.
    pub rotation: Rotation,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Rotation::new(0.0, 0.0, 0.0),
        scale: Vec3::ONE,
    };

    /// Creates a transform at `position` with no rotation and unit scale.
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Returns this transform with its scale replaced.
    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Returns this transform with its rotation replaced.
    #[inline]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builds the model matrix `T * R * S`.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation.to_quat(), self.position)
    }

    /// Builds the normal matrix of [`Transform::to_mat4`].
    pub fn normal_matrix(&self) -> Mat3 {
        super::normal_matrix(&self.to_mat4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;
    use approx::assert_relative_eq;

    #[test]
    fn identity_transform_is_identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn model_matrix_applies_scale_then_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(2.0));
        let p = t.to_mat4().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 3.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 2.0, epsilon = EPSILON);
        assert_relative_eq!(p.z, 3.0, epsilon = EPSILON);
    }

    #[test]
    fn yaw_rotates_around_y() {
        let t = Transform::IDENTITY.with_rotation(Rotation::new(90.0, 0.0, 0.0));
        let p = t.to_mat4().transform_vector3(Vec3::Z);
        assert_relative_eq!(p.x, 1.0, epsilon = EPSILON);
        assert_relative_eq!(p.z, 0.0, epsilon = EPSILON);
    }
}
