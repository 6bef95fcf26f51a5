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

//! Math types used throughout the renderer.
//!
//! Vector and matrix algebra comes from `glam`; this module adds the
//! renderer-facing [`Color`] and [`Transform`] types on top of it.

pub mod color;
pub mod transform;

pub use color::Color;
pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
pub use transform::{Rotation, Transform};

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

/// Returns the matrix used to transform normals by `model`: the transpose of
/// its inverse, reduced to its upper-left 3x3 block.
#[inline]
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    Mat3::from_mat4(model.inverse().transpose())
}
