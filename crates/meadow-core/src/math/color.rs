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

//! Defines the [`Color`] type shared by materials, lights and debug primitives.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A linear RGBA color with `f32` components.
///
/// Components are not clamped on construction: lights may carry values above
/// `1.0` for HDR-ish intensities. Use [`Color::clamped_vec3`] when the value
/// is sent to a shader that expects the `[0, 1]` range.
///
/// `#[repr(C)]` keeps the layout stable so colors can be embedded in vertex
/// data uploaded to the GPU.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Color {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl Color {
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates a new `Color` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Color` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a uniform opaque gray.
    #[inline]
    pub const fn gray(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    /// Returns a copy of this color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Creates an opaque `Color` from a [`Vec3`].
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self::rgb(v.x, v.y, v.z)
    }

    /// Returns the RGB channels as a [`Vec3`].
    #[inline]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Returns the RGBA channels as a [`Vec4`].
    #[inline]
    pub fn to_vec4(&self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    /// Returns the RGB channels clamped to `[0, 1]`.
    #[inline]
    pub fn clamped_vec3(&self) -> Vec3 {
        self.to_vec3().clamp(Vec3::ZERO, Vec3::ONE)
    }

    /// Returns the RGBA channels clamped to `[0, 1]`.
    #[inline]
    pub fn clamped_vec4(&self) -> Vec4 {
        self.to_vec4().clamp(Vec4::ZERO, Vec4::ONE)
    }

    /// Returns the components as a `[r, g, b, a]` array.
    #[inline]
    pub const fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    /// Returns [`Color::WHITE`].
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from(value: [f32; 3]) -> Self {
        Self::rgb(value[0], value[1], value[2])
    }
}

impl From<[f32; 4]> for Color {
    fn from(value: [f32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_limits_each_channel() {
        let c = Color::new(1.7, -0.2, 0.5, 3.0);
        assert_eq!(c.clamped_vec3(), Vec3::new(1.0, 0.0, 0.5));
        assert_eq!(c.clamped_vec4(), Vec4::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::rgb(0.1, 0.2, 0.3).a, 1.0);
        assert_eq!(Color::from([0.1, 0.2, 0.3]).a, 1.0);
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
    }
}
