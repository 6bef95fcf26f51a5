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

//! Defines light types for the rendering system.
//!
//! Lights are plain data held by the [`Scene`](crate::scene::Scene). Each
//! kind knows how to write itself into a GLSL struct uniform, named
//! `<prefix>.<field>`, of the currently bound program.

use super::program::ShaderProgram;
use super::traits::GraphicsDevice;
use crate::math::{Color, Vec3};

/// The three light kinds, each stored in its own fixed-size shader array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// [`PointLight`].
    Point,
    /// [`SpotLight`].
    Spot,
    /// [`DirectionalLight`].
    Directional,
}

impl LightKind {
    /// Name of the uniform array holding lights of this kind.
    pub const fn array_name(self) -> &'static str {
        match self {
            LightKind::Point => "point_lights",
            LightKind::Spot => "spot_lights",
            LightKind::Directional => "dir_lights",
        }
    }

    /// Name of the `uint` uniform holding the number of used slots.
    pub const fn count_uniform(self) -> &'static str {
        match self {
            LightKind::Point => "n_point_lights_used",
            LightKind::Spot => "n_spot_lights_used",
            LightKind::Directional => "n_dir_lights_used",
        }
    }

    /// The uniform prefix of slot `index`, e.g. `point_lights[2]`.
    pub fn slot_prefix(self, index: usize) -> String {
        format!("{}[{index}]", self.array_name())
    }
}

/// Writes the Phong color terms shared by every light kind.
fn write_colors(
    prefix: &str,
    ambient: Color,
    diffuse: Color,
    specular: Color,
    program: &mut ShaderProgram,
    device: &dyn GraphicsDevice,
) {
    program.set_vec3(device, &format!("{prefix}.ambient"), ambient.clamped_vec3());
    program.set_vec3(device, &format!("{prefix}.diffuse"), diffuse.clamped_vec3());
    program.set_vec3(device, &format!("{prefix}.specular"), specular.clamped_vec3());
}

fn write_attenuation(
    prefix: &str,
    constant: f32,
    linear: f32,
    quadratic: f32,
    program: &mut ShaderProgram,
    device: &dyn GraphicsDevice,
) {
    program.set_float(device, &format!("{prefix}.constant"), constant);
    program.set_float(device, &format!("{prefix}.linear"), linear);
    program.set_float(device, &format!("{prefix}.quadratic"), quadratic);
}

/// A light radiating in all directions from a point, fading with distance.
///
/// Attenuation at distance `d` is `1 / (constant + linear * d + quadratic * d²)`.
///
/// # Examples
///
/// ```
/// use meadow_core::renderer::light::PointLight;
/// use meadow_core::math::{Color, Vec3};
///
/// let lamp = PointLight {
///     position: Vec3::new(0.0, 13.0, 0.0),
///     diffuse: Color::rgb(1.0, 0.9, 0.7),
///     ..Default::default()
/// };
/// assert!(!lamp.hidden);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3,
    /// Constant attenuation term.
    pub constant: f32,
    /// Linear attenuation term.
    pub linear: f32,
    /// Quadratic attenuation term.
    pub quadratic: f32,
    /// Ambient contribution.
    pub ambient: Color,
    /// Diffuse contribution. Also the color of the light's glyph.
    pub diffuse: Color,
    /// Specular contribution.
    pub specular: Color,
    /// Hidden lights still illuminate the scene but draw no glyph.
    pub hidden: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ambient: Color::gray(0.05),
            diffuse: Color::gray(0.8),
            specular: Color::WHITE,
            hidden: false,
        }
    }
}

impl PointLight {
    /// Writes this light into the struct uniform at `prefix`.
    pub fn write_uniforms(
        &self,
        prefix: &str,
        program: &mut ShaderProgram,
        device: &dyn GraphicsDevice,
    ) {
        program.set_vec3(device, &format!("{prefix}.position"), self.position);
        write_attenuation(prefix, self.constant, self.linear, self.quadratic, program, device);
        write_colors(prefix, self.ambient, self.diffuse, self.specular, program, device);
    }
}

/// A point light restricted to a cone.
///
/// Fragments inside `cut_off` degrees of `direction` are fully lit, and the
/// intensity fades to zero at `outer_cut_off`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// World-space position.
    pub position: Vec3,
    /// Direction the cone points to.
    pub direction: Vec3,
    /// Inner cone half-angle, in degrees.
    pub cut_off: f32,
    /// Outer cone half-angle, in degrees.
    pub outer_cut_off: f32,
    /// Constant attenuation term.
    pub constant: f32,
    /// Linear attenuation term.
    pub linear: f32,
    /// Quadratic attenuation term.
    pub quadratic: f32,
    /// Ambient contribution.
    pub ambient: Color,
    /// Diffuse contribution. Also the color of the light's glyph.
    pub diffuse: Color,
    /// Specular contribution.
    pub specular: Color,
    /// Hidden lights still illuminate the scene but draw no glyph.
    pub hidden: bool,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Y,
            cut_off: 12.5,
            outer_cut_off: 15.0,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ambient: Color::BLACK,
            diffuse: Color::WHITE,
            specular: Color::WHITE,
            hidden: false,
        }
    }
}

impl SpotLight {
    /// Writes this light into the struct uniform at `prefix`.
    ///
    /// Cut-off angles are sent as cosines, ready to compare with a dot product.
    pub fn write_uniforms(
        &self,
        prefix: &str,
        program: &mut ShaderProgram,
        device: &dyn GraphicsDevice,
    ) {
        program.set_vec3(device, &format!("{prefix}.position"), self.position);
        program.set_vec3(
            device,
            &format!("{prefix}.direction"),
            self.direction.normalize_or_zero(),
        );
        program.set_float(
            device,
            &format!("{prefix}.cut_off"),
            self.cut_off.to_radians().cos(),
        );
        program.set_float(
            device,
            &format!("{prefix}.outer_cut_off"),
            self.outer_cut_off.to_radians().cos(),
        );
        write_attenuation(prefix, self.constant, self.linear, self.quadratic, program, device);
        write_colors(prefix, self.ambient, self.diffuse, self.specular, program, device);
    }
}

/// A light infinitely far away, shining along one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in.
    pub direction: Vec3,
    /// Ambient contribution.
    pub ambient: Color,
    /// Diffuse contribution.
    pub diffuse: Color,
    /// Specular contribution.
    pub specular: Color,
    /// Directional lights have no glyph; the flag is kept for symmetry.
    pub hidden: bool,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            ambient: Color::gray(0.05),
            diffuse: Color::gray(0.4),
            specular: Color::gray(0.5),
            hidden: false,
        }
    }
}

impl DirectionalLight {
    /// Writes this light into the struct uniform at `prefix`.
    pub fn write_uniforms(
        &self,
        prefix: &str,
        program: &mut ShaderProgram,
        device: &dyn GraphicsDevice,
    ) {
        program.set_vec3(
            device,
            &format!("{prefix}.direction"),
            self.direction.normalize_or_zero(),
        );
        write_colors(prefix, self.ambient, self.diffuse, self.specular, program, device);
    }
}
