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

//! Pushes the scene's lights into a lit program.

use meadow_core::math::Vec3;
use meadow_core::renderer::{GraphicsDevice, LightKind, RenderError, ShaderProgram};
use meadow_core::Scene;

/// Binds `program` and writes the used-light counts, the camera position
/// (`view_pos`) and one struct uniform per used light.
///
/// Lights are written in registration order at `point_lights[i]`,
/// `spot_lights[i]` and `dir_lights[i]`. Slots past the used count are never
/// touched. Hidden lights are uploaded like any other.
pub fn send_light_data(
    program: &mut ShaderProgram,
    scene: &Scene,
    view_position: Vec3,
    device: &dyn GraphicsDevice,
) -> Result<(), RenderError> {
    program.use_program(device)?;

    for kind in [LightKind::Point, LightKind::Spot, LightKind::Directional] {
        program.set_uint(device, kind.count_uniform(), scene.lights_used(kind) as u32);
    }
    program.set_vec3(device, "view_pos", view_position);

    for (i, light) in scene.point_lights().iter().enumerate() {
        light.write_uniforms(&LightKind::Point.slot_prefix(i), program, device);
    }
    for (i, light) in scene.spot_lights().iter().enumerate() {
        light.write_uniforms(&LightKind::Spot.slot_prefix(i), program, device);
    }
    for (i, light) in scene.directional_lights().iter().enumerate() {
        light.write_uniforms(&LightKind::Directional.slot_prefix(i), program, device);
    }
    Ok(())
}
