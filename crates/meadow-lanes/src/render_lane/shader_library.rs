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

//! Owns every program the renderer can draw with.

use super::selection::{BuiltinShader, ShaderSelection};
use meadow_core::math::Mat4;
use meadow_core::renderer::api::ShaderHandle;
use meadow_core::renderer::{GraphicsDevice, RenderError, ResourceError, ShaderProgram};
use std::path::Path;

/// The built-in programs plus any number of user programs addressed by
/// [`ShaderHandle`].
#[derive(Debug)]
pub struct ShaderLibrary {
    builtins: Vec<ShaderProgram>,
    user: Vec<ShaderProgram>,
}

impl ShaderLibrary {
    /// Loads every [`BuiltinShader`] from `<shader_dir>/<stem>.vert|.frag`.
    pub fn load(device: &dyn GraphicsDevice, shader_dir: &Path) -> Result<Self, ResourceError> {
        let mut builtins = Vec::with_capacity(BuiltinShader::ALL.len());
        for shader in BuiltinShader::ALL {
            let stem = shader.file_stem();
            let program = ShaderProgram::load(
                device,
                stem,
                shader_dir.join(format!("{stem}.vert")),
                shader_dir.join(format!("{stem}.frag")),
            )?;
            builtins.push(program);
        }
        log::debug!(
            "Loaded {} built-in shaders from {}",
            builtins.len(),
            shader_dir.display()
        );
        Ok(Self {
            builtins,
            user: Vec::new(),
        })
    }

    /// Builds a library from already compiled built-ins, in
    /// [`BuiltinShader::ALL`] order.
    /// ## Errors
    /// * `ResourceError::InvalidData` - If the count does not match.
    pub fn from_programs(builtins: Vec<ShaderProgram>) -> Result<Self, ResourceError> {
        if builtins.len() != BuiltinShader::ALL.len() {
            return Err(ResourceError::InvalidData(format!(
                "expected {} built-in programs, got {}",
                BuiltinShader::ALL.len(),
                builtins.len()
            )));
        }
        Ok(Self {
            builtins,
            user: Vec::new(),
        })
    }

    /// Takes ownership of a user program.
    pub fn register(&mut self, program: ShaderProgram) -> ShaderHandle {
        self.user.push(program);
        ShaderHandle(self.user.len() - 1)
    }

    /// Returns a built-in program.
    pub fn builtin_mut(&mut self, shader: BuiltinShader) -> &mut ShaderProgram {
        &mut self.builtins[shader.index()]
    }

    /// Returns a user program.
    pub fn user_mut(&mut self, handle: ShaderHandle) -> Option<&mut ShaderProgram> {
        self.user.get_mut(handle.0)
    }

    /// Returns the program a selection refers to.
    /// ## Errors
    /// * `RenderError::MissingResource` - If an override handle is unknown.
    pub fn resolve_mut(
        &mut self,
        selection: ShaderSelection,
    ) -> Result<&mut ShaderProgram, RenderError> {
        match selection {
            ShaderSelection::Builtin(shader) => Ok(self.builtin_mut(shader)),
            ShaderSelection::Override(handle) => self.user.get_mut(handle.0).ok_or_else(|| {
                RenderError::MissingResource(format!("user shader {}", handle.0))
            }),
        }
    }

    /// Writes `view` and `projection` into every program, built-in or not.
    pub fn broadcast_camera(
        &mut self,
        device: &dyn GraphicsDevice,
        view: Mat4,
        projection: Mat4,
    ) -> Result<(), RenderError> {
        for program in self.builtins.iter_mut().chain(self.user.iter_mut()) {
            program.use_program(device)?;
            program.set_mat4(device, "view", view);
            program.set_mat4(device, "projection", projection);
        }
        Ok(())
    }

    /// Recompiles every program. Failures are logged and the affected
    /// programs keep their previous binary.
    ///
    /// Returns the number of programs that failed.
    pub fn reload_all(&mut self, device: &dyn GraphicsDevice) -> usize {
        let mut failures = 0;
        for program in self.builtins.iter_mut().chain(self.user.iter_mut()) {
            if let Err(e) = program.reload(device) {
                log::error!("Shader '{}' failed to reload: {e}", program.label());
                failures += 1;
            }
        }
        failures
    }

    /// Destroys every program.
    pub fn destroy(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        for program in self.builtins.iter_mut().chain(self.user.iter_mut()) {
            program.destroy(device)?;
        }
        Ok(())
    }
}
