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

//! A linked GPU program together with where its sources live and a cache of
//! its uniform locations.

use super::api::{ProgramDescriptor, ProgramId, UniformLocation, UniformValue};
use super::error::{RenderError, ResourceError, ShaderError};
use super::traits::GraphicsDevice;
use glam::{Mat3, Mat4, Vec3, Vec4};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum ShaderSource {
    Files { vertex: PathBuf, fragment: PathBuf },
    Inline { vertex: String, fragment: String },
}

/// A vertex + fragment program.
///
/// Uniforms are written by name. A name the program does not declare (or
/// that the driver optimized away) is silently ignored, so the same upload
/// code can feed programs that only use part of the data.
#[derive(Debug)]
pub struct ShaderProgram {
    label: String,
    source: ShaderSource,
    id: Option<ProgramId>,
    locations: HashMap<String, Option<UniformLocation>>,
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|e| ShaderError::LoadError {
        path: path.display().to_string(),
        source_error: e.to_string(),
    })
}

impl ShaderProgram {
    /// Reads, compiles and links the program from two GLSL files.
    pub fn load(
        device: &dyn GraphicsDevice,
        label: impl Into<String>,
        vertex_path: impl Into<PathBuf>,
        fragment_path: impl Into<PathBuf>,
    ) -> Result<Self, ResourceError> {
        let mut program = Self {
            label: label.into(),
            source: ShaderSource::Files {
                vertex: vertex_path.into(),
                fragment: fragment_path.into(),
            },
            id: None,
            locations: HashMap::new(),
        };
        program.id = Some(program.compile(device)?);
        Ok(program)
    }

    /// Compiles and links the program from in-memory GLSL.
    pub fn from_sources(
        device: &dyn GraphicsDevice,
        label: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Result<Self, ResourceError> {
        let mut program = Self {
            label: label.into(),
            source: ShaderSource::Inline {
                vertex: vertex_source.into(),
                fragment: fragment_source.into(),
            },
            id: None,
            locations: HashMap::new(),
        };
        program.id = Some(program.compile(device)?);
        Ok(program)
    }

    fn compile(&self, device: &dyn GraphicsDevice) -> Result<ProgramId, ResourceError> {
        let (vertex_source, fragment_source) = match &self.source {
            ShaderSource::Files { vertex, fragment } => (
                Cow::Owned(read_source(vertex)?),
                Cow::Owned(read_source(fragment)?),
            ),
            ShaderSource::Inline { vertex, fragment } => {
                (Cow::Borrowed(vertex.as_str()), Cow::Borrowed(fragment.as_str()))
            }
        };
        device.create_program(&ProgramDescriptor {
            label: Cow::Borrowed(&self.label),
            vertex_source,
            fragment_source,
        })
    }

    /// The debug label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The linked program, if any.
    pub fn id(&self) -> Option<ProgramId> {
        self.id
    }

    /// Recompiles from the stored sources.
    ///
    /// On success the old program is destroyed and the location cache is
    /// cleared. On failure the previous program stays in use.
    pub fn reload(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        let new_id = match self.compile(device) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Reloading shader '{}' failed, keeping previous program: {e}", self.label);
                return Err(e);
            }
        };
        if let Some(old) = self.id.replace(new_id) {
            device.destroy_program(old)?;
        }
        self.locations.clear();
        log::debug!("Reloaded shader '{}'.", self.label);
        Ok(())
    }

    /// Makes this the current program.
    /// ## Errors
    /// * `RenderError::MissingResource` - If the program was destroyed.
    pub fn use_program(&self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        let id = self
            .id
            .ok_or_else(|| RenderError::MissingResource(format!("program '{}'", self.label)))?;
        device.use_program(id)?;
        Ok(())
    }

    fn location(&mut self, device: &dyn GraphicsDevice, name: &str) -> Option<UniformLocation> {
        let program = self.id?;
        if let Some(cached) = self.locations.get(name) {
            return *cached;
        }
        let location = device.uniform_location(program, name);
        if location.is_none() {
            log::trace!("Shader '{}' has no uniform '{name}'.", self.label);
        }
        self.locations.insert(name.to_owned(), location);
        location
    }

    /// Writes uniform `name` of this program, which must be current.
    pub fn set_uniform(&mut self, device: &dyn GraphicsDevice, name: &str, value: UniformValue) {
        if let Some(location) = self.location(device, name) {
            device.set_uniform(location, &value);
        }
    }

    /// Writes an `int` uniform.
    pub fn set_int(&mut self, device: &dyn GraphicsDevice, name: &str, value: i32) {
        self.set_uniform(device, name, UniformValue::Int(value));
    }

    /// Writes a `uint` uniform.
    pub fn set_uint(&mut self, device: &dyn GraphicsDevice, name: &str, value: u32) {
        self.set_uniform(device, name, UniformValue::UInt(value));
    }

    /// Writes a `float` uniform.
    pub fn set_float(&mut self, device: &dyn GraphicsDevice, name: &str, value: f32) {
        self.set_uniform(device, name, UniformValue::Float(value));
    }

    /// Writes a `vec3` uniform.
    pub fn set_vec3(&mut self, device: &dyn GraphicsDevice, name: &str, value: Vec3) {
        self.set_uniform(device, name, UniformValue::Vec3(value));
    }

    /// Writes a `vec4` uniform.
    pub fn set_vec4(&mut self, device: &dyn GraphicsDevice, name: &str, value: Vec4) {
        self.set_uniform(device, name, UniformValue::Vec4(value));
    }

    /// Writes a `mat3` uniform.
    pub fn set_mat3(&mut self, device: &dyn GraphicsDevice, name: &str, value: Mat3) {
        self.set_uniform(device, name, UniformValue::Mat3(value));
    }

    /// Writes a `mat4` uniform.
    pub fn set_mat4(&mut self, device: &dyn GraphicsDevice, name: &str, value: Mat4) {
        self.set_uniform(device, name, UniformValue::Mat4(value));
    }

    /// Destroys the GPU program. Uniform writes become no-ops.
    pub fn destroy(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        self.locations.clear();
        match self.id.take() {
            Some(id) => device.destroy_program(id),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDevice;

    const VS: &str = "void main() {}";
    const FS: &str = "void main() {}";

    #[test]
    fn unknown_uniform_is_ignored() {
        let device = MockDevice::new();
        device.hide_uniform("material.shininess");
        let mut program = ShaderProgram::from_sources(&device, "lit", VS, FS).unwrap();
        program.use_program(&device).unwrap();
        program.set_float(&device, "material.shininess", 32.0);
        program.set_float(&device, "near", 0.1);
        let writes = device.uniform_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].name, "near");
    }

    #[test]
    fn failed_reload_keeps_the_previous_program() {
        let device = MockDevice::new();
        let mut program = ShaderProgram::from_sources(&device, "depth", VS, FS).unwrap();
        let before = program.id();
        device.fail_program("depth");
        assert!(program.reload(&device).is_err());
        assert_eq!(program.id(), before);

        device.allow_program("depth");
        program.reload(&device).unwrap();
        assert_ne!(program.id(), before);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let device = MockDevice::new();
        let err = ShaderProgram::load(&device, "x", "/nonexistent/a.vert", "/nonexistent/a.frag")
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Shader(ShaderError::LoadError { .. })
        ));
    }
}
