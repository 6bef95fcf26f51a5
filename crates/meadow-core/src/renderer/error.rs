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

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::utils::CapacityError;
use std::fmt;

/// An error related to loading, compiling or linking a shader program.
#[derive(Debug)]
pub enum ShaderError {
    /// An error occurred while trying to load the shader source from a path.
    LoadError {
        /// The path of the file that failed to load.
        path: String,
        /// The underlying I/O error.
        source_error: String,
    },
    /// A shader stage failed to compile.
    CompilationError {
        /// A descriptive label for the shader.
        label: String,
        /// The compiler's info log.
        details: String,
    },
    /// The compiled stages failed to link into a program.
    LinkError {
        /// A descriptive label for the program.
        label: String,
        /// The linker's info log.
        details: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::LoadError { path, source_error } => {
                write!(
                    f,
                    "Failed to load shader source from '{path}': {source_error}"
                )
            }
            ShaderError::CompilationError { label, details } => {
                write!(f, "Shader compilation failed for '{label}': {details}")
            }
            ShaderError::LinkError { label, details } => {
                write!(f, "Program link failed for '{label}': {details}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to the creation or use of a GPU resource (buffers, textures, etc.).
#[derive(Debug)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// A generic resource could not be found.
    NotFound,
    /// The handle or ID used to reference a resource is invalid.
    InvalidHandle,
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
    /// An attempt was made to access a resource out of its bounds (e.g., in a buffer).
    OutOfBounds,
    /// A fixed-capacity slot table is full.
    CapacityExceeded {
        /// What kind of slot ran out (e.g. `"point lights"`).
        resource: &'static str,
        /// The fixed capacity.
        capacity: usize,
    },
    /// The data handed to the resource is malformed.
    InvalidData(String),
}

impl ResourceError {
    /// Builds a [`ResourceError::CapacityExceeded`] for `resource`.
    pub fn capacity(resource: &'static str, err: CapacityError) -> Self {
        ResourceError::CapacityExceeded {
            resource,
            capacity: err.capacity,
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "Shader resource error: {err}"),
            ResourceError::NotFound => write!(f, "Resource not found with ID."),
            ResourceError::InvalidHandle => write!(f, "Invalid resource handle or ID."),
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
            ResourceError::OutOfBounds => {
                write!(f, "Resource access out of bounds.")
            }
            ResourceError::CapacityExceeded { resource, capacity } => {
                write!(f, "Cannot add more {resource}: capacity of {capacity} reached")
            }
            ResourceError::InvalidData(msg) => write!(f, "Invalid resource data: {msg}"),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}

/// A high-level error raised while drawing a frame or a mesh.
#[derive(Debug)]
pub enum RenderError {
    /// A resource the frame needs (a program, a glyph mesh...) is absent.
    MissingResource(String),
    /// A mesh was drawn before its GPU buffers were created.
    BuffersNotCreated,
    /// An instanced draw was requested with a count that differs from the
    /// bound per-instance buffer.
    InstanceCountMismatch {
        /// Instance count carried by the draw command.
        requested: u32,
        /// Instance count of the bound instance buffer.
        bound: u32,
    },
    /// A draw command does not fit the buffers it would read from.
    InvalidDrawCommand(String),
    /// A framebuffer failed its completeness check.
    FramebufferIncomplete,
    /// The scene or camera could not be borrowed for the frame.
    SceneUnavailable(&'static str),
    /// An error occurred while managing a GPU resource.
    ResourceError(ResourceError),
    /// An unexpected or internal error occurred.
    Internal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingResource(what) => {
                write!(f, "Missing render resource: {what}")
            }
            RenderError::BuffersNotCreated => {
                write!(f, "Mesh drawn before its GPU buffers were created.")
            }
            RenderError::InstanceCountMismatch { requested, bound } => write!(
                f,
                "Instanced draw requests {requested} instances but {bound} are bound."
            ),
            RenderError::InvalidDrawCommand(why) => write!(f, "Invalid draw command: {why}"),
            RenderError::FramebufferIncomplete => write!(f, "Framebuffer is not complete."),
            RenderError::SceneUnavailable(what) => {
                write!(f, "The {what} is already mutably borrowed.")
            }
            RenderError::ResourceError(err) => {
                write!(f, "Graphics resource operation failed: {err}")
            }
            RenderError::Internal(msg) => {
                write!(f, "An internal or unexpected error occurred: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::ResourceError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::ResourceError(err)
    }
}

impl From<ShaderError> for RenderError {
    fn from(err: ShaderError) -> Self {
        RenderError::ResourceError(err.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn shader_error_display() {
        let err = ShaderError::LoadError {
            path: "shaders/basic_mesh.vert".to_string(),
            source_error: "File not found".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to load shader source from 'shaders/basic_mesh.vert': File not found"
        );

        let err_comp = ShaderError::CompilationError {
            label: "basic_mesh".to_string(),
            details: "Syntax error at line 5".to_string(),
        };
        assert_eq!(
            format!("{err_comp}"),
            "Shader compilation failed for 'basic_mesh': Syntax error at line 5"
        );
    }

    #[test]
    fn capacity_error_names_the_resource() {
        let err = ResourceError::capacity("spot lights", CapacityError { capacity: 10 });
        assert_eq!(
            format!("{err}"),
            "Cannot add more spot lights: capacity of 10 reached"
        );
    }

    #[test]
    fn render_error_display_wrapping_shader_error() {
        let shader_err = ShaderError::LinkError {
            label: "depth".to_string(),
            details: "missing main".to_string(),
        };
        let render_err: RenderError = shader_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Graphics resource operation failed: Shader resource error: Program link failed for 'depth': missing main"
        );
        assert!(render_err.source().is_some());
        assert!(render_err.source().unwrap().source().is_some());
    }
}
