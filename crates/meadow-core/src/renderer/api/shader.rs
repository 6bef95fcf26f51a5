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

//! Shader program handles and uniform values.

use glam::{Mat3, Mat4, Vec3, Vec4};
use std::borrow::Cow;

/// An opaque handle to a linked GPU program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub usize);

/// An opaque handle to a uniform location inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// A renderer-level handle to a shader program owned by the renderer's
/// shader library.
///
/// Materials reference programs through this handle instead of owning them,
/// so one program can be shared by any number of objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub usize);

/// A value written to a uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `int` or `sampler2D` unit index.
    Int(i32),
    /// `uint`.
    UInt(u32),
    /// `float`.
    Float(f32),
    /// `vec3`.
    Vec3(Vec3),
    /// `vec4`.
    Vec4(Vec4),
    /// `mat3`, column-major.
    Mat3(Mat3),
    /// `mat4`, column-major.
    Mat4(Mat4),
}

/// The GLSL sources of a program to compile and link.
#[derive(Debug, Clone)]
pub struct ProgramDescriptor<'a> {
    /// A debug label, used in error messages.
    pub label: Cow<'a, str>,
    /// Vertex stage source.
    pub vertex_source: Cow<'a, str>,
    /// Fragment stage source.
    pub fragment_source: Cow<'a, str>,
}
