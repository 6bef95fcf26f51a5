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

//! Vertex formats and the layouts that describe them to the device.

use bytemuck::{Pod, Zeroable};
use std::mem;

/// An opaque handle to a vertex array object: the binding of vertex, index
/// and instance buffers to attribute slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub usize);

/// A single vertex attribute, always made of `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// The shader location (slot) of the attribute.
    pub location: u32,
    /// Number of `f32` components (1 to 4).
    pub components: u32,
    /// Byte offset of the attribute within one element.
    pub offset: u64,
}

impl VertexAttribute {
    /// Creates an attribute at `location` with `components` floats at `offset`.
    pub const fn new(location: u32, components: u32, offset: u64) -> Self {
        Self {
            location,
            components,
            offset,
        }
    }
}

/// Whether a buffer advances per vertex or per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    /// One element per vertex.
    #[default]
    Vertex,
    /// One element per `divisor` instances.
    Instance {
        /// How many instances share one element. Usually `1`.
        divisor: u32,
    },
}

/// Describes how a buffer is read by the vertex stage.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBufferLayout<'a> {
    /// Size in bytes of one element.
    pub stride: u64,
    /// Per-vertex or per-instance stepping.
    pub step_mode: StepMode,
    /// The attributes contained in one element.
    pub attributes: &'a [VertexAttribute],
}

/// The vertex format of every mesh: position, normal and texture coordinates.
///
/// Bound at attribute slots 0, 1 and 2.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Attribute slots of [`Vertex`].
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute::new(0, 3, 0),
        VertexAttribute::new(1, 3, 12),
        VertexAttribute::new(2, 2, 24),
    ];

    /// Creates a vertex.
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }

    /// The per-vertex layout of [`Vertex`].
    pub fn layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            stride: mem::size_of::<Vertex>() as u64,
            step_mode: StepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
