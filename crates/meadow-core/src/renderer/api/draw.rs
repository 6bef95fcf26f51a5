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

//! Draw commands: which primitive topology to draw, from which kind of
//! source, and how many elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the elements of a draw come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawCommandType {
    /// Consecutive vertices of the vertex buffer.
    #[default]
    DrawArrays,
    /// Vertices addressed through the index buffer.
    DrawElements,
    /// [`DrawCommandType::DrawArrays`], repeated once per instance.
    DrawArraysInstanced,
    /// [`DrawCommandType::DrawElements`], repeated once per instance.
    DrawElementsInstanced,
}

impl DrawCommandType {
    /// Returns `true` for the instanced variants.
    pub const fn is_instanced(self) -> bool {
        matches!(
            self,
            DrawCommandType::DrawArraysInstanced | DrawCommandType::DrawElementsInstanced
        )
    }

    /// Returns `true` if the draw reads the index buffer.
    pub const fn is_indexed(self) -> bool {
        matches!(
            self,
            DrawCommandType::DrawElements | DrawCommandType::DrawElementsInstanced
        )
    }

    /// The instanced counterpart of this type.
    pub const fn instanced(self) -> Self {
        if self.is_indexed() {
            DrawCommandType::DrawElementsInstanced
        } else {
            DrawCommandType::DrawArraysInstanced
        }
    }

    /// The non-instanced counterpart of this type.
    pub const fn single(self) -> Self {
        if self.is_indexed() {
            DrawCommandType::DrawElements
        } else {
            DrawCommandType::DrawArrays
        }
    }
}

/// The primitive topology of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrawCommandMode {
    /// Independent triangles.
    #[default]
    Triangles,
    /// Individual points.
    Points,
    /// Independent line segments.
    Lines,
    /// A connected polyline.
    LineStrip,
    /// A closed polyline.
    LineLoop,
    /// A strip of triangles sharing edges.
    TriangleStrip,
    /// A fan of triangles sharing the first vertex.
    TriangleFan,
    /// Tessellation patches.
    Patches,
}

impl fmt::Display for DrawCommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DrawCommandMode::Triangles => "TRIANGLES",
            DrawCommandMode::Points => "POINTS",
            DrawCommandMode::Lines => "LINES",
            DrawCommandMode::LineStrip => "LINE_STRIP",
            DrawCommandMode::LineLoop => "LINE_LOOP",
            DrawCommandMode::TriangleStrip => "TRIANGLE_STRIP",
            DrawCommandMode::TriangleFan => "TRIANGLE_FAN",
            DrawCommandMode::Patches => "PATCHES",
        };
        f.write_str(name)
    }
}

/// A fully described draw call for one mesh.
///
/// `count` is the number of indices for indexed draws, or of vertices
/// otherwise. `instance_count` defaults to 1 and is only read by the
/// instanced types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawCommand {
    /// The source of the elements.
    pub ty: DrawCommandType,
    /// The primitive topology.
    pub mode: DrawCommandMode,
    /// Number of indices or vertices per instance.
    pub count: u32,
    /// Number of instances, for the instanced types.
    pub instance_count: u32,
}

impl Default for DrawCommand {
    fn default() -> Self {
        Self::new(DrawCommandType::default(), DrawCommandMode::default(), 0)
    }
}

impl DrawCommand {
    /// Creates a non-instanced command.
    pub const fn new(ty: DrawCommandType, mode: DrawCommandMode, count: u32) -> Self {
        Self {
            ty,
            mode,
            count,
            instance_count: 1,
        }
    }

    /// Returns the instanced version of this command.
    pub const fn instanced(self, instance_count: u32) -> Self {
        Self {
            ty: self.ty.instanced(),
            instance_count,
            ..self
        }
    }

    /// Returns the non-instanced version of this command.
    pub const fn single(self) -> Self {
        Self {
            ty: self.ty.single(),
            instance_count: 1,
            ..self
        }
    }
}
