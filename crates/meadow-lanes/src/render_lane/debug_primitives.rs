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

//! Transient debug points and lines, accumulated during a frame and drawn in
//! two batched calls.

use bytemuck::{Pod, Zeroable};
use meadow_core::math::{Color, Vec3};
use meadow_core::renderer::api::{
    BufferDescriptor, BufferId, BufferKind, BufferUsage, DrawCommand, DrawCommandMode,
    DrawCommandType, StepMode, VertexArrayId, VertexAttribute, VertexBufferLayout,
};
use meadow_core::renderer::{GraphicsDevice, ResourceError};
use std::mem;

/// A colored position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// World-space position.
    pub position: Vec3,
    /// Color of the point.
    pub color: Color,
}

impl Point {
    /// Creates a point.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// A segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start of the segment.
    pub p1: Point,
    /// End of the segment.
    pub p2: Point,
}

impl Line {
    /// Creates a segment.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Paints both ends with `color`.
    pub fn set_color(&mut self, color: Color) {
        self.p1.color = color;
        self.p2.color = color;
    }
}

/// The GPU layout of a debug vertex: slot 0 position, slot 1 RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DebugVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// RGBA color.
    pub color: [f32; 4],
}

impl DebugVertex {
    const ATTRIBUTES: [VertexAttribute; 2] =
        [VertexAttribute::new(0, 3, 0), VertexAttribute::new(1, 4, 12)];

    fn layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            stride: mem::size_of::<DebugVertex>() as u64,
            step_mode: StepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<Point> for DebugVertex {
    fn from(point: Point) -> Self {
        Self {
            position: point.position.to_array(),
            color: point.color.to_array(),
        }
    }
}

/// A growable vertex buffer drawn with a single non-indexed call.
#[derive(Debug)]
struct DynamicBatch {
    label: &'static str,
    mode: DrawCommandMode,
    vertex_array: VertexArrayId,
    buffer: Option<BufferId>,
    capacity: usize,
    vertices: Vec<DebugVertex>,
}

impl DynamicBatch {
    fn new(
        device: &dyn GraphicsDevice,
        label: &'static str,
        mode: DrawCommandMode,
    ) -> Result<Self, ResourceError> {
        Ok(Self {
            label,
            mode,
            vertex_array: device.create_vertex_array(Some(label))?,
            buffer: None,
            capacity: 0,
            vertices: Vec::new(),
        })
    }

    fn ensure_capacity(
        &mut self,
        device: &dyn GraphicsDevice,
        required: usize,
    ) -> Result<(), ResourceError> {
        if required <= self.capacity && self.buffer.is_some() {
            return Ok(());
        }
        if let Some(old) = self.buffer.take() {
            device.destroy_buffer(old)?;
        }
        let new_cap = required.next_power_of_two().max(64);
        let descriptor = BufferDescriptor::new(self.label, BufferKind::Vertex)
            .with_size((new_cap * mem::size_of::<DebugVertex>()) as u64)
            .with_usage(BufferUsage::Stream);
        let buffer = device.create_buffer(&descriptor)?;
        device.set_vertex_buffer(self.vertex_array, buffer, &DebugVertex::layout())?;
        self.buffer = Some(buffer);
        self.capacity = new_cap;
        log::debug!("Grew {} batch to {new_cap} vertices.", self.label);
        Ok(())
    }

    fn refresh(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        if self.vertices.is_empty() {
            return Ok(());
        }
        self.ensure_capacity(device, self.vertices.len())?;
        match self.buffer {
            Some(buffer) => device.write_buffer(buffer, 0, bytemuck::cast_slice(&self.vertices)),
            None => Err(ResourceError::InvalidHandle),
        }
    }

    fn draw(&self, device: &dyn GraphicsDevice) -> Result<bool, ResourceError> {
        if self.vertices.is_empty() {
            return Ok(false);
        }
        let command = DrawCommand::new(
            DrawCommandType::DrawArrays,
            self.mode,
            self.vertices.len() as u32,
        );
        device.draw(self.vertex_array, &command)?;
        Ok(true)
    }

    fn destroy(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        if let Some(buffer) = self.buffer.take() {
            device.destroy_buffer(buffer)?;
        }
        device.destroy_vertex_array(self.vertex_array)
    }
}

/// The per-frame point and line batches.
///
/// Primitives pushed during a frame are uploaded by
/// [`DebugPrimitives::refresh`], drawn, then dropped by
/// [`DebugPrimitives::clear`].
#[derive(Debug)]
pub struct DebugPrimitives {
    points: DynamicBatch,
    lines: DynamicBatch,
}

impl DebugPrimitives {
    /// Creates both batches with no storage yet.
    pub fn new(device: &dyn GraphicsDevice) -> Result<Self, ResourceError> {
        Ok(Self {
            points: DynamicBatch::new(device, "debug points", DrawCommandMode::Points)?,
            lines: DynamicBatch::new(device, "debug lines", DrawCommandMode::Lines)?,
        })
    }

    /// Queues a point.
    pub fn push_point(&mut self, point: Point) {
        self.points.vertices.push(point.into());
    }

    /// Queues a segment.
    pub fn push_line(&mut self, line: Line) {
        self.lines.vertices.push(line.p1.into());
        self.lines.vertices.push(line.p2.into());
    }

    /// Number of queued points.
    pub fn point_count(&self) -> usize {
        self.points.vertices.len()
    }

    /// Number of queued segments.
    pub fn line_count(&self) -> usize {
        self.lines.vertices.len() / 2
    }

    /// Uploads the queued primitives, growing the buffers when needed.
    pub fn refresh(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        self.points.refresh(device)?;
        self.lines.refresh(device)
    }

    /// Draws the points with the current program. Returns `false` if there
    /// was nothing to draw.
    pub fn draw_points(&self, device: &dyn GraphicsDevice) -> Result<bool, ResourceError> {
        self.points.draw(device)
    }

    /// Draws the lines with the current program. Returns `false` if there
    /// was nothing to draw.
    pub fn draw_lines(&self, device: &dyn GraphicsDevice) -> Result<bool, ResourceError> {
        self.lines.draw(device)
    }

    /// Drops every queued primitive. GPU storage is kept for the next frame.
    pub fn clear(&mut self) {
        self.points.vertices.clear();
        self.lines.vertices.clear();
    }

    /// Releases both batches.
    pub fn destroy(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        self.points.destroy(device)?;
        self.lines.destroy(device)
    }
}
