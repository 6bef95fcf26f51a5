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

//! Per-instance data for instanced draws.

use super::api::{
    BufferDescriptor, BufferId, BufferKind, BufferUsage, StepMode, VertexAttribute,
    VertexBufferLayout,
};
use super::error::ResourceError;
use super::traits::GraphicsDevice;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::mem;
use std::ops::Range;

/// The first attribute slot used by [`InstanceData`]. Slots 0 to 2 belong to
/// [`Vertex`](super::api::Vertex).
pub const INSTANCE_ATTRIBUTE_BASE: u32 = 3;

/// One instance: its model matrix and that matrix's inverse-transpose, both
/// column-major.
///
/// Each matrix occupies four consecutive `vec4` attribute slots, so an
/// instance spans slots 3 to 10.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix columns.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for normals.
    pub inverse_model: [[f32; 4]; 4],
}

const fn instance_attributes() -> [VertexAttribute; 8] {
    let mut attributes = [VertexAttribute::new(0, 4, 0); 8];
    let mut i = 0;
    while i < 8 {
        attributes[i] = VertexAttribute::new(INSTANCE_ATTRIBUTE_BASE + i as u32, 4, 16 * i as u64);
        i += 1;
    }
    attributes
}

impl InstanceData {
    /// Byte size of one instance.
    pub const STRIDE: usize = mem::size_of::<InstanceData>();

    /// Attribute slots of [`InstanceData`].
    pub const ATTRIBUTES: [VertexAttribute; 8] = instance_attributes();

    /// Packs `model` together with its inverse-transpose.
    pub fn from_model(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            inverse_model: model.inverse().transpose().to_cols_array_2d(),
        }
    }

    /// The model matrix.
    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// The inverse-transpose matrix.
    pub fn inverse_model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.inverse_model)
    }

    /// The per-instance layout, advancing once per instance.
    pub fn layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            stride: Self::STRIDE as u64,
            step_mode: StepMode::Instance { divisor: 1 },
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A CPU-side array of [`InstanceData`] mirrored in one GPU buffer.
///
/// Changes made through [`InstanceBuffer::set_model`] or
/// [`InstanceBuffer::update_models`] are tracked as a dirty range and pushed
/// by [`InstanceBuffer::flush`] with a single partial write. The instance
/// count is fixed once the buffer is uploaded.
#[derive(Debug, Default)]
pub struct InstanceBuffer {
    instances: Vec<InstanceData>,
    buffer: Option<BufferId>,
    dirty: Option<Range<usize>>,
}

impl InstanceBuffer {
    /// Packs one instance per model matrix.
    pub fn from_models(models: impl IntoIterator<Item = Mat4>) -> Self {
        Self {
            instances: models.into_iter().map(InstanceData::from_model).collect(),
            buffer: None,
            dirty: None,
        }
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if there are no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The packed instances.
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    /// The instances viewed as a flat array of `2 * len()` matrices: for each
    /// instance, its model matrix followed by its inverse-transpose.
    pub fn as_matrices(&self) -> &[[[f32; 4]; 4]] {
        bytemuck::cast_slice(&self.instances)
    }

    /// The GPU buffer, once uploaded.
    pub fn buffer(&self) -> Option<BufferId> {
        self.buffer
    }

    /// The instance range waiting for [`InstanceBuffer::flush`].
    pub fn dirty_range(&self) -> Option<Range<usize>> {
        self.dirty.clone()
    }

    /// Creates the GPU buffer with the full contents. If it already exists,
    /// pending changes are flushed instead.
    pub fn upload(&mut self, device: &dyn GraphicsDevice) -> Result<BufferId, ResourceError> {
        if let Some(buffer) = self.buffer {
            self.flush(device)?;
            return Ok(buffer);
        }
        if self.instances.is_empty() {
            return Err(ResourceError::InvalidData(
                "cannot upload an empty instance buffer".to_string(),
            ));
        }
        let descriptor = BufferDescriptor::new("instance data", BufferKind::Vertex)
            .with_usage(BufferUsage::Dynamic);
        let buffer =
            device.create_buffer_with_data(&descriptor, bytemuck::cast_slice(&self.instances))?;
        self.buffer = Some(buffer);
        self.dirty = None;
        Ok(buffer)
    }

    /// Replaces the model matrix of instance `index`, refreshing its
    /// inverse-transpose, and marks it dirty.
    /// ## Errors
    /// * `ResourceError::OutOfBounds` - If `index >= len()`.
    pub fn set_model(&mut self, index: usize, model: Mat4) -> Result<(), ResourceError> {
        let slot = self
            .instances
            .get_mut(index)
            .ok_or(ResourceError::OutOfBounds)?;
        *slot = InstanceData::from_model(model);
        self.mark_dirty(index..index + 1);
        Ok(())
    }

    /// Calls `f` with each instance index and model matrix, then marks every
    /// instance dirty.
    pub fn update_models(&mut self, mut f: impl FnMut(usize, &mut Mat4)) {
        for (index, instance) in self.instances.iter_mut().enumerate() {
            let mut model = instance.model();
            f(index, &mut model);
            *instance = InstanceData::from_model(model);
        }
        let len = self.instances.len();
        self.mark_dirty(0..len);
    }

    fn mark_dirty(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.dirty = Some(match self.dirty.take() {
            Some(current) => current.start.min(range.start)..current.end.max(range.end),
            None => range,
        });
    }

    /// Writes the dirty range to the GPU buffer. A no-op when nothing changed
    /// or before the first upload.
    pub fn flush(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        let Some(buffer) = self.buffer else {
            return Ok(());
        };
        let Some(range) = self.dirty.take() else {
            return Ok(());
        };
        let offset = (range.start * InstanceData::STRIDE) as u64;
        let bytes: &[u8] = bytemuck::cast_slice(&self.instances[range]);
        device.write_buffer(buffer, offset, bytes)
    }

    /// Destroys the GPU buffer. The CPU data is kept.
    pub fn destroy(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        if let Some(buffer) = self.buffer.take() {
            device.destroy_buffer(buffer)?;
        }
        self.dirty = None;
        Ok(())
    }
}
