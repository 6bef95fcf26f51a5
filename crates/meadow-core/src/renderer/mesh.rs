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

//! CPU-side meshes and the lifecycle of their GPU buffers.

use super::api::{
    BufferDescriptor, BufferId, BufferKind, DrawCommand, DrawCommandMode, DrawCommandType,
    Vertex, VertexArrayId,
};
use super::error::{RenderError, ResourceError};
use super::instance::{InstanceBuffer, InstanceData};
use super::traits::GraphicsDevice;

/// Vertex and index data of a mesh before any GPU upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// The vertices.
    pub vertices: Vec<Vertex>,
    /// Element indices into `vertices`. Empty for non-indexed meshes.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Creates mesh data from its parts.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }
}

/// The GPU objects backing a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuBufferSet {
    /// The vertex array binding everything together.
    pub vertex_array: VertexArrayId,
    /// Per-vertex attribute buffer.
    pub vertex_buffer: BufferId,
    /// Index buffer, for indexed meshes.
    pub index_buffer: Option<BufferId>,
    /// Vertices uploaded to `vertex_buffer`.
    pub vertex_count: u32,
    /// Indices uploaded to `index_buffer`, or 0.
    pub index_count: u32,
}

impl GpuBufferSet {
    /// Checks that `command` only reads what was uploaded.
    /// ## Errors
    /// * `RenderError::InvalidDrawCommand` - If the command is indexed without an
    ///   index buffer (or the reverse), or reads past the uploaded elements.
    pub fn validate(&self, command: &DrawCommand) -> Result<(), RenderError> {
        if command.ty.is_indexed() != self.index_buffer.is_some() {
            return Err(RenderError::InvalidDrawCommand(format!(
                "{:?} on a mesh {} an index buffer",
                command.ty,
                if self.index_buffer.is_some() {
                    "with"
                } else {
                    "without"
                }
            )));
        }
        let available = if command.ty.is_indexed() {
            self.index_count
        } else {
            self.vertex_count
        };
        if command.count > available {
            return Err(RenderError::InvalidDrawCommand(format!(
                "count {} exceeds the {available} uploaded elements",
                command.count
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InstanceBinding {
    buffer: BufferId,
    count: u32,
}

/// A drawable mesh: CPU data, its draw command and, once uploaded, its GPU
/// buffers.
///
/// The lifecycle is `Mesh::new` → [`Mesh::create_buffers`] → any number of
/// [`Mesh::draw`] → [`Mesh::delete_buffers`]. A mesh created with
/// [`Mesh::shared_from`] reuses another mesh's GPU objects and never frees
/// them.
#[derive(Debug, Default)]
pub struct Mesh {
    /// The vertices uploaded by [`Mesh::create_buffers`].
    pub vertices: Vec<Vertex>,
    /// The indices uploaded by [`Mesh::create_buffers`].
    pub indices: Vec<u32>,
    /// How the mesh is drawn. `count` and `ty` are derived from the data when
    /// the buffers are created; `mode` is kept.
    pub draw_command: DrawCommand,
    buffers: Option<GpuBufferSet>,
    owns_buffers: bool,
    instances: Option<InstanceBinding>,
}

impl Mesh {
    /// Creates an empty triangle mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a triangle mesh from `data`, without uploading it.
    pub fn from_data(data: MeshData) -> Self {
        Self {
            vertices: data.vertices,
            indices: data.indices,
            ..Self::default()
        }
    }

    /// Sets the primitive topology.
    pub fn with_mode(mut self, mode: DrawCommandMode) -> Self {
        self.draw_command.mode = mode;
        self
    }

    /// Creates a mesh drawing through the GPU buffers of `source`.
    ///
    /// The new mesh copies the vertex array and draw command but holds no
    /// CPU data, and [`Mesh::delete_buffers`] on it only forgets the handles.
    /// ## Errors
    /// * `RenderError::BuffersNotCreated` - If `source` was never uploaded.
    pub fn shared_from(source: &Mesh) -> Result<Self, RenderError> {
        let buffers = source.buffers.ok_or(RenderError::BuffersNotCreated)?;
        Ok(Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            draw_command: source.draw_command,
            buffers: Some(buffers),
            owns_buffers: false,
            instances: source.instances,
        })
    }

    /// The GPU objects, once created.
    pub fn buffers(&self) -> Option<&GpuBufferSet> {
        self.buffers.as_ref()
    }

    /// Returns `true` if the mesh can be drawn.
    pub fn has_buffers(&self) -> bool {
        self.buffers.is_some()
    }

    /// Returns `true` if the GPU objects belong to another mesh.
    pub fn is_shared(&self) -> bool {
        self.buffers.is_some() && !self.owns_buffers
    }

    /// Number of instances bound through [`Mesh::attach_instances`].
    pub fn bound_instance_count(&self) -> Option<u32> {
        self.instances.map(|binding| binding.count)
    }

    /// Uploads the vertices and indices and records the draw command.
    ///
    /// The command becomes indexed when indices are present, and its count is
    /// the number of indices (or vertices). Calling this again on a mesh that
    /// already has buffers logs a warning and does nothing.
    /// ## Errors
    /// * `ResourceError::InvalidData` - If the mesh is empty or an index is out of range.
    pub fn create_buffers(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        if self.buffers.is_some() {
            log::warn!("Mesh buffers already exist; create_buffers ignored.");
            return Ok(());
        }
        if self.vertices.is_empty() {
            return Err(ResourceError::InvalidData(
                "cannot upload a mesh without vertices".to_string(),
            ));
        }
        let vertex_count = self.vertices.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ResourceError::InvalidData(format!(
                "index {bad} is out of range for {vertex_count} vertices"
            )));
        }

        let vertex_array = device.create_vertex_array(Some("mesh"))?;
        let mut allocated = Vec::with_capacity(2);
        let uploaded = self.upload(device, vertex_array, &mut allocated);
        let (vertex_buffer, index_buffer) = match uploaded {
            Ok(buffers) => buffers,
            Err(err) => {
                release_partial_upload(device, vertex_array, &allocated);
                return Err(err);
            }
        };

        let (ty, count) = match index_buffer {
            Some(_) => (DrawCommandType::DrawElements, self.indices.len()),
            None => (DrawCommandType::DrawArrays, vertex_count),
        };
        self.draw_command = DrawCommand::new(ty, self.draw_command.mode, count as u32);
        self.buffers = Some(GpuBufferSet {
            vertex_array,
            vertex_buffer,
            index_buffer,
            vertex_count: vertex_count as u32,
            index_count: self.indices.len() as u32,
        });
        self.owns_buffers = true;
        Ok(())
    }

    fn upload(
        &self,
        device: &dyn GraphicsDevice,
        vertex_array: VertexArrayId,
        allocated: &mut Vec<BufferId>,
    ) -> Result<(BufferId, Option<BufferId>), ResourceError> {
        let vertex_buffer = device.create_buffer_with_data(
            &BufferDescriptor::new("mesh vertices", BufferKind::Vertex),
            bytemuck::cast_slice(&self.vertices),
        )?;
        allocated.push(vertex_buffer);
        device.set_vertex_buffer(vertex_array, vertex_buffer, &Vertex::layout())?;

        if self.indices.is_empty() {
            return Ok((vertex_buffer, None));
        }
        let index_buffer = device.create_buffer_with_data(
            &BufferDescriptor::new("mesh indices", BufferKind::Index),
            bytemuck::cast_slice(&self.indices),
        )?;
        allocated.push(index_buffer);
        device.set_index_buffer(vertex_array, index_buffer)?;
        Ok((vertex_buffer, Some(index_buffer)))
    }

    /// Releases the GPU objects. A no-op if none were created.
    ///
    /// Shared meshes only drop their handles. An attached instance buffer is
    /// owned by its [`InstanceBuffer`] and is not destroyed here.
    pub fn delete_buffers(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        let Some(buffers) = self.buffers.take() else {
            return Ok(());
        };
        self.instances = None;
        self.draw_command = self.draw_command.single();
        if !std::mem::take(&mut self.owns_buffers) {
            return Ok(());
        }
        device.destroy_vertex_array(buffers.vertex_array)?;
        device.destroy_buffer(buffers.vertex_buffer)?;
        if let Some(index_buffer) = buffers.index_buffer {
            device.destroy_buffer(index_buffer)?;
        }
        Ok(())
    }

    /// Binds the per-instance matrices of `instances` to attribute slots 3 to
    /// 10 and switches the draw command to its instanced form.
    /// ## Errors
    /// * `ResourceError::InvalidHandle` - If either side has not been uploaded yet.
    pub fn attach_instances(
        &mut self,
        device: &dyn GraphicsDevice,
        instances: &InstanceBuffer,
    ) -> Result<(), ResourceError> {
        let (Some(buffers), Some(buffer)) = (self.buffers, instances.buffer()) else {
            return Err(ResourceError::InvalidHandle);
        };
        device.set_vertex_buffer(buffers.vertex_array, buffer, &InstanceData::layout())?;
        let count = instances.len() as u32;
        self.instances = Some(InstanceBinding { buffer, count });
        self.draw_command = self.draw_command.instanced(count);
        Ok(())
    }

    /// Issues the draw call for this mesh with the current program.
    /// ## Errors
    /// * `RenderError::BuffersNotCreated` - If [`Mesh::create_buffers`] was not called.
    /// * `RenderError::InvalidDrawCommand` - If the command reads past the
    ///   uploaded buffers.
    /// * `RenderError::InstanceCountMismatch` - If an instanced command disagrees
    ///   with the bound instance buffer.
    pub fn draw(&self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        let buffers = self.buffers.ok_or(RenderError::BuffersNotCreated)?;
        buffers.validate(&self.draw_command)?;
        if self.draw_command.ty.is_instanced() {
            let bound = self.bound_instance_count().unwrap_or(0);
            if bound != self.draw_command.instance_count {
                return Err(RenderError::InstanceCountMismatch {
                    requested: self.draw_command.instance_count,
                    bound,
                });
            }
        }
        device.draw(buffers.vertex_array, &self.draw_command)?;
        Ok(())
    }
}

fn release_partial_upload(
    device: &dyn GraphicsDevice,
    vertex_array: VertexArrayId,
    allocated: &[BufferId],
) {
    for &buffer in allocated {
        if let Err(err) = device.destroy_buffer(buffer) {
            log::warn!("Failed to release mesh buffer {buffer:?}: {err}");
        }
    }
    if let Err(err) = device.destroy_vertex_array(vertex_array) {
        log::warn!("Failed to release vertex array {vertex_array:?}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DeviceCall, FailingCall, MockDevice};

    fn triangle() -> MeshData {
        MeshData::new(
            vec![
                Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
                Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
                Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn create_buffers_derives_the_draw_command() {
        let device = MockDevice::new();
        let mut mesh = Mesh::from_data(triangle());
        mesh.create_buffers(&device).unwrap();
        assert_eq!(mesh.draw_command.ty, DrawCommandType::DrawElements);
        assert_eq!(mesh.draw_command.count, 3);

        let mut points = Mesh::from_data(MeshData::new(triangle().vertices, vec![]))
            .with_mode(DrawCommandMode::Points);
        points.create_buffers(&device).unwrap();
        assert_eq!(points.draw_command.ty, DrawCommandType::DrawArrays);
        assert_eq!(points.draw_command.mode, DrawCommandMode::Points);
        assert_eq!(points.draw_command.count, 3);
    }

    #[test]
    fn out_of_range_index_is_rejected_before_any_allocation() {
        let device = MockDevice::new();
        let mut data = triangle();
        data.indices.push(3);
        let mut mesh = Mesh::from_data(data);
        assert!(matches!(
            mesh.create_buffers(&device),
            Err(ResourceError::InvalidData(_))
        ));
        assert!(device.calls().is_empty());
        assert!(!mesh.has_buffers());
    }

    #[test]
    fn second_create_is_a_no_op() {
        let device = MockDevice::new();
        let mut mesh = Mesh::from_data(triangle());
        mesh.create_buffers(&device).unwrap();
        let first = *mesh.buffers().unwrap();
        let calls = device.calls().len();
        mesh.create_buffers(&device).unwrap();
        assert_eq!(*mesh.buffers().unwrap(), first);
        assert_eq!(device.calls().len(), calls);
    }

    #[test]
    fn delete_without_create_is_a_no_op() {
        let device = MockDevice::new();
        let mut mesh = Mesh::from_data(triangle());
        mesh.delete_buffers(&device).unwrap();
        assert!(device.calls().is_empty());
    }

    #[test]
    fn draw_before_create_fails() {
        let device = MockDevice::new();
        let mesh = Mesh::from_data(triangle());
        assert!(matches!(
            mesh.draw(&device),
            Err(RenderError::BuffersNotCreated)
        ));
    }

    #[test]
    fn shared_mesh_does_not_free_the_source_buffers() {
        let device = MockDevice::new();
        let mut source = Mesh::from_data(triangle());
        source.create_buffers(&device).unwrap();
        let mut shared = Mesh::shared_from(&source).unwrap();
        assert!(shared.is_shared());
        assert_eq!(shared.draw_command, source.draw_command);

        shared.delete_buffers(&device).unwrap();
        assert!(!device
            .calls()
            .iter()
            .any(|c| matches!(c, DeviceCall::DestroyBuffer(_))));
        source.draw(&device).unwrap();
    }

    #[test]
    fn instanced_draw_with_wrong_count_fails() {
        let device = MockDevice::new();
        let mut mesh = Mesh::from_data(triangle());
        mesh.create_buffers(&device).unwrap();
        let mut instances = InstanceBuffer::from_models([glam::Mat4::IDENTITY; 4]);
        instances.upload(&device).unwrap();
        mesh.attach_instances(&device, &instances).unwrap();
        mesh.draw(&device).unwrap();

        mesh.draw_command.instance_count = 5;
        assert!(matches!(
            mesh.draw(&device),
            Err(RenderError::InstanceCountMismatch {
                requested: 5,
                bound: 4
            })
        ));
    }

    #[test]
    fn indexed_command_without_index_buffer_is_rejected() {
        let device = MockDevice::new();
        let mut mesh = Mesh::from_data(MeshData::new(triangle().vertices, vec![]));
        mesh.create_buffers(&device).unwrap();
        mesh.draw_command.ty = DrawCommandType::DrawElements;
        assert!(matches!(
            mesh.draw(&device),
            Err(RenderError::InvalidDrawCommand(_))
        ));
        assert!(device.draws().is_empty());
    }

    #[test]
    fn count_past_the_uploaded_data_is_rejected() {
        let device = MockDevice::new();
        let mut mesh = Mesh::from_data(triangle());
        mesh.create_buffers(&device).unwrap();
        assert_eq!(mesh.buffers().unwrap().index_count, 3);

        mesh.draw_command.count = 3000;
        assert!(matches!(
            mesh.draw(&device),
            Err(RenderError::InvalidDrawCommand(_))
        ));
        mesh.draw_command.count = 2;
        mesh.draw(&device).unwrap();
        assert_eq!(device.draws().len(), 1);
    }

    #[test]
    fn failed_upload_releases_what_was_allocated() {
        let device = MockDevice::new();
        device.fail_call(FailingCall::SetIndexBuffer);
        let mut mesh = Mesh::from_data(triangle());
        assert!(mesh.create_buffers(&device).is_err());
        assert!(!mesh.has_buffers());
        assert_eq!(device.live_buffers(), 0);
        assert_eq!(device.live_vertex_arrays(), 0);
    }
}
