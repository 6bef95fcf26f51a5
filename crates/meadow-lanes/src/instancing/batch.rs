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

//! One mesh drawn many times with a single instanced call.

use super::scatter::{scatter_models, GroundFootprint, ScatterConfig};
use meadow_core::math::{Color, Mat4};
use meadow_core::renderer::api::ShaderHandle;
use meadow_core::renderer::{
    GraphicsDevice, InstanceBuffer, Mesh, MeshData, RenderError, ResourceError,
};

/// A mesh, its per-instance matrices and the user program that draws them.
///
/// The program is expected to read the model matrix from attribute slots
/// 3 to 6 and its inverse-transpose from slots 7 to 10.
#[derive(Debug)]
pub struct InstancedBatch {
    /// Debug label.
    pub label: String,
    /// The program drawing the batch, registered with the renderer.
    pub shader: ShaderHandle,
    /// Written to `material.color` before drawing.
    pub color: Color,
    /// Hidden batches are skipped.
    pub hidden: bool,
    mesh: Mesh,
    instances: InstanceBuffer,
}

impl InstancedBatch {
    /// Uploads `mesh_data` and one instance per model matrix.
    pub fn new(
        device: &dyn GraphicsDevice,
        label: impl Into<String>,
        mesh_data: MeshData,
        models: impl IntoIterator<Item = Mat4>,
        shader: ShaderHandle,
    ) -> Result<Self, ResourceError> {
        let label = label.into();
        let mut mesh = Mesh::from_data(mesh_data);
        mesh.create_buffers(device)?;
        let mut instances = InstanceBuffer::from_models(models);
        instances.upload(device)?;
        mesh.attach_instances(device, &instances)?;
        log::debug!(
            "Instanced batch '{label}' uploaded with {} instances.",
            instances.len()
        );
        Ok(Self {
            label,
            shader,
            color: Color::WHITE,
            hidden: false,
            mesh,
            instances,
        })
    }

    /// Scatters `config.count` instances over `ground` and uploads them.
    pub fn scattered(
        device: &dyn GraphicsDevice,
        label: impl Into<String>,
        mesh_data: MeshData,
        config: &ScatterConfig,
        ground: &GroundFootprint,
        shader: ShaderHandle,
    ) -> Result<Self, ResourceError> {
        Self::new(device, label, mesh_data, scatter_models(config, ground), shader)
    }

    /// Number of instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// The per-instance data.
    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    /// The shared mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Moves one instance. The change reaches the GPU on the next draw.
    pub fn set_instance_model(&mut self, index: usize, model: Mat4) -> Result<(), ResourceError> {
        self.instances.set_model(index, model)
    }

    /// Rewrites every instance matrix. The change reaches the GPU on the
    /// next draw.
    pub fn update_models(&mut self, f: impl FnMut(usize, &mut Mat4)) {
        self.instances.update_models(f);
    }

    /// Flushes pending instance changes, then issues one instanced draw with
    /// the current program.
    pub fn draw(&mut self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        self.instances.flush(device)?;
        self.mesh.draw(device)
    }

    /// Releases the mesh and instance buffers.
    pub fn destroy(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        self.mesh.delete_buffers(device)?;
        self.instances.destroy(device)
    }
}
