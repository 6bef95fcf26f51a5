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

//! Game objects and their materials.

use crate::math::{Color, Transform};
use crate::renderer::api::ShaderHandle;
use crate::renderer::{GraphicsDevice, Mesh, MeshData, RenderError, ResourceError, Texture};

/// Surface properties of a game object.
#[derive(Debug, Clone)]
pub struct Material {
    /// Base color, clamped to `[0, 1]` when uploaded.
    pub color: Color,
    /// Specular exponent.
    pub shininess: f32,
    /// A user program that replaces the built-in selection for this object.
    pub shader: Option<ShaderHandle>,
    /// Diffuse maps, bound as `material.diffuse_texture1..N`.
    pub diffuse_textures: Vec<Texture>,
    /// Specular maps, bound as `material.specular_texture1..N`.
    pub specular_textures: Vec<Texture>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            shininess: 32.0,
            shader: None,
            diffuse_textures: Vec::new(),
            specular_textures: Vec::new(),
        }
    }
}

impl Material {
    /// Creates an untextured material of the given color.
    pub fn from_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Returns `true` if any diffuse or specular map is present.
    pub fn has_textures(&self) -> bool {
        !self.diffuse_textures.is_empty() || !self.specular_textures.is_empty()
    }
}

/// A drawable object: a transform, a material and any number of meshes.
#[derive(Debug, Default)]
pub struct GameObject {
    /// Placement in the world.
    pub transform: Transform,
    /// Surface properties shared by every mesh.
    pub material: Material,
    /// The meshes, drawn in order with the same program and uniforms.
    pub meshes: Vec<Mesh>,
    /// Hidden objects are skipped entirely.
    pub hidden: bool,
}

impl GameObject {
    /// Creates an empty object at `transform`.
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            ..Default::default()
        }
    }

    /// Appends an empty mesh and returns it for filling.
    pub fn create_mesh(&mut self) -> &mut Mesh {
        self.meshes.push(Mesh::new());
        let last = self.meshes.len() - 1;
        &mut self.meshes[last]
    }

    /// Builds and uploads one mesh per sub-mesh of `data`.
    pub fn load_mesh_data(
        &mut self,
        device: &dyn GraphicsDevice,
        data: &[MeshData],
    ) -> Result<(), ResourceError> {
        for sub_mesh in data {
            let mut mesh = Mesh::from_data(sub_mesh.clone());
            mesh.create_buffers(device)?;
            self.meshes.push(mesh);
        }
        log::debug!("Loaded {} sub-meshes into game object.", data.len());
        Ok(())
    }

    /// Replaces this object's meshes with handles onto `source`'s GPU buffers.
    ///
    /// The current meshes are dropped without being freed: call
    /// [`GameObject::delete_buffers`] first if they own GPU objects.
    pub fn share_meshes_from(&mut self, source: &GameObject) -> Result<(), RenderError> {
        self.meshes = source
            .meshes
            .iter()
            .map(Mesh::shared_from)
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// Releases the GPU buffers of every mesh.
    pub fn delete_buffers(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        for mesh in &mut self.meshes {
            mesh.delete_buffers(device)?;
        }
        Ok(())
    }
}
