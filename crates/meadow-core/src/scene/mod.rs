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

//! The scene registry: game objects and the three fixed-capacity light tables.

mod camera;
mod object;

pub use camera::Camera;
pub use object::{GameObject, Material};

use crate::math::Transform;
use crate::renderer::{
    DirectionalLight, GraphicsDevice, LightKind, Mesh, PointLight, PrimitiveShape,
    ResourceError, SpotLight,
};
use crate::utils::FixedVec;

/// Slots in the `point_lights` shader array.
pub const MAX_POINT_LIGHTS: usize = 10;
/// Slots in the `spot_lights` shader array.
pub const MAX_SPOT_LIGHTS: usize = 10;
/// Slots in the `dir_lights` shader array.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 10;

/// Index of a game object within its [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Everything the renderer draws in a frame.
///
/// Objects and lights are append-only and keep registration order, which is
/// also their draw and upload order. The light tables refuse to grow past
/// their capacity instead of dropping lights.
#[derive(Debug, Default)]
pub struct Scene {
    game_objects: Vec<GameObject>,
    point_lights: FixedVec<PointLight, MAX_POINT_LIGHTS>,
    spot_lights: FixedVec<SpotLight, MAX_SPOT_LIGHTS>,
    directional_lights: FixedVec<DirectionalLight, MAX_DIRECTIONAL_LIGHTS>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a game object.
    pub fn add_game_object(&mut self, object: GameObject) -> ObjectId {
        self.game_objects.push(object);
        ObjectId(self.game_objects.len() - 1)
    }

    /// Builds, uploads and appends an object made of one procedural shape.
    pub fn add_primitive(
        &mut self,
        device: &dyn GraphicsDevice,
        shape: PrimitiveShape,
        transform: Transform,
    ) -> Result<ObjectId, ResourceError> {
        let mut mesh = Mesh::from_data(shape.mesh_data());
        mesh.create_buffers(device)?;
        let mut object = GameObject::new(transform);
        object.meshes.push(mesh);
        Ok(self.add_game_object(object))
    }

    /// The objects, in draw order.
    pub fn game_objects(&self) -> &[GameObject] {
        &self.game_objects
    }

    /// Returns an object by id.
    pub fn game_object(&self, id: ObjectId) -> Option<&GameObject> {
        self.game_objects.get(id.0)
    }

    /// Returns an object by id, mutably.
    pub fn game_object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.game_objects.get_mut(id.0)
    }

    /// Registers a point light, returning its slot.
    /// ## Errors
    /// * `ResourceError::CapacityExceeded` - If all [`MAX_POINT_LIGHTS`] slots are used.
    pub fn add_point_light(&mut self, light: PointLight) -> Result<usize, ResourceError> {
        self.point_lights
            .push(light)
            .map_err(|e| ResourceError::capacity("point lights", e))
    }

    /// Registers a spot light, returning its slot.
    /// ## Errors
    /// * `ResourceError::CapacityExceeded` - If all [`MAX_SPOT_LIGHTS`] slots are used.
    pub fn add_spot_light(&mut self, light: SpotLight) -> Result<usize, ResourceError> {
        self.spot_lights
            .push(light)
            .map_err(|e| ResourceError::capacity("spot lights", e))
    }

    /// Registers a directional light, returning its slot.
    /// ## Errors
    /// * `ResourceError::CapacityExceeded` - If all [`MAX_DIRECTIONAL_LIGHTS`] slots are used.
    pub fn add_directional_light(
        &mut self,
        light: DirectionalLight,
    ) -> Result<usize, ResourceError> {
        self.directional_lights
            .push(light)
            .map_err(|e| ResourceError::capacity("directional lights", e))
    }

    /// The used point light slots.
    pub fn point_lights(&self) -> &[PointLight] {
        self.point_lights.as_slice()
    }

    /// The used spot light slots.
    pub fn spot_lights(&self) -> &[SpotLight] {
        self.spot_lights.as_slice()
    }

    /// The used directional light slots.
    pub fn directional_lights(&self) -> &[DirectionalLight] {
        self.directional_lights.as_slice()
    }

    /// Returns a point light by slot, mutably.
    pub fn point_light_mut(&mut self, index: usize) -> Option<&mut PointLight> {
        self.point_lights.get_mut(index)
    }

    /// Returns a spot light by slot, mutably.
    pub fn spot_light_mut(&mut self, index: usize) -> Option<&mut SpotLight> {
        self.spot_lights.get_mut(index)
    }

    /// Returns a directional light by slot, mutably.
    pub fn directional_light_mut(&mut self, index: usize) -> Option<&mut DirectionalLight> {
        self.directional_lights.get_mut(index)
    }

    /// Number of used slots of `kind`.
    pub fn lights_used(&self, kind: LightKind) -> usize {
        match kind {
            LightKind::Point => self.point_lights.len(),
            LightKind::Spot => self.spot_lights.len(),
            LightKind::Directional => self.directional_lights.len(),
        }
    }

    /// Returns `true` if any light of any kind is registered, hidden or not.
    pub fn has_lights(&self) -> bool {
        !(self.point_lights.is_empty()
            && self.spot_lights.is_empty()
            && self.directional_lights.is_empty())
    }

    /// Releases the GPU buffers of every object.
    pub fn delete_buffers(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        for object in &mut self.game_objects {
            object.delete_buffers(device)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDevice;

    #[test]
    fn light_tables_reject_overflow() {
        let mut scene = Scene::new();
        for i in 0..MAX_POINT_LIGHTS {
            assert_eq!(scene.add_point_light(PointLight::default()).unwrap(), i);
        }
        let err = scene.add_point_light(PointLight::default()).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::CapacityExceeded {
                resource: "point lights",
                capacity: MAX_POINT_LIGHTS
            }
        ));
        assert_eq!(scene.lights_used(LightKind::Point), MAX_POINT_LIGHTS);
    }

    #[test]
    fn hidden_lights_still_count() {
        let mut scene = Scene::new();
        assert!(!scene.has_lights());
        scene
            .add_directional_light(DirectionalLight {
                hidden: true,
                ..Default::default()
            })
            .unwrap();
        assert!(scene.has_lights());
    }

    #[test]
    fn add_primitive_uploads_the_mesh() {
        let device = MockDevice::new();
        let mut scene = Scene::new();
        let id = scene
            .add_primitive(&device, PrimitiveShape::Cube, Transform::IDENTITY)
            .unwrap();
        let object = scene.game_object(id).unwrap();
        assert_eq!(object.meshes.len(), 1);
        assert!(object.meshes[0].has_buffers());
        assert_eq!(object.meshes[0].draw_command.count, 36);
    }

    #[test]
    fn shared_meshes_reuse_vertex_arrays() {
        let device = MockDevice::new();
        let mut scene = Scene::new();
        let source = scene
            .add_primitive(&device, PrimitiveShape::Plane, Transform::IDENTITY)
            .unwrap();
        let mut copy = GameObject::default();
        copy.share_meshes_from(scene.game_object(source).unwrap())
            .unwrap();
        assert_eq!(
            copy.meshes[0].buffers(),
            scene.game_object(source).unwrap().meshes[0].buffers()
        );
        assert!(copy.meshes[0].is_shared());
    }
}
