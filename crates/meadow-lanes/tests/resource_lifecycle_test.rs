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

//! Integration tests for GPU resource lifecycles: meshes, framebuffers and
//! the renderer's own resources.

mod common;

use common::harness;
use meadow_core::math::Transform;
use meadow_core::renderer::api::ColorAttachmentCreateInfo;
use meadow_core::renderer::{
    Framebuffer, Mesh, PrimitiveShape, RenderError, ResourceError,
};
use meadow_core::scene::GameObject;
use meadow_core::testing::{DeviceCall, MockDevice};
use meadow_lanes::{Renderer, RendererConfig};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_mesh_buffers_can_be_recreated_after_delete() {
    let device = MockDevice::new();
    let mut mesh = Mesh::from_data(PrimitiveShape::Cube.mesh_data());

    mesh.create_buffers(&device).unwrap();
    assert_eq!(device.live_buffers(), 2);
    mesh.delete_buffers(&device).unwrap();
    assert_eq!(device.live_buffers(), 0);
    assert!(matches!(
        mesh.draw(&device),
        Err(RenderError::BuffersNotCreated)
    ));

    mesh.create_buffers(&device).unwrap();
    assert_eq!(device.live_buffers(), 2);
    mesh.draw(&device).unwrap();
    assert_eq!(device.draws()[0].command.count, 36);
}

#[test]
fn test_framebuffer_overflow_leaves_attachments_unchanged() {
    let device = MockDevice::new();
    let mut framebuffer = Framebuffer::new(&device, 800, 600).unwrap();
    let info = ColorAttachmentCreateInfo::default();
    for _ in 0..7 {
        framebuffer.create_color_attachment(&device, &info).unwrap();
    }
    device.clear_calls();

    let result = framebuffer.create_color_attachment(&device, &info);

    assert!(matches!(
        result,
        Err(ResourceError::CapacityExceeded { capacity: 7, .. })
    ));
    assert_eq!(framebuffer.color_attachments().len(), 7);
    assert!(device.calls().is_empty());
}

#[test]
fn test_shared_meshes_outlive_their_borrower() {
    let device = MockDevice::new();
    let mut source = GameObject::new(Transform::IDENTITY);
    source
        .load_mesh_data(&device, &[PrimitiveShape::Cube.mesh_data()])
        .unwrap();
    let mut copy = GameObject::new(Transform::IDENTITY);
    copy.share_meshes_from(&source).unwrap();

    copy.delete_buffers(&device).unwrap();

    assert_eq!(device.live_buffers(), 2);
    source.meshes[0].draw(&device).unwrap();
}

#[test]
fn test_renderer_destroy_releases_only_its_own_buffers() {
    let mut h = harness();
    h.scene
        .borrow_mut()
        .add_primitive(h.device.as_ref(), PrimitiveShape::Cube, Transform::IDENTITY)
        .unwrap();
    h.renderer.draw_point(
        meadow_core::math::Vec3::ZERO,
        meadow_core::math::Color::WHITE,
    );
    h.render_frame();

    h.renderer.destroy().unwrap();

    // The scene's cube keeps its vertex and index buffers.
    assert_eq!(h.device.live_buffers(), 2);
    assert!(h
        .device
        .calls()
        .iter()
        .any(|c| matches!(c, DeviceCall::DestroyProgram(_))));
}

#[test]
fn test_bundled_shaders_load_from_the_default_directory() {
    let device: Rc<dyn meadow_core::GraphicsDevice> = Rc::new(MockDevice::new());
    let camera = Rc::new(RefCell::new(Default::default()));
    let scene = Rc::new(RefCell::new(Default::default()));

    let renderer = Renderer::new(device, camera, scene, &RendererConfig::default());

    assert!(renderer.is_ok());
}

#[test]
fn test_missing_shader_directory_is_a_load_error() {
    let device: Rc<dyn meadow_core::GraphicsDevice> = Rc::new(MockDevice::new());
    let camera = Rc::new(RefCell::new(Default::default()));
    let scene = Rc::new(RefCell::new(Default::default()));
    let config = RendererConfig {
        shader_dir: "does/not/exist".into(),
        ..Default::default()
    };

    let result = Renderer::new(device, camera, scene, &config);

    assert!(matches!(
        result,
        Err(RenderError::ResourceError(ResourceError::Shader(_)))
    ));
}
