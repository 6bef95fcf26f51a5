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

//! Integration tests for the instanced draw path.

mod common;

use common::{harness, harness_with};
use meadow_core::math::{Mat4, Transform, Vec3};
use meadow_core::renderer::api::ShaderHandle;
use meadow_core::renderer::{InstanceData, PrimitiveShape, RenderError, ShaderProgram};
use meadow_core::testing::DeviceCall;
use meadow_lanes::instancing::{scatter_transforms, GroundFootprint, ScatterConfig};
use meadow_lanes::{InstancedBatch, RendererConfig};

fn grass_shader(h: &mut common::Harness) -> ShaderHandle {
    let program =
        ShaderProgram::from_sources(h.device.as_ref(), "instanced_mesh", "// vertex", "// fragment")
            .unwrap();
    h.renderer.add_shader(program)
}

#[test]
fn test_scatter_stays_on_the_ground_plane() {
    let ground = Transform::IDENTITY.with_scale(Vec3::new(70.0, 1.0, 70.0));
    let footprint = GroundFootprint::from_plane_transform(&ground);
    let config = ScatterConfig::default();

    let transforms = scatter_transforms(&config, &footprint);

    assert_eq!(transforms.len(), 100_000);
    for t in &transforms {
        assert!((-35.0..=35.0).contains(&t.position.x));
        assert!((-35.0..=35.0).contains(&t.position.z));
        assert_eq!(t.position.y, 0.5);
    }
}

#[test]
fn test_scattered_field_draws_in_a_single_call() {
    let mut h = harness_with(RendererConfig {
        scatter: Some(ScatterConfig {
            count: 1_000,
            ..Default::default()
        }),
        ..Default::default()
    });
    let ground = h
        .scene
        .borrow_mut()
        .add_primitive(
            h.device.as_ref(),
            PrimitiveShape::Plane,
            Transform::IDENTITY.with_scale(Vec3::new(70.0, 1.0, 70.0)),
        )
        .unwrap();
    let shader = grass_shader(&mut h);
    let index = h
        .renderer
        .scatter_instances("grass", PrimitiveShape::Quad.mesh_data(), ground, shader)
        .unwrap();

    h.render_frame();

    let draws = h.draws_with("instanced_mesh");
    assert_eq!(draws.len(), 1);
    assert!(draws[0].command.ty.is_instanced());
    assert_eq!(draws[0].command.instance_count, 1_000);
    assert_eq!(draws[0].command.count, 6);
    assert_eq!(h.renderer.last_frame_stats().instances_drawn, 1_000);

    // Hidden batches are skipped.
    h.renderer.instanced_batch_mut(index).unwrap().hidden = true;
    h.render_frame();
    assert!(h.draws_with("instanced_mesh").is_empty());
}

#[test]
fn test_sub_range_update_writes_only_the_changed_instance() {
    let mut h = harness();
    let shader = grass_shader(&mut h);
    let batch = InstancedBatch::new(
        h.device.as_ref(),
        "grass",
        PrimitiveShape::Quad.mesh_data(),
        vec![Mat4::IDENTITY; 10],
        shader,
    )
    .unwrap();
    let buffer = batch.instances().buffer().unwrap();
    let index = h.renderer.add_instanced_batch(batch);

    let moved = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    h.renderer
        .instanced_batch_mut(index)
        .unwrap()
        .set_instance_model(4, moved)
        .unwrap();
    h.render_frame();

    let writes: Vec<_> = h
        .device
        .calls()
        .into_iter()
        .filter(|c| matches!(c, DeviceCall::WriteBuffer { id, .. } if *id == buffer))
        .collect();
    assert_eq!(
        writes,
        vec![DeviceCall::WriteBuffer {
            id: buffer,
            offset: 4 * InstanceData::STRIDE as u64,
            len: InstanceData::STRIDE,
        }]
    );

    let contents = h.device.buffer_contents(buffer).unwrap();
    let start = 4 * InstanceData::STRIDE;
    let expected = moved.to_cols_array();
    assert_eq!(&contents[start..start + 64], bytemuck::cast_slice(&expected));

    // Nothing changed, nothing written.
    h.render_frame();
    assert!(!h
        .device
        .calls()
        .iter()
        .any(|c| matches!(c, DeviceCall::WriteBuffer { id, .. } if *id == buffer)));
}

#[test]
fn test_batch_with_unknown_shader_aborts_the_frame() {
    let mut h = harness();
    let batch = InstancedBatch::new(
        h.device.as_ref(),
        "orphan",
        PrimitiveShape::Cube.mesh_data(),
        [Mat4::IDENTITY],
        ShaderHandle(42),
    )
    .unwrap();
    h.renderer.add_instanced_batch(batch);

    assert!(matches!(
        h.renderer.render(),
        Err(RenderError::MissingResource(_))
    ));
}

#[test]
fn test_scatter_over_a_missing_ground_fails() {
    let mut h = harness();
    let shader = grass_shader(&mut h);
    let result = h.renderer.scatter_instances(
        "grass",
        PrimitiveShape::Quad.mesh_data(),
        meadow_core::scene::ObjectId(7),
        shader,
    );
    assert!(matches!(result, Err(RenderError::MissingResource(_))));
}
