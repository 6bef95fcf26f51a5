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

//! Integration tests for a full frame: draw order, shader selection, light
//! upload, glyphs and debug primitives.

mod common;

use common::{harness, harness_with};
use meadow_core::math::{Color, Mat4, Transform, Vec3};
use meadow_core::renderer::api::{Capability, DrawCommandMode, PolygonMode, UniformValue};
use meadow_core::renderer::{PointLight, PrimitiveShape, RenderError, SpotLight, Texture};
use meadow_core::testing::DeviceCall;
use meadow_lanes::render_lane::Point;
use meadow_lanes::RendererConfig;
use std::collections::HashSet;

fn add_cube(h: &common::Harness) -> meadow_core::scene::ObjectId {
    h.scene
        .borrow_mut()
        .add_primitive(h.device.as_ref(), PrimitiveShape::Cube, Transform::IDENTITY)
        .unwrap()
}

#[test]
fn test_hidden_objects_issue_no_draw_calls() {
    let mut h = harness();
    let id = add_cube(&h);
    h.scene.borrow_mut().game_object_mut(id).unwrap().hidden = true;

    h.render_frame();

    assert!(h.device.draws().is_empty());
    assert_eq!(h.renderer.last_frame_stats().objects_drawn, 0);
}

#[test]
fn test_unlit_untextured_object_uses_basic_mesh() {
    let mut h = harness();
    add_cube(&h);

    h.render_frame();

    let draws = h.device.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(h.draws_with("basic_mesh").len(), 1);
    assert_eq!(draws[0].command.count, 36);

    let stats = h.renderer.last_frame_stats();
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.objects_drawn, 1);
}

#[test]
fn test_camera_reaches_every_program_before_the_first_draw() {
    let mut h = harness();
    let custom = meadow_core::renderer::ShaderProgram::from_sources(
        h.device.as_ref(),
        "custom",
        "// vertex",
        "// fragment",
    )
    .unwrap();
    h.renderer.add_shader(custom);
    add_cube(&h);

    h.render_frame();

    let calls = h.device.calls();
    let first_draw = calls
        .iter()
        .position(|c| matches!(c, DeviceCall::Draw(_)))
        .unwrap();
    let programs_with_view: HashSet<_> = calls[..first_draw]
        .iter()
        .filter_map(|c| match c {
            DeviceCall::SetUniform(w) if w.name == "view" => w.program,
            _ => None,
        })
        .collect();
    // Seven built-ins plus the user program.
    assert_eq!(programs_with_view.len(), 8);
}

#[test]
fn test_hud_mode_broadcasts_identity_matrices() {
    let mut h = harness();
    h.renderer.settings.draw_as_hud = true;

    h.render_frame();

    assert_eq!(
        h.device.last_uniform("view"),
        Some(UniformValue::Mat4(Mat4::IDENTITY))
    );
    assert_eq!(
        h.device.last_uniform("projection"),
        Some(UniformValue::Mat4(Mat4::IDENTITY))
    );
}

#[test]
fn test_lit_scene_uploads_only_used_light_slots() {
    let mut h = harness();
    add_cube(&h);
    {
        let mut scene = h.scene.borrow_mut();
        scene.add_point_light(PointLight::default()).unwrap();
        scene
            .add_point_light(PointLight {
                hidden: true,
                ..Default::default()
            })
            .unwrap();
    }

    h.render_frame();

    assert_eq!(h.draws_with("light_mesh").len(), 1);
    let names: Vec<String> = h
        .uniforms_of("light_mesh")
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert!(names.iter().any(|n| n == "point_lights[0].position"));
    assert!(names.iter().any(|n| n == "point_lights[1].position"));
    assert!(!names.iter().any(|n| n.starts_with("point_lights[2]")));
    assert!(!names.iter().any(|n| n.starts_with("spot_lights[")));
    assert_eq!(
        h.device.last_uniform("n_point_lights_used"),
        Some(UniformValue::UInt(2))
    );
    assert_eq!(
        h.device.last_uniform("n_spot_lights_used"),
        Some(UniformValue::UInt(0))
    );
}

#[test]
fn test_point_lights_draw_sphere_glyphs_in_their_diffuse_color() {
    let mut h = harness();
    {
        let mut scene = h.scene.borrow_mut();
        for color in [Color::RED, Color::GREEN] {
            scene
                .add_point_light(PointLight {
                    diffuse: color,
                    ..Default::default()
                })
                .unwrap();
        }
    }

    h.render_frame();

    assert_eq!(h.draws_with("basic_mesh").len(), 2);
    assert_eq!(h.renderer.last_frame_stats().glyphs_drawn, 2);
    let colors: Vec<UniformValue> = h
        .uniforms_of("basic_mesh")
        .into_iter()
        .filter(|w| w.name == "material.color")
        .map(|w| w.value)
        .collect();
    assert_eq!(
        colors,
        vec![
            UniformValue::Vec3(Vec3::new(1.0, 0.0, 0.0)),
            UniformValue::Vec3(Vec3::new(0.0, 1.0, 0.0)),
        ]
    );
}

#[test]
fn test_spot_light_glyph_is_a_square_pyramid() {
    let mut h = harness();
    h.scene
        .borrow_mut()
        .add_spot_light(SpotLight::default())
        .unwrap();

    h.render_frame();

    let draws = h.draws_with("basic_mesh");
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].command.count, 18);
}

#[test]
fn test_missing_sphere_glyph_is_reported() {
    let mut h = harness_with(RendererConfig {
        glyph_sphere_segments: 0,
        ..Default::default()
    });
    h.scene
        .borrow_mut()
        .add_point_light(PointLight::default())
        .unwrap();

    let result = h.renderer.render();
    assert!(matches!(result, Err(RenderError::MissingResource(_))));

    // A glyph loaded later fixes the frame.
    h.renderer
        .set_sphere_glyph(&[PrimitiveShape::Sphere {
            segments: 8,
            rings: 4,
        }
        .mesh_data()])
        .unwrap();
    assert!(h.renderer.render().is_ok());
}

#[test]
fn test_depth_view_overrides_textures_and_lights() {
    let mut h = harness();
    let id = add_cube(&h);
    let texture = Texture::from_rgba8(h.device.as_ref(), None, 1, 1, &[255; 4]).unwrap();
    {
        let mut scene = h.scene.borrow_mut();
        scene
            .game_object_mut(id)
            .unwrap()
            .material
            .diffuse_textures
            .push(texture);
        scene.add_point_light(PointLight::default()).unwrap();
    }
    h.renderer.settings.depth_view = true;

    h.render_frame();

    // The cube and the light glyph.
    assert_eq!(h.draws_with("depth").len(), 2);
    assert_eq!(h.device.last_uniform("near"), Some(UniformValue::Float(0.1)));
    assert_eq!(h.device.last_uniform("far"), Some(UniformValue::Float(100.0)));
    assert!(!h
        .device
        .calls()
        .iter()
        .any(|c| matches!(c, DeviceCall::BindTexture { .. })));
}

#[test]
fn test_shader_override_wins_over_builtins() {
    let mut h = harness();
    let custom = meadow_core::renderer::ShaderProgram::from_sources(
        h.device.as_ref(),
        "custom",
        "// vertex",
        "// fragment",
    )
    .unwrap();
    let handle = h.renderer.add_shader(custom);
    let id = add_cube(&h);
    h.scene.borrow_mut().game_object_mut(id).unwrap().material.shader = Some(handle);
    h.renderer.settings.depth_view = true;

    h.render_frame();

    assert_eq!(h.draws_with("custom").len(), 1);
    assert!(h.draws_with("depth").is_empty());
}

#[test]
fn test_diffuse_and_specular_maps_use_disjoint_units() {
    let mut h = harness();
    let id = add_cube(&h);
    let make = |h: &common::Harness| {
        Texture::from_rgba8(h.device.as_ref(), None, 1, 1, &[0; 4]).unwrap()
    };
    let (d1, d2, s1) = (make(&h), make(&h), make(&h));
    {
        let mut scene = h.scene.borrow_mut();
        let material = &mut scene.game_object_mut(id).unwrap().material;
        material.diffuse_textures = vec![d1.clone(), d2.clone()];
        material.specular_textures = vec![s1.clone()];
    }

    h.render_frame();

    assert_eq!(h.draws_with("basic_textured_mesh").len(), 1);
    let binds: Vec<_> = h
        .device
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            DeviceCall::BindTexture { unit, texture } => Some((unit, texture)),
            _ => None,
        })
        .collect();
    assert_eq!(binds, vec![(0, d1.id), (1, d2.id), (2, s1.id)]);
    assert_eq!(
        h.device.last_uniform("material.diffuse_texture2"),
        Some(UniformValue::Int(1))
    );
    assert_eq!(
        h.device.last_uniform("material.specular_texture1"),
        Some(UniformValue::Int(2))
    );
}

#[test]
fn test_debug_primitives_live_for_one_frame() {
    let mut h = harness();
    h.renderer.draw_point(Vec3::ZERO, Color::RED);
    h.renderer.draw_point(Vec3::X, Color::BLUE);
    h.renderer.draw_line(
        Point::new(Vec3::ZERO, Color::GREEN),
        Point::new(Vec3::Y, Color::RED),
    );

    h.render_frame();

    let points = h.draws_with("point");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].command.mode, DrawCommandMode::Points);
    assert_eq!(points[0].command.count, 2);
    let lines = h.draws_with("line");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].command.mode, DrawCommandMode::Lines);
    assert_eq!(lines[0].command.count, 2);

    h.render_frame();
    assert!(h.device.draws().is_empty());
}

#[test]
fn test_depth_view_draws_lines_with_the_depth_program() {
    let mut h = harness();
    h.renderer.settings.depth_view = true;
    h.renderer.draw_line(
        Point::new(Vec3::ZERO, Color::WHITE),
        Point::new(Vec3::ONE, Color::WHITE),
    );

    h.render_frame();

    assert!(h.draws_with("line").is_empty());
    assert_eq!(h.draws_with("depth").len(), 1);
}

#[test]
fn test_mode_toggles_reach_the_device() {
    let mut h = harness();
    h.renderer.settings.wireframe = true;
    h.renderer.settings.stencil_test = true;

    h.render_frame();

    let calls = h.device.calls();
    assert!(calls.contains(&DeviceCall::SetPolygonMode(PolygonMode::Line)));
    assert!(calls.contains(&DeviceCall::SetCapability {
        capability: Capability::DepthTest,
        enabled: true,
    }));
    assert!(calls.contains(&DeviceCall::SetCapability {
        capability: Capability::StencilTest,
        enabled: true,
    }));
}

#[test]
fn test_borrowed_scene_aborts_the_frame() {
    let mut h = harness();
    let scene = h.scene.clone();
    let _guard = scene.borrow_mut();

    assert!(matches!(
        h.renderer.render(),
        Err(RenderError::SceneUnavailable("scene"))
    ));
}

#[test]
fn test_failed_reload_keeps_the_previous_program() {
    let mut h = harness();
    add_cube(&h);
    h.device.fail_program("basic_mesh");

    assert_eq!(h.renderer.reload_shaders(), 1);

    h.render_frame();
    assert_eq!(h.draws_with("basic_mesh").len(), 1);
}
