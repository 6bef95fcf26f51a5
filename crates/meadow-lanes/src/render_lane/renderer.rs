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

//! The per-frame entry point.

use super::debug_primitives::{DebugPrimitives, Line, Point};
use super::glyphs::{point_glyph_transform, spot_glyph_transform, LightGlyphs};
use super::light_upload::send_light_data;
use super::selection::{select_shader, BuiltinShader, ShaderKey};
use super::shader_library::ShaderLibrary;
use crate::config::RendererConfig;
use crate::instancing::{GroundFootprint, InstancedBatch, ScatterConfig};
use meadow_core::math::{Color, Mat4, Transform, Vec3};
use meadow_core::renderer::api::{Capability, RenderSettings, ShaderHandle};
use meadow_core::renderer::{
    GraphicsDevice, Mesh, MeshData, RenderError, ResourceError, ShaderProgram,
};
use meadow_core::scene::{Camera, Material, ObjectId};
use meadow_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;

/// Counters of the last rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Device draw calls issued.
    pub draw_calls: usize,
    /// Visible game objects drawn.
    pub objects_drawn: usize,
    /// Light glyphs drawn.
    pub glyphs_drawn: usize,
    /// Instances drawn through instanced batches.
    pub instances_drawn: usize,
}

/// Draws a [`Scene`] as seen from a [`Camera`].
///
/// The renderer only borrows the camera and the scene for the duration of
/// [`Renderer::render`]; both stay owned by the application. It owns the
/// built-in programs, the debug-primitive batches, the light glyph meshes
/// and the instanced batches.
///
/// A frame runs in a fixed order: camera broadcast, debug buffer refresh,
/// depth and stencil toggles, polygon mode, points, lines, game objects,
/// light glyphs, instanced batches. Queued debug primitives are dropped at
/// the end of every frame, even a failed one.
#[derive(Debug)]
pub struct Renderer {
    device: Rc<dyn GraphicsDevice>,
    camera: Rc<RefCell<Camera>>,
    scene: Rc<RefCell<Scene>>,
    /// Mode toggles, read at the start of every frame.
    pub settings: RenderSettings,
    shaders: ShaderLibrary,
    debug: DebugPrimitives,
    glyphs: LightGlyphs,
    instanced: Vec<InstancedBatch>,
    scatter: ScatterConfig,
    stats: FrameStats,
}

impl Renderer {
    /// Loads the built-in programs from `config.shader_dir` and creates the
    /// renderer's own GPU resources.
    pub fn new(
        device: Rc<dyn GraphicsDevice>,
        camera: Rc<RefCell<Camera>>,
        scene: Rc<RefCell<Scene>>,
        config: &RendererConfig,
    ) -> Result<Self, RenderError> {
        let shaders = ShaderLibrary::load(device.as_ref(), &config.shader_dir)?;
        Self::with_library(device, camera, scene, shaders, config)
    }

    /// Like [`Renderer::new`], with an already built program library.
    pub fn with_library(
        device: Rc<dyn GraphicsDevice>,
        camera: Rc<RefCell<Camera>>,
        scene: Rc<RefCell<Scene>>,
        shaders: ShaderLibrary,
        config: &RendererConfig,
    ) -> Result<Self, RenderError> {
        let debug = DebugPrimitives::new(device.as_ref())?;
        let glyphs = LightGlyphs::new(device.as_ref(), config.glyph_sphere_segments)?;
        log::info!("Renderer initialized.");
        Ok(Self {
            device,
            camera,
            scene,
            settings: config.settings,
            shaders,
            debug,
            glyphs,
            instanced: Vec::new(),
            scatter: config.scatter.clone().unwrap_or_default(),
            stats: FrameStats::default(),
        })
    }

    /// Renders one frame.
    ///
    /// ## Errors
    /// Any error aborts the rest of the frame and is logged before being
    /// returned. `RenderError::SceneUnavailable` means the camera or the
    /// scene was mutably borrowed elsewhere.
    pub fn render(&mut self) -> Result<(), RenderError> {
        let result = self.render_frame();
        self.debug.clear();
        if let Err(e) = &result {
            log::error!("Frame aborted: {e}");
        }
        result
    }

    /// Queues a point for this frame.
    pub fn draw_point(&mut self, position: Vec3, color: Color) {
        self.debug.push_point(Point::new(position, color));
    }

    /// Queues an already built point for this frame.
    pub fn draw_point_at(&mut self, point: Point) {
        self.debug.push_point(point);
    }

    /// Queues a segment for this frame. The whole segment takes the color
    /// of `p1`.
    pub fn draw_line(&mut self, p1: Point, p2: Point) {
        let mut line = Line::new(p1, p2);
        line.set_color(p1.color);
        self.debug.push_line(line);
    }

    /// Queues a segment for this frame, keeping both endpoint colors.
    pub fn draw_line_segment(&mut self, line: &Line) {
        self.debug.push_line(*line);
    }

    /// Registers a user program. It receives `view` and `projection` every
    /// frame and can be referenced by [`Material::shader`].
    pub fn add_shader(&mut self, program: ShaderProgram) -> ShaderHandle {
        let handle = self.shaders.register(program);
        log::debug!("Registered user shader {}.", handle.0);
        handle
    }

    /// Returns a registered user program.
    pub fn shader_mut(&mut self, handle: ShaderHandle) -> Option<&mut ShaderProgram> {
        self.shaders.user_mut(handle)
    }

    /// Recompiles every built-in and user program. Programs that fail keep
    /// their previous binary; the number of failures is returned.
    pub fn reload_shaders(&mut self) -> usize {
        log::info!("Reloading shaders.");
        self.shaders.reload_all(self.device.as_ref())
    }

    /// Takes ownership of an instanced batch and returns its index.
    pub fn add_instanced_batch(&mut self, batch: InstancedBatch) -> usize {
        self.instanced.push(batch);
        self.instanced.len() - 1
    }

    /// Scatters `mesh_data` over the footprint of the `ground` object, with
    /// the configured [`ScatterConfig`], and registers the resulting batch.
    ///
    /// ## Errors
    /// * `RenderError::MissingResource` - If `ground` is not in the scene.
    pub fn scatter_instances(
        &mut self,
        label: &str,
        mesh_data: MeshData,
        ground: ObjectId,
        shader: ShaderHandle,
    ) -> Result<usize, RenderError> {
        let footprint = {
            let scene = self
                .scene
                .try_borrow()
                .map_err(|_| RenderError::SceneUnavailable("scene"))?;
            let object = scene.game_object(ground).ok_or_else(|| {
                RenderError::MissingResource(format!("ground object {}", ground.0))
            })?;
            GroundFootprint::from_plane_transform(&object.transform)
        };
        let batch = InstancedBatch::scattered(
            self.device.as_ref(),
            label,
            mesh_data,
            &self.scatter,
            &footprint,
            shader,
        )?;
        Ok(self.add_instanced_batch(batch))
    }

    /// Returns an instanced batch, e.g. to animate its instances.
    pub fn instanced_batch_mut(&mut self, index: usize) -> Option<&mut InstancedBatch> {
        self.instanced.get_mut(index)
    }

    /// Replaces the point-light glyph with imported mesh data.
    pub fn set_sphere_glyph(&mut self, data: &[MeshData]) -> Result<(), ResourceError> {
        self.glyphs.set_sphere(self.device.as_ref(), data)
    }

    /// Counters of the last call to [`Renderer::render`].
    pub fn last_frame_stats(&self) -> FrameStats {
        self.stats
    }

    /// Releases every GPU resource the renderer owns. The scene's own
    /// buffers are left alone.
    pub fn destroy(&mut self) -> Result<(), ResourceError> {
        let device = Rc::clone(&self.device);
        self.debug.destroy(device.as_ref())?;
        self.glyphs.destroy(device.as_ref())?;
        for batch in &mut self.instanced {
            batch.destroy(device.as_ref())?;
        }
        self.instanced.clear();
        self.shaders.destroy(device.as_ref())?;
        log::info!("Renderer destroyed.");
        Ok(())
    }

    fn render_frame(&mut self) -> Result<(), RenderError> {
        let device = Rc::clone(&self.device);
        let device = device.as_ref();
        let camera = *self
            .camera
            .try_borrow()
            .map_err(|_| RenderError::SceneUnavailable("camera"))?;
        let scene = Rc::clone(&self.scene);
        let scene = scene
            .try_borrow()
            .map_err(|_| RenderError::SceneUnavailable("scene"))?;
        let settings = self.settings;
        self.stats = FrameStats::default();

        let (view, projection) = if settings.draw_as_hud {
            (Mat4::IDENTITY, Mat4::IDENTITY)
        } else {
            (camera.view_matrix(), camera.projection_matrix())
        };
        self.shaders.broadcast_camera(device, view, projection)?;

        self.debug.refresh(device)?;

        device.set_capability(Capability::DepthTest, settings.depth_test);
        device.set_capability(Capability::StencilTest, settings.stencil_test);
        if settings.depth_view {
            let depth = self.shaders.builtin_mut(BuiltinShader::Depth);
            depth.use_program(device)?;
            depth.set_float(device, "near", camera.near);
            depth.set_float(device, "far", camera.far);
        }
        device.set_polygon_mode(settings.polygon_mode());

        self.render_points(device)?;
        self.render_lines(device, settings.depth_view)?;
        self.render_game_objects(device, &scene, camera.position, settings.depth_view)?;
        self.render_lights(device, &scene, settings.depth_view)?;
        self.render_instanced(device, &scene, camera.position)?;
        Ok(())
    }

    fn render_points(&mut self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        if self.debug.point_count() == 0 {
            return Ok(());
        }
        self.shaders
            .builtin_mut(BuiltinShader::Point)
            .use_program(device)?;
        if self.debug.draw_points(device)? {
            self.stats.draw_calls += 1;
        }
        Ok(())
    }

    fn render_lines(
        &mut self,
        device: &dyn GraphicsDevice,
        depth_view: bool,
    ) -> Result<(), RenderError> {
        if self.debug.line_count() == 0 {
            return Ok(());
        }
        let shader = if depth_view {
            BuiltinShader::Depth
        } else {
            BuiltinShader::Line
        };
        self.shaders.builtin_mut(shader).use_program(device)?;
        if self.debug.draw_lines(device)? {
            self.stats.draw_calls += 1;
        }
        Ok(())
    }

    fn render_game_objects(
        &mut self,
        device: &dyn GraphicsDevice,
        scene: &Scene,
        view_position: Vec3,
        depth_view: bool,
    ) -> Result<(), RenderError> {
        let has_lights = scene.has_lights();
        for object in scene.game_objects().iter().filter(|o| !o.hidden) {
            let selection = select_shader(ShaderKey::for_object(object, depth_view, has_lights));
            let program = self.shaders.resolve_mut(selection)?;
            let model = object.transform.to_mat4();

            if selection.needs_lighting() {
                send_light_data(program, scene, view_position, device)?;
                program.set_float(device, "material.shininess", object.material.shininess);
                program.set_mat3(device, "inverse_model", object.transform.normal_matrix());
            } else {
                program.use_program(device)?;
            }
            if selection.needs_textures() {
                bind_material_textures(program, &object.material, device)?;
            }
            program.set_mat4(device, "model", model);
            program.set_vec3(device, "material.color", object.material.color.clamped_vec3());

            for mesh in &object.meshes {
                mesh.draw(device)?;
                self.stats.draw_calls += 1;
            }
            self.stats.objects_drawn += 1;
        }
        Ok(())
    }

    fn render_lights(
        &mut self,
        device: &dyn GraphicsDevice,
        scene: &Scene,
        depth_view: bool,
    ) -> Result<(), RenderError> {
        let visible_points = scene.point_lights().iter().filter(|l| !l.hidden);
        let visible_spots = scene.spot_lights().iter().filter(|l| !l.hidden);
        if visible_points.clone().next().is_none() && visible_spots.clone().next().is_none() {
            return Ok(());
        }

        let shader = if depth_view {
            BuiltinShader::Depth
        } else {
            BuiltinShader::BasicMesh
        };
        let program = self.shaders.builtin_mut(shader);
        program.use_program(device)?;

        for light in visible_points {
            let sphere = self.glyphs.sphere()?;
            draw_glyph(
                program,
                sphere,
                &point_glyph_transform(light),
                light.diffuse,
                device,
            )?;
            self.stats.draw_calls += 1;
            self.stats.glyphs_drawn += 1;
        }
        for light in visible_spots {
            draw_glyph(
                program,
                self.glyphs.pyramid(),
                &spot_glyph_transform(light),
                light.diffuse,
                device,
            )?;
            self.stats.draw_calls += 1;
            self.stats.glyphs_drawn += 1;
        }
        Ok(())
    }

    fn render_instanced(
        &mut self,
        device: &dyn GraphicsDevice,
        scene: &Scene,
        view_position: Vec3,
    ) -> Result<(), RenderError> {
        let has_lights = scene.has_lights();
        for batch in self.instanced.iter_mut().filter(|b| !b.hidden) {
            let program = self.shaders.user_mut(batch.shader).ok_or_else(|| {
                RenderError::MissingResource(format!(
                    "shader {} of instanced batch '{}'",
                    batch.shader.0, batch.label
                ))
            })?;
            if has_lights {
                send_light_data(program, scene, view_position, device)?;
            } else {
                program.use_program(device)?;
            }
            program.set_vec3(device, "material.color", batch.color.clamped_vec3());
            batch.draw(device)?;
            self.stats.draw_calls += 1;
            self.stats.instances_drawn += batch.instance_count();
        }
        Ok(())
    }
}

/// Binds diffuse maps on units `0..d` and specular maps on `d..d+s`, and
/// points `material.diffuse_textureN` / `material.specular_textureN` at them.
fn bind_material_textures(
    program: &mut ShaderProgram,
    material: &Material,
    device: &dyn GraphicsDevice,
) -> Result<(), RenderError> {
    let diffuse = material
        .diffuse_textures
        .iter()
        .enumerate()
        .map(|(i, t)| (format!("material.diffuse_texture{}", i + 1), t));
    let specular = material
        .specular_textures
        .iter()
        .enumerate()
        .map(|(i, t)| (format!("material.specular_texture{}", i + 1), t));

    for (unit, (name, texture)) in diffuse.chain(specular).enumerate() {
        let unit = unit as u32;
        device.bind_texture(unit, texture.id)?;
        program.set_int(device, &name, unit as i32);
    }
    Ok(())
}

fn draw_glyph(
    program: &mut ShaderProgram,
    mesh: &Mesh,
    transform: &Transform,
    color: Color,
    device: &dyn GraphicsDevice,
) -> Result<(), RenderError> {
    program.set_mat4(device, "model", transform.to_mat4());
    program.set_vec3(device, "material.color", color.clamped_vec3());
    mesh.draw(device)
}
