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

//! The OpenGL implementation of [`GraphicsDevice`].

use super::conversions::{color_attachment, GlTextureFormat, IntoGl};
use anyhow::{bail, Context as _};
use glow::HasContext;
use meadow_core::math::Color;
use meadow_core::renderer::api::{
    BufferDescriptor, BufferId, BufferKind, Capability, DrawCommand, DrawCommandType,
    FramebufferId, FramebufferTarget, PolygonMode, ProgramDescriptor, ProgramId,
    RenderbufferAttachment, RenderbufferDescriptor, RenderbufferId, StepMode, TextureDescriptor,
    TextureId, UniformLocation, UniformValue, VertexArrayId, VertexBufferLayout,
};
use meadow_core::renderer::{GraphicsDevice, ResourceError, ShaderError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;
use std::fmt;

type GlBuffer = <glow::Context as HasContext>::Buffer;
type GlVertexArray = <glow::Context as HasContext>::VertexArray;
type GlProgram = <glow::Context as HasContext>::Program;
type GlShader = <glow::Context as HasContext>::Shader;
type GlUniformLocation = <glow::Context as HasContext>::UniformLocation;
type GlTexture = <glow::Context as HasContext>::Texture;
type GlFramebuffer = <glow::Context as HasContext>::Framebuffer;
type GlRenderbuffer = <glow::Context as HasContext>::Renderbuffer;

#[derive(Clone, Copy)]
struct BufferEntry {
    raw: GlBuffer,
    kind: BufferKind,
    size: u64,
}

struct ProgramEntry {
    raw: GlProgram,
    label: String,
}

#[derive(Default)]
struct GlowState {
    next_id: usize,
    buffers: HashMap<BufferId, BufferEntry>,
    vertex_arrays: HashMap<VertexArrayId, GlVertexArray>,
    programs: HashMap<ProgramId, ProgramEntry>,
    uniform_ids: HashMap<(ProgramId, String), UniformLocation>,
    uniforms: HashMap<UniformLocation, GlUniformLocation>,
    textures: HashMap<TextureId, GlTexture>,
    framebuffers: HashMap<FramebufferId, GlFramebuffer>,
    renderbuffers: HashMap<RenderbufferId, GlRenderbuffer>,
}

impl GlowState {
    fn next(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }
}

/// A [`GraphicsDevice`] backed by an OpenGL 3.3 core context.
///
/// Engine ids are mapped to GL object names in per-kind tables. The device
/// must be used on the thread that owns the context.
pub struct GlowDevice {
    gl: glow::Context,
    state: RefCell<GlowState>,
}

impl fmt::Debug for GlowDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("GlowDevice");
        if let Ok(state) = self.state.try_borrow() {
            s.field("buffers", &state.buffers.len())
                .field("vertex_arrays", &state.vertex_arrays.len())
                .field("programs", &state.programs.len())
                .field("textures", &state.textures.len())
                .field("framebuffers", &state.framebuffers.len());
        }
        s.finish_non_exhaustive()
    }
}

impl GlowDevice {
    /// Wraps a context, checking that it provides at least OpenGL 3.3.
    pub fn new(gl: glow::Context) -> anyhow::Result<Self> {
        let version = gl.version();
        if !version.is_embedded && (version.major, version.minor) < (3, 3) {
            bail!(
                "OpenGL 3.3 or newer is required, the context provides {}.{}",
                version.major,
                version.minor
            );
        }
        log::info!(
            "OpenGL context {}.{} ({})",
            version.major,
            version.minor,
            version.vendor_info
        );
        Ok(Self {
            gl,
            state: RefCell::new(GlowState::default()),
        })
    }

    /// Creates the context from a platform loader, such as the one of the
    /// windowing library that made the context current.
    ///
    /// # Safety
    /// A GL context must be current on this thread, and `loader` must return
    /// valid function pointers for it.
    pub unsafe fn from_loader_function<F>(loader: F) -> anyhow::Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let gl = glow::Context::from_loader_function(loader);
        Self::new(gl).context("Failed to initialize the OpenGL device")
    }

    /// The raw context, for calls the engine does not cover.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Sets the viewport to the whole target.
    pub fn set_viewport(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
    }

    /// Clears color, depth and stencil of the bound framebuffer.
    pub fn clear(&self, color: Color) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT);
        }
    }

    fn buffer(&self, id: BufferId) -> Result<BufferEntry, ResourceError> {
        self.state
            .borrow()
            .buffers
            .get(&id)
            .copied()
            .ok_or(ResourceError::InvalidHandle)
    }

    fn vertex_array(&self, id: VertexArrayId) -> Result<GlVertexArray, ResourceError> {
        self.state
            .borrow()
            .vertex_arrays
            .get(&id)
            .copied()
            .ok_or(ResourceError::InvalidHandle)
    }

    fn texture(&self, id: TextureId) -> Result<GlTexture, ResourceError> {
        self.state
            .borrow()
            .textures
            .get(&id)
            .copied()
            .ok_or(ResourceError::InvalidHandle)
    }

    fn framebuffer(&self, id: FramebufferId) -> Result<GlFramebuffer, ResourceError> {
        self.state
            .borrow()
            .framebuffers
            .get(&id)
            .copied()
            .ok_or(ResourceError::InvalidHandle)
    }

    fn upload_buffer(
        &self,
        descriptor: &BufferDescriptor,
        data: Option<&[u8]>,
    ) -> Result<BufferId, ResourceError> {
        let gl = &self.gl;
        let target = descriptor.kind.into_gl();
        let usage = descriptor.usage.into_gl();
        let size = data.map_or(descriptor.size, |bytes| bytes.len() as u64);

        let raw = unsafe {
            let raw = gl.create_buffer().map_err(ResourceError::BackendError)?;
            // Element bindings are vertex array state.
            gl.bind_vertex_array(None);
            gl.bind_buffer(target, Some(raw));
            match data {
                Some(bytes) => gl.buffer_data_u8_slice(target, bytes, usage),
                None => gl.buffer_data_size(target, size as i32, usage),
            }
            gl.bind_buffer(target, None);
            raw
        };

        let mut state = self.state.borrow_mut();
        let id = BufferId(state.next());
        state.buffers.insert(
            id,
            BufferEntry {
                raw,
                kind: descriptor.kind,
                size,
            },
        );
        log::trace!(
            "Created {:?} buffer {:?} ({} bytes, label {:?}).",
            descriptor.kind,
            id,
            size,
            descriptor.label
        );
        Ok(id)
    }

    fn compile_stage(&self, stage: u32, label: &str, source: &str) -> Result<GlShader, ShaderError> {
        let gl = &self.gl;
        let stage_name = if stage == glow::VERTEX_SHADER {
            "vertex"
        } else {
            "fragment"
        };
        unsafe {
            let shader = gl
                .create_shader(stage)
                .map_err(|details| ShaderError::CompilationError {
                    label: format!("{label} ({stage_name})"),
                    details,
                })?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let details = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::CompilationError {
                    label: format!("{label} ({stage_name})"),
                    details,
                });
            }
            Ok(shader)
        }
    }
}

impl GraphicsDevice for GlowDevice {
    // --- Buffers ---

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        self.upload_buffer(descriptor, None)
    }

    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        self.upload_buffer(descriptor, Some(data))
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let entry = self.buffer(id)?;
        if offset + data.len() as u64 > entry.size {
            return Err(ResourceError::OutOfBounds);
        }
        unsafe {
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, Some(entry.raw));
            self.gl
                .buffer_sub_data_u8_slice(glow::COPY_WRITE_BUFFER, offset as i32, data);
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, None);
        }
        Ok(())
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let entry = self
            .state
            .borrow_mut()
            .buffers
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        unsafe { self.gl.delete_buffer(entry.raw) };
        log::trace!("Destroyed {:?} buffer {:?}.", entry.kind, id);
        Ok(())
    }

    // --- Vertex arrays ---

    fn create_vertex_array(&self, label: Option<&str>) -> Result<VertexArrayId, ResourceError> {
        let raw = unsafe { self.gl.create_vertex_array() }.map_err(ResourceError::BackendError)?;
        let mut state = self.state.borrow_mut();
        let id = VertexArrayId(state.next());
        state.vertex_arrays.insert(id, raw);
        log::trace!("Created vertex array {id:?} ({}).", label.unwrap_or("unlabelled"));
        Ok(id)
    }

    fn set_vertex_buffer(
        &self,
        vertex_array: VertexArrayId,
        buffer: BufferId,
        layout: &VertexBufferLayout,
    ) -> Result<(), ResourceError> {
        let vao = self.vertex_array(vertex_array)?;
        let entry = self.buffer(buffer)?;
        let divisor = match layout.step_mode {
            StepMode::Vertex => 0,
            StepMode::Instance { divisor } => divisor,
        };
        let gl = &self.gl;
        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(entry.raw));
            for attribute in layout.attributes {
                gl.enable_vertex_attrib_array(attribute.location);
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.components as i32,
                    glow::FLOAT,
                    false,
                    layout.stride as i32,
                    attribute.offset as i32,
                );
                gl.vertex_attrib_divisor(attribute.location, divisor);
            }
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        Ok(())
    }

    fn set_index_buffer(
        &self,
        vertex_array: VertexArrayId,
        buffer: BufferId,
    ) -> Result<(), ResourceError> {
        let vao = self.vertex_array(vertex_array)?;
        let entry = self.buffer(buffer)?;
        if entry.kind != BufferKind::Index {
            return Err(ResourceError::InvalidHandle);
        }
        unsafe {
            self.gl.bind_vertex_array(Some(vao));
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(entry.raw));
            // Unbind the array first so it keeps the element binding.
            self.gl.bind_vertex_array(None);
        }
        Ok(())
    }

    fn destroy_vertex_array(&self, id: VertexArrayId) -> Result<(), ResourceError> {
        let raw = self
            .state
            .borrow_mut()
            .vertex_arrays
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        unsafe { self.gl.delete_vertex_array(raw) };
        Ok(())
    }

    // --- Programs ---

    fn create_program(&self, descriptor: &ProgramDescriptor) -> Result<ProgramId, ResourceError> {
        let label: &str = &descriptor.label;
        let vertex = self.compile_stage(glow::VERTEX_SHADER, label, &descriptor.vertex_source)?;
        let fragment =
            match self.compile_stage(glow::FRAGMENT_SHADER, label, &descriptor.fragment_source) {
                Ok(shader) => shader,
                Err(e) => {
                    unsafe { self.gl.delete_shader(vertex) };
                    return Err(e.into());
                }
            };

        let gl = &self.gl;
        let raw = unsafe {
            let raw = match gl.create_program() {
                Ok(raw) => raw,
                Err(e) => {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                    return Err(ResourceError::BackendError(e));
                }
            };
            gl.attach_shader(raw, vertex);
            gl.attach_shader(raw, fragment);
            gl.link_program(raw);
            gl.detach_shader(raw, vertex);
            gl.detach_shader(raw, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            if !gl.get_program_link_status(raw) {
                let details = gl.get_program_info_log(raw);
                gl.delete_program(raw);
                return Err(ShaderError::LinkError {
                    label: label.to_owned(),
                    details,
                }
                .into());
            }
            raw
        };

        let mut state = self.state.borrow_mut();
        let id = ProgramId(state.next());
        state.programs.insert(
            id,
            ProgramEntry {
                raw,
                label: label.to_owned(),
            },
        );
        log::debug!("Linked program '{label}' as {id:?}.");
        Ok(id)
    }

    fn destroy_program(&self, id: ProgramId) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        let entry = state
            .programs
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        let stale: Vec<UniformLocation> = state
            .uniform_ids
            .iter()
            .filter(|((program, _), _)| *program == id)
            .map(|(_, location)| *location)
            .collect();
        state.uniform_ids.retain(|(program, _), _| *program != id);
        for location in stale {
            state.uniforms.remove(&location);
        }
        drop(state);
        unsafe { self.gl.delete_program(entry.raw) };
        log::debug!("Deleted program '{}'.", entry.label);
        Ok(())
    }

    fn use_program(&self, id: ProgramId) -> Result<(), ResourceError> {
        let raw = self
            .state
            .borrow()
            .programs
            .get(&id)
            .map(|entry| entry.raw)
            .ok_or(ResourceError::InvalidHandle)?;
        unsafe { self.gl.use_program(Some(raw)) };
        Ok(())
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let mut state = self.state.borrow_mut();
        let key = (program, name.to_owned());
        if let Some(location) = state.uniform_ids.get(&key) {
            return Some(*location);
        }
        let raw = state.programs.get(&program)?.raw;
        let gl_location = unsafe { self.gl.get_uniform_location(raw, name) }?;
        let location = UniformLocation(state.next() as u32);
        state.uniform_ids.insert(key, location);
        state.uniforms.insert(location, gl_location);
        Some(location)
    }

    fn set_uniform(&self, location: UniformLocation, value: &UniformValue) {
        let state = self.state.borrow();
        let Some(loc) = state.uniforms.get(&location) else {
            log::trace!("Ignoring write to unknown uniform {location:?}.");
            return;
        };
        let gl = &self.gl;
        unsafe {
            match value {
                UniformValue::Int(v) => gl.uniform_1_i32(Some(loc), *v),
                UniformValue::UInt(v) => gl.uniform_1_u32(Some(loc), *v),
                UniformValue::Float(v) => gl.uniform_1_f32(Some(loc), *v),
                UniformValue::Vec3(v) => gl.uniform_3_f32(Some(loc), v.x, v.y, v.z),
                UniformValue::Vec4(v) => gl.uniform_4_f32(Some(loc), v.x, v.y, v.z, v.w),
                UniformValue::Mat3(m) => {
                    gl.uniform_matrix_3_f32_slice(Some(loc), false, &m.to_cols_array())
                }
                UniformValue::Mat4(m) => {
                    gl.uniform_matrix_4_f32_slice(Some(loc), false, &m.to_cols_array())
                }
            }
        }
    }

    // --- Textures ---

    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
        data: Option<&[u8]>,
    ) -> Result<TextureId, ResourceError> {
        if let Some(bytes) = data {
            if bytes.len() != descriptor.data_len() {
                return Err(ResourceError::InvalidData(format!(
                    "texture {:?} expects {} bytes, got {}",
                    descriptor.label,
                    descriptor.data_len(),
                    bytes.len()
                )));
            }
        }
        let format: GlTextureFormat = descriptor.format.into_gl();
        let gl = &self.gl;
        let raw = unsafe {
            let raw = gl.create_texture().map_err(ResourceError::BackendError)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format.internal_format,
                descriptor.width as i32,
                descriptor.height as i32,
                0,
                format.format,
                format.ty,
                glow::PixelUnpackData::Slice(data),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                descriptor.min_filter.into_gl(),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                descriptor.mag_filter.into_gl(),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
            raw
        };
        let mut state = self.state.borrow_mut();
        let id = TextureId(state.next());
        state.textures.insert(id, raw);
        log::debug!(
            "Created {}x{} texture {id:?} ({}).",
            descriptor.width,
            descriptor.height,
            descriptor.label.unwrap_or("unlabelled")
        );
        Ok(id)
    }

    fn bind_texture(&self, unit: u32, texture: TextureId) -> Result<(), ResourceError> {
        let raw = self.texture(texture)?;
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(raw));
        }
        Ok(())
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        let raw = self
            .state
            .borrow_mut()
            .textures
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        unsafe { self.gl.delete_texture(raw) };
        Ok(())
    }

    // --- Framebuffers ---

    fn create_framebuffer(&self) -> Result<FramebufferId, ResourceError> {
        let raw = unsafe { self.gl.create_framebuffer() }.map_err(ResourceError::BackendError)?;
        let mut state = self.state.borrow_mut();
        let id = FramebufferId(state.next());
        state.framebuffers.insert(id, raw);
        Ok(id)
    }

    fn bind_framebuffer(
        &self,
        target: FramebufferTarget,
        framebuffer: Option<FramebufferId>,
    ) -> Result<(), ResourceError> {
        let raw = framebuffer.map(|id| self.framebuffer(id)).transpose()?;
        unsafe { self.gl.bind_framebuffer(target.into_gl(), raw) };
        Ok(())
    }

    fn attach_color_texture(
        &self,
        framebuffer: FramebufferId,
        index: u32,
        texture: TextureId,
    ) -> Result<(), ResourceError> {
        let fbo = self.framebuffer(framebuffer)?;
        let raw = self.texture(texture)?;
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                color_attachment(index),
                glow::TEXTURE_2D,
                Some(raw),
                0,
            );
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
        log::debug!("Attached texture {texture:?} to {framebuffer:?} at color {index}.");
        Ok(())
    }

    fn create_renderbuffer(
        &self,
        descriptor: &RenderbufferDescriptor,
    ) -> Result<RenderbufferId, ResourceError> {
        let gl = &self.gl;
        let raw = unsafe {
            let raw = gl
                .create_renderbuffer()
                .map_err(ResourceError::BackendError)?;
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(raw));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                descriptor.format.into_gl(),
                descriptor.width as i32,
                descriptor.height as i32,
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
            raw
        };
        let mut state = self.state.borrow_mut();
        let id = RenderbufferId(state.next());
        state.renderbuffers.insert(id, raw);
        Ok(id)
    }

    fn attach_renderbuffer(
        &self,
        framebuffer: FramebufferId,
        attachment: RenderbufferAttachment,
        renderbuffer: RenderbufferId,
    ) -> Result<(), ResourceError> {
        let fbo = self.framebuffer(framebuffer)?;
        let raw = self
            .state
            .borrow()
            .renderbuffers
            .get(&renderbuffer)
            .copied()
            .ok_or(ResourceError::InvalidHandle)?;
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                attachment.into_gl(),
                glow::RENDERBUFFER,
                Some(raw),
            );
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
        log::debug!("Attached renderbuffer {renderbuffer:?} to {framebuffer:?} as {attachment:?}.");
        Ok(())
    }

    fn is_framebuffer_complete(&self, framebuffer: FramebufferId) -> bool {
        let Ok(fbo) = self.framebuffer(framebuffer) else {
            return false;
        };
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            let status = self.gl.check_framebuffer_status(glow::FRAMEBUFFER);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            status == glow::FRAMEBUFFER_COMPLETE
        }
    }

    fn destroy_renderbuffer(&self, id: RenderbufferId) -> Result<(), ResourceError> {
        let raw = self
            .state
            .borrow_mut()
            .renderbuffers
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        unsafe { self.gl.delete_renderbuffer(raw) };
        Ok(())
    }

    fn destroy_framebuffer(&self, id: FramebufferId) -> Result<(), ResourceError> {
        let raw = self
            .state
            .borrow_mut()
            .framebuffers
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        unsafe { self.gl.delete_framebuffer(raw) };
        Ok(())
    }

    // --- State and draws ---

    fn set_capability(&self, capability: Capability, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(capability.into_gl());
            } else {
                self.gl.disable(capability.into_gl());
            }
        }
    }

    fn set_polygon_mode(&self, mode: PolygonMode) {
        unsafe { self.gl.polygon_mode(glow::FRONT_AND_BACK, mode.into_gl()) };
    }

    fn draw(&self, vertex_array: VertexArrayId, command: &DrawCommand) -> Result<(), ResourceError> {
        let vao = self.vertex_array(vertex_array)?;
        let mode = command.mode.into_gl();
        let count = command.count as i32;
        let instances = command.instance_count as i32;
        let gl = &self.gl;
        unsafe {
            gl.bind_vertex_array(Some(vao));
            match command.ty {
                DrawCommandType::DrawArrays => gl.draw_arrays(mode, 0, count),
                DrawCommandType::DrawElements => {
                    gl.draw_elements(mode, count, glow::UNSIGNED_INT, 0)
                }
                DrawCommandType::DrawArraysInstanced => {
                    gl.draw_arrays_instanced(mode, 0, count, instances)
                }
                DrawCommandType::DrawElementsInstanced => {
                    gl.draw_elements_instanced(mode, count, glow::UNSIGNED_INT, 0, instances)
                }
            }
            gl.bind_vertex_array(None);
        }
        Ok(())
    }
}
