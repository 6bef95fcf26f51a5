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

//! A recording [`GraphicsDevice`] for tests.
//!
//! [`MockDevice`] hands out sequential ids, keeps buffer contents in memory
//! and records every call, so tests can assert on uniform names, draw
//! commands and written byte ranges without a GPU.

use crate::renderer::api::*;
use crate::renderer::{GraphicsDevice, ResourceError, ShaderError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// A uniform write as seen by the device.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformWrite {
    /// The program that was current.
    pub program: Option<ProgramId>,
    /// The uniform name the location was looked up with.
    pub name: String,
    /// The written value.
    pub value: UniformValue,
}

/// A draw call as seen by the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    /// The vertex array that was drawn.
    pub vertex_array: VertexArrayId,
    /// The submitted command.
    pub command: DrawCommand,
    /// The program that was current.
    pub program: Option<ProgramId>,
}

/// Every call a [`MockDevice`] received, in order.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateBuffer {
        id: BufferId,
        kind: BufferKind,
        size: usize,
    },
    WriteBuffer {
        id: BufferId,
        offset: u64,
        len: usize,
    },
    DestroyBuffer(BufferId),
    CreateVertexArray(VertexArrayId),
    SetVertexBuffer {
        vertex_array: VertexArrayId,
        buffer: BufferId,
        first_location: u32,
        step_mode: StepMode,
    },
    SetIndexBuffer {
        vertex_array: VertexArrayId,
        buffer: BufferId,
    },
    DestroyVertexArray(VertexArrayId),
    CreateProgram {
        id: ProgramId,
        label: String,
    },
    DestroyProgram(ProgramId),
    UseProgram(ProgramId),
    SetUniform(UniformWrite),
    CreateTexture {
        id: TextureId,
        width: u32,
        height: u32,
        format: TextureFormat,
    },
    BindTexture {
        unit: u32,
        texture: TextureId,
    },
    DestroyTexture(TextureId),
    CreateFramebuffer(FramebufferId),
    BindFramebuffer {
        target: FramebufferTarget,
        framebuffer: Option<FramebufferId>,
    },
    AttachColor {
        framebuffer: FramebufferId,
        index: u32,
        texture: TextureId,
    },
    CreateRenderbuffer {
        id: RenderbufferId,
        descriptor: RenderbufferDescriptor,
    },
    AttachRenderbuffer {
        framebuffer: FramebufferId,
        attachment: RenderbufferAttachment,
        renderbuffer: RenderbufferId,
    },
    DestroyRenderbuffer(RenderbufferId),
    DestroyFramebuffer(FramebufferId),
    SetCapability {
        capability: Capability,
        enabled: bool,
    },
    SetPolygonMode(PolygonMode),
    Draw(DrawRecord),
}

/// Device calls a [`MockDevice`] can be told to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailingCall {
    /// `set_index_buffer`.
    SetIndexBuffer,
    /// `attach_color_texture`.
    AttachColorTexture,
    /// `attach_renderbuffer`.
    AttachRenderbuffer,
}

#[derive(Debug)]
struct MockState {
    next_id: usize,
    calls: Vec<DeviceCall>,
    buffers: HashMap<BufferId, Vec<u8>>,
    vertex_arrays: HashSet<VertexArrayId>,
    programs: HashMap<ProgramId, String>,
    locations: HashMap<(ProgramId, String), UniformLocation>,
    location_names: HashMap<UniformLocation, String>,
    current_program: Option<ProgramId>,
    hidden_uniforms: HashSet<String>,
    failing_programs: HashSet<String>,
    failing_calls: HashSet<FailingCall>,
    framebuffers_complete: bool,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            next_id: 1,
            calls: Vec::new(),
            buffers: HashMap::new(),
            vertex_arrays: HashSet::new(),
            programs: HashMap::new(),
            locations: HashMap::new(),
            location_names: HashMap::new(),
            current_program: None,
            hidden_uniforms: HashSet::new(),
            failing_programs: HashSet::new(),
            failing_calls: HashSet::new(),
            framebuffers_complete: true,
        }
    }
}

impl MockState {
    fn next(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// A [`GraphicsDevice`] that records instead of rendering.
#[derive(Debug, Default)]
pub struct MockDevice {
    state: RefCell<MockState>,
}

impl MockDevice {
    /// Creates a device with every framebuffer reported complete.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state.borrow().calls.clone()
    }

    /// Forgets the recorded calls, keeping the resources.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// The recorded draw calls.
    pub fn draws(&self) -> Vec<DrawRecord> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::Draw(record) => Some(*record),
                _ => None,
            })
            .collect()
    }

    /// The recorded uniform writes.
    pub fn uniform_writes(&self) -> Vec<UniformWrite> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::SetUniform(write) => Some(write.clone()),
                _ => None,
            })
            .collect()
    }

    /// The most recent value written to uniform `name` of any program.
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniform_writes()
            .into_iter()
            .rev()
            .find(|write| write.name == name)
            .map(|write| write.value)
    }

    /// The current contents of a live buffer.
    pub fn buffer_contents(&self, id: BufferId) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&id).cloned()
    }

    /// Number of buffers created and not yet destroyed.
    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    /// The label a program was created with.
    pub fn program_label(&self, id: ProgramId) -> Option<String> {
        self.state.borrow().programs.get(&id).cloned()
    }

    /// Makes `uniform_location` report `name` as absent from every program.
    pub fn hide_uniform(&self, name: &str) {
        self.state
            .borrow_mut()
            .hidden_uniforms
            .insert(name.to_owned());
    }

    /// Makes programs labelled `label` fail to compile.
    pub fn fail_program(&self, label: &str) {
        self.state
            .borrow_mut()
            .failing_programs
            .insert(label.to_owned());
    }

    /// Undoes [`MockDevice::fail_program`].
    pub fn allow_program(&self, label: &str) {
        self.state.borrow_mut().failing_programs.remove(label);
    }

    /// Makes every later `call` fail with `ResourceError::InvalidHandle`.
    pub fn fail_call(&self, call: FailingCall) {
        self.state.borrow_mut().failing_calls.insert(call);
    }

    /// Number of live vertex arrays.
    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    fn check(&self, call: FailingCall) -> Result<(), ResourceError> {
        if self.state.borrow().failing_calls.contains(&call) {
            Err(ResourceError::InvalidHandle)
        } else {
            Ok(())
        }
    }

    /// Sets the result of every framebuffer completeness check.
    pub fn set_framebuffers_complete(&self, complete: bool) {
        self.state.borrow_mut().framebuffers_complete = complete;
    }

    fn record(&self, call: DeviceCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GraphicsDevice for MockDevice {
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        let mut state = self.state.borrow_mut();
        let id = BufferId(state.next());
        let size = descriptor.size as usize;
        state.buffers.insert(id, vec![0; size]);
        state.calls.push(DeviceCall::CreateBuffer {
            id,
            kind: descriptor.kind,
            size,
        });
        Ok(id)
    }

    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let mut state = self.state.borrow_mut();
        let id = BufferId(state.next());
        state.buffers.insert(id, data.to_vec());
        state.calls.push(DeviceCall::CreateBuffer {
            id,
            kind: descriptor.kind,
            size: data.len(),
        });
        Ok(id)
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        let buffer = state
            .buffers
            .get_mut(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        let start = offset as usize;
        let end = start + data.len();
        if end > buffer.len() {
            return Err(ResourceError::OutOfBounds);
        }
        buffer[start..end].copy_from_slice(data);
        state.calls.push(DeviceCall::WriteBuffer {
            id,
            offset,
            len: data.len(),
        });
        Ok(())
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        state
            .buffers
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        state.calls.push(DeviceCall::DestroyBuffer(id));
        Ok(())
    }

    fn create_vertex_array(&self, _label: Option<&str>) -> Result<VertexArrayId, ResourceError> {
        let mut state = self.state.borrow_mut();
        let id = VertexArrayId(state.next());
        state.vertex_arrays.insert(id);
        state.calls.push(DeviceCall::CreateVertexArray(id));
        Ok(id)
    }

    fn set_vertex_buffer(
        &self,
        vertex_array: VertexArrayId,
        buffer: BufferId,
        layout: &VertexBufferLayout,
    ) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        if !state.vertex_arrays.contains(&vertex_array) || !state.buffers.contains_key(&buffer) {
            return Err(ResourceError::InvalidHandle);
        }
        let first_location = layout
            .attributes
            .iter()
            .map(|a| a.location)
            .min()
            .unwrap_or(0);
        state.calls.push(DeviceCall::SetVertexBuffer {
            vertex_array,
            buffer,
            first_location,
            step_mode: layout.step_mode,
        });
        Ok(())
    }

    fn set_index_buffer(
        &self,
        vertex_array: VertexArrayId,
        buffer: BufferId,
    ) -> Result<(), ResourceError> {
        self.check(FailingCall::SetIndexBuffer)?;
        let mut state = self.state.borrow_mut();
        if !state.vertex_arrays.contains(&vertex_array) || !state.buffers.contains_key(&buffer) {
            return Err(ResourceError::InvalidHandle);
        }
        state.calls.push(DeviceCall::SetIndexBuffer {
            vertex_array,
            buffer,
        });
        Ok(())
    }

    fn destroy_vertex_array(&self, id: VertexArrayId) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        if !state.vertex_arrays.remove(&id) {
            return Err(ResourceError::InvalidHandle);
        }
        state.calls.push(DeviceCall::DestroyVertexArray(id));
        Ok(())
    }

    fn create_program(&self, descriptor: &ProgramDescriptor) -> Result<ProgramId, ResourceError> {
        let mut state = self.state.borrow_mut();
        let label = descriptor.label.to_string();
        if state.failing_programs.contains(&label) {
            return Err(ShaderError::CompilationError {
                label,
                details: "rejected by mock device".to_string(),
            }
            .into());
        }
        let id = ProgramId(state.next());
        state.programs.insert(id, label.clone());
        state.calls.push(DeviceCall::CreateProgram { id, label });
        Ok(id)
    }

    fn destroy_program(&self, id: ProgramId) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        state
            .programs
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        if state.current_program == Some(id) {
            state.current_program = None;
        }
        state.calls.push(DeviceCall::DestroyProgram(id));
        Ok(())
    }

    fn use_program(&self, id: ProgramId) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        if !state.programs.contains_key(&id) {
            return Err(ResourceError::InvalidHandle);
        }
        state.current_program = Some(id);
        state.calls.push(DeviceCall::UseProgram(id));
        Ok(())
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let mut state = self.state.borrow_mut();
        if state.hidden_uniforms.contains(name) || !state.programs.contains_key(&program) {
            return None;
        }
        let key = (program, name.to_owned());
        if let Some(location) = state.locations.get(&key) {
            return Some(*location);
        }
        let location = UniformLocation(state.next() as u32);
        state.locations.insert(key, location);
        state.location_names.insert(location, name.to_owned());
        Some(location)
    }

    fn set_uniform(&self, location: UniformLocation, value: &UniformValue) {
        let mut state = self.state.borrow_mut();
        let name = state
            .location_names
            .get(&location)
            .cloned()
            .unwrap_or_default();
        let program = state.current_program;
        state.calls.push(DeviceCall::SetUniform(UniformWrite {
            program,
            name,
            value: *value,
        }));
    }

    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
        data: Option<&[u8]>,
    ) -> Result<TextureId, ResourceError> {
        if let Some(data) = data {
            if data.len() != descriptor.data_len() {
                return Err(ResourceError::InvalidData(format!(
                    "expected {} bytes, got {}",
                    descriptor.data_len(),
                    data.len()
                )));
            }
        }
        let mut state = self.state.borrow_mut();
        let id = TextureId(state.next());
        state.calls.push(DeviceCall::CreateTexture {
            id,
            width: descriptor.width,
            height: descriptor.height,
            format: descriptor.format,
        });
        Ok(id)
    }

    fn bind_texture(&self, unit: u32, texture: TextureId) -> Result<(), ResourceError> {
        self.record(DeviceCall::BindTexture { unit, texture });
        Ok(())
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        self.record(DeviceCall::DestroyTexture(id));
        Ok(())
    }

    fn create_framebuffer(&self) -> Result<FramebufferId, ResourceError> {
        let mut state = self.state.borrow_mut();
        let id = FramebufferId(state.next());
        state.calls.push(DeviceCall::CreateFramebuffer(id));
        Ok(id)
    }

    fn bind_framebuffer(
        &self,
        target: FramebufferTarget,
        framebuffer: Option<FramebufferId>,
    ) -> Result<(), ResourceError> {
        self.record(DeviceCall::BindFramebuffer {
            target,
            framebuffer,
        });
        Ok(())
    }

    fn attach_color_texture(
        &self,
        framebuffer: FramebufferId,
        index: u32,
        texture: TextureId,
    ) -> Result<(), ResourceError> {
        self.check(FailingCall::AttachColorTexture)?;
        self.record(DeviceCall::AttachColor {
            framebuffer,
            index,
            texture,
        });
        Ok(())
    }

    fn create_renderbuffer(
        &self,
        descriptor: &RenderbufferDescriptor,
    ) -> Result<RenderbufferId, ResourceError> {
        let mut state = self.state.borrow_mut();
        let id = RenderbufferId(state.next());
        state.calls.push(DeviceCall::CreateRenderbuffer {
            id,
            descriptor: *descriptor,
        });
        Ok(id)
    }

    fn attach_renderbuffer(
        &self,
        framebuffer: FramebufferId,
        attachment: RenderbufferAttachment,
        renderbuffer: RenderbufferId,
    ) -> Result<(), ResourceError> {
        self.check(FailingCall::AttachRenderbuffer)?;
        self.record(DeviceCall::AttachRenderbuffer {
            framebuffer,
            attachment,
            renderbuffer,
        });
        Ok(())
    }

    fn is_framebuffer_complete(&self, _framebuffer: FramebufferId) -> bool {
        self.state.borrow().framebuffers_complete
    }

    fn destroy_renderbuffer(&self, id: RenderbufferId) -> Result<(), ResourceError> {
        self.record(DeviceCall::DestroyRenderbuffer(id));
        Ok(())
    }

    fn destroy_framebuffer(&self, id: FramebufferId) -> Result<(), ResourceError> {
        self.record(DeviceCall::DestroyFramebuffer(id));
        Ok(())
    }

    fn set_capability(&self, capability: Capability, enabled: bool) {
        self.record(DeviceCall::SetCapability {
            capability,
            enabled,
        });
    }

    fn set_polygon_mode(&self, mode: PolygonMode) {
        self.record(DeviceCall::SetPolygonMode(mode));
    }

    fn draw(&self, vertex_array: VertexArrayId, command: &DrawCommand) -> Result<(), ResourceError> {
        let mut state = self.state.borrow_mut();
        if !state.vertex_arrays.contains(&vertex_array) {
            return Err(ResourceError::InvalidHandle);
        }
        let program = state.current_program;
        state.calls.push(DeviceCall::Draw(DrawRecord {
            vertex_array,
            command: *command,
            program,
        }));
        Ok(())
    }
}
