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

//! The [`GraphicsDevice`] contract.

use crate::renderer::api::*;
use crate::renderer::error::ResourceError;
use std::fmt::Debug;

/// A thin, backend-agnostic view of an immediate-mode graphics context.
///
/// Every GPU object is referenced through an opaque id allocated by the
/// device. Methods take `&self`: implementations keep their resource tables
/// behind interior mutability, and like the underlying GL context they are
/// bound to the thread that created them (hence no `Send + Sync` bound).
pub trait GraphicsDevice: Debug {
    // --- Buffers ---

    /// Creates an uninitialized GPU buffer of `descriptor.size` bytes.
    /// ## Arguments
    /// * `descriptor` - The buffer configuration.
    /// ## Returns
    /// The ID of the created buffer.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError>;

    /// Creates a GPU buffer initialized with `data`, sized to `data.len()`.
    /// ## Arguments
    /// * `descriptor` - The buffer configuration. `size` is ignored.
    /// * `data` - The initial contents.
    /// ## Returns
    /// The ID of the created buffer.
    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError>;

    /// Overwrites `data.len()` bytes of a buffer starting at `offset`.
    /// ## Errors
    /// * `ResourceError::OutOfBounds` - If the range exceeds the buffer size.
    /// * `ResourceError::InvalidHandle` - If `id` is unknown.
    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError>;

    /// Destroys a GPU buffer.
    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError>;

    // --- Vertex arrays ---

    /// Creates an empty vertex array object.
    fn create_vertex_array(&self, label: Option<&str>) -> Result<VertexArrayId, ResourceError>;

    /// Binds `buffer` to the attribute slots described by `layout`.
    /// ## Arguments
    /// * `vertex_array` - The vertex array to configure.
    /// * `buffer` - A vertex buffer.
    /// * `layout` - Stride, step mode and attribute slots of the buffer.
    fn set_vertex_buffer(
        &self,
        vertex_array: VertexArrayId,
        buffer: BufferId,
        layout: &VertexBufferLayout,
    ) -> Result<(), ResourceError>;

    /// Binds `buffer` as the `u32` index buffer of `vertex_array`.
    fn set_index_buffer(
        &self,
        vertex_array: VertexArrayId,
        buffer: BufferId,
    ) -> Result<(), ResourceError>;

    /// Destroys a vertex array object. The buffers bound to it are left alive.
    fn destroy_vertex_array(&self, id: VertexArrayId) -> Result<(), ResourceError>;

    // --- Programs ---

    /// Compiles and links a program from GLSL sources.
    /// ## Errors
    /// * `ResourceError::Shader` - With the compiler or linker log.
    fn create_program(&self, descriptor: &ProgramDescriptor) -> Result<ProgramId, ResourceError>;

    /// Destroys a program.
    fn destroy_program(&self, id: ProgramId) -> Result<(), ResourceError>;

    /// Makes `id` the current program. Subsequent uniform writes target it.
    fn use_program(&self, id: ProgramId) -> Result<(), ResourceError>;

    /// Looks up a uniform by name.
    /// ## Returns
    /// `None` if the program has no active uniform called `name`.
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Writes a uniform of the current program.
    fn set_uniform(&self, location: UniformLocation, value: &UniformValue);

    // --- Textures ---

    /// Creates a 2D texture, optionally filled with tightly packed pixels.
    /// ## Errors
    /// * `ResourceError::InvalidData` - If `data` does not match the descriptor's size.
    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
        data: Option<&[u8]>,
    ) -> Result<TextureId, ResourceError>;

    /// Binds `texture` to texture unit `unit`.
    fn bind_texture(&self, unit: u32, texture: TextureId) -> Result<(), ResourceError>;

    /// Destroys a texture.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    // --- Framebuffers ---

    /// Creates an empty framebuffer object.
    fn create_framebuffer(&self) -> Result<FramebufferId, ResourceError>;

    /// Binds a framebuffer, or the default framebuffer when `None`.
    fn bind_framebuffer(
        &self,
        target: FramebufferTarget,
        framebuffer: Option<FramebufferId>,
    ) -> Result<(), ResourceError>;

    /// Attaches `texture` as color attachment number `index`.
    fn attach_color_texture(
        &self,
        framebuffer: FramebufferId,
        index: u32,
        texture: TextureId,
    ) -> Result<(), ResourceError>;

    /// Creates a renderbuffer with allocated storage.
    fn create_renderbuffer(
        &self,
        descriptor: &RenderbufferDescriptor,
    ) -> Result<RenderbufferId, ResourceError>;

    /// Attaches a renderbuffer at `attachment`.
    fn attach_renderbuffer(
        &self,
        framebuffer: FramebufferId,
        attachment: RenderbufferAttachment,
        renderbuffer: RenderbufferId,
    ) -> Result<(), ResourceError>;

    /// Returns `true` if the framebuffer passes the completeness check.
    fn is_framebuffer_complete(&self, framebuffer: FramebufferId) -> bool;

    /// Destroys a renderbuffer.
    fn destroy_renderbuffer(&self, id: RenderbufferId) -> Result<(), ResourceError>;

    /// Destroys a framebuffer. Its attachments are left alive.
    fn destroy_framebuffer(&self, id: FramebufferId) -> Result<(), ResourceError>;

    // --- State and draws ---

    /// Enables or disables a pipeline capability.
    fn set_capability(&self, capability: Capability, enabled: bool);

    /// Sets the polygon rasterization mode.
    fn set_polygon_mode(&self, mode: PolygonMode);

    /// Issues one draw call using `vertex_array` and the current program.
    fn draw(&self, vertex_array: VertexArrayId, command: &DrawCommand) -> Result<(), ResourceError>;
}
