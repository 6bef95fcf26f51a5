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

//! Mapping of the engine's descriptor enums onto OpenGL constants.

use meadow_core::renderer::api::{
    BufferKind, BufferUsage, Capability, DrawCommandMode, FilterMode, FramebufferTarget,
    PolygonMode, RenderbufferAttachment, RenderbufferFormat, TextureFormat,
};

/// A local extension trait to convert our engine's types into GL enums.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_gl()` syntax.
pub trait IntoGl<T> {
    /// Consumes self and converts it into a GL value.
    fn into_gl(self) -> T;
}

// --- Draws ---

impl IntoGl<u32> for DrawCommandMode {
    fn into_gl(self) -> u32 {
        match self {
            DrawCommandMode::Triangles => glow::TRIANGLES,
            DrawCommandMode::Points => glow::POINTS,
            DrawCommandMode::Lines => glow::LINES,
            DrawCommandMode::LineStrip => glow::LINE_STRIP,
            DrawCommandMode::LineLoop => glow::LINE_LOOP,
            DrawCommandMode::TriangleStrip => glow::TRIANGLE_STRIP,
            DrawCommandMode::TriangleFan => glow::TRIANGLE_FAN,
            DrawCommandMode::Patches => glow::PATCHES,
        }
    }
}

// --- Buffers ---

impl IntoGl<u32> for BufferKind {
    fn into_gl(self) -> u32 {
        match self {
            BufferKind::Vertex => glow::ARRAY_BUFFER,
            BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl IntoGl<u32> for BufferUsage {
    fn into_gl(self) -> u32 {
        match self {
            BufferUsage::Static => glow::STATIC_DRAW,
            BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
            BufferUsage::Stream => glow::STREAM_DRAW,
        }
    }
}

// --- Textures ---

/// The `(internal_format, format, type)` triple passed to `glTexImage2D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlTextureFormat {
    /// Sized internal format.
    pub internal_format: i32,
    /// Layout of the client pixels.
    pub format: u32,
    /// Component type of the client pixels.
    pub ty: u32,
}

impl IntoGl<GlTextureFormat> for TextureFormat {
    fn into_gl(self) -> GlTextureFormat {
        let (internal_format, format, ty) = match self {
            TextureFormat::Rgba8Unorm => (glow::RGBA8, glow::RGBA, glow::UNSIGNED_BYTE),
            TextureFormat::Rgb8Unorm => (glow::RGB8, glow::RGB, glow::UNSIGNED_BYTE),
            TextureFormat::Rgba16Float => (glow::RGBA16F, glow::RGBA, glow::HALF_FLOAT),
        };
        GlTextureFormat {
            internal_format: internal_format as i32,
            format,
            ty,
        }
    }
}

impl IntoGl<i32> for FilterMode {
    fn into_gl(self) -> i32 {
        (match self {
            FilterMode::Nearest => glow::NEAREST,
            FilterMode::Linear => glow::LINEAR,
        }) as i32
    }
}

// --- Framebuffers ---

impl IntoGl<u32> for FramebufferTarget {
    fn into_gl(self) -> u32 {
        match self {
            FramebufferTarget::ReadDraw => glow::FRAMEBUFFER,
            FramebufferTarget::Read => glow::READ_FRAMEBUFFER,
            FramebufferTarget::Draw => glow::DRAW_FRAMEBUFFER,
        }
    }
}

impl IntoGl<u32> for RenderbufferFormat {
    fn into_gl(self) -> u32 {
        match self {
            RenderbufferFormat::Depth24Stencil8 => glow::DEPTH24_STENCIL8,
            RenderbufferFormat::Depth32Float => glow::DEPTH_COMPONENT32F,
            RenderbufferFormat::Depth16 => glow::DEPTH_COMPONENT16,
            RenderbufferFormat::Stencil8 => glow::STENCIL_INDEX8,
        }
    }
}

impl IntoGl<u32> for RenderbufferAttachment {
    fn into_gl(self) -> u32 {
        match self {
            RenderbufferAttachment::Depth => glow::DEPTH_ATTACHMENT,
            RenderbufferAttachment::Stencil => glow::STENCIL_ATTACHMENT,
            RenderbufferAttachment::DepthStencil => glow::DEPTH_STENCIL_ATTACHMENT,
        }
    }
}

/// `GL_COLOR_ATTACHMENTi`.
pub fn color_attachment(index: u32) -> u32 {
    glow::COLOR_ATTACHMENT0 + index
}

// --- Fixed-function state ---

impl IntoGl<u32> for Capability {
    fn into_gl(self) -> u32 {
        match self {
            Capability::DepthTest => glow::DEPTH_TEST,
            Capability::StencilTest => glow::STENCIL_TEST,
        }
    }
}

impl IntoGl<u32> for PolygonMode {
    fn into_gl(self) -> u32 {
        match self {
            PolygonMode::Fill => glow::FILL,
            PolygonMode::Line => glow::LINE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_modes() {
        assert_eq!(DrawCommandMode::Triangles.into_gl(), 0x0004);
        assert_eq!(DrawCommandMode::Points.into_gl(), 0x0000);
        assert_eq!(DrawCommandMode::Lines.into_gl(), 0x0001);
    }

    #[test]
    fn test_buffer_targets_and_usages() {
        assert_eq!(BufferKind::Vertex.into_gl(), glow::ARRAY_BUFFER);
        assert_eq!(BufferKind::Index.into_gl(), glow::ELEMENT_ARRAY_BUFFER);
        assert_eq!(BufferUsage::default().into_gl(), glow::STATIC_DRAW);
    }

    #[test]
    fn test_texture_formats() {
        let rgba: GlTextureFormat = TextureFormat::Rgba8Unorm.into_gl();
        assert_eq!(rgba.internal_format, glow::RGBA8 as i32);
        assert_eq!(rgba.format, glow::RGBA);
        assert_eq!(rgba.ty, glow::UNSIGNED_BYTE);
        let half: GlTextureFormat = TextureFormat::Rgba16Float.into_gl();
        assert_eq!(half.ty, glow::HALF_FLOAT);
    }

    #[test]
    fn test_default_renderbuffer_is_depth_stencil() {
        let format = RenderbufferFormat::default();
        assert_eq!(format.into_gl(), glow::DEPTH24_STENCIL8);
        assert_eq!(
            format.attachment().into_gl(),
            glow::DEPTH_STENCIL_ATTACHMENT
        );
    }

    #[test]
    fn test_color_attachment_indices() {
        assert_eq!(color_attachment(0), glow::COLOR_ATTACHMENT0);
        assert_eq!(color_attachment(6), glow::COLOR_ATTACHMENT6);
    }
}
