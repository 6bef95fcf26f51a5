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

//! Framebuffer and renderbuffer handles and attachment descriptions.

use super::texture::{FilterMode, TextureFormat};

/// An opaque handle to a framebuffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub usize);

/// An opaque handle to a renderbuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderbufferId(pub usize);

/// The binding point a framebuffer is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FramebufferTarget {
    /// Both read and draw operations.
    #[default]
    ReadDraw,
    /// Read operations only.
    Read,
    /// Draw operations only.
    Draw,
}

/// Internal formats of renderbuffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderbufferFormat {
    /// 24-bit depth with 8-bit stencil.
    #[default]
    Depth24Stencil8,
    /// 32-bit float depth.
    Depth32Float,
    /// 16-bit depth.
    Depth16,
    /// 8-bit stencil.
    Stencil8,
}

/// Where a renderbuffer attaches to its framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderbufferAttachment {
    /// The depth attachment.
    Depth,
    /// The stencil attachment.
    Stencil,
    /// The combined depth-stencil attachment.
    DepthStencil,
}

impl RenderbufferFormat {
    /// The attachment point this format is attached to.
    pub const fn attachment(self) -> RenderbufferAttachment {
        match self {
            RenderbufferFormat::Depth24Stencil8 => RenderbufferAttachment::DepthStencil,
            RenderbufferFormat::Depth32Float | RenderbufferFormat::Depth16 => {
                RenderbufferAttachment::Depth
            }
            RenderbufferFormat::Stencil8 => RenderbufferAttachment::Stencil,
        }
    }
}

/// A descriptor used to create a [`RenderbufferId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderbufferDescriptor {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Internal format.
    pub format: RenderbufferFormat,
}

/// Parameters of a new color attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorAttachmentCreateInfo {
    /// Pixel format of the backing texture.
    pub format: TextureFormat,
    /// Filter used when the attachment is sampled.
    pub filter: FilterMode,
}

/// Parameters of a new renderbuffer attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderbufferAttachmentCreateInfo {
    /// Internal format of the renderbuffer.
    pub format: RenderbufferFormat,
}
