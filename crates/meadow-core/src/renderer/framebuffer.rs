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

//! Offscreen render targets.

use super::api::{
    ColorAttachmentCreateInfo, FramebufferId, FramebufferTarget, RenderbufferAttachmentCreateInfo,
    RenderbufferDescriptor, RenderbufferId, TextureDescriptor, TextureId,
};
use super::error::{RenderError, ResourceError};
use super::traits::GraphicsDevice;
use crate::utils::FixedVec;

/// Maximum number of color attachments per framebuffer.
pub const MAX_COLOR_ATTACHMENTS: usize = 7;
/// Maximum number of renderbuffer attachments per framebuffer.
pub const MAX_RENDERBUFFER_ATTACHMENTS: usize = 7;

/// A framebuffer object with up to seven color textures and seven
/// renderbuffers.
///
/// Attachments are allocated at `width * scale_factor` by
/// `height * scale_factor` so that a HiDPI surface is rendered at its native
/// resolution.
#[derive(Debug)]
pub struct Framebuffer {
    id: FramebufferId,
    width: u32,
    height: u32,
    scale_factor: u32,
    color_attachments: FixedVec<TextureId, MAX_COLOR_ATTACHMENTS>,
    renderbuffer_attachments: FixedVec<RenderbufferId, MAX_RENDERBUFFER_ATTACHMENTS>,
}

impl Framebuffer {
    /// Creates an empty framebuffer with a scale factor of 1.
    pub fn new(device: &dyn GraphicsDevice, width: u32, height: u32) -> Result<Self, ResourceError> {
        Self::with_scale_factor(device, width, height, 1)
    }

    /// Creates an empty framebuffer whose attachments are `scale_factor`
    /// times the logical size.
    pub fn with_scale_factor(
        device: &dyn GraphicsDevice,
        width: u32,
        height: u32,
        scale_factor: u32,
    ) -> Result<Self, ResourceError> {
        let id = device.create_framebuffer()?;
        Ok(Self {
            id,
            width,
            height,
            scale_factor: scale_factor.max(1),
            color_attachments: FixedVec::new(),
            renderbuffer_attachments: FixedVec::new(),
        })
    }

    /// The framebuffer object.
    pub fn id(&self) -> FramebufferId {
        self.id
    }

    /// The physical size of the attachments.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            self.width * self.scale_factor,
            self.height * self.scale_factor,
        )
    }

    /// The color attachment textures, in attachment order.
    pub fn color_attachments(&self) -> &[TextureId] {
        self.color_attachments.as_slice()
    }

    /// The renderbuffer attachments, in creation order.
    pub fn renderbuffer_attachments(&self) -> &[RenderbufferId] {
        self.renderbuffer_attachments.as_slice()
    }

    /// Binds this framebuffer to `target`.
    pub fn bind(
        &self,
        device: &dyn GraphicsDevice,
        target: FramebufferTarget,
    ) -> Result<(), ResourceError> {
        device.bind_framebuffer(target, Some(self.id))
    }

    /// Restores the default framebuffer on `target`.
    pub fn unbind(
        device: &dyn GraphicsDevice,
        target: FramebufferTarget,
    ) -> Result<(), ResourceError> {
        device.bind_framebuffer(target, None)
    }

    /// Creates a texture and attaches it at the next color slot.
    /// ## Errors
    /// * `ResourceError::CapacityExceeded` - If all seven slots are used. Nothing is
    ///   allocated in that case.
    pub fn create_color_attachment(
        &mut self,
        device: &dyn GraphicsDevice,
        info: &ColorAttachmentCreateInfo,
    ) -> Result<TextureId, ResourceError> {
        if self.color_attachments.is_full() {
            return Err(ResourceError::CapacityExceeded {
                resource: "color attachments",
                capacity: MAX_COLOR_ATTACHMENTS,
            });
        }
        let (width, height) = self.physical_size();
        let mut descriptor =
            TextureDescriptor::new(Some("color attachment"), width, height, info.format);
        descriptor.min_filter = info.filter;
        descriptor.mag_filter = info.filter;
        let texture = device.create_texture(&descriptor, None)?;
        let index = self.color_attachments.len() as u32;
        if let Err(err) = device.attach_color_texture(self.id, index, texture) {
            if let Err(release) = device.destroy_texture(texture) {
                log::warn!("Failed to release color attachment {texture:?}: {release}");
            }
            return Err(err);
        }
        self.color_attachments
            .push(texture)
            .map_err(|e| ResourceError::capacity("color attachments", e))?;
        Ok(texture)
    }

    /// Creates a renderbuffer and attaches it at the point implied by its
    /// format (depth-stencil for the default format).
    /// ## Errors
    /// * `ResourceError::CapacityExceeded` - If all seven slots are used.
    pub fn create_renderbuffer_attachment(
        &mut self,
        device: &dyn GraphicsDevice,
        info: &RenderbufferAttachmentCreateInfo,
    ) -> Result<RenderbufferId, ResourceError> {
        if self.renderbuffer_attachments.is_full() {
            return Err(ResourceError::CapacityExceeded {
                resource: "renderbuffer attachments",
                capacity: MAX_RENDERBUFFER_ATTACHMENTS,
            });
        }
        let (width, height) = self.physical_size();
        let renderbuffer = device.create_renderbuffer(&RenderbufferDescriptor {
            width,
            height,
            format: info.format,
        })?;
        if let Err(err) =
            device.attach_renderbuffer(self.id, info.format.attachment(), renderbuffer)
        {
            if let Err(release) = device.destroy_renderbuffer(renderbuffer) {
                log::warn!("Failed to release renderbuffer {renderbuffer:?}: {release}");
            }
            return Err(err);
        }
        self.renderbuffer_attachments
            .push(renderbuffer)
            .map_err(|e| ResourceError::capacity("renderbuffer attachments", e))?;
        Ok(renderbuffer)
    }

    /// Returns `true` if the device reports the framebuffer as complete.
    pub fn is_complete(&self, device: &dyn GraphicsDevice) -> bool {
        let complete = device.is_framebuffer_complete(self.id);
        if !complete {
            log::error!("Framebuffer {:?} is not complete.", self.id);
        }
        complete
    }

    /// Like [`Framebuffer::is_complete`], as a `Result`.
    pub fn ensure_complete(&self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        if self.is_complete(device) {
            Ok(())
        } else {
            Err(RenderError::FramebufferIncomplete)
        }
    }

    /// Destroys the framebuffer and every attachment it created.
    pub fn destroy(mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        for texture in self.color_attachments.drain() {
            device.destroy_texture(texture)?;
        }
        for renderbuffer in self.renderbuffer_attachments.drain() {
            device.destroy_renderbuffer(renderbuffer)?;
        }
        device.destroy_framebuffer(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::api::{RenderbufferAttachment, RenderbufferFormat};
    use crate::testing::{DeviceCall, FailingCall, MockDevice};

    #[test]
    fn attachments_use_the_physical_size() {
        let device = MockDevice::new();
        let mut fb = Framebuffer::with_scale_factor(&device, 400, 300, 2).unwrap();
        fb.create_color_attachment(&device, &ColorAttachmentCreateInfo::default())
            .unwrap();
        fb.create_renderbuffer_attachment(&device, &RenderbufferAttachmentCreateInfo::default())
            .unwrap();

        let calls = device.calls();
        assert!(calls.iter().any(|c| matches!(
            c,
            DeviceCall::CreateTexture {
                width: 800,
                height: 600,
                ..
            }
        )));
        assert!(calls.iter().any(|c| matches!(
            c,
            DeviceCall::AttachRenderbuffer {
                attachment: RenderbufferAttachment::DepthStencil,
                ..
            }
        )));
        assert_eq!(RenderbufferFormat::default(), RenderbufferFormat::Depth24Stencil8);
    }

    #[test]
    fn color_attachment_indices_are_sequential() {
        let device = MockDevice::new();
        let mut fb = Framebuffer::new(&device, 64, 64).unwrap();
        for _ in 0..3 {
            fb.create_color_attachment(&device, &ColorAttachmentCreateInfo::default())
                .unwrap();
        }
        let indices: Vec<u32> = device
            .calls()
            .iter()
            .filter_map(|c| match c {
                DeviceCall::AttachColor { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn completeness_follows_the_device() {
        let device = MockDevice::new();
        let fb = Framebuffer::new(&device, 8, 8).unwrap();
        assert!(fb.ensure_complete(&device).is_ok());
        device.set_framebuffers_complete(false);
        assert!(matches!(
            fb.ensure_complete(&device),
            Err(RenderError::FramebufferIncomplete)
        ));
    }

    #[test]
    fn failed_attach_releases_the_new_object() {
        let device = MockDevice::new();
        let mut fb = Framebuffer::new(&device, 16, 16).unwrap();
        device.fail_call(FailingCall::AttachColorTexture);
        device.fail_call(FailingCall::AttachRenderbuffer);

        assert!(fb
            .create_color_attachment(&device, &ColorAttachmentCreateInfo::default())
            .is_err());
        assert!(fb
            .create_renderbuffer_attachment(&device, &RenderbufferAttachmentCreateInfo::default())
            .is_err());

        let calls = device.calls();
        let texture = calls.iter().find_map(|c| match c {
            DeviceCall::CreateTexture { id, .. } => Some(*id),
            _ => None,
        });
        let renderbuffer = calls.iter().find_map(|c| match c {
            DeviceCall::CreateRenderbuffer { id, .. } => Some(*id),
            _ => None,
        });
        assert!(calls.contains(&DeviceCall::DestroyTexture(texture.unwrap())));
        assert!(calls.contains(&DeviceCall::DestroyRenderbuffer(renderbuffer.unwrap())));
        assert!(fb.color_attachments().is_empty());
        assert!(fb.renderbuffer_attachments().is_empty());
    }
}
