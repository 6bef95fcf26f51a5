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

//! Sampled 2D textures.

use super::api::{TextureDescriptor, TextureFormat, TextureId};
use super::error::ResourceError;
use super::traits::GraphicsDevice;

/// A 2D texture living on the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    /// The texture object.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Texture {
    /// Uploads tightly packed 8-bit RGBA pixels, rows bottom to top.
    /// ## Errors
    /// * `ResourceError::InvalidData` - If `pixels` is not `width * height * 4` bytes.
    pub fn from_rgba8(
        device: &dyn GraphicsDevice,
        label: Option<&str>,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self, ResourceError> {
        let descriptor = TextureDescriptor::new(label, width, height, TextureFormat::Rgba8Unorm);
        if pixels.len() != descriptor.data_len() {
            return Err(ResourceError::InvalidData(format!(
                "expected {} bytes of RGBA8 pixels for {width}x{height}, got {}",
                descriptor.data_len(),
                pixels.len()
            )));
        }
        let id = device.create_texture(&descriptor, Some(pixels))?;
        Ok(Self { id, width, height })
    }

    /// Releases the GPU texture.
    pub fn destroy(self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        device.destroy_texture(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDevice;

    #[test]
    fn pixel_count_must_match() {
        let device = MockDevice::new();
        assert!(Texture::from_rgba8(&device, None, 2, 2, &[0; 16]).is_ok());
        assert!(matches!(
            Texture::from_rgba8(&device, None, 2, 2, &[0; 12]),
            Err(ResourceError::InvalidData(_))
        ));
    }
}
