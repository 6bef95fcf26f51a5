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

//! Texture loading: decode an image file on the CPU, then upload it.

use anyhow::{Context, Result};
use meadow_core::renderer::{GraphicsDevice, ResourceError, Texture};
use std::path::Path;

/// RGBA8 pixels ready for upload, rows ordered bottom to top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 pixels.
    pub pixels: Vec<u8>,
}

impl DecodedTexture {
    /// Uploads the pixels as a new texture.
    pub fn upload(
        &self,
        device: &dyn GraphicsDevice,
        label: Option<&str>,
    ) -> Result<Texture, ResourceError> {
        Texture::from_rgba8(device, label, self.width, self.height, &self.pixels)
    }
}

/// Decodes an encoded image (PNG, JPEG, ...) into RGBA8.
///
/// The image is flipped vertically, since texture coordinates start at the
/// bottom-left corner.
pub fn decode_texture(bytes: &[u8]) -> Result<DecodedTexture> {
    let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;
    let rgba_img = img.flipv().to_rgba8();
    let (width, height) = rgba_img.dimensions();
    Ok(DecodedTexture {
        width,
        height,
        pixels: rgba_img.into_raw(),
    })
}

/// Reads, decodes and uploads the image at `path`.
pub fn load_texture(device: &dyn GraphicsDevice, path: impl AsRef<Path>) -> Result<Texture> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read texture {}", path.display()))?;
    let decoded =
        decode_texture(&bytes).with_context(|| format!("Invalid texture {}", path.display()))?;
    let label = path.to_string_lossy();
    let texture = decoded.upload(device, Some(&label))?;
    log::debug!(
        "Loaded texture {} ({}x{}).",
        path.display(),
        texture.width,
        texture.height
    );
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use meadow_core::testing::{DeviceCall, MockDevice};
    use std::io::Cursor;

    fn encode_png(img: RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn rows_are_flipped_for_upload() {
        // Top row red, bottom row blue.
        let img = RgbaImage::from_raw(1, 2, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
        let decoded = decode_texture(&encode_png(img)).unwrap();
        assert_eq!((decoded.width, decoded.height), (1, 2));
        assert_eq!(&decoded.pixels[..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn decoded_texture_uploads_at_its_size() {
        let device = MockDevice::new();
        let img = RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        let texture = decode_texture(&encode_png(img))
            .unwrap()
            .upload(&device, Some("test"))
            .unwrap();
        assert_eq!((texture.width, texture.height), (4, 3));
        assert!(matches!(
            device.calls()[0],
            DeviceCall::CreateTexture {
                width: 4,
                height: 3,
                ..
            }
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_texture(b"not an image").is_err());
    }
}
