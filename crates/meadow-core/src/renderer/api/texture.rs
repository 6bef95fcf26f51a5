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

//! Texture handles and creation descriptors.

/// An opaque handle to a GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Pixel formats supported for textures and color attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// 8-bit RGBA, unsigned normalized.
    #[default]
    Rgba8Unorm,
    /// 8-bit RGB, unsigned normalized.
    Rgb8Unorm,
    /// 16-bit float RGBA, for HDR color attachments.
    Rgba16Float,
}

impl TextureFormat {
    /// Size in bytes of one pixel.
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            TextureFormat::Rgba8Unorm => 4,
            TextureFormat::Rgb8Unorm => 3,
            TextureFormat::Rgba16Float => 8,
        }
    }
}

/// Minification and magnification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Linear,
}

/// A descriptor used to create a [`TextureId`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<&'a str>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: TextureFormat,
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
}

impl<'a> TextureDescriptor<'a> {
    /// Creates a linear-filtered descriptor.
    pub fn new(label: Option<&'a str>, width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            label,
            width,
            height,
            format,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
        }
    }

    /// Expected byte length of the full pixel data.
    pub fn data_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel() as usize
    }
}
