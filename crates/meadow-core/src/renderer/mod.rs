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

//! The rendering subsystem: device contract, GPU resource wrappers and lights.

pub mod api;
pub mod error;
pub mod framebuffer;
pub mod instance;
pub mod light;
pub mod mesh;
pub mod program;
pub mod shapes;
pub mod texture;
pub mod traits;

pub use self::error::{RenderError, ResourceError, ShaderError};
pub use self::framebuffer::Framebuffer;
pub use self::instance::{InstanceBuffer, InstanceData};
pub use self::light::{DirectionalLight, LightKind, PointLight, SpotLight};
pub use self::mesh::{GpuBufferSet, Mesh, MeshData};
pub use self::program::ShaderProgram;
pub use self::shapes::PrimitiveShape;
pub use self::texture::Texture;
pub use self::traits::GraphicsDevice;
