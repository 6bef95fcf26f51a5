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

//! # Meadow Lanes
//!
//! The per-frame hot path of the renderer: shader selection, uniform and
//! light upload, debug primitives, light glyphs and the instanced draw path.
//! Everything here drives a [`meadow_core::GraphicsDevice`] and never touches
//! a concrete graphics API.

pub mod asset;
pub mod config;
pub mod instancing;
pub mod render_lane;

pub use config::RendererConfig;
pub use instancing::{InstancedBatch, ScatterConfig};
pub use render_lane::{FrameStats, Renderer, ShaderKey, ShaderSelection};
