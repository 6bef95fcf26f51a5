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

//! # Meadow Core
//!
//! Foundational crate containing the rendering contracts, scene data and GPU
//! resource lifecycles of the Meadow renderer.
//!
//! Nothing in here talks to a real GPU: every resource goes through the
//! [`renderer::GraphicsDevice`] trait, which concrete backends implement.

#![warn(missing_docs)]

pub mod math;
pub mod renderer;
pub mod scene;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use renderer::{GraphicsDevice, RenderError, ResourceError};
pub use scene::Scene;
