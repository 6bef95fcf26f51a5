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

//! Fixed-function pipeline state and the per-frame render toggles.

use serde::{Deserialize, Serialize};

/// A pipeline capability that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Depth testing.
    DepthTest,
    /// Stencil testing.
    StencilTest,
}

/// How polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonMode {
    /// Filled polygons.
    #[default]
    Fill,
    /// Polygon edges only.
    Line,
}

/// Toggles read by the renderer at the start of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Replace every object's shader with the depth visualization program.
    pub depth_view: bool,
    /// Rasterize polygons as wireframes.
    pub wireframe: bool,
    /// Enable depth testing.
    pub depth_test: bool,
    /// Enable stencil testing.
    pub stencil_test: bool,
    /// Broadcast identity view and projection matrices, so positions are
    /// interpreted directly in clip space.
    pub draw_as_hud: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            depth_view: false,
            wireframe: false,
            depth_test: true,
            stencil_test: false,
            draw_as_hud: false,
        }
    }
}

impl RenderSettings {
    /// The polygon mode implied by [`RenderSettings::wireframe`].
    pub fn polygon_mode(&self) -> PolygonMode {
        if self.wireframe {
            PolygonMode::Line
        } else {
            PolygonMode::Fill
        }
    }
}
