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

//! Renderer configuration, read from RON.

use anyhow::{Context, Result};
use meadow_core::renderer::api::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::instancing::ScatterConfig;

/// Startup options of the [`Renderer`](crate::Renderer).
///
/// Every field is optional in the RON source; missing fields take their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Initial render flags.
    pub settings: RenderSettings,
    /// Directory holding the built-in `.vert`/`.frag` pairs.
    pub shader_dir: PathBuf,
    /// Segment count of the point-light sphere glyph. `0` leaves the glyph
    /// unset until one is provided.
    pub glyph_sphere_segments: u32,
    /// Optional instanced field to scatter over the ground.
    pub scatter: Option<ScatterConfig>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            settings: RenderSettings::default(),
            shader_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders")),
            glyph_sphere_segments: 16,
            scatter: None,
        }
    }
}

impl RendererConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::de::from_str(source).map_err(|e| anyhow::anyhow!("Invalid renderer config: {e}"))
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read renderer config {}", path.display()))?;
        Self::from_ron_str(&source).with_context(|| format!("In {}", path.display()))
    }

    /// Serializes the configuration as pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty_config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize renderer config: {e}"))
    }

    /// Path of `file` inside the shader directory.
    pub fn shader_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.shader_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_defaults() {
        let config = RendererConfig::from_ron_str("()").unwrap();
        assert_eq!(config, RendererConfig::default());
        assert!(config.settings.depth_test);
        assert!(config.scatter.is_none());
    }

    #[test]
    fn partial_source_keeps_other_defaults() {
        let config = RendererConfig::from_ron_str(
            "(settings: (wireframe: true), scatter: Some((count: 10, seed: 7)))",
        )
        .unwrap();
        assert!(config.settings.wireframe);
        assert!(config.settings.depth_test);
        let scatter = config.scatter.unwrap();
        assert_eq!(scatter.count, 10);
        assert_eq!(scatter.seed, 7);
        assert_eq!(scatter.height, 0.5);
    }

    #[test]
    fn pretty_output_parses_back() {
        let config = RendererConfig {
            glyph_sphere_segments: 8,
            ..Default::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(RendererConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert!(RendererConfig::from_ron_str("(frobnicate: 3)").is_err());
    }

    #[test]
    fn shader_paths_are_relative_to_the_directory() {
        let config = RendererConfig {
            shader_dir: PathBuf::from("assets/shaders"),
            ..Default::default()
        };
        assert_eq!(
            config.shader_path("point.vert"),
            Path::new("assets/shaders/point.vert")
        );
    }
}
