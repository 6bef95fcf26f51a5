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

//! The shader selection table.
//!
//! Which program draws an object depends only on four facts, gathered in a
//! [`ShaderKey`]. Keeping the decision a pure function means the program set
//! stays bounded no matter how many objects a scene holds.

use meadow_core::renderer::api::ShaderHandle;
use meadow_core::scene::GameObject;

/// The built-in programs loaded by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinShader {
    /// Debug points.
    Point,
    /// Debug lines.
    Line,
    /// Unlit, untextured meshes. Also draws light glyphs.
    BasicMesh,
    /// Unlit, textured meshes.
    BasicTexturedMesh,
    /// Lit, untextured meshes.
    LightMesh,
    /// Lit, textured meshes.
    LightTexturedMesh,
    /// Linearized depth visualization.
    Depth,
}

impl BuiltinShader {
    /// Every built-in, in load order.
    pub const ALL: [BuiltinShader; 7] = [
        BuiltinShader::Point,
        BuiltinShader::Line,
        BuiltinShader::BasicMesh,
        BuiltinShader::BasicTexturedMesh,
        BuiltinShader::LightMesh,
        BuiltinShader::LightTexturedMesh,
        BuiltinShader::Depth,
    ];

    /// File stem of the `.vert` / `.frag` pair, also used as the label.
    pub const fn file_stem(self) -> &'static str {
        match self {
            BuiltinShader::Point => "point",
            BuiltinShader::Line => "line",
            BuiltinShader::BasicMesh => "basic_mesh",
            BuiltinShader::BasicTexturedMesh => "basic_textured_mesh",
            BuiltinShader::LightMesh => "light_mesh",
            BuiltinShader::LightTexturedMesh => "light_textured_mesh",
            BuiltinShader::Depth => "depth",
        }
    }

    /// Position in [`BuiltinShader::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Everything shader selection looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderKey {
    /// The material's own program, if any.
    pub override_shader: Option<ShaderHandle>,
    /// Whether the depth view is active.
    pub depth_view: bool,
    /// Whether the material has any texture.
    pub textured: bool,
    /// Whether the scene has any light.
    pub lit: bool,
}

impl ShaderKey {
    /// Builds the key of `object`.
    pub fn for_object(object: &GameObject, depth_view: bool, scene_has_lights: bool) -> Self {
        Self {
            override_shader: object.material.shader,
            depth_view,
            textured: object.material.has_textures(),
            lit: scene_has_lights,
        }
    }
}

/// The program chosen for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderSelection {
    /// The material's own program. No lighting or texture data is pushed.
    Override(ShaderHandle),
    /// A built-in program.
    Builtin(BuiltinShader),
}

impl ShaderSelection {
    /// Whether normal matrix, shininess and light data must be uploaded.
    pub fn needs_lighting(self) -> bool {
        matches!(
            self,
            ShaderSelection::Builtin(BuiltinShader::LightMesh | BuiltinShader::LightTexturedMesh)
        )
    }

    /// Whether the material's textures must be bound.
    pub fn needs_textures(self) -> bool {
        matches!(
            self,
            ShaderSelection::Builtin(
                BuiltinShader::BasicTexturedMesh | BuiltinShader::LightTexturedMesh
            )
        )
    }
}

/// Picks the program for `key`.
///
/// The override wins, then the depth view, then the
/// `{textured, lit}` combination picks one of four mesh programs.
pub fn select_shader(key: ShaderKey) -> ShaderSelection {
    if let Some(handle) = key.override_shader {
        return ShaderSelection::Override(handle);
    }
    if key.depth_view {
        return ShaderSelection::Builtin(BuiltinShader::Depth);
    }
    ShaderSelection::Builtin(match (key.textured, key.lit) {
        (true, false) => BuiltinShader::BasicTexturedMesh,
        (true, true) => BuiltinShader::LightTexturedMesh,
        (false, false) => BuiltinShader::BasicMesh,
        (false, true) => BuiltinShader::LightMesh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_beats_everything() {
        let handle = ShaderHandle(3);
        for depth_view in [false, true] {
            for textured in [false, true] {
                for lit in [false, true] {
                    let key = ShaderKey {
                        override_shader: Some(handle),
                        depth_view,
                        textured,
                        lit,
                    };
                    assert_eq!(select_shader(key), ShaderSelection::Override(handle));
                }
            }
        }
    }

    #[test]
    fn depth_view_beats_material_and_lighting() {
        let key = ShaderKey {
            depth_view: true,
            textured: true,
            lit: true,
            ..Default::default()
        };
        assert_eq!(
            select_shader(key),
            ShaderSelection::Builtin(BuiltinShader::Depth)
        );
    }

    #[test]
    fn texture_and_light_table() {
        let cases = [
            (false, false, BuiltinShader::BasicMesh),
            (false, true, BuiltinShader::LightMesh),
            (true, false, BuiltinShader::BasicTexturedMesh),
            (true, true, BuiltinShader::LightTexturedMesh),
        ];
        for (textured, lit, expected) in cases {
            let key = ShaderKey {
                textured,
                lit,
                ..Default::default()
            };
            assert_eq!(select_shader(key), ShaderSelection::Builtin(expected));
            assert_eq!(select_shader(key).needs_lighting(), lit);
            assert_eq!(select_shader(key).needs_textures(), textured);
        }
    }

    #[test]
    fn builtin_indices_follow_all() {
        for (i, shader) in BuiltinShader::ALL.iter().enumerate() {
            assert_eq!(shader.index(), i);
        }
    }
}
