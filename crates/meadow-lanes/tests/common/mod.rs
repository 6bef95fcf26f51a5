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

//! Shared setup for the renderer integration tests.

#![allow(dead_code)]

use meadow_core::renderer::api::ProgramId;
use meadow_core::renderer::{GraphicsDevice, ShaderProgram};
use meadow_core::scene::Camera;
use meadow_core::testing::{DrawRecord, MockDevice, UniformWrite};
use meadow_core::Scene;
use meadow_lanes::render_lane::{BuiltinShader, ShaderLibrary};
use meadow_lanes::{Renderer, RendererConfig};
use std::cell::RefCell;
use std::rc::Rc;

/// A renderer over a recording device, with the camera and scene it reads.
pub struct Harness {
    pub device: Rc<MockDevice>,
    pub camera: Rc<RefCell<Camera>>,
    pub scene: Rc<RefCell<Scene>>,
    pub renderer: Renderer,
}

/// Compiles every built-in program from placeholder sources.
pub fn builtin_programs(device: &dyn GraphicsDevice) -> Vec<ShaderProgram> {
    BuiltinShader::ALL
        .iter()
        .map(|shader| {
            ShaderProgram::from_sources(device, shader.file_stem(), "// vertex", "// fragment")
                .expect("the mock device compiles anything")
        })
        .collect()
}

pub fn harness() -> Harness {
    harness_with(RendererConfig::default())
}

pub fn harness_with(config: RendererConfig) -> Harness {
    let device = Rc::new(MockDevice::new());
    let shaders = ShaderLibrary::from_programs(builtin_programs(device.as_ref())).unwrap();
    let camera = Rc::new(RefCell::new(Camera::default()));
    let scene = Rc::new(RefCell::new(Scene::new()));
    let dyn_device: Rc<dyn GraphicsDevice> = device.clone();
    let renderer =
        Renderer::with_library(dyn_device, camera.clone(), scene.clone(), shaders, &config)
            .unwrap();
    Harness {
        device,
        camera,
        scene,
        renderer,
    }
}

impl Harness {
    fn is_labelled(&self, program: Option<ProgramId>, label: &str) -> bool {
        program
            .and_then(|id| self.device.program_label(id))
            .is_some_and(|l| l == label)
    }

    /// Draw calls issued while a program labelled `label` was current.
    pub fn draws_with(&self, label: &str) -> Vec<DrawRecord> {
        self.device
            .draws()
            .into_iter()
            .filter(|draw| self.is_labelled(draw.program, label))
            .collect()
    }

    /// Uniform writes made to programs labelled `label`.
    pub fn uniforms_of(&self, label: &str) -> Vec<UniformWrite> {
        self.device
            .uniform_writes()
            .into_iter()
            .filter(|write| self.is_labelled(write.program, label))
            .collect()
    }

    /// Forgets setup calls, then renders one frame that must succeed.
    pub fn render_frame(&mut self) {
        self.device.clear_calls();
        self.renderer.render().unwrap();
    }
}
