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

//! The instanced draw path: a mesh repeated once per entry of a per-instance
//! matrix buffer, and the random placement used to fill it.

mod batch;
mod scatter;

pub use batch::InstancedBatch;
pub use scatter::{scatter_models, scatter_transforms, GroundFootprint, Jitter, ScatterConfig};
