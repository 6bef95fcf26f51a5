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

//! Defines data structures related to GPU buffer resources.

use std::borrow::Cow;

/// What a buffer is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex or per-instance attribute data.
    Vertex,
    /// `u32` element indices.
    Index,
}

/// How often the contents of a buffer are expected to change.
///
/// This is a hint for the driver's memory placement only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times.
    #[default]
    Static,
    /// Rewritten regularly, in whole or in part.
    Dynamic,
    /// Rewritten every frame.
    Stream,
}

/// A descriptor used to create a [`BufferId`].
#[derive(Debug, Clone)]
pub struct BufferDescriptor<'a> {
    /// An optional debug label for the buffer.
    pub label: Option<Cow<'a, str>>,
    /// The total size of the buffer in bytes.
    ///
    /// Ignored by [`create_buffer_with_data`](crate::renderer::GraphicsDevice::create_buffer_with_data),
    /// which sizes the buffer to its data.
    pub size: u64,
    /// The binding kind of the buffer.
    pub kind: BufferKind,
    /// The update-frequency hint.
    pub usage: BufferUsage,
}

impl<'a> BufferDescriptor<'a> {
    /// Creates a descriptor for a buffer of `kind` with a static usage hint.
    pub fn new(label: &'a str, kind: BufferKind) -> Self {
        Self {
            label: Some(Cow::Borrowed(label)),
            size: 0,
            kind,
            usage: BufferUsage::Static,
        }
    }

    /// Sets the size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Sets the usage hint.
    pub fn with_usage(mut self, usage: BufferUsage) -> Self {
        self.usage = usage;
        self
    }
}

/// An opaque handle to a GPU buffer resource.
///
/// This ID is returned by [`GraphicsDevice::create_buffer`](crate::renderer::GraphicsDevice::create_buffer)
/// and is used to reference the buffer in all subsequent operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);
