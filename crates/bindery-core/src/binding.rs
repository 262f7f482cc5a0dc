// Copyright 2025 the Bindery contributors
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

//! The descriptor binding entity and its usage-type enumeration.

use crate::flags::StageFlags;

/// The usage type of a descriptor binding.
///
/// The eleven variants mirror the Vulkan descriptor type table. The
/// discriminant order is load-bearing: documents persist a binding's type
/// as its position in this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DescriptorKind {
    /// A standalone sampler.
    #[default]
    Sampler,
    /// A sampled image combined with a sampler.
    CombinedImageSampler,
    /// A sampled image.
    SampledImage,
    /// A storage image.
    StorageImage,
    /// A uniform texel buffer.
    UniformTexelBuffer,
    /// A storage texel buffer.
    StorageTexelBuffer,
    /// A uniform buffer.
    UniformBuffer,
    /// A storage buffer.
    StorageBuffer,
    /// A uniform buffer with a dynamic offset.
    UniformBufferDynamic,
    /// A storage buffer with a dynamic offset.
    StorageBufferDynamic,
    /// An input attachment.
    InputAttachment,
}

impl DescriptorKind {
    /// Every usage type, in enumeration order. The UI renders this as a
    /// choice list; documents store positions into it.
    pub const ALL: [Self; 11] = [
        Self::Sampler,
        Self::CombinedImageSampler,
        Self::SampledImage,
        Self::StorageImage,
        Self::UniformTexelBuffer,
        Self::StorageTexelBuffer,
        Self::UniformBuffer,
        Self::StorageBuffer,
        Self::UniformBufferDynamic,
        Self::StorageBufferDynamic,
        Self::InputAttachment,
    ];

    /// Returns the position of this kind in the enumeration.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks a kind up by its position in the enumeration.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The Vulkan name of this kind, as persisted in the document's
    /// advisory `typeName` mirror field.
    pub fn vk_name(self) -> &'static str {
        match self {
            Self::Sampler => "VK_DESCRIPTOR_TYPE_SAMPLER",
            Self::CombinedImageSampler => "VK_DESCRIPTOR_TYPE_COMBINED_IMAGE_SAMPLER",
            Self::SampledImage => "VK_DESCRIPTOR_TYPE_SAMPLED_IMAGE",
            Self::StorageImage => "VK_DESCRIPTOR_TYPE_STORAGE_IMAGE",
            Self::UniformTexelBuffer => "VK_DESCRIPTOR_TYPE_UNIFORM_TEXEL_BUFFER",
            Self::StorageTexelBuffer => "VK_DESCRIPTOR_TYPE_STORAGE_TEXEL_BUFFER",
            Self::UniformBuffer => "VK_DESCRIPTOR_TYPE_UNIFORM_BUFFER",
            Self::StorageBuffer => "VK_DESCRIPTOR_TYPE_STORAGE_BUFFER",
            Self::UniformBufferDynamic => "VK_DESCRIPTOR_TYPE_UNIFORM_BUFFER_DYNAMIC",
            Self::StorageBufferDynamic => "VK_DESCRIPTOR_TYPE_STORAGE_BUFFER_DYNAMIC",
            Self::InputAttachment => "VK_DESCRIPTOR_TYPE_INPUT_ATTACHMENT",
        }
    }
}

/// A single named descriptor binding.
///
/// Bindings live in a global list owned by the store and are referenced
/// from set slots by [`BindingId`](crate::BindingId). Names are advisory
/// labels: duplicates are allowed, although the UI treats them as
/// ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Display name. Mutable, not required to be unique.
    pub name: String,
    /// Usage type of the binding.
    pub kind: DescriptorKind,
    /// Free-form custom data carried with the binding.
    pub data: String,
    /// Free-form comment.
    pub comment: String,
    /// Pipeline stages the binding applies to.
    pub stages: StageFlags,
}

impl Binding {
    /// Creates a binding with default attributes: first usage type, empty
    /// data and comment, all-commands stage mask.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DescriptorKind::default(),
            data: String::new(),
            comment: String::new(),
            stages: StageFlags::default(),
        }
    }
}
