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

//! Error types for document validation and file I/O.

use thiserror::Error;

/// A structural defect in a document being deserialized.
///
/// Documents are rejected, never repaired: a failed load leaves the
/// caller's previous in-memory state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A declared count does not match the corresponding array's length.
    #[error("'{field}' declares {declared} entries but the array holds {actual}")]
    CountMismatch {
        /// The count field that lied (`num_layouts`, `num_sets` or
        /// `num_bindings`).
        field: &'static str,
        /// The declared count.
        declared: usize,
        /// The array's actual length.
        actual: usize,
    },

    /// A layout's slot count does not match the declared global set count.
    #[error("layout '{layout}' holds {actual} desc_sets but {declared} sets are declared")]
    SlotCountMismatch {
        /// Name of the offending layout.
        layout: String,
        /// The declared global set count.
        declared: usize,
        /// The layout's actual slot count.
        actual: usize,
    },

    /// A slot's `set_index` tag is out of range or disagrees with the
    /// slot's position.
    #[error("layout '{layout}' carries set_index {tag} at slot position {position}")]
    BadSetIndexTag {
        /// Name of the offending layout.
        layout: String,
        /// The serialized tag.
        tag: usize,
        /// The slot's actual position.
        position: usize,
    },

    /// A binding reference points outside the declared binding array.
    #[error("binding reference {reference} is outside the {count} declared bindings")]
    BindingRefOutOfRange {
        /// The out-of-range positional reference.
        reference: usize,
        /// The declared binding count.
        count: usize,
    },

    /// A binding's numeric type index names no known descriptor type.
    #[error("binding '{binding}' carries unknown descriptor type index {index}")]
    UnknownDescriptorType {
        /// Name of the offending binding.
        binding: String,
        /// The unrecognized type index.
        index: usize,
    },
}

/// Any failure while saving or loading a document file.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read or written.
    #[error("document I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed JSON.
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is well-formed JSON but structurally inconsistent.
    #[error(transparent)]
    Format(#[from] FormatError),
}
