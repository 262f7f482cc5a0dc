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

//! # Bindery IO
//!
//! Serialization and file services for binding layout documents.
//!
//! A [`Document`] is the on-disk JSON shape of an
//! [`EditorStore`](bindery_core::EditorStore): counts plus fully ordered
//! arrays, with inter-entity references encoded as positional indices into
//! the global binding array. [`Document::from_store`] and
//! [`Document::into_store`] convert between the two; [`save`] and
//! [`load`] add filename normalization and synchronous file I/O on top.
//!
//! Loading is strict: any mismatch between a declared count and the
//! corresponding array, or any out-of-range positional reference, fails
//! with a [`FormatError`] rather than silently truncating, so the caller
//! keeps its previous in-memory state.

#![warn(missing_docs)]

mod document;
mod error;
mod file;

pub use document::{BindingRecord, Document, LayoutRecord, SetRecord};
pub use error::{DocumentError, FormatError};
pub use file::{load, normalize_filename, save, DOCUMENT_SUFFIX};
