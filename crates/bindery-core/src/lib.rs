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

//! # Bindery Core
//!
//! Relational data model for shader resource binding layout documents.
//!
//! The crate is organized as three layers, leaves first:
//!
//! 1. **Entity store**: [`EditorStore`] owns the global binding list, the
//!    global set names and the pipeline layouts, and enforces the shape
//!    invariants that tie them together (every layout carries exactly one
//!    slot per global set).
//! 2. **Mutation API**: ordered CRUD and reorder operations on each
//!    collection, with referential-integrity rules (cascading removal of
//!    dangling references, duplicate prevention, membership toggling).
//!    Invalid input is a silent no-op, never a fault.
//! 3. A serializer built on top of both lives in the companion
//!    `bindery-io` crate; the UI collaborator sits above both and never
//!    touches the entity store directly.
//!
//! Bindings are referenced from set slots by [`BindingId`], a stable
//! generational handle, so deleting or reordering bindings can never leave
//! a dangling pointer behind.

#![warn(missing_docs)]

mod arena;
mod binding;
mod error;
mod flags;
mod ops;
mod store;

pub use arena::BindingId;
pub use binding::{Binding, DescriptorKind};
pub use error::CoreError;
pub use flags::StageFlags;
pub use ops::Direction;
pub use store::{EditorStore, PipelineLayout, SetSlot, DEFAULT_FILENAME};

#[cfg(test)]
mod tests;
