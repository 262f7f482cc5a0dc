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

//! Error types for referential lookups.
//!
//! Invalid *input* to the mutation API (empty names, out-of-range indices,
//! duplicate names on add) is a silent no-op and never produces an error.
//! The errors here cover referential *lookup* failures, which indicate a
//! programming mistake in the caller rather than bad user input, and are
//! therefore surfaced loudly instead of being swallowed.

use crate::arena::BindingId;
use thiserror::Error;

/// A referential lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No binding in the global list carries the requested name.
    #[error("no binding named '{0}'")]
    BindingNotFound(String),

    /// The binding id refers to a binding that is no longer in the store.
    #[error("stale binding id (slot {index}, generation {generation})")]
    StaleBinding {
        /// Slot index of the stale handle.
        index: u32,
        /// Generation of the stale handle.
        generation: u32,
    },
}

impl CoreError {
    pub(crate) fn stale(id: BindingId) -> Self {
        Self::StaleBinding {
            index: id.index,
            generation: id.generation,
        }
    }
}
