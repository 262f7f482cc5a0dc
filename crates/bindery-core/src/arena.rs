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

//! Slot storage and ID management for globally owned bindings.

use crate::binding::Binding;

/// A unique identifier for a binding in the store.
///
/// It combines an index with a generation count to solve the "ABA problem".
/// When a binding is deleted, its slot can be recycled for a new binding,
/// but the generation is incremented. This ensures that old `BindingId`
/// handles pointing to a recycled slot become invalid and cannot
/// accidentally affect the new binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId {
    /// The index of the binding's slot in the arena.
    pub index: u32,
    /// A generation counter that is incremented each time the slot is recycled.
    pub generation: u32,
}

/// Internal manager for binding slots.
///
/// The `BindingArena` maintains a list of binding slots keyed by
/// [`BindingId`]. It handles binding creation, recycling of slots via a
/// free list, and generation-checked access. Positional ordering of the
/// live bindings is *not* its concern; the store keeps a dense order
/// vector next to it.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct BindingArena {
    /// One entry per slot that has ever been allocated. An entry holds the
    /// current `BindingId` (including generation) and the binding itself,
    /// which is `Some` only while the slot is alive.
    slots: Vec<(BindingId, Option<Binding>)>,
    /// Slot indices available for reuse, enabling O(1) allocation for
    /// previously deleted bindings.
    freed: Vec<u32>,
}

impl BindingArena {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a binding, returning its freshly minted id.
    ///
    /// If there are indices in the free list, one is popped and its
    /// generation is incremented. Otherwise a new slot is appended.
    pub fn insert(&mut self, binding: Binding) -> BindingId {
        if let Some(index) = self.freed.pop() {
            let (id_slot, binding_slot) = &mut self.slots[index as usize];
            id_slot.generation += 1;
            *binding_slot = Some(binding);
            *id_slot
        } else {
            let id = BindingId {
                index: self.slots.len() as u32,
                generation: 0,
            };
            self.slots.push((id, Some(binding)));
            id
        }
    }

    /// Removes the binding for `id`, returning it if `id` was alive.
    ///
    /// A stale id (generation mismatch or already-freed slot) removes
    /// nothing.
    pub fn remove(&mut self, id: BindingId) -> Option<Binding> {
        let (slot_id, binding_slot) = self.slots.get_mut(id.index as usize)?;
        if slot_id.generation != id.generation || binding_slot.is_none() {
            return None;
        }
        let binding = binding_slot.take();
        self.freed.push(id.index);
        binding
    }

    /// Returns a reference to the binding for `id` if it is alive.
    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.slots.get(id.index as usize).and_then(|(slot_id, b)| {
            if slot_id.generation == id.generation {
                b.as_ref()
            } else {
                None
            }
        })
    }

    /// Returns a mutable reference to the binding for `id` if it is alive.
    pub fn get_mut(&mut self, id: BindingId) -> Option<&mut Binding> {
        self.slots
            .get_mut(id.index as usize)
            .and_then(|(slot_id, b)| {
                if slot_id.generation == id.generation {
                    b.as_mut()
                } else {
                    None
                }
            })
    }

    /// Returns `true` if `id` refers to a live binding.
    pub fn contains(&self, id: BindingId) -> bool {
        self.get(id).is_some()
    }
}
