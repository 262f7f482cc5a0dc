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

//! The mutation API: ordered CRUD and reorder operations on the three
//! collections, with referential-integrity maintenance.
//!
//! Every operation validates its input against current bounds before
//! acting. Out-of-range indices, empty names and duplicate names on add
//! are silent no-ops; the UI collaborator simply re-renders unchanged
//! state. Nothing here panics on bad input.

use crate::arena::BindingId;
use crate::binding::{Binding, DescriptorKind};
use crate::error::CoreError;
use crate::flags::StageFlags;
use crate::store::{EditorStore, PipelineLayout, SetSlot};

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front of the collection (index decreases).
    Up,
    /// Towards the back of the collection (index increases).
    Down,
}

/// Neighbor index for a single-step move, `None` at the boundary.
fn step(idx: usize, direction: Direction, len: usize) -> Option<usize> {
    if idx >= len {
        return None;
    }
    match direction {
        Direction::Up => idx.checked_sub(1),
        Direction::Down => {
            let next = idx + 1;
            (next < len).then_some(next)
        }
    }
}

impl EditorStore {
    // ------------------------------------------------------------------
    // Pipeline layouts
    // ------------------------------------------------------------------

    /// Appends a new layout, pre-populated with one empty slot per global
    /// set. Empty and duplicate names are rejected (layout names are the
    /// deduplication key).
    pub fn add_layout(&mut self, name: &str) {
        if name.is_empty() || self.layouts.iter().any(|l| l.name == name) {
            log::debug!("add_layout rejected: empty or duplicate name {name:?}");
            return;
        }
        self.layouts.push(PipelineLayout {
            name: name.to_string(),
            slots: vec![SetSlot::default(); self.set_names.len()],
        });
    }

    /// Removes the layout at `idx`. No cascade is needed: layouts hold
    /// only weak references.
    pub fn delete_layout(&mut self, idx: usize) {
        if idx >= self.layouts.len() {
            return;
        }
        self.layouts.remove(idx);
    }

    /// Renames the layout at `idx`. Empty names are rejected.
    pub fn rename_layout(&mut self, idx: usize, name: &str) {
        if name.is_empty() || idx >= self.layouts.len() {
            return;
        }
        self.layouts[idx].name = name.to_string();
    }

    /// Swaps the layout at `idx` with its neighbor, returning the moved
    /// layout's new index so a selection cursor can follow it. `None` at
    /// the boundary or for an out-of-range index.
    pub fn reorder_layout(&mut self, idx: usize, direction: Direction) -> Option<usize> {
        let new_idx = step(idx, direction, self.layouts.len())?;
        self.layouts.swap(idx, new_idx);
        Some(new_idx)
    }

    // ------------------------------------------------------------------
    // Global sets
    // ------------------------------------------------------------------

    /// Appends a new global set and grows every layout by one empty slot.
    /// Empty and duplicate names are rejected (set names are the
    /// deduplication key).
    pub fn add_set(&mut self, name: &str) {
        if name.is_empty() || self.set_names.iter().any(|s| s == name) {
            log::debug!("add_set rejected: empty or duplicate name {name:?}");
            return;
        }
        self.set_names.push(name.to_string());
        for layout in &mut self.layouts {
            layout.slots.push(SetSlot::default());
        }
    }

    /// Removes the set at `idx` and, in every layout, the slot at `idx`,
    /// discarding whatever references that slot held. Later slots shift
    /// down so positional correspondence with the set names survives.
    pub fn delete_set(&mut self, idx: usize) {
        if idx >= self.set_names.len() {
            return;
        }
        self.set_names.remove(idx);
        for layout in &mut self.layouts {
            layout.slots.remove(idx);
        }
    }

    /// Renames the set at `idx`. Metadata-only: layouts address sets by
    /// position, so no reference is touched. Empty names are rejected.
    pub fn rename_set(&mut self, idx: usize, name: &str) {
        if name.is_empty() || idx >= self.set_names.len() {
            return;
        }
        self.set_names[idx] = name.to_string();
    }

    /// Swaps the set at `idx` with its neighbor, moving the corresponding
    /// slot in every layout in lockstep. Returns the moved set's new
    /// index, `None` at the boundary.
    pub fn reorder_set(&mut self, idx: usize, direction: Direction) -> Option<usize> {
        let new_idx = step(idx, direction, self.set_names.len())?;
        self.set_names.swap(idx, new_idx);
        for layout in &mut self.layouts {
            layout.slots.swap(idx, new_idx);
        }
        Some(new_idx)
    }

    // ------------------------------------------------------------------
    // Global bindings
    // ------------------------------------------------------------------

    /// Appends a new binding with default attributes and returns its id.
    /// Only empty names are rejected: binding names are advisory labels,
    /// so duplicates are allowed (unlike sets and layouts, whose names are
    /// their deduplication key).
    pub fn add_binding(&mut self, name: &str) -> Option<BindingId> {
        if name.is_empty() {
            log::debug!("add_binding rejected: empty name");
            return None;
        }
        let id = self.arena.insert(Binding::new(name));
        self.binding_order.push(id);
        Some(id)
    }

    /// Removes the binding at dense position `idx` and scan-erases every
    /// reference to it from every slot of every layout, preserving the
    /// relative order of the remaining references.
    pub fn delete_binding(&mut self, idx: usize) {
        if idx >= self.binding_order.len() {
            return;
        }
        let id = self.binding_order.remove(idx);
        self.arena.remove(id);
        for layout in &mut self.layouts {
            for slot in &mut layout.slots {
                slot.refs.retain(|r| *r != id);
            }
        }
    }

    /// Renames the binding at dense position `idx`. Empty names are
    /// rejected.
    pub fn rename_binding(&mut self, idx: usize, name: &str) {
        if name.is_empty() {
            return;
        }
        if let Some(binding) = self
            .binding_order
            .get(idx)
            .and_then(|&id| self.arena.get_mut(id))
        {
            binding.name = name.to_string();
        }
    }

    /// Swaps the binding at dense position `idx` with its neighbor.
    /// References are untouched: they are by id, not by position. Returns
    /// the moved binding's new position, `None` at the boundary.
    pub fn reorder_binding(&mut self, idx: usize, direction: Direction) -> Option<usize> {
        let new_idx = step(idx, direction, self.binding_order.len())?;
        self.binding_order.swap(idx, new_idx);
        Some(new_idx)
    }

    /// Sets the usage type of the binding at dense position `idx`.
    pub fn set_binding_kind(&mut self, idx: usize, kind: DescriptorKind) {
        if let Some(binding) = self.binding_at_mut(idx) {
            binding.kind = kind;
        }
    }

    /// Sets the custom data of the binding at dense position `idx`.
    pub fn set_binding_data(&mut self, idx: usize, data: &str) {
        if let Some(binding) = self.binding_at_mut(idx) {
            binding.data = data.to_string();
        }
    }

    /// Sets the comment of the binding at dense position `idx`.
    pub fn set_binding_comment(&mut self, idx: usize, comment: &str) {
        if let Some(binding) = self.binding_at_mut(idx) {
            binding.comment = comment.to_string();
        }
    }

    /// Sets the stage mask of the binding at dense position `idx`.
    pub fn set_binding_stages(&mut self, idx: usize, stages: StageFlags) {
        if let Some(binding) = self.binding_at_mut(idx) {
            binding.stages = stages;
        }
    }

    fn binding_at_mut(&mut self, idx: usize) -> Option<&mut Binding> {
        let id = *self.binding_order.get(idx)?;
        self.arena.get_mut(id)
    }

    // ------------------------------------------------------------------
    // Slot references
    // ------------------------------------------------------------------

    /// Appends a reference to `id` to the given slot, unless the slot
    /// already holds one (no duplicates within a slot) or `id` is stale.
    pub fn add_set_binding_ref(&mut self, layout_idx: usize, set_idx: usize, id: BindingId) {
        if !self.arena.contains(id) {
            log::debug!("add_set_binding_ref rejected: stale id {id:?}");
            return;
        }
        let Some(slot) = self.slot_mut(layout_idx, set_idx) else {
            return;
        };
        if !slot.refs.contains(&id) {
            slot.refs.push(id);
        }
    }

    /// Removes the reference at `ref_idx` from the given slot.
    pub fn remove_set_binding_ref(&mut self, layout_idx: usize, set_idx: usize, ref_idx: usize) {
        let Some(slot) = self.slot_mut(layout_idx, set_idx) else {
            return;
        };
        if ref_idx < slot.refs.len() {
            slot.refs.remove(ref_idx);
        }
    }

    /// Swaps the reference at `ref_idx` with its neighbor within one slot.
    /// Returns the moved reference's new index, `None` at the boundary.
    pub fn reorder_set_binding_ref(
        &mut self,
        layout_idx: usize,
        set_idx: usize,
        ref_idx: usize,
        direction: Direction,
    ) -> Option<usize> {
        let slot = self.slot_mut(layout_idx, set_idx)?;
        let new_idx = step(ref_idx, direction, slot.refs.len())?;
        slot.refs.swap(ref_idx, new_idx);
        Some(new_idx)
    }

    fn slot_mut(&mut self, layout_idx: usize, set_idx: usize) -> Option<&mut SetSlot> {
        self.layouts.get_mut(layout_idx)?.slots.get_mut(set_idx)
    }

    // ------------------------------------------------------------------
    // Membership projection
    // ------------------------------------------------------------------

    /// Applies a membership checklist for `id` across one layout's slots:
    /// for each set, the reference is added if the flag is true and
    /// absent, removed if false and present. Idempotent, and slots whose
    /// membership does not change keep their reference order. A length
    /// mismatch, an out-of-range layout or a stale id is a no-op.
    pub fn set_binding_membership(
        &mut self,
        layout_idx: usize,
        id: BindingId,
        membership: &[bool],
    ) {
        if !self.arena.contains(id) || membership.len() != self.set_names.len() {
            return;
        }
        let Some(layout) = self.layouts.get_mut(layout_idx) else {
            return;
        };
        for (slot, &wanted) in layout.slots.iter_mut().zip(membership) {
            let present = slot.refs.iter().position(|r| *r == id);
            match (present, wanted) {
                (None, true) => slot.refs.push(id),
                (Some(pos), false) => {
                    slot.refs.remove(pos);
                }
                _ => {}
            }
        }
    }

    /// Reads the membership checklist for `id` across one layout's slots:
    /// one boolean per set, true where the slot holds a reference to `id`.
    pub fn get_membership(&self, layout_idx: usize, id: BindingId) -> Option<Vec<bool>> {
        let layout = self.layouts.get(layout_idx)?;
        Some(
            layout
                .slots
                .iter()
                .map(|slot| slot.refs.contains(&id))
                .collect(),
        )
    }

    // ------------------------------------------------------------------
    // Referential lookups
    // ------------------------------------------------------------------

    /// Finds the first binding with exactly `name`.
    ///
    /// Unlike invalid mutation input, a miss here is a real error: callers
    /// resolve names they believe exist, so the failure is surfaced rather
    /// than swallowed.
    pub fn find_binding_by_name(&self, name: &str) -> Result<BindingId, CoreError> {
        self.bindings()
            .find(|(_, binding)| binding.name == name)
            .map(|(id, _)| id)
            .ok_or_else(|| CoreError::BindingNotFound(name.to_string()))
    }

    /// Resolves a binding id back to its dense position.
    pub fn binding_position(&self, id: BindingId) -> Result<usize, CoreError> {
        self.binding_order
            .iter()
            .position(|r| *r == id)
            .ok_or_else(|| CoreError::stale(id))
    }
}
