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

//! The entity store: the three interlinked collections and their shape
//! invariants.

use crate::arena::{BindingArena, BindingId};
use crate::binding::Binding;

/// Canonical filename of a freshly created document.
pub const DEFAULT_FILENAME: &str = "default.vkpipeline.json";

/// A per-layout, per-set container of binding references.
///
/// References are weak: the slot holds [`BindingId`] handles into the
/// store's arena and never owns a binding. A slot never holds the same
/// reference twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetSlot {
    pub(crate) refs: Vec<BindingId>,
}

impl SetSlot {
    /// The binding references held by this slot, in user order.
    pub fn refs(&self) -> &[BindingId] {
        &self.refs
    }
}

/// A named, ordered collection of set slots.
///
/// Every layout carries exactly one slot per globally declared set, at the
/// same position; the store keeps that correspondence intact across every
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineLayout {
    pub(crate) name: String,
    pub(crate) slots: Vec<SetSlot>,
}

impl PipelineLayout {
    /// The layout's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All set slots, one per global set name, in set order.
    pub fn slots(&self) -> &[SetSlot] {
        &self.slots
    }

    /// The slot at `set_idx`, if in range.
    pub fn slot(&self, set_idx: usize) -> Option<&SetSlot> {
        self.slots.get(set_idx)
    }
}

/// Owns the three global collections of a binding layout document.
///
/// - the global binding list, stored in a generational arena with a dense
///   order vector on the side (bindings are ordered by the user, not by
///   allocation),
/// - the global set names, whose positions are shared across all layouts,
/// - the pipeline layouts.
///
/// The store exposes read accessors only; every mutation goes through the
/// mutation API (the `impl EditorStore` block in `ops.rs`) so referential
/// integrity is enforced in one place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EditorStore {
    pub(crate) arena: BindingArena,
    /// Dense, user-ordered list of every live binding id.
    pub(crate) binding_order: Vec<BindingId>,
    pub(crate) set_names: Vec<String>,
    pub(crate) layouts: Vec<PipelineLayout>,
    pub(crate) filename: String,
}

impl EditorStore {
    /// Creates a completely empty store.
    pub fn new() -> Self {
        Self {
            arena: BindingArena::new(),
            binding_order: Vec::new(),
            set_names: Vec::new(),
            layouts: Vec::new(),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Creates the starter document the editor opens with: one default
    /// layout, five frequency-grouped sets and a stock of common bindings
    /// wired into them.
    pub fn seeded() -> Self {
        let mut store = Self::new();

        store.add_layout("LAYOUT_DEFAULT");

        for set in [
            "PSET_PER_FRAME",
            "PSET_PER_SCENE",
            "PSET_PER_CAMERA",
            "PSET_PER_MATERIAL",
            "PSET_PER_OBJECT",
        ] {
            store.add_set(set);
        }

        for binding in [
            "UBO_FRAME_GLOBAL_INFO",
            "UBO_CAMERA_INFO",
            "UBO_WORLD_MATRIX",
            "UBO_SCENE_PARAMS_GENERIC",
            "UBO_MATERIAL_PARAMS_GENERIC",
            "UBO_OBJECT_PARAMS_GENERIC",
            "SSBO_LIGHT_GRID_DATA",
            "SSBO_BATCHED_DRAWCALL_DATA",
            "SAMPLER_ARRAY",
            "SAMPLER_DIFFUSE_MAP",
            "SAMPLER_NORMAL_MAP",
            "SAMPLER_SHININESS_MAP",
            "SAMPLER_METALLIC_MAP",
            "SAMPLER_IRRADIANCE",
            "SAMPLER_RADIANCE",
            "SAMPLER_POSTROCESS0",
            "SAMPLER_POSTROCESS1",
            "SAMPLER_POSTROCESS2",
            "SAMPLER_POSTROCESS3",
            "SAMPLER_SHADOW0",
            "SAMPLER_SHADOW1",
        ] {
            store.add_binding(binding);
        }

        let wiring: [(&str, usize); 21] = [
            ("UBO_FRAME_GLOBAL_INFO", 0),
            ("UBO_CAMERA_INFO", 2),
            ("UBO_WORLD_MATRIX", 4),
            ("UBO_SCENE_PARAMS_GENERIC", 1),
            ("UBO_MATERIAL_PARAMS_GENERIC", 3),
            ("UBO_OBJECT_PARAMS_GENERIC", 4),
            ("SSBO_LIGHT_GRID_DATA", 2),
            ("SSBO_BATCHED_DRAWCALL_DATA", 3),
            ("SAMPLER_ARRAY", 3),
            ("SAMPLER_DIFFUSE_MAP", 4),
            ("SAMPLER_NORMAL_MAP", 4),
            ("SAMPLER_SHININESS_MAP", 4),
            ("SAMPLER_METALLIC_MAP", 4),
            ("SAMPLER_IRRADIANCE", 4),
            ("SAMPLER_RADIANCE", 4),
            ("SAMPLER_POSTROCESS0", 4),
            ("SAMPLER_POSTROCESS1", 4),
            ("SAMPLER_POSTROCESS2", 4),
            ("SAMPLER_POSTROCESS3", 4),
            ("SAMPLER_SHADOW0", 4),
            ("SAMPLER_SHADOW1", 4),
        ];
        for (name, set_idx) in wiring {
            let id = store
                .find_binding_by_name(name)
                .expect("seeded binding exists");
            store.add_set_binding_ref(0, set_idx, id);
        }

        store
    }

    /// Rebuilds a store from positional data, minting fresh binding ids.
    ///
    /// Each layout is a name plus one list of binding references per set
    /// slot, where a reference is a position into `bindings`. The caller
    /// (the deserializer) is expected to have validated shapes and ranges
    /// already; out-of-range references are still skipped here and
    /// duplicate references within one slot are collapsed to the first
    /// occurrence, so the shape invariants hold on the result regardless.
    pub fn from_parts(
        set_names: Vec<String>,
        bindings: Vec<Binding>,
        layouts: Vec<(String, Vec<Vec<usize>>)>,
    ) -> Self {
        let mut store = Self::new();
        store.set_names = set_names;

        for binding in bindings {
            let id = store.arena.insert(binding);
            store.binding_order.push(id);
        }

        for (name, slot_refs) in layouts {
            debug_assert_eq!(slot_refs.len(), store.set_names.len());
            let mut slots = Vec::with_capacity(store.set_names.len());
            for positions in slot_refs {
                let mut slot = SetSlot::default();
                for pos in positions {
                    let Some(&id) = store.binding_order.get(pos) else {
                        log::warn!(
                            "dropping binding reference {pos} outside the global list ({} bindings)",
                            store.binding_order.len()
                        );
                        continue;
                    };
                    if !slot.refs.contains(&id) {
                        slot.refs.push(id);
                    }
                }
                slots.push(slot);
            }
            slots.resize(store.set_names.len(), SetSlot::default());
            store.layouts.push(PipelineLayout { name, slots });
        }

        store
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    /// Number of bindings in the global list.
    pub fn binding_count(&self) -> usize {
        self.binding_order.len()
    }

    /// Iterates the global binding list in user order.
    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.binding_order.iter().map(|&id| {
            let binding = self
                .arena
                .get(id)
                .expect("binding order only holds live ids");
            (id, binding)
        })
    }

    /// The binding at dense position `idx`.
    pub fn binding(&self, idx: usize) -> Option<&Binding> {
        self.binding_order.get(idx).and_then(|&id| self.arena.get(id))
    }

    /// The binding behind `id`, if it is still alive.
    pub fn binding_by_id(&self, id: BindingId) -> Option<&Binding> {
        self.arena.get(id)
    }

    /// The id of the binding at dense position `idx`.
    pub fn binding_id(&self, idx: usize) -> Option<BindingId> {
        self.binding_order.get(idx).copied()
    }

    /// Number of global sets.
    pub fn set_count(&self) -> usize {
        self.set_names.len()
    }

    /// The global set names, in set order.
    pub fn set_names(&self) -> &[String] {
        &self.set_names
    }

    /// Number of pipeline layouts.
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    /// The pipeline layouts, in user order.
    pub fn layouts(&self) -> &[PipelineLayout] {
        &self.layouts
    }

    /// The layout at `idx`, if in range.
    pub fn layout(&self, idx: usize) -> Option<&PipelineLayout> {
        self.layouts.get(idx)
    }

    /// The current document filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Records the document filename (already normalized by the caller).
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    // ------------------------------------------------------------------
    // Invariant checking
    // ------------------------------------------------------------------

    /// Panics if any shape invariant is violated.
    ///
    /// Intended for tests and debugging; every mutation is supposed to
    /// leave the store in a state where this never fires.
    pub fn assert_invariants(&self) {
        for (i, id) in self.binding_order.iter().enumerate() {
            assert!(
                self.arena.contains(*id),
                "binding order position {i} holds a dead id"
            );
            assert!(
                !self.binding_order[i + 1..].contains(id),
                "binding order position {i} holds a duplicate id"
            );
        }
        for layout in &self.layouts {
            assert_eq!(
                layout.slots.len(),
                self.set_names.len(),
                "layout '{}' slot count diverged from the global set count",
                layout.name
            );
            for (set_idx, slot) in layout.slots.iter().enumerate() {
                for (i, id) in slot.refs.iter().enumerate() {
                    assert!(
                        self.arena.contains(*id),
                        "layout '{}' set {set_idx} holds a dangling reference",
                        layout.name
                    );
                    assert!(
                        !slot.refs[i + 1..].contains(id),
                        "layout '{}' set {set_idx} holds a duplicate reference",
                        layout.name
                    );
                }
            }
        }
    }
}
