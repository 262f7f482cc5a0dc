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

use super::{CoreError, DescriptorKind, Direction, EditorStore, StageFlags};

// --- HELPERS ---

/// A store with two layouts, two sets and three bindings, every binding
/// referenced from layout 0 set 0.
fn populated_store() -> EditorStore {
    let mut store = EditorStore::new();
    store.add_set("PER_FRAME");
    store.add_set("PER_OBJECT");
    store.add_layout("L_MAIN");
    store.add_layout("L_SHADOW");
    for name in ["UBO_A", "UBO_B", "TEX_C"] {
        let id = store.add_binding(name).expect("non-empty name");
        store.add_set_binding_ref(0, 0, id);
    }
    store.assert_invariants();
    store
}

fn slot_names(store: &EditorStore, layout_idx: usize, set_idx: usize) -> Vec<String> {
    store.layouts()[layout_idx].slots()[set_idx]
        .refs()
        .iter()
        .map(|&id| store.binding_by_id(id).expect("live ref").name.clone())
        .collect()
}

// --- CREATION & DUPLICATE RULES ---

#[test]
fn add_rejects_empty_and_duplicate_names() {
    let mut store = EditorStore::new();

    store.add_set("PER_FRAME");
    store.add_set("PER_FRAME"); // duplicate: sets dedupe by name
    store.add_set("");
    assert_eq!(store.set_names(), &["PER_FRAME".to_string()]);

    store.add_layout("L1");
    store.add_layout("L1"); // duplicate: layouts dedupe by name
    store.add_layout("");
    assert_eq!(store.layout_count(), 1);

    // Binding names are advisory labels: duplicates are allowed.
    assert!(store.add_binding("UBO").is_some());
    assert!(store.add_binding("UBO").is_some());
    assert!(store.add_binding("").is_none());
    assert_eq!(store.binding_count(), 2);

    store.assert_invariants();
}

#[test]
fn add_layout_prepopulates_one_slot_per_set() {
    let mut store = EditorStore::new();
    store.add_set("A");
    store.add_set("B");
    store.add_layout("L1");
    assert_eq!(store.layouts()[0].slots().len(), 2);
    assert!(store.layouts()[0].slot(0).unwrap().refs().is_empty());
}

#[test]
fn add_set_grows_every_layout() {
    let mut store = EditorStore::new();
    store.add_layout("L1");
    store.add_layout("L2");
    assert_eq!(store.layouts()[0].slots().len(), 0);

    store.add_set("NEW_SET");
    for layout in store.layouts() {
        assert_eq!(layout.slots().len(), 1, "every layout grows in lockstep");
    }
    store.assert_invariants();
}

// --- SCRIPTED SCENARIO (empty store up) ---

#[test]
fn scenario_first_binding_set_layout_and_reference() {
    let mut store = EditorStore::new();

    let id = store.add_binding("UBO_A").expect("added");
    assert_eq!(store.binding_position(id).unwrap(), 0);

    store.add_set("PER_FRAME");
    assert_eq!(store.set_count(), 1);

    store.add_layout("L1");
    assert_eq!(store.layouts()[0].slots().len(), 1);
    assert!(store.layouts()[0].slot(0).unwrap().refs().is_empty());

    store.add_set_binding_ref(0, 0, id);
    assert_eq!(store.layouts()[0].slot(0).unwrap().refs(), &[id]);
    store.assert_invariants();
}

// --- CASCADES ---

#[test]
fn delete_binding_cascades_to_every_slot() {
    // Two layouts referencing the binding at dense position 2.
    let mut store = populated_store();
    let victim = store.binding_id(2).unwrap();
    store.add_set_binding_ref(1, 1, victim);
    assert_eq!(slot_names(&store, 1, 1), vec!["TEX_C"]);

    store.delete_binding(2);

    // The binding is gone from the global list and from every slot.
    assert_eq!(store.binding_count(), 2);
    assert_eq!(slot_names(&store, 0, 0), vec!["UBO_A", "UBO_B"]);
    assert!(slot_names(&store, 1, 1).is_empty());

    // Survivors stay resolvable by name after renumbering.
    let a = store.find_binding_by_name("UBO_A").unwrap();
    let b = store.find_binding_by_name("UBO_B").unwrap();
    assert_eq!(store.binding_position(a).unwrap(), 0);
    assert_eq!(store.binding_position(b).unwrap(), 1);
    assert!(matches!(
        store.find_binding_by_name("TEX_C"),
        Err(CoreError::BindingNotFound(_))
    ));
    store.assert_invariants();
}

#[test]
fn delete_binding_removes_nothing_else() {
    let mut store = populated_store();
    let before = slot_names(&store, 0, 0);
    assert_eq!(before, vec!["UBO_A", "UBO_B", "TEX_C"]);

    store.delete_binding(1);

    // Exactly UBO_B disappears, relative order of the rest is intact.
    assert_eq!(slot_names(&store, 0, 0), vec!["UBO_A", "TEX_C"]);
}

#[test]
fn delete_set_removes_exactly_that_slot_and_shifts() {
    let mut store = EditorStore::new();
    store.add_set("S0");
    store.add_set("S1");
    store.add_set("S2");
    store.add_layout("L1");
    let id0 = store.add_binding("B0").unwrap();
    let id2 = store.add_binding("B2").unwrap();
    store.add_set_binding_ref(0, 0, id0);
    store.add_set_binding_ref(0, 2, id2);

    store.delete_set(1);

    // S1's (empty) slot is gone; S2's slot shifted down to position 1
    // carrying its references with it.
    assert_eq!(store.set_names(), &["S0".to_string(), "S2".to_string()]);
    assert_eq!(store.layouts()[0].slots().len(), 2);
    assert_eq!(store.layouts()[0].slot(0).unwrap().refs(), &[id0]);
    assert_eq!(store.layouts()[0].slot(1).unwrap().refs(), &[id2]);
    store.assert_invariants();
}

#[test]
fn delete_set_discards_the_slots_references() {
    let mut store = populated_store();
    assert_eq!(slot_names(&store, 0, 0).len(), 3);

    store.delete_set(0);

    assert_eq!(store.set_count(), 1);
    // The bindings themselves survive; only the references are discarded.
    assert_eq!(store.binding_count(), 3);
    assert!(slot_names(&store, 0, 0).is_empty());
    store.assert_invariants();
}

// --- REORDERING ---

#[test]
fn reorder_returns_the_cursor_position() {
    let mut store = populated_store();

    assert_eq!(store.reorder_binding(0, Direction::Down), Some(1));
    assert_eq!(store.binding(0).unwrap().name, "UBO_B");
    assert_eq!(store.binding(1).unwrap().name, "UBO_A");

    // Boundary moves are no-ops.
    assert_eq!(store.reorder_binding(0, Direction::Up), None);
    assert_eq!(store.reorder_layout(1, Direction::Down), None);
    assert_eq!(store.reorder_set(5, Direction::Up), None);
    store.assert_invariants();
}

#[test]
fn reorder_set_moves_every_layouts_slot_in_lockstep() {
    let mut store = populated_store();
    let id = store.binding_id(0).unwrap();
    store.add_set_binding_ref(1, 0, id);

    let new_idx = store.reorder_set(0, Direction::Down);
    assert_eq!(new_idx, Some(1));

    assert_eq!(store.set_names(), &["PER_OBJECT".to_string(), "PER_FRAME".to_string()]);
    // PER_FRAME's references followed it to position 1 in both layouts.
    assert_eq!(slot_names(&store, 0, 1), vec!["UBO_A", "UBO_B", "TEX_C"]);
    assert_eq!(slot_names(&store, 1, 1), vec!["UBO_A"]);
    assert!(slot_names(&store, 0, 0).is_empty());
    store.assert_invariants();
}

#[test]
fn reorder_binding_does_not_disturb_references() {
    let mut store = populated_store();
    let before = slot_names(&store, 0, 0);

    store.reorder_binding(0, Direction::Down);
    store.reorder_binding(1, Direction::Down);

    // References are by id, so slot contents are byte-for-byte unchanged.
    assert_eq!(slot_names(&store, 0, 0), before);
    store.assert_invariants();
}

#[test]
fn reorder_refs_within_a_slot() {
    let mut store = populated_store();
    assert_eq!(store.reorder_set_binding_ref(0, 0, 2, Direction::Up), Some(1));
    assert_eq!(slot_names(&store, 0, 0), vec!["UBO_A", "TEX_C", "UBO_B"]);
    assert_eq!(store.reorder_set_binding_ref(0, 0, 0, Direction::Up), None);
}

// --- RENAMING ---

#[test]
fn rename_set_is_metadata_only() {
    let mut store = populated_store();
    let before = slot_names(&store, 0, 0);

    store.rename_set(0, "PER_VIEW");

    assert_eq!(store.set_names()[0], "PER_VIEW");
    assert_eq!(slot_names(&store, 0, 0), before, "no reference was touched");
    store.assert_invariants();
}

#[test]
fn rename_rejects_empty_and_out_of_range() {
    let mut store = populated_store();
    store.rename_layout(0, "");
    store.rename_layout(9, "X");
    store.rename_binding(0, "");
    assert_eq!(store.layouts()[0].name(), "L_MAIN");
    assert_eq!(store.binding(0).unwrap().name, "UBO_A");
}

// --- SLOT REFERENCES & MEMBERSHIP ---

#[test]
fn add_ref_twice_leaves_exactly_one_reference() {
    let mut store = populated_store();
    let id = store.binding_id(0).unwrap();

    store.add_set_binding_ref(0, 1, id);
    store.add_set_binding_ref(0, 1, id);

    assert_eq!(store.layouts()[0].slot(1).unwrap().refs(), &[id]);
    store.assert_invariants();
}

#[test]
fn add_ref_rejects_stale_ids_and_bad_indices() {
    let mut store = populated_store();
    let id = store.binding_id(2).unwrap();
    store.delete_binding(2);

    store.add_set_binding_ref(0, 0, id); // stale id
    store.add_set_binding_ref(7, 0, store.binding_id(0).unwrap()); // bad layout

    assert_eq!(slot_names(&store, 0, 0), vec!["UBO_A", "UBO_B"]);
    store.assert_invariants();
}

#[test]
fn membership_toggle_is_idempotent_and_order_preserving() {
    let mut store = populated_store();
    let id = store.binding_id(1).unwrap();
    let order_before = slot_names(&store, 0, 0);

    // UBO_B stays in set 0 (unchanged -> order preserved) and joins set 1.
    store.set_binding_membership(0, id, &[true, true]);
    let once = store.layouts()[0].clone();
    assert_eq!(slot_names(&store, 0, 0), order_before);
    assert_eq!(slot_names(&store, 0, 1), vec!["UBO_B"]);

    // Applying the same vector again changes nothing.
    store.set_binding_membership(0, id, &[true, true]);
    assert_eq!(store.layouts()[0], once);

    // Dropping it from set 0 removes exactly that reference.
    store.set_binding_membership(0, id, &[false, true]);
    assert_eq!(slot_names(&store, 0, 0), vec!["UBO_A", "TEX_C"]);
    assert_eq!(slot_names(&store, 0, 1), vec!["UBO_B"]);
    store.assert_invariants();
}

#[test]
fn membership_rejects_length_mismatch() {
    let mut store = populated_store();
    let id = store.binding_id(0).unwrap();
    let before = store.layouts()[0].clone();

    store.set_binding_membership(0, id, &[true]); // 1 flag, 2 sets

    assert_eq!(store.layouts()[0], before);
}

#[test]
fn get_membership_projects_one_flag_per_set() {
    let store = populated_store();
    let id = store.binding_id(0).unwrap();
    assert_eq!(store.get_membership(0, id), Some(vec![true, false]));
    assert_eq!(store.get_membership(9, id), None);
}

// --- LOOKUPS & STALE HANDLES ---

#[test]
fn stale_id_is_reported_not_resolved() {
    let mut store = populated_store();
    let id = store.binding_id(0).unwrap();
    store.delete_binding(0);

    assert!(store.binding_by_id(id).is_none());
    assert!(matches!(
        store.binding_position(id),
        Err(CoreError::StaleBinding { .. })
    ));
}

#[test]
fn recycled_slot_does_not_resurrect_old_handles() {
    let mut store = EditorStore::new();
    let old = store.add_binding("FIRST").unwrap();
    store.delete_binding(0);

    // The slot is recycled with a bumped generation.
    let new = store.add_binding("SECOND").unwrap();
    assert_eq!(old.index, new.index);
    assert_eq!(new.generation, old.generation + 1);

    assert!(store.binding_by_id(old).is_none(), "old handle stays dead");
    assert_eq!(store.binding_by_id(new).unwrap().name, "SECOND");
}

#[test]
fn find_binding_by_name_returns_first_match() {
    let mut store = EditorStore::new();
    let first = store.add_binding("DUP").unwrap();
    store.add_binding("DUP").unwrap();
    assert_eq!(store.find_binding_by_name("DUP").unwrap(), first);
}

// --- FIXED ENUMERATIONS ---

#[test]
fn descriptor_kind_table_round_trips_by_index() {
    assert_eq!(DescriptorKind::ALL.len(), 11);
    for (i, kind) in DescriptorKind::ALL.iter().enumerate() {
        assert_eq!(kind.index(), i);
        assert_eq!(DescriptorKind::from_index(i), Some(*kind));
    }
    assert_eq!(DescriptorKind::from_index(11), None);
    assert_eq!(
        DescriptorKind::UniformBuffer.vk_name(),
        "VK_DESCRIPTOR_TYPE_UNIFORM_BUFFER"
    );
}

#[test]
fn stage_flags_bool_projection_round_trips() {
    let flags = StageFlags::VERTEX_SHADER | StageFlags::FRAGMENT_SHADER;
    let bools = flags.to_bools();
    assert!(bools[3] && bools[7]);
    assert_eq!(bools.iter().filter(|b| **b).count(), 2);
    assert_eq!(StageFlags::from_bools(&bools), flags);

    // Default for a new binding is the all-commands bit.
    assert_eq!(StageFlags::default().bits(), 0x0001_0000);
    assert_eq!(StageFlags::ORDERED.len(), StageFlags::NAMES.len());
}

// --- SEEDED DOCUMENT ---

#[test]
fn seeded_store_matches_the_stock_document() {
    let store = EditorStore::seeded();

    assert_eq!(store.layout_count(), 1);
    assert_eq!(store.layouts()[0].name(), "LAYOUT_DEFAULT");
    assert_eq!(store.set_count(), 5);
    assert_eq!(store.binding_count(), 21);

    assert_eq!(slot_names(&store, 0, 0), vec!["UBO_FRAME_GLOBAL_INFO"]);
    assert_eq!(
        slot_names(&store, 0, 2),
        vec!["UBO_CAMERA_INFO", "SSBO_LIGHT_GRID_DATA"]
    );
    assert_eq!(slot_names(&store, 0, 4).len(), 14);
    store.assert_invariants();
}

// --- INVARIANTS UNDER A MIXED SEQUENCE ---

#[test]
fn invariants_hold_after_every_mutation_of_a_mixed_sequence() {
    let mut store = EditorStore::seeded();

    store.add_set("PSET_EXTRA");
    store.assert_invariants();
    store.add_layout("LAYOUT_POST");
    store.assert_invariants();
    store.reorder_set(5, Direction::Up);
    store.assert_invariants();
    store.delete_binding(0);
    store.assert_invariants();
    store.delete_set(2);
    store.assert_invariants();
    store.reorder_binding(3, Direction::Down);
    store.assert_invariants();
    store.delete_layout(0);
    store.assert_invariants();
    store.delete_set(0);
    store.assert_invariants();

    for layout in store.layouts() {
        assert_eq!(layout.slots().len(), store.set_count());
    }
}
