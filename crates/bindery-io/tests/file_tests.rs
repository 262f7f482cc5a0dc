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

//! Round trips through real files in a temporary directory.

use bindery_core::{DescriptorKind, EditorStore};
use bindery_io::{load, normalize_filename, save, DocumentError};

// --- FILENAME NORMALIZATION ---

#[test]
fn normalize_appends_the_full_suffix_to_bare_names() {
    assert_eq!(normalize_filename("scene"), "scene.vkpipeline.json");
    assert_eq!(
        normalize_filename("nested/dir/scene"),
        "nested/dir/scene.vkpipeline.json"
    );
}

#[test]
fn normalize_completes_a_half_suffix() {
    assert_eq!(normalize_filename("scene.vkpipeline"), "scene.vkpipeline.json");
}

#[test]
fn normalize_leaves_a_full_suffix_alone() {
    assert_eq!(
        normalize_filename("scene.vkpipeline.json"),
        "scene.vkpipeline.json"
    );
}

// --- SAVE AND LOAD ---

#[test]
fn save_then_load_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("fixture").to_string_lossy().into_owned();

    let mut store = EditorStore::new();
    store.add_set("PER_FRAME");
    store.add_layout("L1");
    let id = store.add_binding("UBO_A").unwrap();
    store.set_binding_kind(0, DescriptorKind::UniformBuffer);
    store.add_set_binding_ref(0, 0, id);

    save(&mut store, &path).expect("save failed");
    // The recorded filename picks up the suffix the writer appended.
    assert!(store.filename().ends_with("fixture.vkpipeline.json"));

    let reloaded = load(&path).expect("load failed");
    reloaded.assert_invariants();
    assert_eq!(reloaded.filename(), store.filename());
    assert_eq!(reloaded.set_names(), ["PER_FRAME"]);
    assert_eq!(reloaded.layouts()[0].name(), "L1");
    assert_eq!(reloaded.binding(0).unwrap().kind, DescriptorKind::UniformBuffer);
    assert_eq!(reloaded.layouts()[0].slot(0).unwrap().refs().len(), 1);
}

#[test]
fn seeded_store_survives_disk() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("seeded").to_string_lossy().into_owned();

    let mut store = EditorStore::seeded();
    save(&mut store, &path).expect("save failed");

    let reloaded = load(&path).expect("load failed");
    reloaded.assert_invariants();
    assert_eq!(reloaded.binding_count(), 21);
    assert_eq!(reloaded.set_count(), 5);
    assert_eq!(reloaded.layout_count(), 1);
}

#[test]
fn saving_into_a_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir
        .path()
        .join("no_such_dir/fixture")
        .to_string_lossy()
        .into_owned();

    let mut store = EditorStore::new();
    let before = store.filename().to_string();

    let result = save(&mut store, &path);
    assert!(matches!(result, Err(DocumentError::Io(_))));
    // A failed save leaves the recorded filename alone.
    assert_eq!(store.filename(), before);
}

#[test]
fn loading_a_missing_file_yields_an_empty_store() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("nowhere").to_string_lossy().into_owned();

    let store = load(&path).expect("missing file should not be an error");
    assert_eq!(store.binding_count(), 0);
    assert_eq!(store.set_count(), 0);
    assert_eq!(store.layout_count(), 0);
    assert!(store.filename().ends_with("nowhere.vkpipeline.json"));
}

#[test]
fn loading_malformed_json_is_a_hard_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("broken.vkpipeline.json");
    std::fs::write(&path, "{ not json").expect("fixture write failed");

    let result = load(&path.to_string_lossy());
    assert!(matches!(result, Err(DocumentError::Json(_))));
}

#[test]
fn loading_an_invalid_document_is_a_hard_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("bad.vkpipeline.json");
    let text = r#"{
        "num_layouts": 2,
        "layouts": [],
        "num_sets": 0,
        "sets": [],
        "num_bindings": 0,
        "bindings": []
    }"#;
    std::fs::write(&path, text).expect("fixture write failed");

    let result = load(&path.to_string_lossy());
    assert!(matches!(result, Err(DocumentError::Format(_))));
}
