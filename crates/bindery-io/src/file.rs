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

//! Filename normalization and synchronous save/load.

use std::fs;
use std::io::ErrorKind;

use bindery_core::EditorStore;

use crate::document::Document;
use crate::error::DocumentError;

/// Canonical double suffix of binding layout documents.
pub const DOCUMENT_SUFFIX: &str = ".vkpipeline.json";

/// Appends the canonical suffix to filenames that lack it.
///
/// A name already ending in `.vkpipeline.json` is returned unchanged; a
/// name ending in `.vkpipeline` only gets `.json` appended (the second
/// level of the suffix is completed rather than duplicated); anything
/// else gets the full double suffix.
pub fn normalize_filename(name: &str) -> String {
    if name.ends_with(DOCUMENT_SUFFIX) {
        name.to_string()
    } else if name.ends_with(".vkpipeline") {
        format!("{name}.json")
    } else {
        format!("{name}{DOCUMENT_SUFFIX}")
    }
}

/// Serializes the store and writes it to `path` (normalized first).
///
/// On success the store's recorded filename is updated to the normalized
/// path, mirroring what the editor displays in its title area.
pub fn save(store: &mut EditorStore, path: &str) -> Result<(), DocumentError> {
    let filename = normalize_filename(path);
    let document = Document::from_store(store);
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(&filename, json)?;
    log::info!(
        "saved '{filename}': {} layouts, {} sets, {} bindings",
        document.num_layouts,
        document.num_sets,
        document.num_bindings
    );
    store.set_filename(filename);
    Ok(())
}

/// Reads and deserializes the document at `path` (normalized first).
///
/// A file that cannot be read (missing or otherwise) yields an empty
/// store: to the caller, an all-default document is indistinguishable
/// from "file did not exist". A file that *can* be
/// read but is malformed is a hard error, so the caller keeps whatever
/// document it had before attempting the load.
pub fn load(path: &str) -> Result<EditorStore, DocumentError> {
    let filename = normalize_filename(path);
    let text = match fs::read_to_string(&filename) {
        Ok(text) => text,
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                log::warn!("reading '{filename}' failed ({err}); treating as empty document");
            }
            let mut store = EditorStore::new();
            store.set_filename(filename);
            return Ok(store);
        }
    };

    let document: Document = serde_json::from_str(&text)?;
    let mut store = document.into_store()?;
    log::info!(
        "loaded '{filename}': {} layouts, {} sets, {} bindings",
        store.layout_count(),
        store.set_count(),
        store.binding_count()
    );
    store.set_filename(filename);
    Ok(store)
}
