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

//! The on-disk document model and its conversions to and from the store.
//!
//! Field names are normative: documents written by other tooling are
//! matched field-for-field, including the `type`/`typeName` pair and the
//! `stageFlagBits` mask. Inter-entity references are positional: each
//! entry of a slot's `desc_layouts` array is a zero-based index into the
//! top-level `bindings` array.

use std::collections::HashMap;

use bindery_core::{Binding, BindingId, DescriptorKind, EditorStore, StageFlags};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// The root of a serialized binding layout document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Declared number of pipeline layouts; must match `layouts`.
    pub num_layouts: usize,
    /// All pipeline layouts, in user order.
    #[serde(default)]
    pub layouts: Vec<LayoutRecord>,
    /// Declared number of global sets; must match `sets`.
    pub num_sets: usize,
    /// The global set names, in set order.
    #[serde(default)]
    pub sets: Vec<String>,
    /// Declared number of bindings; must match `bindings`.
    pub num_bindings: usize,
    /// The global binding list, in user order.
    #[serde(default)]
    pub bindings: Vec<BindingRecord>,
}

/// One serialized pipeline layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// The layout's display name.
    pub name: String,
    /// One entry per global set, in set order.
    #[serde(default)]
    pub desc_sets: Vec<SetRecord>,
}

/// One serialized set slot within a layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRecord {
    /// The slot's position, repeated in the document for round-trip
    /// validation; must equal the entry's index in `desc_sets`.
    pub set_index: usize,
    /// Positional references into the global binding array. Writers omit
    /// the key for an empty slot, so it defaults to empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub desc_layouts: Vec<usize>,
}

/// One serialized descriptor binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Display name.
    pub name: String,
    /// Position of the usage type in the descriptor type enumeration.
    /// Authoritative on load.
    #[serde(rename = "type")]
    pub type_index: usize,
    /// Human-readable mirror of `type`. Write-only documentation: it is
    /// never used to drive reconstruction, even when it disagrees with
    /// the numeric index.
    #[serde(rename = "typeName")]
    pub type_name: String,
    /// Free-form custom data.
    #[serde(default)]
    pub data: String,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
    /// Stage bitmask, persisted verbatim.
    #[serde(rename = "stageFlagBits")]
    pub stage_flag_bits: u32,
}

impl Document {
    /// Projects a store into its document form: counts plus fully ordered
    /// arrays, with every slot reference rewritten from a [`BindingId`]
    /// to the binding's dense position.
    pub fn from_store(store: &EditorStore) -> Self {
        let positions: HashMap<BindingId, usize> = store
            .bindings()
            .enumerate()
            .map(|(pos, (id, _))| (id, pos))
            .collect();

        let layouts = store
            .layouts()
            .iter()
            .map(|layout| LayoutRecord {
                name: layout.name().to_string(),
                desc_sets: layout
                    .slots()
                    .iter()
                    .enumerate()
                    .map(|(set_index, slot)| SetRecord {
                        set_index,
                        desc_layouts: slot
                            .refs()
                            .iter()
                            .map(|id| positions[id])
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let bindings = store
            .bindings()
            .map(|(_, binding)| BindingRecord {
                name: binding.name.clone(),
                type_index: binding.kind.index(),
                type_name: binding.kind.vk_name().to_string(),
                data: binding.data.clone(),
                comment: binding.comment.clone(),
                stage_flag_bits: binding.stages.bits(),
            })
            .collect();

        Self {
            num_layouts: store.layout_count(),
            layouts,
            num_sets: store.set_count(),
            sets: store.set_names().to_vec(),
            num_bindings: store.binding_count(),
            bindings,
        }
    }

    /// Validates the document's declared shape against its actual shape
    /// and rebuilds a store from it.
    ///
    /// Rejected outright: a count that disagrees with its array, a layout
    /// whose slot count differs from the declared set count, a
    /// `set_index` tag that is out of range or off-position, a binding
    /// reference outside the declared binding array, and a numeric type
    /// index naming no descriptor type. The mirrored `typeName` string is
    /// never consulted.
    pub fn into_store(self) -> Result<EditorStore, FormatError> {
        for (field, declared, actual) in [
            ("num_layouts", self.num_layouts, self.layouts.len()),
            ("num_sets", self.num_sets, self.sets.len()),
            ("num_bindings", self.num_bindings, self.bindings.len()),
        ] {
            if declared != actual {
                return Err(FormatError::CountMismatch {
                    field,
                    declared,
                    actual,
                });
            }
        }

        let bindings = self
            .bindings
            .into_iter()
            .map(|record| {
                let kind = DescriptorKind::from_index(record.type_index).ok_or_else(|| {
                    FormatError::UnknownDescriptorType {
                        binding: record.name.clone(),
                        index: record.type_index,
                    }
                })?;
                Ok(Binding {
                    name: record.name,
                    kind,
                    data: record.data,
                    comment: record.comment,
                    stages: StageFlags::from_bits(record.stage_flag_bits),
                })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        let mut layouts = Vec::with_capacity(self.layouts.len());
        for record in self.layouts {
            if record.desc_sets.len() != self.num_sets {
                return Err(FormatError::SlotCountMismatch {
                    layout: record.name,
                    declared: self.num_sets,
                    actual: record.desc_sets.len(),
                });
            }
            let mut slots = vec![Vec::new(); self.num_sets];
            for (position, slot) in record.desc_sets.into_iter().enumerate() {
                if slot.set_index != position {
                    return Err(FormatError::BadSetIndexTag {
                        layout: record.name,
                        tag: slot.set_index,
                        position,
                    });
                }
                for reference in &slot.desc_layouts {
                    if *reference >= self.num_bindings {
                        return Err(FormatError::BindingRefOutOfRange {
                            reference: *reference,
                            count: self.num_bindings,
                        });
                    }
                }
                slots[position] = slot.desc_layouts;
            }
            layouts.push((record.name, slots));
        }

        Ok(EditorStore::from_parts(self.sets, bindings, layouts))
    }
}
