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

//! Flags describing which pipeline stages a binding applies to.

/// Flags representing the pipeline stages a binding is active in.
///
/// Each of the 17 stages is an independent bit; multiple stages are
/// combined using bitwise operations. The default for a new binding is
/// [`StageFlags::ALL_COMMANDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageFlags {
    bits: u32,
}

impl StageFlags {
    /// No stages.
    pub const NONE: Self = Self { bits: 0 };
    /// Top of pipe.
    pub const TOP_OF_PIPE: Self = Self { bits: 1 << 0 };
    /// Indirect draw parameter consumption.
    pub const DRAW_INDIRECT: Self = Self { bits: 1 << 1 };
    /// Vertex and index buffer consumption.
    pub const VERTEX_INPUT: Self = Self { bits: 1 << 2 };
    /// Vertex shader stage.
    pub const VERTEX_SHADER: Self = Self { bits: 1 << 3 };
    /// Tessellation control shader stage.
    pub const TESSELLATION_CONTROL_SHADER: Self = Self { bits: 1 << 4 };
    /// Tessellation evaluation shader stage.
    pub const TESSELLATION_EVALUATION_SHADER: Self = Self { bits: 1 << 5 };
    /// Geometry shader stage.
    pub const GEOMETRY_SHADER: Self = Self { bits: 1 << 6 };
    /// Fragment shader stage.
    pub const FRAGMENT_SHADER: Self = Self { bits: 1 << 7 };
    /// Early fragment tests (depth/stencil before the fragment shader).
    pub const EARLY_FRAGMENT_TESTS: Self = Self { bits: 1 << 8 };
    /// Late fragment tests (depth/stencil after the fragment shader).
    pub const LATE_FRAGMENT_TESTS: Self = Self { bits: 1 << 9 };
    /// Color attachment output.
    pub const COLOR_ATTACHMENT_OUTPUT: Self = Self { bits: 1 << 10 };
    /// Compute shader stage.
    pub const COMPUTE_SHADER: Self = Self { bits: 1 << 11 };
    /// Transfer operations (copies, blits, clears).
    pub const TRANSFER: Self = Self { bits: 1 << 12 };
    /// Bottom of pipe.
    pub const BOTTOM_OF_PIPE: Self = Self { bits: 1 << 13 };
    /// Host access.
    pub const HOST: Self = Self { bits: 1 << 14 };
    /// All graphics stages.
    pub const ALL_GRAPHICS: Self = Self { bits: 1 << 15 };
    /// All commands.
    pub const ALL_COMMANDS: Self = Self { bits: 1 << 16 };

    /// Number of independent stage bits.
    pub const COUNT: usize = 17;

    /// Every stage bit, in document order. The position of a flag in this
    /// table is the position the UI presents it at and the bit it occupies.
    pub const ORDERED: [Self; Self::COUNT] = [
        Self::TOP_OF_PIPE,
        Self::DRAW_INDIRECT,
        Self::VERTEX_INPUT,
        Self::VERTEX_SHADER,
        Self::TESSELLATION_CONTROL_SHADER,
        Self::TESSELLATION_EVALUATION_SHADER,
        Self::GEOMETRY_SHADER,
        Self::FRAGMENT_SHADER,
        Self::EARLY_FRAGMENT_TESTS,
        Self::LATE_FRAGMENT_TESTS,
        Self::COLOR_ATTACHMENT_OUTPUT,
        Self::COMPUTE_SHADER,
        Self::TRANSFER,
        Self::BOTTOM_OF_PIPE,
        Self::HOST,
        Self::ALL_GRAPHICS,
        Self::ALL_COMMANDS,
    ];

    /// Display names for every stage bit, matching [`Self::ORDERED`].
    pub const NAMES: [&'static str; Self::COUNT] = [
        "VK_PIPELINE_STAGE_TOP_OF_PIPE_BIT",
        "VK_PIPELINE_STAGE_DRAW_INDIRECT_BIT",
        "VK_PIPELINE_STAGE_VERTEX_INPUT_BIT",
        "VK_PIPELINE_STAGE_VERTEX_SHADER_BIT",
        "VK_PIPELINE_STAGE_TESSELLATION_CONTROL_SHADER_BIT",
        "VK_PIPELINE_STAGE_TESSELLATION_EVALUATION_SHADER_BIT",
        "VK_PIPELINE_STAGE_GEOMETRY_SHADER_BIT",
        "VK_PIPELINE_STAGE_FRAGMENT_SHADER_BIT",
        "VK_PIPELINE_STAGE_EARLY_FRAGMENT_TESTS_BIT",
        "VK_PIPELINE_STAGE_LATE_FRAGMENT_TESTS_BIT",
        "VK_PIPELINE_STAGE_COLOR_ATTACHMENT_OUTPUT_BIT",
        "VK_PIPELINE_STAGE_COMPUTE_SHADER_BIT",
        "VK_PIPELINE_STAGE_TRANSFER_BIT",
        "VK_PIPELINE_STAGE_BOTTOM_OF_PIPE_BIT",
        "VK_PIPELINE_STAGE_HOST_BIT",
        "VK_PIPELINE_STAGE_ALL_GRAPHICS_BIT",
        "VK_PIPELINE_STAGE_ALL_COMMANDS_BIT",
    ];

    /// Creates stage flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether every bit of `other` is set in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no stage is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Expands the flags into one boolean per stage, in [`Self::ORDERED`]
    /// order. This is the projection the UI renders as a checklist.
    pub fn to_bools(&self) -> [bool; Self::COUNT] {
        let mut out = [false; Self::COUNT];
        for (slot, flag) in out.iter_mut().zip(Self::ORDERED.iter()) {
            *slot = self.contains(*flag);
        }
        out
    }

    /// Rebuilds the flags from one boolean per stage, the inverse of
    /// [`Self::to_bools`].
    pub fn from_bools(selected: &[bool; Self::COUNT]) -> Self {
        let mut flags = Self::NONE;
        for (on, flag) in selected.iter().zip(Self::ORDERED.iter()) {
            if *on {
                flags |= *flag;
            }
        }
        flags
    }
}

impl Default for StageFlags {
    fn default() -> Self {
        Self::ALL_COMMANDS
    }
}

impl std::ops::BitOr for StageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for StageFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
