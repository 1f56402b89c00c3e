// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs shared by the index builders.

/// Options controlling how sprite indexes are built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BuildOptions {
    /// Tolerance used for bounds checks and midpoint-crossing tests.
    pub epsilon: f32,
    /// How many malformed regions are reported through `log` per build.
    /// Further rejections are still counted in [`BuildStats`](crate::BuildStats).
    pub max_reported: usize,
    /// Maximum quad-tree depth below the root.
    ///
    /// Two regions that still share a quadrant at this depth overlap for any practical
    /// atlas; the first one inserted keeps the slot.
    pub max_depth: u32,
}

impl BuildOptions {
    /// Default tolerance.
    pub const EPSILON: f32 = 0.000_01;
    /// Default report cap.
    pub const MAX_REPORTED: usize = 5;
    /// Default depth cap.
    pub const MAX_DEPTH: u32 = 20;
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            epsilon: Self::EPSILON,
            max_reported: Self::MAX_REPORTED,
            max_depth: Self::MAX_DEPTH,
        }
    }
}
