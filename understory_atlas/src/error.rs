// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while validating sprite regions.

use crate::types::SpriteId;

/// Why a sprite region was refused by an index builder.
///
/// Builders never fail on these; they skip the region and report it as a diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum RegionError {
    /// A coordinate is NaN or infinite.
    #[error("sprite {id:?} has non-finite bounds")]
    NonFinite {
        /// The offending sprite.
        id: SpriteId,
    },
    /// The rectangle extends outside the unit square by more than the tolerance.
    #[error(
        "sprite {id:?} has broken bounds [{u0}, {u1}]x[{v0}, {v1}]; sprite bounds should be between 0 and 1"
    )]
    OutOfBounds {
        /// The offending sprite.
        id: SpriteId,
        /// Minimum u.
        u0: f32,
        /// Minimum v.
        v0: f32,
        /// Maximum u.
        u1: f32,
        /// Maximum v.
        v1: f32,
    },
}
