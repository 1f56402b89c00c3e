// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use understory_atlas::SpriteId;

use crate::vertex::Light;

/// Why an overlay could not be synthesized for a quad.
///
/// These never interrupt rendering: [`QuadOverlayResolver::apply`](crate::QuadOverlayResolver::apply)
/// and the streaming compositor treat them as "no overlay".
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// The quad's own sprite is not in the current atlas.
    #[error("base sprite {0:?} is not in the atlas")]
    MissingBaseRegion(SpriteId),
    /// The declared overlay sprite was not stitched into the current atlas.
    #[error("overlay sprite {0:?} is not in the atlas")]
    MissingOverlayRegion(SpriteId),
}

/// Invalid [`OverlayConfig`](crate::OverlayConfig) values.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The plane offset must be finite and non-negative.
    #[error("plane offset must be finite and non-negative, got {0}")]
    InvalidPlaneOffset(f32),
    /// Lightmap coordinates must fit in 16 bits.
    #[error("full-bright light {0:?} does not fit in 16-bit lightmap coordinates")]
    InvalidFullBright(Light),
}
