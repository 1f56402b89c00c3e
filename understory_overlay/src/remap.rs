// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-vertex math shared by the batch and streaming paths.

use understory_atlas::SpriteRegion;

use crate::vertex::{Face, Light, Rgba8};

/// Move a UV from `base` to the same relative spot in `overlay`.
///
/// The fraction of the way across the base sprite is preserved in each axis, so an overlay
/// lines up texel-for-texel with its base even when the two sprites differ in size.
pub fn remap_uv(uv: [f32; 2], base: &SpriteRegion, overlay: &SpriteRegion) -> [f32; 2] {
    [
        overlay.lerp_u(base.fraction_u(uv[0])),
        overlay.lerp_v(base.fraction_v(uv[1])),
    ]
}

/// Offset a position by `amount` along the face normal.
///
/// Lifts the overlay off its base plane so the two coplanar quads do not z-fight.
pub fn offset_position(position: [f32; 3], face: Face, amount: f32) -> [f32; 3] {
    let step = face.step();
    [
        position[0] + amount * f32::from(step[0]),
        position[1] + amount * f32::from(step[1]),
        position[2] + amount * f32::from(step[2]),
    ]
}

/// Light and color for an overlay vertex.
///
/// Emissive overlays ignore the scene: light is forced to `full_bright` and the color channels
/// to white. The vertex's alpha is kept. Otherwise both pass through unchanged.
pub fn relight(light: Light, color: Rgba8, emissive: bool, full_bright: Light) -> (Light, Rgba8) {
    if emissive {
        (
            full_bright,
            Rgba8 {
                a: color.a,
                ..Rgba8::WHITE
            },
        )
    } else {
        (light, color)
    }
}
