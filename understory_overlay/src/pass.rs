// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing overlay quads to render passes.

use crate::declaration::{OverlayDeclaration, TransparencyMode};

/// Blend mode of a render pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Whatever the host's default layer for this geometry is.
    #[default]
    Default,
    /// Opaque.
    Solid,
    /// Alpha-tested, mipmapped.
    CutoutMipped,
    /// Alpha-tested, no mipmaps.
    Cutout,
    /// Alpha-blended.
    Translucent,
}

/// Blend mode for an overlay drawn over a quad using `base`.
///
/// `Translucent` overlays always blend. Otherwise the overlay follows its base, except that
/// opaque bases (`Solid`, or `Default` when the default layer is solid) are promoted to
/// `CutoutMipped` so the overlay's transparent texels stay transparent.
pub fn overlay_blend_mode(
    transparency: TransparencyMode,
    base: BlendMode,
    default_layer_is_solid: bool,
) -> BlendMode {
    if transparency == TransparencyMode::Translucent {
        return BlendMode::Translucent;
    }
    match base {
        BlendMode::Solid => BlendMode::CutoutMipped,
        BlendMode::Default if default_layer_is_solid => BlendMode::CutoutMipped,
        other => other,
    }
}

/// Material an overlay quad is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverlayMaterial {
    /// Pass the quad goes to.
    pub blend: BlendMode,
    /// Drawn at full brightness.
    pub emissive: bool,
    /// Ambient occlusion applies.
    pub ambient_occlusion: bool,
    /// Directional (diffuse) shading applies.
    pub diffuse: bool,
}

impl OverlayMaterial {
    /// Material for an overlay with the given transparency and emissive flag, drawn over a
    /// base quad that uses `base`.
    ///
    /// Emissive overlays opt out of ambient occlusion and diffuse shading, which would
    /// otherwise darken them.
    pub fn new(
        transparency: TransparencyMode,
        emissive: bool,
        base: BlendMode,
        default_layer_is_solid: bool,
    ) -> Self {
        Self {
            blend: overlay_blend_mode(transparency, base, default_layer_is_solid),
            emissive,
            ambient_occlusion: !emissive,
            diffuse: !emissive,
        }
    }

    /// Material for `declaration` over a base quad drawn with `base`.
    pub fn for_overlay(
        declaration: &OverlayDeclaration,
        base: BlendMode,
        default_layer_is_solid: bool,
    ) -> Self {
        Self::new(
            declaration.transparency_mode,
            declaration.emissive,
            base,
            default_layer_is_solid,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_atlas::SpriteId;

    #[test]
    fn translucent_always_wins() {
        for base in [BlendMode::Solid, BlendMode::Cutout, BlendMode::Default] {
            assert_eq!(
                overlay_blend_mode(TransparencyMode::Translucent, base, true),
                BlendMode::Translucent
            );
        }
    }

    #[test]
    fn opaque_bases_become_cutout() {
        let auto = TransparencyMode::Auto;
        assert_eq!(overlay_blend_mode(auto, BlendMode::Solid, false), BlendMode::CutoutMipped);
        assert_eq!(overlay_blend_mode(auto, BlendMode::Default, true), BlendMode::CutoutMipped);
        assert_eq!(overlay_blend_mode(auto, BlendMode::Default, false), BlendMode::Default);
        assert_eq!(overlay_blend_mode(auto, BlendMode::Cutout, true), BlendMode::Cutout);
    }

    #[test]
    fn emissive_material_skips_shading() {
        let d = OverlayDeclaration::new(SpriteId(1)).emissive(true);
        let m = OverlayMaterial::for_overlay(&d, BlendMode::Solid, false);
        assert_eq!(
            m,
            OverlayMaterial {
                blend: BlendMode::CutoutMipped,
                emissive: true,
                ambient_occlusion: false,
                diffuse: false,
            }
        );
    }

    #[test]
    fn translucent_material_keeps_shading() {
        let m = OverlayMaterial::new(TransparencyMode::Translucent, false, BlendMode::Solid, true);
        assert_eq!(m.blend, BlendMode::Translucent);
        assert!(m.ambient_occlusion && m.diffuse);
    }
}
