// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch overlay synthesis over materialized quads.

use understory_atlas::{Atlas, QuadTree, SpatialSpriteIndex};

use crate::config::OverlayConfig;
use crate::context::RenderContext;
use crate::declaration::{OverlayLookup, TransparencyMode};
use crate::error::OverlayError;
use crate::pass::{BlendMode, OverlayMaterial};
use crate::remap::{offset_position, relight, remap_uv};
use crate::vertex::{Quad, Vertex};

/// A synthesized overlay quad plus what the caller needs to route it to a pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayQuad {
    /// The new quad, textured with the overlay sprite.
    pub quad: Quad,
    /// Whether the overlay is drawn at full brightness.
    pub emissive: bool,
    /// Transparency hint from the declaration.
    pub transparency_mode: TransparencyMode,
}

impl OverlayQuad {
    /// Material to draw this overlay with, given the blend mode of its base quad.
    pub fn material(&self, base: BlendMode, default_layer_is_solid: bool) -> OverlayMaterial {
        OverlayMaterial::new(
            self.transparency_mode,
            self.emissive,
            base,
            default_layer_is_solid,
        )
    }
}

/// Builds overlay quads for a list of baked quads.
///
/// The resolver only produces overlays. Whether they are drawn in addition to the original
/// quads or instead of them is up to the caller.
#[derive(Debug)]
pub struct QuadOverlayResolver<'a, L, I = QuadTree> {
    atlas: &'a Atlas<I>,
    overlays: &'a L,
    config: OverlayConfig,
}

impl<'a, L, I> QuadOverlayResolver<'a, L, I>
where
    L: OverlayLookup,
    I: SpatialSpriteIndex,
{
    /// Create a resolver with [`OverlayConfig::default`].
    pub fn new(atlas: &'a Atlas<I>, overlays: &'a L) -> Self {
        Self {
            atlas,
            overlays,
            config: OverlayConfig::default(),
        }
    }

    /// Replace the settings.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    /// Overlay quads for every input quad whose sprite has an overlay.
    ///
    /// Quads without an overlay, or whose sprites are missing from the atlas, are left out.
    pub fn apply(&self, quads: &[Quad]) -> Vec<OverlayQuad> {
        quads
            .iter()
            .filter_map(|quad| match self.synthesize(quad) {
                Ok(out) => out,
                Err(err) => {
                    log::debug!("skipping overlay: {err}");
                    None
                }
            })
            .collect()
    }

    /// Like [`apply`](Self::apply), but produces nothing below the top level of `ctx`.
    pub fn apply_in(&self, ctx: &RenderContext, quads: &[Quad]) -> Vec<OverlayQuad> {
        if !ctx.is_top_level() {
            return Vec::new();
        }
        self.apply(quads)
    }

    /// Overlay for a single quad.
    ///
    /// Returns `Ok(None)` when the quad's sprite has no overlay.
    pub fn synthesize(&self, quad: &Quad) -> Result<Option<OverlayQuad>, OverlayError> {
        let Some(decl) = self.overlays.overlay_for(quad.sprite) else {
            return Ok(None);
        };
        let base = self
            .atlas
            .region(quad.sprite)
            .ok_or(OverlayError::MissingBaseRegion(quad.sprite))?;
        let overlay = self
            .atlas
            .region(decl.overlay_sprite)
            .ok_or(OverlayError::MissingOverlayRegion(decl.overlay_sprite))?;

        let vertices = quad.vertices.map(|v| {
            let (light, color) = relight(v.light, v.color, decl.emissive, self.config.full_bright);
            Vertex {
                position: offset_position(v.position, quad.face, self.config.plane_offset),
                uv: remap_uv(v.uv, &base, &overlay),
                light,
                color,
            }
        });
        Ok(Some(OverlayQuad {
            quad: Quad {
                vertices,
                tint_index: quad.tint_index,
                face: quad.face,
                sprite: overlay.id,
            },
            emissive: decl.emissive,
            transparency_mode: decl.transparency_mode,
        }))
    }
}
