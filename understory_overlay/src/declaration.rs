// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay declarations and the lookup the compositor consults.

use std::collections::{BTreeMap, BTreeSet};

use understory_atlas::SpriteId;

/// How an overlay's transparency is rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransparencyMode {
    /// Follow the base quad's blend mode (promoted to cutout when the base is solid).
    #[default]
    Auto,
    /// Always blend as translucent.
    Translucent,
}

/// A parsed overlay declaration for one base sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayDeclaration {
    /// Sprite drawn on top of the base sprite.
    #[cfg_attr(feature = "serde", serde(rename = "texture"))]
    pub overlay_sprite: SpriteId,
    /// Render at full brightness regardless of scene lighting.
    #[cfg_attr(feature = "serde", serde(default))]
    pub emissive: bool,
    /// Transparency hint.
    #[cfg_attr(feature = "serde", serde(default, rename = "transparency"))]
    pub transparency_mode: TransparencyMode,
}

impl OverlayDeclaration {
    /// A non-emissive overlay with automatic transparency.
    pub const fn new(overlay_sprite: SpriteId) -> Self {
        Self {
            overlay_sprite,
            emissive: false,
            transparency_mode: TransparencyMode::Auto,
        }
    }

    /// Set the emissive flag.
    #[must_use]
    pub const fn emissive(mut self, emissive: bool) -> Self {
        self.emissive = emissive;
        self
    }

    /// Set the transparency mode.
    #[must_use]
    pub const fn transparency(mut self, mode: TransparencyMode) -> Self {
        self.transparency_mode = mode;
        self
    }
}

/// Look up the overlay declared for a base sprite.
///
/// Implementations are read-only from the compositor's point of view.
pub trait OverlayLookup {
    /// The declaration for `sprite`, if one was registered.
    fn overlay_for(&self, sprite: SpriteId) -> Option<OverlayDeclaration>;
}

impl<F> OverlayLookup for F
where
    F: Fn(SpriteId) -> Option<OverlayDeclaration>,
{
    fn overlay_for(&self, sprite: SpriteId) -> Option<OverlayDeclaration> {
        self(sprite)
    }
}

/// Overlay declarations keyed by base sprite.
///
/// Populated once per loaded asset set; rebuild it on asset reload.
#[derive(Clone, Debug, Default)]
pub struct OverlayRegistry {
    by_base: BTreeMap<SpriteId, OverlayDeclaration>,
}

impl OverlayRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the overlay for `base`, returning any declaration it replaces.
    pub fn insert(
        &mut self,
        base: SpriteId,
        declaration: OverlayDeclaration,
    ) -> Option<OverlayDeclaration> {
        self.by_base.insert(base, declaration)
    }

    /// Remove the overlay for `base`.
    pub fn remove(&mut self, base: SpriteId) -> Option<OverlayDeclaration> {
        self.by_base.remove(&base)
    }

    /// Number of registered overlays.
    pub fn len(&self) -> usize {
        self.by_base.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_base.is_empty()
    }

    /// Iterate `(base, declaration)` pairs in base-id order.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, OverlayDeclaration)> + '_ {
        self.by_base.iter().map(|(k, v)| (*k, *v))
    }

    /// Whether any of `sprites` has an overlay, i.e. whether a model built from them needs
    /// overlay composition at all.
    pub fn uses_overlay(&self, sprites: impl IntoIterator<Item = SpriteId>) -> bool {
        sprites.into_iter().any(|s| self.by_base.contains_key(&s))
    }

    /// Overlay sprites that must be added to an atlas before packing.
    ///
    /// Returns, sorted and without duplicates, the overlay sprite of every declaration whose
    /// base sprite is in `present` and whose overlay sprite is not.
    pub fn sprites_to_stitch(&self, present: impl IntoIterator<Item = SpriteId>) -> Vec<SpriteId> {
        let present: BTreeSet<SpriteId> = present.into_iter().collect();
        let wanted: BTreeSet<SpriteId> = self
            .by_base
            .iter()
            .filter(|(base, decl)| {
                present.contains(base) && !present.contains(&decl.overlay_sprite)
            })
            .map(|(_, decl)| decl.overlay_sprite)
            .collect();
        wanted.into_iter().collect()
    }
}

impl OverlayLookup for OverlayRegistry {
    fn overlay_for(&self, sprite: SpriteId) -> Option<OverlayDeclaration> {
        self.by_base.get(&sprite).copied()
    }
}

impl FromIterator<(SpriteId, OverlayDeclaration)> for OverlayRegistry {
    fn from_iter<I: IntoIterator<Item = (SpriteId, OverlayDeclaration)>>(iter: I) -> Self {
        Self {
            by_base: iter.into_iter().collect(),
        }
    }
}
