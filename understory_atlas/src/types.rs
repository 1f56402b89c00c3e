// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive atlas types: sprite identifiers, UV rectangles, and sprite regions.

use core::cmp::Ordering;

use crate::error::RegionError;

/// Identifier for a sprite packed into an atlas.
///
/// Identifiers are assigned by whoever owns the atlas packing; this crate only compares
/// and copies them. The total order on `SpriteId` is used for deterministic tie-breaks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpriteId(pub u32);

impl SpriteId {
    /// Create a sprite id from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw value of this id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Axis-aligned rectangle in normalized atlas UV space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    /// Minimum u (left)
    pub u0: f32,
    /// Minimum v (top)
    pub v0: f32,
    /// Maximum u (right)
    pub u1: f32,
    /// Maximum v (bottom)
    pub v1: f32,
}

impl UvRect {
    /// Create a rectangle from two corners, normalizing so that `u0 <= u1` and `v0 <= v1`.
    pub fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self {
            u0: min_t(u0, u1),
            v0: min_t(v0, v1),
            u1: max_t(u0, u1),
            v1: max_t(v0, v1),
        }
    }

    /// A zero-area rectangle located at a single point.
    pub const fn point(u: f32, v: f32) -> Self {
        Self {
            u0: u,
            v0: v,
            u1: u,
            v1: v,
        }
    }

    /// Width along the u axis.
    pub fn width(&self) -> f32 {
        self.u1 - self.u0
    }

    /// Height along the v axis.
    pub fn height(&self) -> f32 {
        self.v1 - self.v0
    }

    /// Whether the closed rectangle contains the point (edges included).
    pub fn contains_point(&self, u: f32, v: f32) -> bool {
        le(self.u0, u) && le(self.v0, v) && le(u, self.u1) && le(v, self.v1)
    }

    /// Whether the point lies strictly inside the rectangle (edges excluded).
    pub fn contains_interior(&self, u: f32, v: f32) -> bool {
        lt(self.u0, u) && lt(self.v0, v) && lt(u, self.u1) && lt(v, self.v1)
    }

    /// Center of the rectangle.
    pub fn center(&self) -> (f32, f32) {
        (0.5 * (self.u0 + self.u1), 0.5 * (self.v0 + self.v1))
    }
}

/// A sprite's rectangle inside the atlas, in normalized UV space.
///
/// Constructors normalize the corners so `u0 <= u1` and `v0 <= v1`. A region is only
/// indexed when it lies within `[0, 1] × [0, 1]` up to a small epsilon; see
/// [`SpriteRegion::validate`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteRegion {
    /// Sprite identifier.
    pub id: SpriteId,
    /// Minimum u
    pub u0: f32,
    /// Minimum v
    pub v0: f32,
    /// Maximum u
    pub u1: f32,
    /// Maximum v
    pub v1: f32,
}

impl SpriteRegion {
    /// Create a region from two corners, normalizing the corner order.
    pub fn new(id: SpriteId, u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        let r = UvRect::new(u0, v0, u1, v1);
        Self::from_rect(id, r)
    }

    /// Create a region from an already-normalized rectangle.
    pub const fn from_rect(id: SpriteId, rect: UvRect) -> Self {
        Self {
            id,
            u0: rect.u0,
            v0: rect.v0,
            u1: rect.u1,
            v1: rect.v1,
        }
    }

    /// Create a region and validate it against the unit square in one step.
    pub fn checked(
        id: SpriteId,
        u0: f32,
        v0: f32,
        u1: f32,
        v1: f32,
        epsilon: f32,
    ) -> Result<Self, RegionError> {
        let region = Self::new(id, u0, v0, u1, v1);
        region.validate(epsilon)?;
        Ok(region)
    }

    /// The region's rectangle.
    pub const fn rect(&self) -> UvRect {
        UvRect {
            u0: self.u0,
            v0: self.v0,
            u1: self.u1,
            v1: self.v1,
        }
    }

    /// Check that every coordinate is finite and inside `[-epsilon, 1 + epsilon]`.
    pub fn validate(&self, epsilon: f32) -> Result<(), RegionError> {
        let coords = [self.u0, self.v0, self.u1, self.v1];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(RegionError::NonFinite { id: self.id });
        }
        let lo = 0.0 - epsilon;
        let hi = 1.0 + epsilon;
        if self.u0 < lo || self.u1 > hi || self.v0 < lo || self.v1 > hi {
            return Err(RegionError::OutOfBounds {
                id: self.id,
                u0: self.u0,
                v0: self.v0,
                u1: self.u1,
                v1: self.v1,
            });
        }
        Ok(())
    }

    /// Map a u coordinate inside this region to its fraction across the region's width.
    ///
    /// Degenerate (zero-width) regions map every coordinate to `0.0`.
    pub fn fraction_u(&self, u: f32) -> f32 {
        fraction(u, self.u0, self.u1)
    }

    /// Map a v coordinate inside this region to its fraction across the region's height.
    ///
    /// Degenerate (zero-height) regions map every coordinate to `0.0`.
    pub fn fraction_v(&self, v: f32) -> f32 {
        fraction(v, self.v0, self.v1)
    }

    /// The u coordinate at fraction `t` across this region.
    pub fn lerp_u(&self, t: f32) -> f32 {
        lerp(t, self.u0, self.u1)
    }

    /// The v coordinate at fraction `t` across this region.
    pub fn lerp_v(&self, t: f32) -> f32 {
        lerp(t, self.v0, self.v1)
    }
}

#[inline]
fn fraction(c: f32, c0: f32, c1: f32) -> f32 {
    let span = c1 - c0;
    if span == 0.0 { 0.0 } else { (c - c0) / span }
}

#[inline]
fn lerp(t: f32, start: f32, end: f32) -> f32 {
    start + t * (end - start)
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
