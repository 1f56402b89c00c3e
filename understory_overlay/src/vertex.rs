// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex and quad data as produced by model baking.

use understory_atlas::SpriteId;

/// Lightmap coordinates of a vertex.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    /// Block (local emitter) light coordinate.
    pub block: u32,
    /// Sky light coordinate.
    pub sky: u32,
}

impl Light {
    /// Maximum brightness: both coordinates at level 15 (`15 << 4`).
    pub const FULL_BRIGHT: Self = Self::new(0xF0, 0xF0);

    /// Create a light value from its two coordinates.
    pub const fn new(block: u32, sky: u32) -> Self {
        Self { block, sky }
    }

    /// Pack into a single word: sky in the high half, block in the low half.
    pub const fn packed(self) -> u32 {
        (self.sky << 16) | (self.block & 0xFFFF)
    }

    /// Inverse of [`Light::packed`].
    pub const fn from_packed(packed: u32) -> Self {
        Self::new(packed & 0xFFFF, packed >> 16)
    }
}

/// 8-bit RGBA vertex color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One vertex of a baked quad.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Atlas UV.
    pub uv: [f32; 2],
    /// Lightmap coordinates.
    pub light: Light,
    /// Vertex color.
    pub color: Rgba8,
}

impl Vertex {
    /// Create a white, unlit vertex.
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            uv,
            light: Light::new(0, 0),
            color: Rgba8::WHITE,
        }
    }

    /// Replace the lightmap coordinates.
    #[must_use]
    pub const fn with_light(mut self, light: Light) -> Self {
        self.light = light;
        self
    }

    /// Replace the color.
    #[must_use]
    pub const fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }
}

/// Direction a quad faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// -y
    Down,
    /// +y
    Up,
    /// -z
    North,
    /// +z
    South,
    /// -x
    West,
    /// +x
    East,
}

impl Face {
    /// All faces, ordered by [`Face::id`].
    pub const ALL: [Self; 6] = [
        Self::Down,
        Self::Up,
        Self::North,
        Self::South,
        Self::West,
        Self::East,
    ];

    /// Unit step along this face's normal, per axis.
    pub const fn step(self) -> [i8; 3] {
        match self {
            Self::Down => [0, -1, 0],
            Self::Up => [0, 1, 0],
            Self::North => [0, 0, -1],
            Self::South => [0, 0, 1],
            Self::West => [-1, 0, 0],
            Self::East => [1, 0, 0],
        }
    }

    /// Stable numeric id of this face.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Face for a numeric id.
    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Self::ALL.len() {
            Some(Self::ALL[id as usize])
        } else {
            None
        }
    }
}

/// A baked, textured quad.
///
/// Quads are values: overlay synthesis builds a new quad and never touches the original.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    /// The four corners, in winding order.
    pub vertices: [Vertex; 4],
    /// Tint slot, or `-1` for untinted.
    pub tint_index: i32,
    /// Facing, used for the overlay plane offset.
    pub face: Face,
    /// Sprite the quad is textured with.
    pub sprite: SpriteId,
}

impl Quad {
    /// Create an untinted quad.
    pub const fn new(vertices: [Vertex; 4], face: Face, sprite: SpriteId) -> Self {
        Self {
            vertices,
            tint_index: -1,
            face,
            sprite,
        }
    }

    /// Mean UV of the four corners.
    pub fn uv_centroid(&self) -> (f32, f32) {
        uv_centroid(self.vertices.map(|v| v.uv))
    }
}

/// Mean of four UV points: an unambiguous interior point of a convex quad's texture.
pub fn uv_centroid(uvs: [[f32; 2]; 4]) -> (f32, f32) {
    let mut u = 0.0;
    let mut v = 0.0;
    for [pu, pv] in uvs {
        u += pu;
        v += pv;
    }
    (u / 4.0, v / 4.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bright_packs_like_a_lightmap() {
        assert_eq!(Light::FULL_BRIGHT.packed(), 0x00F0_00F0);
        assert_eq!(Light::from_packed(0x00F0_00F0), Light::FULL_BRIGHT);
    }

    #[test]
    fn face_ids_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_id(face.id()), Some(face));
        }
        assert_eq!(Face::from_id(6), None);
    }

    #[test]
    fn centroid_of_sprite_corners_is_its_center() {
        let c = uv_centroid([[0.0, 0.0], [0.5, 0.0], [0.5, 0.5], [0.0, 0.5]]);
        assert_eq!(c, (0.25, 0.25));
    }
}
