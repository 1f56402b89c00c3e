// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: draw overlay sprites on top of atlas-textured quads.
//!
//! An overlay is a second sprite declared for a base sprite, drawn over every face textured with
//! the base, e.g. glowing ore veins over a stone texture. Both sprites live in the same atlas,
//! so compositing an overlay means building a second quad whose UVs are moved from the base
//! sprite's rectangle into the overlay sprite's, lifted slightly off the base plane, and for
//! emissive overlays lit at full brightness.
//!
//! Two entry points cover the two shapes geometry comes in:
//!
//! - [`QuadOverlayResolver`] works on materialized [`Quad`]s and returns only the overlay quads.
//! - [`StreamingQuadCompositor`] sits in front of a [`VertexSink`], groups the vertex stream into
//!   quads, and forwards overlay quads only.
//!
//! Sprites are resolved through an [`Atlas`](understory_atlas::Atlas) from `understory_atlas`;
//! overlays are found through any [`OverlayLookup`], typically an [`OverlayRegistry`].
//! [`AtlasCell`] publishes new atlas snapshots without disturbing readers of the old one, and
//! [`RenderContext`] carries the nesting depth that keeps overlays from being drawn on overlays.
//!
//! # Example
//!
//! ```rust
//! use understory_atlas::{Atlas, SpriteId, SpriteRegion};
//! use understory_overlay::{
//!     Face, Light, OverlayDeclaration, OverlayRegistry, Quad, QuadOverlayResolver, Vertex,
//! };
//!
//! let stone = SpriteId(1);
//! let glow = SpriteId(2);
//! let atlas: Atlas = Atlas::build(
//!     1,
//!     &[
//!         SpriteRegion::new(stone, 0.0, 0.0, 0.5, 0.5),
//!         SpriteRegion::new(glow, 0.5, 0.0, 1.0, 0.5),
//!     ],
//! );
//! let mut overlays = OverlayRegistry::new();
//! overlays.insert(stone, OverlayDeclaration::new(glow).emissive(true));
//!
//! let corners = [[0.0, 0.0], [0.5, 0.0], [0.5, 0.5], [0.0, 0.5]];
//! let quad = Quad::new(
//!     core::array::from_fn(|i| Vertex::new([0.0; 3], corners[i])),
//!     Face::Up,
//!     stone,
//! );
//!
//! let out = QuadOverlayResolver::new(&atlas, &overlays).apply(&[quad]);
//! assert_eq!(out.len(), 1);
//! assert_eq!(out[0].quad.sprite, glow);
//! assert_eq!(out[0].quad.vertices[2].uv, [1.0, 0.5]);
//! assert_eq!(out[0].quad.vertices[0].light, Light::FULL_BRIGHT);
//! ```
//!
//! ## Logging
//!
//! Declarations that point at a sprite missing from the atlas are reported with `log::debug!`
//! and otherwise treated as "no overlay". Per-quad decisions are logged at `trace`.

pub mod cell;
pub mod config;
pub mod context;
pub mod declaration;
pub mod error;
pub mod pass;
pub mod remap;
pub mod resolver;
pub mod stream;
pub mod vertex;

pub use cell::AtlasCell;
pub use config::OverlayConfig;
pub use context::RenderContext;
pub use declaration::{OverlayDeclaration, OverlayLookup, OverlayRegistry, TransparencyMode};
pub use error::{ConfigError, OverlayError};
pub use pass::{BlendMode, OverlayMaterial, overlay_blend_mode};
pub use remap::{offset_position, relight, remap_uv};
pub use resolver::{OverlayQuad, QuadOverlayResolver};
pub use stream::{StreamingQuadCompositor, VertexAttrs, VertexCollector, VertexSink};
pub use vertex::{Face, Light, Quad, Rgba8, Vertex, uv_centroid};
