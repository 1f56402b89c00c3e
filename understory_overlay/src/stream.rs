// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay composition over a live vertex stream.
//!
//! Some geometry is never materialized as quads: it is emitted vertex by vertex into a sink.
//! [`StreamingQuadCompositor`] sits in front of such a sink, groups the stream into quads of
//! four vertices, and forwards an overlay quad for each one whose sprite has an overlay.

use bitflags::bitflags;
use understory_atlas::{Atlas, QuadTree, SpatialSpriteIndex, SpriteRegion};

use crate::config::OverlayConfig;
use crate::declaration::{OverlayDeclaration, OverlayLookup};
use crate::error::OverlayError;
use crate::remap::{relight, remap_uv};
use crate::vertex::{Light, Rgba8, Vertex, uv_centroid};

/// Receiver of per-vertex attribute calls.
///
/// Attributes for one vertex are set in any order, then [`end_vertex`](Self::end_vertex)
/// finishes it.
pub trait VertexSink {
    /// Set the position of the current vertex.
    fn set_position(&mut self, position: [f32; 3]);
    /// Set the atlas UV of the current vertex.
    fn set_uv(&mut self, uv: [f32; 2]);
    /// Set the lightmap coordinates of the current vertex.
    fn set_light(&mut self, light: Light);
    /// Set the color of the current vertex.
    fn set_color(&mut self, color: Rgba8);
    /// Set the normal of the current vertex.
    fn set_normal(&mut self, normal: [f32; 3]);
    /// Finish the current vertex.
    fn end_vertex(&mut self);
}

impl<S: VertexSink + ?Sized> VertexSink for &mut S {
    fn set_position(&mut self, position: [f32; 3]) {
        (**self).set_position(position);
    }
    fn set_uv(&mut self, uv: [f32; 2]) {
        (**self).set_uv(uv);
    }
    fn set_light(&mut self, light: Light) {
        (**self).set_light(light);
    }
    fn set_color(&mut self, color: Rgba8) {
        (**self).set_color(color);
    }
    fn set_normal(&mut self, normal: [f32; 3]) {
        (**self).set_normal(normal);
    }
    fn end_vertex(&mut self) {
        (**self).end_vertex();
    }
}

/// A sink that assembles the stream back into [`Vertex`] values.
///
/// Attributes not set for a vertex keep the defaults of [`Vertex::new`]. Normals are dropped.
#[derive(Clone, Debug, Default)]
pub struct VertexCollector {
    vertices: Vec<Vertex>,
    current: Option<Vertex>,
}

impl VertexCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished vertices, in emission order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Take the finished vertices.
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    fn current(&mut self) -> &mut Vertex {
        self.current
            .get_or_insert_with(|| Vertex::new([0.0; 3], [0.0; 2]))
    }
}

impl VertexSink for VertexCollector {
    fn set_position(&mut self, position: [f32; 3]) {
        self.current().position = position;
    }
    fn set_uv(&mut self, uv: [f32; 2]) {
        self.current().uv = uv;
    }
    fn set_light(&mut self, light: Light) {
        self.current().light = light;
    }
    fn set_color(&mut self, color: Rgba8) {
        self.current().color = color;
    }
    fn set_normal(&mut self, _normal: [f32; 3]) {}
    fn end_vertex(&mut self) {
        let vertex = *self.current();
        self.vertices.push(vertex);
        self.current = None;
    }
}

bitflags! {
    /// Attributes seen for a buffered vertex.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct VertexAttrs: u8 {
        /// A position was set.
        const POSITION = 0b0000_0001;
        /// A UV was set.
        const UV       = 0b0000_0010;
        /// A light value was set.
        const LIGHT    = 0b0000_0100;
        /// A color was set.
        const COLOR    = 0b0000_1000;
        /// A normal was set.
        const NORMAL   = 0b0001_0000;
    }
}

impl Default for VertexAttrs {
    fn default() -> Self {
        Self::empty()
    }
}

/// A recorded attribute call.
///
/// UV, light and color carry no payload: their values are substituted when the quad is
/// replayed.
#[derive(Copy, Clone, Debug, PartialEq)]
enum VertexOp {
    Position([f32; 3]),
    Uv,
    Light,
    Color,
    Normal([f32; 3]),
}

#[derive(Clone, Debug, Default)]
struct PendingVertex {
    ops: Vec<VertexOp>,
    attrs: VertexAttrs,
    uv: [f32; 2],
    light: Light,
    color: Rgba8,
}

impl PendingVertex {
    fn record(&mut self, op: VertexOp, attr: VertexAttrs) {
        self.ops.push(op);
        self.attrs.insert(attr);
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.attrs = VertexAttrs::empty();
    }
}

/// Groups a vertex stream into quads and forwards an overlay quad for each one that has an
/// overlay.
///
/// Nothing from the input stream reaches the sink directly: every vertex is buffered until its
/// quad is complete. When the fourth vertex ends, the quad's sprite is found from the centroid
/// of its UVs, and if that sprite has an overlay whose region is in the atlas, the buffered
/// calls are replayed into the sink with the UV remapped (and, for emissive overlays, light and
/// color replaced). Quads that cannot be resolved are dropped. The buffer is reset after every
/// fourth vertex whatever the outcome.
///
/// The base geometry itself is expected to be drawn separately; this type only contributes the
/// overlay layer. Positions are replayed unchanged.
pub struct StreamingQuadCompositor<'a, S, L, I = QuadTree> {
    atlas: &'a Atlas<I>,
    overlays: &'a L,
    config: OverlayConfig,
    sink: S,
    pending: [PendingVertex; 4],
    current: usize,
    emitted: u64,
}

impl<S, L, I: SpatialSpriteIndex> core::fmt::Debug for StreamingQuadCompositor<'_, S, L, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamingQuadCompositor")
            .field("generation", &self.atlas.generation())
            .field("current_vertex", &self.current)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

impl<'a, S, L, I> StreamingQuadCompositor<'a, S, L, I>
where
    S: VertexSink,
    L: OverlayLookup,
    I: SpatialSpriteIndex,
{
    /// Create a compositor writing overlays into `sink`.
    pub fn new(atlas: &'a Atlas<I>, overlays: &'a L, sink: S) -> Self {
        Self {
            atlas,
            overlays,
            config: OverlayConfig::default(),
            sink,
            pending: <[PendingVertex; 4]>::default(),
            current: 0,
            emitted: 0,
        }
    }

    /// Replace the settings.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    /// Index, in `0..4`, of the vertex currently being buffered.
    pub fn current_vertex(&self) -> usize {
        self.current
    }

    /// Whether no partial quad is buffered: the vertex counter is 0 and every slot is empty.
    pub fn is_idle(&self) -> bool {
        self.current == 0
            && self
                .pending
                .iter()
                .all(|p| p.ops.is_empty() && p.attrs.is_empty())
    }

    /// Number of overlay quads forwarded so far.
    pub fn emitted_quads(&self) -> u64 {
        self.emitted
    }

    /// The downstream sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Stop compositing and return the sink. A partially buffered quad is discarded.
    pub fn into_inner(self) -> S {
        if !self.is_idle() {
            log::trace!("discarding {} buffered vertices", self.current + 1);
        }
        self.sink
    }

    fn slot(&mut self) -> &mut PendingVertex {
        &mut self.pending[self.current]
    }

    /// Resolve the buffered quad to its base region and overlay.
    fn resolve(&self) -> Option<(SpriteRegion, SpriteRegion, OverlayDeclaration)> {
        if !self.pending.iter().all(|p| p.attrs.contains(VertexAttrs::UV)) {
            return None;
        }
        let (u, v) = uv_centroid(self.pending.each_ref().map(|p| p.uv));
        let Some(base) = self.atlas.find_region(u, v) else {
            log::trace!("no sprite at uv centroid ({u}, {v})");
            return None;
        };
        let decl = self.overlays.overlay_for(base.id)?;
        let Some(overlay) = self.atlas.region(decl.overlay_sprite) else {
            log::debug!(
                "skipping overlay: {}",
                OverlayError::MissingOverlayRegion(decl.overlay_sprite)
            );
            return None;
        };
        Some((base, overlay, decl))
    }

    fn flush(&mut self) {
        if let Some((base, overlay, decl)) = self.resolve() {
            for pending in &self.pending {
                let uv = remap_uv(pending.uv, &base, &overlay);
                let (light, color) =
                    relight(pending.light, pending.color, decl.emissive, self.config.full_bright);
                for op in &pending.ops {
                    match *op {
                        VertexOp::Position(p) => self.sink.set_position(p),
                        VertexOp::Uv => self.sink.set_uv(uv),
                        VertexOp::Light => self.sink.set_light(light),
                        VertexOp::Color => self.sink.set_color(color),
                        VertexOp::Normal(n) => self.sink.set_normal(n),
                    }
                }
                self.sink.end_vertex();
            }
            self.emitted += 1;
        }
        for pending in &mut self.pending {
            pending.clear();
        }
        self.current = 0;
    }
}

impl<S, L, I> VertexSink for StreamingQuadCompositor<'_, S, L, I>
where
    S: VertexSink,
    L: OverlayLookup,
    I: SpatialSpriteIndex,
{
    fn set_position(&mut self, position: [f32; 3]) {
        self.slot()
            .record(VertexOp::Position(position), VertexAttrs::POSITION);
    }

    fn set_uv(&mut self, uv: [f32; 2]) {
        let slot = self.slot();
        slot.uv = uv;
        slot.record(VertexOp::Uv, VertexAttrs::UV);
    }

    fn set_light(&mut self, light: Light) {
        let slot = self.slot();
        slot.light = light;
        slot.record(VertexOp::Light, VertexAttrs::LIGHT);
    }

    fn set_color(&mut self, color: Rgba8) {
        let slot = self.slot();
        slot.color = color;
        slot.record(VertexOp::Color, VertexAttrs::COLOR);
    }

    fn set_normal(&mut self, normal: [f32; 3]) {
        self.slot()
            .record(VertexOp::Normal(normal), VertexAttrs::NORMAL);
    }

    fn end_vertex(&mut self) {
        if self.current < 3 {
            self.current += 1;
        } else {
            self.flush();
        }
    }
}
