// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-build render state passed explicitly through composition calls.

use crate::pass::BlendMode;

/// Render state for one geometry build.
///
/// Drawing an overlay can re-enter the same rendering path (the overlay itself goes through
/// the normal pipeline). The context tracks that nesting so overlays are only synthesized at
/// the top level, never on an overlay or on a nested child part.
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    depth: u32,
    pass: Option<BlendMode>,
}

impl RenderContext {
    /// A fresh top-level context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth; `0` at the top level.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether overlay synthesis is allowed here.
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }

    /// Run `f` one level deeper.
    pub fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    /// Pass geometry is currently being drawn into, if known.
    pub fn pass(&self) -> Option<BlendMode> {
        self.pass
    }

    /// Run `f` with the current pass set to `pass`, restoring the previous pass afterwards.
    pub fn with_pass<R>(&mut self, pass: BlendMode, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.pass.replace(pass);
        let out = f(self);
        self.pass = previous;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_restores_depth() {
        let mut ctx = RenderContext::new();
        assert!(ctx.is_top_level());
        let inner = ctx.nested(|ctx| {
            assert!(!ctx.is_top_level());
            ctx.nested(|ctx| ctx.depth())
        });
        assert_eq!(inner, 2);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn pass_is_scoped() {
        let mut ctx = RenderContext::new();
        ctx.with_pass(BlendMode::Solid, |ctx| {
            assert_eq!(ctx.pass(), Some(BlendMode::Solid));
            ctx.with_pass(BlendMode::Translucent, |ctx| {
                assert_eq!(ctx.pass(), Some(BlendMode::Translucent));
            });
            assert_eq!(ctx.pass(), Some(BlendMode::Solid));
        });
        assert_eq!(ctx.pass(), None);
    }
}
