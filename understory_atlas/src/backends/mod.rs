// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite index implementations.
//!
//! - `quadtree`: recursive four-way split of the unit square; the general-purpose atlas index.
//! - `interval`: regions sorted along u with a running reach; suited to small candidate sets
//!   where the caller already knows which base sprites matter.

pub mod interval;
pub mod quadtree;
