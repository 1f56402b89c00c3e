// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build statistics and rate-limited reporting of malformed regions.

use alloc::vec::Vec;

use crate::error::RegionError;
use crate::options::BuildOptions;
use crate::types::SpriteRegion;

/// Summary of one index build.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Regions that passed validation.
    pub accepted: usize,
    /// Regions that were skipped as malformed.
    pub rejected: usize,
    /// Rejections that were reported through `log` (never more than
    /// [`BuildOptions::max_reported`]).
    pub reported: usize,
}

/// Counts rejections and logs only the first few.
#[derive(Debug)]
pub(crate) struct RejectLog {
    limit: usize,
    stats: BuildStats,
}

impl RejectLog {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            stats: BuildStats::default(),
        }
    }

    pub(crate) fn accept(&mut self) {
        self.stats.accepted += 1;
    }

    pub(crate) fn reject(&mut self, err: &RegionError) {
        self.stats.rejected += 1;
        if self.stats.reported < self.limit {
            self.stats.reported += 1;
            log::error!("skipping sprite: {err}");
        }
    }

    pub(crate) fn finish(self, index: &str) -> BuildStats {
        log::debug!(
            "{index}: indexed {} sprite regions, skipped {}",
            self.stats.accepted,
            self.stats.rejected
        );
        self.stats
    }
}

/// Validate `regions`, returning the well-formed ones in input order and the log of rejections.
pub(crate) fn accept_regions(
    regions: &[SpriteRegion],
    options: &BuildOptions,
) -> (Vec<SpriteRegion>, RejectLog) {
    let mut rejects = RejectLog::new(options.max_reported);
    let mut out = Vec::with_capacity(regions.len());
    for region in regions {
        match region.validate(options.epsilon) {
            Ok(()) => {
                rejects.accept();
                out.push(*region);
            }
            Err(err) => rejects.reject(&err),
        }
    }
    (out, rejects)
}
