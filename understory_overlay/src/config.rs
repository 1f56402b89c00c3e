// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositor settings.

use crate::error::ConfigError;
use crate::vertex::Light;

/// Settings shared by the batch resolver and the streaming compositor.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Distance, in model units, that overlay quads are lifted off their base plane.
    pub plane_offset: f32,
    /// Light value used for emissive overlays.
    pub full_bright: Light,
}

impl OverlayConfig {
    /// Default plane offset: small enough to be invisible, large enough to win the depth test.
    pub const PLANE_OFFSET: f32 = 0.001;

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.plane_offset.is_finite() || self.plane_offset < 0.0 {
            return Err(ConfigError::InvalidPlaneOffset(self.plane_offset));
        }
        if self.full_bright.block > 0xFFFF || self.full_bright.sky > 0xFFFF {
            return Err(ConfigError::InvalidFullBright(self.full_bright));
        }
        Ok(())
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            plane_offset: Self::PLANE_OFFSET,
            full_bright: Light::FULL_BRIGHT,
        }
    }
}
