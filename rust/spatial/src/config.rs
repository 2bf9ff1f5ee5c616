// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunable constants for the extraction pipeline

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which area the room classifier feeds into its size heuristic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorAreaSource {
    /// Horizontal footprint of all wall bounds (width x depth, unclamped)
    #[default]
    Footprint,
    /// Width x depth of the first captured wall only
    FirstWall,
}

/// Configuration for spatial extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialConfig {
    /// Maximum wall distance (metres, exclusive) for an opening to attach
    pub attachment_threshold: f64,
    /// Distance written into every relationship's spatial connection
    pub relationship_distance: f64,
    /// Distances closer than this count as a tie between candidate walls
    pub tie_epsilon: f64,
    /// Minimum room width (metres)
    pub min_room_width: f64,
    /// Minimum room height (metres)
    pub min_room_height: f64,
    /// Minimum room depth (metres)
    pub min_room_depth: f64,
    /// Rooms below this area (sq m) are bathrooms
    pub bathroom_max_area: f64,
    /// Rooms below this area (sq m) are bedrooms
    pub bedroom_max_area: f64,
    /// Area used by the classifier fallback
    pub area_source: FloorAreaSource,
    /// Run independent extraction steps on the rayon pool
    pub parallel_extraction: bool,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            attachment_threshold: 1.0,
            relationship_distance: 0.0,
            tie_epsilon: 1e-9,
            min_room_width: 2.0,
            min_room_height: 2.4,
            min_room_depth: 2.0,
            bathroom_max_area: 8.0,
            bedroom_max_area: 15.0,
            area_source: FloorAreaSource::Footprint,
            parallel_extraction: true,
        }
    }
}

impl SpatialConfig {
    /// Check that every numeric field is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("attachment_threshold", self.attachment_threshold),
            ("relationship_distance", self.relationship_distance),
            ("tie_epsilon", self.tie_epsilon),
            ("min_room_width", self.min_room_width),
            ("min_room_height", self.min_room_height),
            ("min_room_depth", self.min_room_depth),
            ("bathroom_max_area", self.bathroom_max_area),
            ("bedroom_max_area", self.bedroom_max_area),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if self.bathroom_max_area > self.bedroom_max_area {
            return Err(Error::InvalidConfig(format!(
                "bathroom_max_area ({}) exceeds bedroom_max_area ({})",
                self.bathroom_max_area, self.bedroom_max_area
            )));
        }

        Ok(())
    }
}
