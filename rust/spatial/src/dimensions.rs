// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room bounding dimensions from wall extents

use serde::{Deserialize, Serialize};

use crate::capture::CapturedSurface;
use crate::config::SpatialConfig;
use crate::geometry::{calculate_corners, extract_orientation, extract_position};
use crate::types::Position3D;

/// Bounding size of a room in metres
///
/// `area` is always `width * depth` of the values given at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DimensionsRepr")]
pub struct RoomDimensions {
    width: f64,
    height: f64,
    depth: f64,
    area: f64,
}

/// Wire form accepted when reading dimensions back; any `area` is recomputed
#[derive(Deserialize)]
struct DimensionsRepr {
    width: f64,
    height: f64,
    depth: f64,
}

impl From<DimensionsRepr> for RoomDimensions {
    fn from(repr: DimensionsRepr) -> Self {
        RoomDimensions::new(repr.width, repr.height, repr.depth)
    }
}

impl RoomDimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            area: width * depth,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Floor area in square metres
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }
}

/// Axis-aligned world bounds of a set of walls
#[derive(Debug, Clone)]
pub struct RoomBounds {
    pub min: Position3D,
    pub max: Position3D,
    /// Number of points added
    pub sample_count: usize,
}

impl RoomBounds {
    /// Create new bounds initialized to invalid state
    pub fn new() -> Self {
        Self {
            min: Position3D::new(f64::MAX, f64::MAX, f64::MAX),
            max: Position3D::new(f64::MIN, f64::MIN, f64::MIN),
            sample_count: 0,
        }
    }

    /// Bounds of every wall's eight world-space corners
    ///
    /// For an axis-aligned wall this is `position ± dimensions / 2` on each
    /// axis. Walls with non-finite geometry are skipped.
    pub fn from_walls(walls: &[CapturedSurface]) -> Self {
        let mut bounds = Self::new();

        for wall in walls {
            let position = extract_position(&wall.transform);
            let orientation = extract_orientation(&wall.transform);
            let corners = calculate_corners(&position, &wall.dimensions, &orientation);

            if corners.iter().all(Position3D::is_finite) {
                for corner in &corners {
                    bounds.expand(corner);
                }
            } else {
                tracing::warn!(id = %wall.identifier, "Skipping wall with non-finite geometry");
            }
        }

        bounds
    }

    /// Check if bounds are valid (at least one point added)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.sample_count > 0
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand(&mut self, p: &Position3D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
        self.sample_count += 1;
    }

    /// `(width, height, depth)`, zero when empty
    pub fn size(&self) -> (f64, f64, f64) {
        if !self.is_valid() {
            return (0.0, 0.0, 0.0);
        }
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Unclamped horizontal footprint (width x depth)
    pub fn footprint_area(&self) -> f64 {
        let (width, _, depth) = self.size();
        width * depth
    }
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self::new()
    }
}

/// Room dimensions from wall extents, floored to the configured minimums
pub fn calculate_room_dimensions(walls: &[CapturedSurface], config: &SpatialConfig) -> RoomDimensions {
    let (width, height, depth) = RoomBounds::from_walls(walls).size();

    let dimensions = RoomDimensions::new(
        width.max(config.min_room_width),
        height.max(config.min_room_height),
        depth.max(config.min_room_depth),
    );

    tracing::debug!(
        raw_width = width,
        raw_height = height,
        raw_depth = depth,
        area = dimensions.area(),
        "Calculated room dimensions"
    );

    dimensions
}
