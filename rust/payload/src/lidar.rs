// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room measurements as sent to the design service

use roomscan_spatial::{RoomDimensions, RoomFeatures, RoomScanData, RoomSpatialLayout, RoomType};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A sampled LiDAR point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LidarPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl LidarPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            confidence: full_confidence(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Scan summary embedded in a design request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LidarData {
    pub room_dimensions: RoomDimensions,
    /// Not populated by the capture flow
    #[serde(default)]
    pub point_cloud: Vec<LidarPoint>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub room_type: RoomType,
    pub room_features: RoomFeatures,
    /// `None` (serialized as `null`) when no scan was available
    #[serde(default)]
    pub spatial_layout: Option<RoomSpatialLayout>,
}

impl LidarData {
    pub fn from_scan(scan: &RoomScanData) -> Self {
        let layout = scan.simplified_spatial_layout();
        tracing::debug!(
            room_type = %scan.room_type(),
            walls = layout.walls.len(),
            "Built LiDAR payload from scan"
        );

        Self {
            room_dimensions: *scan.dimensions(),
            point_cloud: Vec::new(),
            timestamp: OffsetDateTime::now_utc(),
            room_type: scan.room_type(),
            room_features: *scan.features(),
            spatial_layout: Some(layout),
        }
    }

    /// Stand-in room used when the user skipped scanning
    pub fn demo() -> Self {
        tracing::warn!("No scan available, using demo room data");

        Self {
            room_dimensions: RoomDimensions::new(4.0, 2.8, 3.0),
            point_cloud: Vec::new(),
            timestamp: OffsetDateTime::now_utc(),
            room_type: RoomType::LivingRoom,
            room_features: RoomFeatures {
                walls: 4,
                doors: 1,
                windows: 2,
                openings: 0,
            },
            spatial_layout: None,
        }
    }

    pub fn has_spatial_layout(&self) -> bool {
        self.spatial_layout.is_some()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
