// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derived statistics over a finished scan

use serde::Serialize;

use crate::scan::RoomScanData;
use crate::spatial_data::WallSpatialInfo;
use crate::types::Position3D;

/// Wall usage summary
#[derive(Debug, Clone, Serialize)]
pub struct RoomLayoutAnalysis<'a> {
    /// Widest wall, first one on ties
    pub longest_wall: Option<&'a WallSpatialInfo>,
    /// Walls with nothing attached
    pub clear_walls: Vec<&'a WallSpatialInfo>,
    /// Walls carrying at least one window
    pub window_walls: Vec<&'a WallSpatialInfo>,
    pub effective_wall_area: f64,
    pub total_windows: usize,
    pub total_doors: usize,
}

impl RoomLayoutAnalysis<'_> {
    pub fn natural_light_sides(&self) -> usize {
        self.window_walls.len()
    }
}

pub fn analyze_room_layout(scan: &RoomScanData) -> RoomLayoutAnalysis<'_> {
    let data = scan.spatial_data();

    let longest_wall = data.walls.iter().fold(None, |best: Option<&WallSpatialInfo>, wall| match best {
        Some(b) if b.dimensions.width >= wall.dimensions.width => Some(b),
        _ => Some(wall),
    });

    RoomLayoutAnalysis {
        longest_wall,
        clear_walls: data
            .walls
            .iter()
            .filter(|w| data.elements_attached_to(w.identifier).is_empty())
            .collect(),
        window_walls: data
            .walls
            .iter()
            .filter(|w| !data.windows_attached_to(w.identifier).is_empty())
            .collect(),
        effective_wall_area: data.effective_wall_area(),
        total_windows: data.windows.len(),
        total_doors: data.doors.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl LightingQuality {
    /// Bucket a window-to-floor area ratio
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.15 {
            LightingQuality::Excellent
        } else if ratio > 0.10 {
            LightingQuality::Good
        } else if ratio > 0.05 {
            LightingQuality::Fair
        } else {
            LightingQuality::Poor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LightingQuality::Excellent => "Excellent natural lighting with large windows",
            LightingQuality::Good => "Good natural lighting",
            LightingQuality::Fair => "Fair natural lighting",
            LightingQuality::Poor => "Limited natural lighting",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NaturalLightAnalysis {
    pub total_window_area: f64,
    pub window_to_floor_ratio: f64,
    pub lighting_quality: LightingQuality,
    /// Normals of the walls hosting each attached window
    pub window_orientations: Vec<Position3D>,
}

impl NaturalLightAnalysis {
    pub fn has_natural_light(&self) -> bool {
        self.total_window_area > 0.0
    }

    pub fn is_well_lit(&self) -> bool {
        matches!(
            self.lighting_quality,
            LightingQuality::Excellent | LightingQuality::Good
        )
    }
}

pub fn analyze_natural_light(scan: &RoomScanData) -> NaturalLightAnalysis {
    let data = scan.spatial_data();

    let total_window_area: f64 = data.windows.iter().map(|w| w.area()).sum();
    let window_orientations = data
        .windows
        .iter()
        .filter_map(|w| w.parent_wall_id)
        .filter_map(|id| data.wall(id))
        .map(WallSpatialInfo::normal_vector)
        .collect();

    // Floor area is clamped to at least 4 sq m, so the ratio is always finite
    let floor_area = scan.dimensions().area();
    let window_to_floor_ratio = if floor_area > 0.0 {
        total_window_area / floor_area
    } else {
        0.0
    };

    NaturalLightAnalysis {
        total_window_area,
        window_to_floor_ratio,
        lighting_quality: LightingQuality::from_ratio(window_to_floor_ratio),
        window_orientations,
    }
}
