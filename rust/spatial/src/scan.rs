// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregate for one completed room scan

use serde::{Deserialize, Serialize};

use crate::capture::CapturedRoom;
use crate::classifier::{classify_room, RoomType};
use crate::config::SpatialConfig;
use crate::dimensions::{calculate_room_dimensions, RoomDimensions};
use crate::extractor::extract_spatial_data;
use crate::layout::{simplify, RoomSpatialLayout};
use crate::spatial_data::RoomSpatialData;

/// Surface counts of a capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFeatures {
    pub walls: usize,
    pub doors: usize,
    pub windows: usize,
    pub openings: usize,
}

impl RoomFeatures {
    pub fn from_capture(capture: &CapturedRoom) -> Self {
        Self {
            walls: capture.walls.len(),
            doors: capture.doors.len(),
            windows: capture.windows.len(),
            openings: capture.openings.len(),
        }
    }
}

/// Everything derived from one capture
///
/// Built in one pass by [`RoomScanData::from_capture`] and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RoomScanData {
    capture: CapturedRoom,
    room_type: RoomType,
    dimensions: RoomDimensions,
    features: RoomFeatures,
    spatial_data: RoomSpatialData,
    room_description: String,
}

impl RoomScanData {
    /// Run classification, dimensioning and surface extraction over a capture
    ///
    /// Never fails: empty or partial captures produce default values.
    pub fn from_capture(capture: CapturedRoom, config: &SpatialConfig) -> Self {
        let room_type = classify_room(&capture, config);
        let dimensions = calculate_room_dimensions(&capture.walls, config);
        let features = RoomFeatures::from_capture(&capture);
        let spatial_data = extract_spatial_data(&capture, config);
        let room_description = describe_room(room_type, &dimensions, &features);

        tracing::info!(
            room_type = %room_type,
            width = dimensions.width(),
            depth = dimensions.depth(),
            height = dimensions.height(),
            area = dimensions.area(),
            walls = features.walls,
            doors = features.doors,
            windows = features.windows,
            openings = features.openings,
            "Room scan processed"
        );

        Self {
            capture,
            room_type,
            dimensions,
            features,
            spatial_data,
            room_description,
        }
    }

    pub fn capture(&self) -> &CapturedRoom {
        &self.capture
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn dimensions(&self) -> &RoomDimensions {
        &self.dimensions
    }

    pub fn features(&self) -> &RoomFeatures {
        &self.features
    }

    pub fn spatial_data(&self) -> &RoomSpatialData {
        &self.spatial_data
    }

    pub fn room_description(&self) -> &str {
        &self.room_description
    }

    /// Wire form of the spatial model
    pub fn simplified_spatial_layout(&self) -> RoomSpatialLayout {
        simplify(&self.spatial_data)
    }
}

/// One-line summary such as
/// `Bedroom, 4.0m × 3.0m × 2.8m (12.0 sq m) with 4 walls, 1 door, 2 windows and no openings`
pub fn describe_room(room_type: RoomType, dimensions: &RoomDimensions, features: &RoomFeatures) -> String {
    format!(
        "{}, {:.1}m × {:.1}m × {:.1}m ({:.1} sq m) with {}, {}, {} and {}",
        room_type.display_name(),
        dimensions.width(),
        dimensions.depth(),
        dimensions.height(),
        dimensions.area(),
        count_noun(features.walls, "wall"),
        count_noun(features.doors, "door"),
        count_noun(features.windows, "window"),
        count_noun(features.openings, "opening"),
    )
}

fn count_noun(count: usize, noun: &str) -> String {
    match count {
        0 => format!("no {noun}s"),
        1 => format!("1 {noun}"),
        n => format!("{n} {noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CapturedSurface, RoomSection, SectionLabel, SurfaceId};
    use crate::types::{Dimensions3D, Position3D};

    #[test]
    fn test_description() {
        let features = RoomFeatures {
            walls: 4,
            doors: 1,
            windows: 2,
            openings: 0,
        };
        let text = describe_room(RoomType::Bedroom, &RoomDimensions::new(4.0, 2.8, 3.0), &features);
        assert_eq!(
            text,
            "Bedroom, 4.0m × 3.0m × 2.8m (12.0 sq m) with 4 walls, 1 door, 2 windows and no openings"
        );
    }

    #[test]
    fn test_empty_capture() {
        let scan = RoomScanData::from_capture(CapturedRoom::empty(), &SpatialConfig::default());

        assert_eq!(scan.room_type(), RoomType::Bathroom);
        assert_eq!(scan.dimensions().area(), 4.0);
        assert_eq!(scan.features(), &RoomFeatures::default());
        assert!(scan.spatial_data().walls.is_empty());
        assert!(scan.room_description().starts_with("Bathroom, 2.0m × 2.0m × 2.4m"));
    }

    #[test]
    fn test_features_and_layout() {
        let mut capture = CapturedRoom::empty();
        capture.walls.push(CapturedSurface::axis_aligned(
            SurfaceId::from_u128(1),
            Position3D::new(0.0, 1.4, 0.0),
            Dimensions3D::new(4.0, 2.8, 0.0),
        ));
        capture.doors.push(CapturedSurface::axis_aligned(
            SurfaceId::from_u128(2),
            Position3D::new(0.5, 1.0, 0.0),
            Dimensions3D::new(0.9, 2.0, 0.0),
        ));
        capture.sections = Some(vec![RoomSection::new(SectionLabel::Kitchen)]);

        let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());
        assert_eq!(scan.room_type(), RoomType::Kitchen);
        assert_eq!(scan.features().walls, 1);
        assert_eq!(scan.features().doors, 1);

        let layout = scan.simplified_spatial_layout();
        assert_eq!(layout.walls[0].attached_elements, vec![SurfaceId::from_u128(2).to_string()]);
        assert_eq!(layout.doors[0].wall_id, SurfaceId::from_u128(1).to_string());
    }
}
