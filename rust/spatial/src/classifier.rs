// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room type classification

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capture::{CapturedRoom, SectionLabel};
use crate::config::{FloorAreaSource, SpatialConfig};
use crate::dimensions::RoomBounds;

/// Canonical room type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Bedroom,
    Kitchen,
    Bathroom,
    DiningRoom,
    LivingRoom,
}

impl RoomType {
    /// Lowercase, underscore-separated name (`"living_room"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "bedroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
            RoomType::DiningRoom => "dining_room",
            RoomType::LivingRoom => "living_room",
        }
    }

    /// Title-cased name for display (`"Living Room"`)
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::Bathroom => "Bathroom",
            RoomType::DiningRoom => "Dining Room",
            RoomType::LivingRoom => "Living Room",
        }
    }

    pub fn from_section_label(label: SectionLabel) -> Option<Self> {
        match label {
            SectionLabel::Bedroom => Some(RoomType::Bedroom),
            SectionLabel::Kitchen => Some(RoomType::Kitchen),
            SectionLabel::Bathroom => Some(RoomType::Bathroom),
            SectionLabel::DiningRoom => Some(RoomType::DiningRoom),
            SectionLabel::LivingRoom => Some(RoomType::LivingRoom),
            SectionLabel::Unidentified => None,
        }
    }

    /// Size heuristic used when no section label applies
    pub fn from_floor_area(area: f64, config: &SpatialConfig) -> Self {
        if area < config.bathroom_max_area {
            RoomType::Bathroom
        } else if area < config.bedroom_max_area {
            RoomType::Bedroom
        } else {
            RoomType::LivingRoom
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area fed into the size heuristic
///
/// Zero when the capture has no walls.
pub fn heuristic_floor_area(capture: &CapturedRoom, config: &SpatialConfig) -> f64 {
    match config.area_source {
        FloorAreaSource::Footprint => RoomBounds::from_walls(&capture.walls).footprint_area(),
        FloorAreaSource::FirstWall => capture
            .walls
            .first()
            .map(|w| w.dimensions.width * w.dimensions.depth)
            .unwrap_or(0.0),
    }
}

/// Determine the room type of a capture
///
/// The first section whose label names a room type wins. Without one, the
/// floor-area heuristic decides.
pub fn classify_room(capture: &CapturedRoom, config: &SpatialConfig) -> RoomType {
    let labelled = capture
        .sections
        .iter()
        .flatten()
        .find_map(|section| RoomType::from_section_label(section.label));

    if let Some(room_type) = labelled {
        tracing::debug!(room_type = %room_type, "Room type from section label");
        return room_type;
    }

    let area = heuristic_floor_area(capture, config);
    let room_type = RoomType::from_floor_area(area, config);
    tracing::debug!(area, room_type = %room_type, "Room type from floor area");
    room_type
}
