// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire-safe room layout
//!
//! Flattens [`RoomSpatialData`] into the shape sent to the design service:
//! walls tagged with a cardinal direction and the ids of their elements,
//! elements with their host wall id and position in that wall's frame.

use serde::{Deserialize, Serialize};

use crate::spatial_data::{ElementType, RelativePosition, RoomSpatialData, SurfaceSpatialInfo};
use crate::types::{Dimensions3D, Position3D};

/// Coarse direction a wall faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalOrientation {
    North,
    South,
    East,
    West,
}

impl CardinalOrientation {
    /// Bucket a forward vector by its dominant horizontal component
    ///
    /// `+x` is east, `-x` west, `-z` north and `+z` south. Equal magnitudes
    /// fall on the z axis.
    pub fn from_forward(forward: &Position3D) -> Self {
        if forward.x.abs() > forward.z.abs() {
            if forward.x >= 0.0 {
                CardinalOrientation::East
            } else {
                CardinalOrientation::West
            }
        } else if forward.z > 0.0 {
            CardinalOrientation::South
        } else {
            CardinalOrientation::North
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalOrientation::North => "north",
            CardinalOrientation::South => "south",
            CardinalOrientation::East => "east",
            CardinalOrientation::West => "west",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallLayout {
    pub id: String,
    pub orientation: CardinalOrientation,
    pub dimensions: Dimensions3D,
    pub position: Position3D,
    pub attached_elements: Vec<String>,
}

/// Element position in its wall's frame, zero when orphaned
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionOnWall {
    pub from_left: f64,
    pub from_bottom: f64,
    pub normalized_x: f64,
    pub normalized_y: f64,
}

impl From<RelativePosition> for PositionOnWall {
    fn from(rel: RelativePosition) -> Self {
        Self {
            from_left: rel.distance_from_left,
            from_bottom: rel.distance_from_bottom,
            normalized_x: rel.normalized_x,
            normalized_y: rel.normalized_y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementLayout {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub dimensions: Dimensions3D,
    /// Host wall id, empty for orphaned elements
    pub wall_id: String,
    pub position_on_wall: PositionOnWall,
}

impl ElementLayout {
    pub fn is_orphaned(&self) -> bool {
        self.wall_id.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomSpatialLayout {
    pub walls: Vec<WallLayout>,
    pub windows: Vec<ElementLayout>,
    pub doors: Vec<ElementLayout>,
    pub openings: Vec<ElementLayout>,
}

impl RoomSpatialLayout {
    pub fn wall(&self, id: &str) -> Option<&WallLayout> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &ElementLayout> {
        self.doors
            .iter()
            .chain(self.windows.iter())
            .chain(self.openings.iter())
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Project the spatial model into its wire form
pub fn simplify(data: &RoomSpatialData) -> RoomSpatialLayout {
    let walls = data
        .walls
        .iter()
        .map(|wall| WallLayout {
            id: wall.identifier.to_string(),
            orientation: CardinalOrientation::from_forward(&wall.normal_vector()),
            dimensions: wall.dimensions,
            position: wall.position,
            attached_elements: data
                .elements_attached_to(wall.identifier)
                .into_iter()
                .map(|e| e.identifier.to_string())
                .collect(),
        })
        .collect();

    let layout = RoomSpatialLayout {
        walls,
        windows: data.windows.iter().map(element_layout).collect(),
        doors: data.doors.iter().map(element_layout).collect(),
        openings: data.openings.iter().map(element_layout).collect(),
    };

    tracing::debug!(
        walls = layout.walls.len(),
        elements = layout.elements().count(),
        orphaned = layout.elements().filter(|e| e.is_orphaned()).count(),
        "Simplified spatial layout"
    );

    layout
}

fn element_layout(surface: &SurfaceSpatialInfo) -> ElementLayout {
    ElementLayout {
        id: surface.identifier.to_string(),
        element_type: surface.element_type,
        dimensions: surface.dimensions,
        wall_id: surface
            .parent_wall_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        position_on_wall: surface
            .relative_position_on_wall
            .map(PositionOnWall::from)
            .unwrap_or_default(),
    }
}
