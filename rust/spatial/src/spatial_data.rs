// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized spatial model of a scanned room.
//!
//! Walls own a list of attached elements; doors, windows and openings carry a
//! back-reference to their host wall by id. Both views, and the global
//! relationship list, are derived from the same attachment decisions, so they
//! always agree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capture::SurfaceId;
use crate::types::{Dimensions3D, Orientation3D, Position3D};

/// Kind of non-wall surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Door,
    Window,
    Opening,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Door => "door",
            ElementType::Window => "window",
            ElementType::Opening => "opening",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an element sits in its host wall's 2D frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativePosition {
    /// Metres from the wall's left edge
    pub distance_from_left: f64,
    /// Metres from the wall's bottom edge
    pub distance_from_bottom: f64,
    /// `distance_from_left / width`, in [0, 1]
    pub normalized_x: f64,
    /// `distance_from_bottom / height`, in [0, 1]
    pub normalized_y: f64,
}

/// Wall-owned record of an element attached to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedElement {
    pub element_id: SurfaceId,
    pub element_type: ElementType,
    pub relative_position: RelativePosition,
}

/// How a child surface relates to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipType {
    AttachedTo,
    ContainedIn,
    AdjacentTo,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::AttachedTo => "attachedTo",
            RelationshipType::ContainedIn => "containedIn",
            RelationshipType::AdjacentTo => "adjacentTo",
        }
    }
}

/// Physical description of a relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialConnection {
    pub connection_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Explicit parent/child record between an element and its host wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRelationship {
    pub child_id: SurfaceId,
    pub parent_id: SurfaceId,
    pub relationship_type: RelationshipType,
    pub spatial_connection: SpatialConnection,
}

/// A wall in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSpatialInfo {
    pub identifier: SurfaceId,
    pub position: Position3D,
    pub dimensions: Dimensions3D,
    pub orientation: Orientation3D,
    /// Bounding-box vertices, back face then front face
    pub corners: [Position3D; 8],
    pub attached_elements: Vec<AttachedElement>,
    /// Confidence score in [0, 1]
    pub confidence: f64,
}

impl WallSpatialInfo {
    pub fn area(&self) -> f64 {
        self.dimensions.face_area()
    }

    /// Outward normal (the forward basis vector)
    pub fn normal_vector(&self) -> Position3D {
        self.orientation.forward_vector
    }

    /// Length of the bottom back edge, which spans the wall width
    pub fn length_from_corners(&self) -> f64 {
        self.corners[0].distance_to(&self.corners[1])
    }
}

/// A door, window or opening in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSpatialInfo {
    pub identifier: SurfaceId,
    pub element_type: ElementType,
    pub position: Position3D,
    pub dimensions: Dimensions3D,
    pub orientation: Orientation3D,
    pub corners: [Position3D; 8],
    pub confidence: f64,
    /// Host wall, or `None` when no wall was close enough
    pub parent_wall_id: Option<SurfaceId>,
    pub relative_position_on_wall: Option<RelativePosition>,
}

impl SurfaceSpatialInfo {
    pub fn area(&self) -> f64 {
        self.dimensions.face_area()
    }

    pub fn is_attached(&self) -> bool {
        self.parent_wall_id.is_some()
    }

    /// `(normalized_x, normalized_y)` on the host wall, if attached
    pub fn normalized_wall_position(&self) -> Option<(f64, f64)> {
        self.relative_position_on_wall
            .map(|rel| (rel.normalized_x, rel.normalized_y))
    }
}

/// Every extracted surface of one capture plus their relationships
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomSpatialData {
    pub walls: Vec<WallSpatialInfo>,
    pub doors: Vec<SurfaceSpatialInfo>,
    pub windows: Vec<SurfaceSpatialInfo>,
    pub openings: Vec<SurfaceSpatialInfo>,
    pub surface_relationships: Vec<SurfaceRelationship>,
}

impl RoomSpatialData {
    pub fn wall(&self, id: SurfaceId) -> Option<&WallSpatialInfo> {
        self.walls.iter().find(|w| w.identifier == id)
    }

    /// Door, window or opening with the given id
    pub fn element(&self, id: SurfaceId) -> Option<&SurfaceSpatialInfo> {
        self.elements().find(|e| e.identifier == id)
    }

    /// Doors, then windows, then openings
    pub fn elements(&self) -> impl Iterator<Item = &SurfaceSpatialInfo> {
        self.doors
            .iter()
            .chain(self.windows.iter())
            .chain(self.openings.iter())
    }

    pub fn doors_attached_to(&self, wall_id: SurfaceId) -> Vec<&SurfaceSpatialInfo> {
        attached_to(&self.doors, wall_id)
    }

    pub fn windows_attached_to(&self, wall_id: SurfaceId) -> Vec<&SurfaceSpatialInfo> {
        attached_to(&self.windows, wall_id)
    }

    pub fn openings_attached_to(&self, wall_id: SurfaceId) -> Vec<&SurfaceSpatialInfo> {
        attached_to(&self.openings, wall_id)
    }

    /// All elements whose parent is `wall_id`, doors first
    pub fn elements_attached_to(&self, wall_id: SurfaceId) -> Vec<&SurfaceSpatialInfo> {
        self.elements()
            .filter(|e| e.parent_wall_id == Some(wall_id))
            .collect()
    }

    pub fn relationships_for_wall(&self, wall_id: SurfaceId) -> Vec<&SurfaceRelationship> {
        self.surface_relationships
            .iter()
            .filter(|r| r.parent_id == wall_id)
            .collect()
    }

    /// Total wall area minus the area of attached elements, never negative
    ///
    /// Orphaned elements do not count.
    pub fn effective_wall_area(&self) -> f64 {
        let wall_area: f64 = self.walls.iter().map(WallSpatialInfo::area).sum();
        let element_area: f64 = self
            .elements()
            .filter(|e| e.parent_wall_id.is_some_and(|id| self.wall(id).is_some()))
            .map(SurfaceSpatialInfo::area)
            .sum();

        (wall_area - element_area).max(0.0)
    }

    /// Whether wall attachment lists, element back-references and the
    /// relationship list describe the same parent/child pairs
    pub fn is_consistent(&self) -> bool {
        let from_walls: Vec<(SurfaceId, SurfaceId)> = self
            .walls
            .iter()
            .flat_map(|w| w.attached_elements.iter().map(move |a| (w.identifier, a.element_id)))
            .collect();

        let from_elements: Vec<(SurfaceId, SurfaceId)> = self
            .elements()
            .filter_map(|e| e.parent_wall_id.map(|p| (p, e.identifier)))
            .collect();

        let from_relationships: Vec<(SurfaceId, SurfaceId)> = self
            .surface_relationships
            .iter()
            .map(|r| (r.parent_id, r.child_id))
            .collect();

        same_pairs(&from_walls, &from_elements) && same_pairs(&from_walls, &from_relationships)
    }
}

fn attached_to(surfaces: &[SurfaceSpatialInfo], wall_id: SurfaceId) -> Vec<&SurfaceSpatialInfo> {
    surfaces
        .iter()
        .filter(|s| s.parent_wall_id == Some(wall_id))
        .collect()
}

fn same_pairs(a: &[(SurfaceId, SurfaceId)], b: &[(SurfaceId, SurfaceId)]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort();
    b.sort();
    a == b
}
