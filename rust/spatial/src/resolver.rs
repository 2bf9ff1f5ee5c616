// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relationship resolution between openings and walls
//!
//! Each door, window and opening is matched against the walls exactly once
//! ([`find_parent_wall`]). The decisions are kept in an [`AttachmentTable`]
//! and every derived view (element back-references, wall attachment lists,
//! relationship records) is built from that table.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::capture::SurfaceId;
use crate::config::SpatialConfig;
use crate::spatial_data::{
    AttachedElement, ElementType, RelationshipType, RelativePosition, RoomSpatialData,
    SpatialConnection, SurfaceRelationship, SurfaceSpatialInfo, WallSpatialInfo,
};
use crate::types::Position3D;

/// Extents below this are treated as zero when normalizing
const MIN_EXTENT: f64 = 1e-9;

/// Connection label for doors and windows set into a wall
pub const WALL_MOUNTED: &str = "wall_mounted";

/// Connection label for openings cut through a wall
pub const WALL_CUTOUT: &str = "wall_cutout";

/// Nearest wall accepted as a surface's parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentMatch {
    pub wall_id: SurfaceId,
    /// Centre-to-centre distance in metres
    pub distance: f64,
}

/// Find the wall whose centre is nearest to `surface`
///
/// Returns `None` when there are no walls or the nearest one is at or beyond
/// `config.attachment_threshold`. Walls within `config.tie_epsilon` of the
/// minimum distance tie; the smallest wall id wins.
pub fn find_parent_wall(
    surface: &SurfaceSpatialInfo,
    walls: &[WallSpatialInfo],
    config: &SpatialConfig,
) -> Option<ParentMatch> {
    let nearest = wall_distances(surface, walls)
        .map(|(_, d)| d)
        .fold(f64::INFINITY, f64::min);

    // Ties are measured against the true minimum
    let best = wall_distances(surface, walls)
        .filter(|&(_, distance)| distance <= nearest + config.tie_epsilon)
        .min_by_key(|&(wall_id, _)| wall_id)
        .map(|(wall_id, distance)| ParentMatch { wall_id, distance });

    best.filter(|m| m.distance < config.attachment_threshold)
}

fn wall_distances<'a>(
    surface: &'a SurfaceSpatialInfo,
    walls: &'a [WallSpatialInfo],
) -> impl Iterator<Item = (SurfaceId, f64)> + 'a {
    walls
        .iter()
        .map(move |wall| (wall.identifier, surface.position.distance_to(&wall.position)))
        .filter(|(_, distance)| distance.is_finite())
}

/// Position of `surface` in the wall's own 2D frame
///
/// The offset from the wall's bottom-left corner is projected onto the wall's
/// right and up axes, so rotated walls are handled. Distances are clamped to
/// the wall extents and the normalized values to [0, 1].
pub fn relative_position_on_wall(
    surface: &SurfaceSpatialInfo,
    wall: &WallSpatialInfo,
) -> RelativePosition {
    let right = wall
        .orientation
        .right_vector
        .normalized()
        .unwrap_or(Position3D::new(1.0, 0.0, 0.0));
    let up = wall
        .orientation
        .up_vector
        .normalized()
        .unwrap_or(Position3D::new(0.0, 1.0, 0.0));

    let width = wall.dimensions.width.max(0.0);
    let height = wall.dimensions.height.max(0.0);

    let bottom_left = wall.position - right * (width / 2.0) - up * (height / 2.0);
    let offset = surface.position - bottom_left;

    let distance_from_left = clamp_extent(offset.dot(&right), width);
    let distance_from_bottom = clamp_extent(offset.dot(&up), height);

    RelativePosition {
        distance_from_left,
        distance_from_bottom,
        normalized_x: normalize(distance_from_left, width),
        normalized_y: normalize(distance_from_bottom, height),
    }
}

fn clamp_extent(value: f64, extent: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, extent)
    } else {
        0.0
    }
}

fn normalize(distance: f64, extent: f64) -> f64 {
    if extent < MIN_EXTENT {
        return 0.0;
    }
    (distance / extent).clamp(0.0, 1.0)
}

/// Resolved attachment of one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    pub wall_id: SurfaceId,
    pub distance: f64,
    pub relative_position: RelativePosition,
}

/// Attachment decisions keyed by element id
///
/// Elements absent from the table are orphaned.
#[derive(Debug, Default)]
pub struct AttachmentTable {
    entries: FxHashMap<(ElementType, SurfaceId), Attachment>,
    resolved: usize,
}

impl AttachmentTable {
    /// Resolve each element once against `walls`
    ///
    /// Elements are keyed by kind and id. A repeated key is logged and
    /// reuses the first decision.
    pub fn resolve<'a>(
        walls: &[WallSpatialInfo],
        elements: impl IntoIterator<Item = &'a SurfaceSpatialInfo>,
        config: &SpatialConfig,
    ) -> Self {
        let wall_index: FxHashMap<SurfaceId, &WallSpatialInfo> =
            walls.iter().map(|w| (w.identifier, w)).collect();

        let mut entries = FxHashMap::default();
        let mut seen: FxHashSet<(ElementType, SurfaceId)> = FxHashSet::default();

        for element in elements {
            let key = (element.element_type, element.identifier);
            if !seen.insert(key) {
                tracing::warn!(
                    id = %element.identifier,
                    element_type = %element.element_type,
                    "Duplicate element id, reusing first attachment"
                );
                continue;
            }

            let Some(parent) = find_parent_wall(element, walls, config) else {
                tracing::warn!(
                    id = %element.identifier,
                    element_type = %element.element_type,
                    "No wall within attachment threshold"
                );
                continue;
            };

            if let Some(wall) = wall_index.get(&parent.wall_id) {
                entries.insert(
                    key,
                    Attachment {
                        wall_id: parent.wall_id,
                        distance: parent.distance,
                        relative_position: relative_position_on_wall(element, wall),
                    },
                );
            }
        }

        Self {
            entries,
            resolved: seen.len(),
        }
    }

    pub fn get(&self, element_type: ElementType, element_id: SurfaceId) -> Option<&Attachment> {
        self.entries.get(&(element_type, element_id))
    }

    pub fn attached_count(&self) -> usize {
        self.entries.len()
    }

    pub fn orphaned_count(&self) -> usize {
        self.resolved - self.entries.len()
    }

    /// Write the decision into an element's parent fields
    pub fn apply(&self, element: &mut SurfaceSpatialInfo) {
        match self.get(element.element_type, element.identifier) {
            Some(attachment) => {
                element.parent_wall_id = Some(attachment.wall_id);
                element.relative_position_on_wall = Some(attachment.relative_position);
            }
            None => {
                element.parent_wall_id = None;
                element.relative_position_on_wall = None;
            }
        }
    }
}

/// Attached-element records for one wall
///
/// Lists every element whose parent is `wall_id`: doors, then windows, then
/// openings, each in input order.
pub fn build_attached_elements(
    wall_id: SurfaceId,
    doors: &[SurfaceSpatialInfo],
    windows: &[SurfaceSpatialInfo],
    openings: &[SurfaceSpatialInfo],
) -> Vec<AttachedElement> {
    doors
        .iter()
        .chain(windows.iter())
        .chain(openings.iter())
        .filter(|e| e.parent_wall_id == Some(wall_id))
        .map(|e| AttachedElement {
            element_id: e.identifier,
            element_type: e.element_type,
            relative_position: e.relative_position_on_wall.unwrap_or_default(),
        })
        .collect()
}

/// One relationship record per attached element
///
/// Doors and windows are `attachedTo` their wall, openings are `containedIn`
/// it. The contact area is the element's face area.
pub fn build_surface_relationships(
    doors: &[SurfaceSpatialInfo],
    windows: &[SurfaceSpatialInfo],
    openings: &[SurfaceSpatialInfo],
    config: &SpatialConfig,
) -> Vec<SurfaceRelationship> {
    doors
        .iter()
        .chain(windows.iter())
        .chain(openings.iter())
        .filter_map(|e| {
            let parent_id = e.parent_wall_id?;
            let (relationship_type, connection_type) = match e.element_type {
                ElementType::Door | ElementType::Window => (RelationshipType::AttachedTo, WALL_MOUNTED),
                ElementType::Opening => (RelationshipType::ContainedIn, WALL_CUTOUT),
            };

            Some(SurfaceRelationship {
                child_id: e.identifier,
                parent_id,
                relationship_type,
                spatial_connection: SpatialConnection {
                    connection_type: connection_type.to_string(),
                    contact_area: Some(e.area()),
                    distance: Some(config.relationship_distance),
                },
            })
        })
        .collect()
}

/// Resolve attachments and assemble the spatial model
pub fn resolve_attachments(
    mut walls: Vec<WallSpatialInfo>,
    mut doors: Vec<SurfaceSpatialInfo>,
    mut windows: Vec<SurfaceSpatialInfo>,
    mut openings: Vec<SurfaceSpatialInfo>,
    config: &SpatialConfig,
) -> RoomSpatialData {
    let table = AttachmentTable::resolve(
        &walls,
        doors.iter().chain(windows.iter()).chain(openings.iter()),
        config,
    );

    for element in doors
        .iter_mut()
        .chain(windows.iter_mut())
        .chain(openings.iter_mut())
    {
        table.apply(element);
    }

    for wall in &mut walls {
        wall.attached_elements = build_attached_elements(wall.identifier, &doors, &windows, &openings);
    }

    let surface_relationships = build_surface_relationships(&doors, &windows, &openings, config);

    tracing::debug!(
        attached = table.attached_count(),
        orphaned = table.orphaned_count(),
        relationships = surface_relationships.len(),
        "Resolved wall attachments"
    );

    RoomSpatialData {
        walls,
        doors,
        windows,
        openings,
        surface_relationships,
    }
}
