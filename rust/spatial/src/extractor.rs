// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface extraction: raw captured boxes to normalized spatial records

use crate::capture::{CapturedRoom, CapturedSurface};
use crate::config::SpatialConfig;
use crate::geometry::{calculate_corners, confidence_to_score, extract_orientation, extract_position};
use crate::resolver::resolve_attachments;
use crate::spatial_data::{ElementType, RoomSpatialData, SurfaceSpatialInfo, WallSpatialInfo};
use crate::types::{Orientation3D, Position3D};

/// World-space geometry shared by every surface kind
struct SurfaceGeometry {
    position: Position3D,
    orientation: Orientation3D,
    corners: [Position3D; 8],
    confidence: f64,
}

fn surface_geometry(surface: &CapturedSurface) -> SurfaceGeometry {
    let position = extract_position(&surface.transform);
    let orientation = extract_orientation(&surface.transform);

    if !position.is_finite() {
        tracing::warn!(id = %surface.identifier, "Surface transform has non-finite translation");
    }

    SurfaceGeometry {
        position,
        orientation,
        corners: calculate_corners(&position, &surface.dimensions, &orientation),
        confidence: confidence_to_score(surface.confidence),
    }
}

/// Convert captured walls, preserving input order
///
/// Attachment lists start empty; [`extract_spatial_data`] fills them from the
/// resolver's decisions.
pub fn extract_walls(surfaces: &[CapturedSurface]) -> Vec<WallSpatialInfo> {
    surfaces
        .iter()
        .map(|surface| {
            let geom = surface_geometry(surface);
            WallSpatialInfo {
                identifier: surface.identifier,
                position: geom.position,
                dimensions: surface.dimensions,
                orientation: geom.orientation,
                corners: geom.corners,
                attached_elements: Vec::new(),
                confidence: geom.confidence,
            }
        })
        .collect()
}

/// Convert captured doors, windows or openings, preserving input order
///
/// Parent fields start unset.
pub fn extract_surfaces(
    surfaces: &[CapturedSurface],
    element_type: ElementType,
) -> Vec<SurfaceSpatialInfo> {
    surfaces
        .iter()
        .map(|surface| {
            let geom = surface_geometry(surface);
            SurfaceSpatialInfo {
                identifier: surface.identifier,
                element_type,
                position: geom.position,
                dimensions: surface.dimensions,
                orientation: geom.orientation,
                corners: geom.corners,
                confidence: geom.confidence,
                parent_wall_id: None,
                relative_position_on_wall: None,
            }
        })
        .collect()
}

/// Extract every surface of a capture and resolve wall attachments
pub fn extract_spatial_data(capture: &CapturedRoom, config: &SpatialConfig) -> RoomSpatialData {
    let extract_elements = || {
        (
            extract_surfaces(&capture.doors, ElementType::Door),
            extract_surfaces(&capture.windows, ElementType::Window),
            extract_surfaces(&capture.openings, ElementType::Opening),
        )
    };

    let (walls, (doors, windows, openings)) = if config.parallel_extraction {
        rayon::join(|| extract_walls(&capture.walls), extract_elements)
    } else {
        (extract_walls(&capture.walls), extract_elements())
    };

    tracing::debug!(
        walls = walls.len(),
        doors = doors.len(),
        windows = windows.len(),
        openings = openings.len(),
        "Extracted surfaces"
    );

    resolve_attachments(walls, doors, windows, openings, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{Confidence, SurfaceId};
    use crate::types::Dimensions3D;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;

    fn wall(id: u128, position: Position3D) -> CapturedSurface {
        CapturedSurface::axis_aligned(
            SurfaceId::from_u128(id),
            position,
            Dimensions3D::new(4.0, 2.8, 0.1),
        )
    }

    #[test]
    fn test_extract_walls_preserves_order_and_geometry() {
        let surfaces = vec![
            wall(2, Position3D::new(0.0, 1.4, -1.5)),
            wall(1, Position3D::new(0.0, 1.4, 1.5)),
        ];

        let walls = extract_walls(&surfaces);

        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].identifier, SurfaceId::from_u128(2));
        assert_eq!(walls[1].identifier, SurfaceId::from_u128(1));
        assert_eq!(walls[0].position, Position3D::new(0.0, 1.4, -1.5));
        assert_relative_eq!(walls[0].confidence, 1.0);
        assert!(walls[0].attached_elements.is_empty());
        assert_relative_eq!(walls[0].length_from_corners(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extract_surfaces_maps_confidence() {
        let mut surface = wall(7, Position3D::ORIGIN);
        surface.confidence = Confidence::Low;

        let windows = extract_surfaces(&[surface], ElementType::Window);

        assert_eq!(windows[0].element_type, ElementType::Window);
        assert_relative_eq!(windows[0].confidence, 0.1);
        assert!(windows[0].parent_wall_id.is_none());
        assert!(windows[0].relative_position_on_wall.is_none());
    }

    #[test]
    fn test_empty_capture() {
        let data = extract_spatial_data(&CapturedRoom::empty(), &SpatialConfig::default());
        assert!(data.walls.is_empty());
        assert!(data.surface_relationships.is_empty());
        assert_eq!(data.effective_wall_area(), 0.0);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let mut capture = CapturedRoom::empty();
        capture.walls.push(wall(1, Position3D::new(0.0, 1.4, -1.5)));
        capture.doors.push(CapturedSurface::axis_aligned(
            SurfaceId::from_u128(10),
            Position3D::new(0.5, 1.0, -1.5),
            Dimensions3D::new(0.9, 2.0, 0.05),
        ));

        let parallel = extract_spatial_data(&capture, &SpatialConfig::default());
        let sequential = extract_spatial_data(
            &capture,
            &SpatialConfig {
                parallel_extraction: false,
                ..Default::default()
            },
        );

        assert_eq!(parallel.doors[0].parent_wall_id, sequential.doors[0].parent_wall_id);
        assert_eq!(parallel.surface_relationships, sequential.surface_relationships);
    }

    #[test]
    fn test_non_finite_transform_does_not_panic() {
        let mut bad = Matrix4::identity();
        bad[(0, 3)] = f64::NAN;
        let mut capture = CapturedRoom::empty();
        capture.walls.push(wall(1, Position3D::new(0.0, 1.4, -1.5)));
        capture.windows.push(CapturedSurface::new(
            SurfaceId::from_u128(20),
            bad,
            Dimensions3D::new(1.0, 1.0, 0.0),
            Confidence::Medium,
        ));

        let data = extract_spatial_data(&capture, &SpatialConfig::default());
        assert!(data.windows[0].parent_wall_id.is_none());
    }
}
