// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end checks of the capture to layout pipeline.

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use nalgebra::Matrix4;
use roomscan_spatial::{
    calculate_room_dimensions, simplify, CapturedRoom, CapturedSurface, CardinalOrientation,
    Confidence, Dimensions3D, Position3D, RoomScanData, RoomType, SpatialConfig, SurfaceId,
};

const HEIGHT: f64 = 2.8;

/// Four zero-thickness walls enclosing a `width` x `depth` floor
fn rectangular_room(width: f64, depth: f64) -> CapturedRoom {
    let mut capture = CapturedRoom::empty();
    let y = HEIGHT / 2.0;
    capture.walls = vec![
        CapturedSurface::axis_aligned(
            SurfaceId::from_u128(1),
            Position3D::new(0.0, y, -depth / 2.0),
            Dimensions3D::new(width, HEIGHT, 0.0),
        ),
        CapturedSurface::axis_aligned(
            SurfaceId::from_u128(2),
            Position3D::new(0.0, y, depth / 2.0),
            Dimensions3D::new(width, HEIGHT, 0.0),
        ),
        CapturedSurface::with_yaw(
            SurfaceId::from_u128(3),
            Position3D::new(-width / 2.0, y, 0.0),
            FRAC_PI_2,
            Dimensions3D::new(depth, HEIGHT, 0.0),
        ),
        CapturedSurface::with_yaw(
            SurfaceId::from_u128(4),
            Position3D::new(width / 2.0, y, 0.0),
            -FRAC_PI_2,
            Dimensions3D::new(depth, HEIGHT, 0.0),
        ),
    ];
    capture
}

fn element(id: u128, position: Position3D, width: f64, height: f64) -> CapturedSurface {
    CapturedSurface::axis_aligned(
        SurfaceId::from_u128(id),
        position,
        Dimensions3D::new(width, height, 0.0),
    )
}

/// A 4 x 3 room with a door, two windows and a stray opening
fn furnished_room() -> CapturedRoom {
    let mut capture = rectangular_room(4.0, 3.0);
    capture.doors.push(element(10, Position3D::new(-0.5, 1.0, -1.5), 0.9, 2.0));
    capture.windows.push(element(20, Position3D::new(0.5, 1.5, 1.5), 1.2, 1.0));
    capture.windows.push(element(21, Position3D::new(2.0, 1.5, 0.3), 1.0, 1.0));
    capture.openings.push(element(30, Position3D::new(0.0, 1.4, 0.0), 1.0, 2.0));
    capture
}

#[test]
fn scenario_a_four_walls_classify_as_bedroom() {
    let scan = RoomScanData::from_capture(rectangular_room(4.0, 3.0), &SpatialConfig::default());

    let dims = scan.dimensions();
    assert_relative_eq!(dims.width(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(dims.depth(), 3.0, epsilon = 1e-9);
    assert_relative_eq!(dims.height(), HEIGHT, epsilon = 1e-9);
    assert_relative_eq!(dims.area(), 12.0, epsilon = 1e-9);

    assert_eq!(scan.room_type(), RoomType::Bedroom);
    assert_eq!(scan.features().walls, 4);
    assert_eq!(
        scan.room_description(),
        "Bedroom, 4.0m × 3.0m × 2.8m (12.0 sq m) with 4 walls, no doors, no windows and no openings"
    );
}

#[test]
fn scenario_b_window_at_wall_centre() {
    let mut capture = rectangular_room(4.0, 3.0);
    capture.windows.push(element(20, Position3D::new(0.0, HEIGHT / 2.0, -1.5), 1.0, 1.0));

    let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());
    let window = &scan.spatial_data().windows[0];

    assert_eq!(window.parent_wall_id, Some(SurfaceId::from_u128(1)));
    let rel = window.relative_position_on_wall.unwrap();
    assert_relative_eq!(rel.distance_from_left, 2.0, epsilon = 1e-9);
    assert_relative_eq!(rel.distance_from_bottom, HEIGHT / 2.0, epsilon = 1e-9);
    assert_relative_eq!(rel.normalized_x, 0.5, epsilon = 1e-9);
    assert_relative_eq!(rel.normalized_y, 0.5, epsilon = 1e-9);
}

#[test]
fn scenario_b_holds_on_rotated_wall() {
    let mut capture = rectangular_room(4.0, 3.0);
    capture.windows.push(element(20, Position3D::new(2.0, HEIGHT / 2.0, 0.0), 1.0, 1.0));

    let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());
    let window = &scan.spatial_data().windows[0];

    assert_eq!(window.parent_wall_id, Some(SurfaceId::from_u128(4)));
    let (x, y) = window.normalized_wall_position().unwrap();
    assert_relative_eq!(x, 0.5, epsilon = 1e-9);
    assert_relative_eq!(y, 0.5, epsilon = 1e-9);
}

#[test]
fn scenario_c_far_opening_is_orphaned() {
    // Room centre: 1.5 m from the long walls, 2 m from the short ones
    let mut capture = rectangular_room(4.0, 3.0);
    capture.openings.push(element(30, Position3D::new(0.0, HEIGHT / 2.0, 0.0), 1.0, 2.0));

    let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());
    let opening = &scan.spatial_data().openings[0];
    assert!(opening.parent_wall_id.is_none());
    assert!(opening.relative_position_on_wall.is_none());
    assert!(scan.spatial_data().surface_relationships.is_empty());

    let layout = scan.simplified_spatial_layout();
    let wire = &layout.openings[0];
    assert_eq!(wire.wall_id, "");
    assert_eq!(wire.position_on_wall.from_left, 0.0);
    assert_eq!(wire.position_on_wall.from_bottom, 0.0);
    assert_eq!(wire.position_on_wall.normalized_x, 0.0);
    assert_eq!(wire.position_on_wall.normalized_y, 0.0);
    assert!(layout.walls.iter().all(|w| w.attached_elements.is_empty()));
}

#[test]
fn scenario_d_no_walls() {
    let mut capture = CapturedRoom::empty();
    capture.windows.push(element(20, Position3D::new(0.0, 1.5, 0.0), 1.0, 1.0));

    let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());

    assert_eq!(scan.room_type(), RoomType::Bathroom);
    assert_eq!(scan.dimensions().width(), 2.0);
    assert_eq!(scan.dimensions().height(), 2.4);
    assert_eq!(scan.dimensions().depth(), 2.0);
    assert_eq!(scan.dimensions().area(), 4.0);
    assert!(scan.spatial_data().windows[0].parent_wall_id.is_none());
    assert_eq!(scan.spatial_data().effective_wall_area(), 0.0);
}

#[test]
fn scenario_e_dominant_x_forward_is_east_or_west() {
    let wall_facing = |id: u128, fx: f64| {
        let mut transform = Matrix4::<f64>::identity();
        transform[(0, 2)] = fx;
        transform[(1, 2)] = 0.0;
        transform[(2, 2)] = 0.1;
        CapturedSurface::new(
            SurfaceId::from_u128(id),
            transform,
            Dimensions3D::new(3.0, HEIGHT, 0.0),
            Confidence::Medium,
        )
    };

    let mut capture = CapturedRoom::empty();
    capture.walls = vec![wall_facing(1, 0.9), wall_facing(2, -0.9)];

    let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());
    let layout = scan.simplified_spatial_layout();

    assert_eq!(layout.walls[0].orientation, CardinalOrientation::East);
    assert_eq!(layout.walls[1].orientation, CardinalOrientation::West);
}

#[test]
fn room_orientations_cover_all_sides() {
    let scan = RoomScanData::from_capture(rectangular_room(4.0, 3.0), &SpatialConfig::default());
    let layout = scan.simplified_spatial_layout();

    let tags: Vec<CardinalOrientation> = layout.walls.iter().map(|w| w.orientation).collect();
    assert_eq!(
        tags,
        vec![
            CardinalOrientation::South,
            CardinalOrientation::South,
            CardinalOrientation::East,
            CardinalOrientation::West,
        ]
    );
}

#[test]
fn area_is_product_of_clamped_extents() {
    let config = SpatialConfig::default();
    for (width, depth) in [(0.5, 0.5), (1.0, 6.0), (3.0, 1.2), (4.0, 3.0), (10.0, 7.5)] {
        let dims = calculate_room_dimensions(&rectangular_room(width, depth).walls, &config);

        assert!(dims.width() >= 2.0);
        assert!(dims.depth() >= 2.0);
        assert!(dims.height() >= 2.4);
        assert_relative_eq!(dims.area(), dims.width() * dims.depth(), epsilon = 1e-12);
    }

    let empty = calculate_room_dimensions(&[], &config);
    assert_eq!(empty.area(), empty.width() * empty.depth());
}

#[test]
fn normalized_positions_stay_in_unit_range() {
    let mut capture = rectangular_room(4.0, 3.0);
    // Elements near, on and past the wall edges
    let offsets = [-2.6, -2.0, -0.7, 0.0, 1.9, 2.4];
    for (i, dx) in offsets.iter().enumerate() {
        let y = 0.5 * i as f64;
        capture.windows.push(element(100 + i as u128, Position3D::new(*dx * 0.4, y, -1.4), 0.5, 0.5));
        capture.doors.push(element(200 + i as u128, Position3D::new(1.8, y, *dx * 0.5), 0.5, 0.5));
    }

    let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());
    let attached: Vec<_> = scan
        .spatial_data()
        .elements()
        .filter_map(|e| e.relative_position_on_wall)
        .collect();

    assert!(!attached.is_empty());
    for rel in attached {
        assert!((0.0..=1.0).contains(&rel.normalized_x));
        assert!((0.0..=1.0).contains(&rel.normalized_y));
    }
}

#[test]
fn effective_wall_area_never_negative() {
    let mut capture = CapturedRoom::empty();
    capture.walls.push(element(1, Position3D::new(0.0, 0.5, 0.0), 1.0, 1.0));
    capture.openings.push(element(30, Position3D::new(0.0, 0.5, 0.1), 5.0, 5.0));
    capture.windows.push(element(20, Position3D::new(0.1, 0.5, 0.0), 2.0, 2.0));

    let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());

    assert_eq!(scan.spatial_data().elements().filter(|e| e.is_attached()).count(), 2);
    assert_eq!(scan.spatial_data().effective_wall_area(), 0.0);
}

#[test]
fn layout_preserves_attachments() {
    let scan = RoomScanData::from_capture(furnished_room(), &SpatialConfig::default());
    let data = scan.spatial_data();
    assert!(data.is_consistent());

    let resolved: BTreeSet<(String, String)> = data
        .elements()
        .filter_map(|e| e.parent_wall_id.map(|w| (w.to_string(), e.identifier.to_string())))
        .collect();

    // Round-trip through JSON so the check covers the wire form
    let json = simplify(data).to_json().unwrap();
    let layout: roomscan_spatial::RoomSpatialLayout = serde_json::from_str(&json).unwrap();

    let from_walls: BTreeSet<(String, String)> = layout
        .walls
        .iter()
        .flat_map(|w| w.attached_elements.iter().map(move |e| (w.id.clone(), e.clone())))
        .collect();
    let from_elements: BTreeSet<(String, String)> = layout
        .elements()
        .filter(|e| !e.is_orphaned())
        .map(|e| (e.wall_id.clone(), e.id.clone()))
        .collect();

    assert_eq!(resolved.len(), 3);
    assert_eq!(from_walls, resolved);
    assert_eq!(from_elements, resolved);
}

#[test]
fn relationships_follow_element_kind() {
    let scan = RoomScanData::from_capture(furnished_room(), &SpatialConfig::default());
    let data = scan.spatial_data();

    for rel in &data.surface_relationships {
        let child = data.element(rel.child_id).unwrap();
        let expected = match child.element_type {
            roomscan_spatial::ElementType::Opening => roomscan_spatial::RelationshipType::ContainedIn,
            _ => roomscan_spatial::RelationshipType::AttachedTo,
        };
        assert_eq!(rel.relationship_type, expected);
        assert_eq!(rel.spatial_connection.distance, Some(0.0));
        assert_relative_eq!(rel.spatial_connection.contact_area.unwrap(), child.area());
    }
}

#[test]
fn sequential_and_parallel_extraction_agree() {
    let parallel = RoomScanData::from_capture(furnished_room(), &SpatialConfig::default());
    let sequential = RoomScanData::from_capture(
        furnished_room(),
        &SpatialConfig {
            parallel_extraction: false,
            ..Default::default()
        },
    );

    assert_eq!(
        parallel.simplified_spatial_layout(),
        sequential.simplified_spatial_layout()
    );
}
