// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry utilities over surface transforms and bounding boxes
//!
//! Transforms follow the usual column convention: columns 0-2 hold the
//! local x/y/z axes in world space and column 3 holds the translation.

use nalgebra::Matrix4;

use crate::capture::Confidence;
use crate::types::{Dimensions3D, Orientation3D, Position3D};

/// Sign pattern of the eight box corners, back face (-z) first, then front
/// face (+z); each face runs bottom-left, bottom-right, top-right, top-left.
const CORNER_SIGNS: [(f64, f64, f64); 8] = [
    (-1.0, -1.0, -1.0),
    (1.0, -1.0, -1.0),
    (1.0, 1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (-1.0, -1.0, 1.0),
    (1.0, -1.0, 1.0),
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
];

/// World position of a surface: the translation column of its transform
#[inline]
pub fn extract_position(transform: &Matrix4<f64>) -> Position3D {
    Position3D::new(transform[(0, 3)], transform[(1, 3)], transform[(2, 3)])
}

/// Orientation basis of a surface: the first three columns of its transform
pub fn extract_orientation(transform: &Matrix4<f64>) -> Orientation3D {
    let column = |c: usize| {
        Position3D::new(transform[(0, c)], transform[(1, c)], transform[(2, c)])
    };

    Orientation3D {
        right_vector: column(0),
        up_vector: column(1),
        forward_vector: column(2),
    }
}

/// The eight world-space vertices of an oriented bounding box
pub fn calculate_corners(
    position: &Position3D,
    dimensions: &Dimensions3D,
    orientation: &Orientation3D,
) -> [Position3D; 8] {
    let half = dimensions.half_extents();

    CORNER_SIGNS.map(|(sx, sy, sz)| {
        let local = Position3D::new(sx * half.x, sy * half.y, sz * half.z);
        *position + orientation.rotate(&local)
    })
}

/// Euclidean distance between two world points
#[inline]
pub fn distance(a: &Position3D, b: &Position3D) -> f64 {
    a.distance_to(b)
}

/// Map a qualitative confidence level to a score in [0, 1]
#[inline]
pub fn confidence_to_score(confidence: Confidence) -> f64 {
    confidence.score()
}
