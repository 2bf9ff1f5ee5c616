// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw room-capture input.
//!
//! A capture is the immutable snapshot handed over when a scanning session
//! completes: oriented boxes for walls, doors, windows and openings, plus
//! optional semantic room sections (newer capture formats only).

use std::fmt;

use nalgebra::{Isometry3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Dimensions3D, Position3D};

/// Opaque, stable identifier of a captured surface.
///
/// Ordering is used to break ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub Uuid);

impl SurfaceId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for SurfaceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Qualitative confidence reported by the scanner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Confidence {
    /// Numeric score in [0, 1]; unknown levels score 0.0
    pub fn score(self) -> f64 {
        match self {
            Confidence::High => 1.0,
            Confidence::Medium => 0.5,
            Confidence::Low => 0.1,
            Confidence::Unknown => 0.0,
        }
    }
}

/// One captured surface (wall, door, window or opening) as an oriented box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedSurface {
    pub identifier: SurfaceId,
    /// Local-to-world transform (column-major when serialized)
    pub transform: Matrix4<f64>,
    /// Local bounding box extents
    pub dimensions: Dimensions3D,
    #[serde(default)]
    pub confidence: Confidence,
}

impl CapturedSurface {
    pub fn new(
        identifier: SurfaceId,
        transform: Matrix4<f64>,
        dimensions: Dimensions3D,
        confidence: Confidence,
    ) -> Self {
        Self {
            identifier,
            transform,
            dimensions,
            confidence,
        }
    }

    /// Axis-aligned surface centred at `position`
    pub fn axis_aligned(identifier: SurfaceId, position: Position3D, dimensions: Dimensions3D) -> Self {
        Self::with_yaw(identifier, position, 0.0, dimensions)
    }

    /// Surface centred at `position`, rotated by `yaw` radians about world +Y
    pub fn with_yaw(
        identifier: SurfaceId,
        position: Position3D,
        yaw: f64,
        dimensions: Dimensions3D,
    ) -> Self {
        let iso = Isometry3::new(position.to_vector(), Vector3::y() * yaw);
        Self::new(identifier, iso.to_homogeneous(), dimensions, Confidence::High)
    }
}

/// Semantic label attached to a captured room section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionLabel {
    Bedroom,
    Kitchen,
    Bathroom,
    #[serde(alias = "dining_room")]
    DiningRoom,
    #[serde(alias = "living_room")]
    LivingRoom,
    #[serde(other)]
    Unidentified,
}

/// A labelled region of the capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSection {
    pub label: SectionLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Position3D>,
}

impl RoomSection {
    pub fn new(label: SectionLabel) -> Self {
        Self {
            label,
            center: None,
        }
    }
}

/// Complete capture result for one scanning session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapturedRoom {
    #[serde(default)]
    pub walls: Vec<CapturedSurface>,
    #[serde(default)]
    pub doors: Vec<CapturedSurface>,
    #[serde(default)]
    pub windows: Vec<CapturedSurface>,
    #[serde(default)]
    pub openings: Vec<CapturedSurface>,
    /// Section labels; `None` for capture formats that predate them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<RoomSection>>,
}

impl CapturedRoom {
    /// A capture with no surfaces (scan stopped before anything was found)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a capture from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the capture to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn surface_count(&self) -> usize {
        self.walls.len() + self.doors.len() + self.windows.len() + self.openings.len()
    }
}
