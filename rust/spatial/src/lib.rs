// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # RoomScan Spatial
//!
//! Turns a LiDAR room capture (walls, doors, windows and openings as oriented
//! boxes) into a normalized spatial model: room type, bounding dimensions,
//! world-space geometry per surface, element-to-wall attachments, and a flat
//! layout that can be sent over the wire.
//!
//! ## Pipeline
//!
//! ```text
//! CapturedRoom ─┬─ classifier  ──> RoomType
//!               ├─ dimensions  ──> RoomDimensions
//!               └─ extractor ──> resolver ──> RoomSpatialData ──> layout
//! ```
//!
//! Every stage is a pure function of the capture and a [`SpatialConfig`].
//! Extraction never fails: a capture stopped early still yields a usable
//! (if degenerate) result.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomscan_spatial::{CapturedRoom, RoomScanData, SpatialConfig};
//!
//! let capture = CapturedRoom::from_json(&json)?;
//! let scan = RoomScanData::from_capture(capture, &SpatialConfig::default());
//!
//! println!("{}", scan.room_description());
//! let layout = scan.simplified_spatial_layout();
//! ```

pub mod analysis;
pub mod capture;
pub mod classifier;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod extractor;
pub mod geometry;
pub mod layout;
pub mod resolver;
pub mod scan;
pub mod spatial_data;
pub mod types;

pub use analysis::{
    analyze_natural_light, analyze_room_layout, LightingQuality, NaturalLightAnalysis,
    RoomLayoutAnalysis,
};
pub use capture::{CapturedRoom, CapturedSurface, Confidence, RoomSection, SectionLabel, SurfaceId};
pub use classifier::{classify_room, RoomType};
pub use config::{FloorAreaSource, SpatialConfig};
pub use dimensions::{calculate_room_dimensions, RoomBounds, RoomDimensions};
pub use error::{Error, Result};
pub use extractor::{extract_spatial_data, extract_surfaces, extract_walls};
pub use layout::{
    simplify, CardinalOrientation, ElementLayout, PositionOnWall, RoomSpatialLayout, WallLayout,
};
pub use resolver::{find_parent_wall, relative_position_on_wall, AttachmentTable};
pub use scan::{RoomFeatures, RoomScanData};
pub use spatial_data::{
    AttachedElement, ElementType, RelationshipType, RelativePosition, RoomSpatialData,
    SpatialConnection, SurfaceRelationship, SurfaceSpatialInfo, WallSpatialInfo,
};
pub use types::{Dimensions3D, Orientation3D, Position3D};
