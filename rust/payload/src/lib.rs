// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # RoomScan Payload
//!
//! Shapes exchanged with the design-generation service. A finished
//! [`RoomScanData`](roomscan_spatial::RoomScanData) becomes [`LidarData`],
//! which is wrapped with the user's style input into a [`DesignRequest`] and
//! sent as a [`WebhookPayload`]. Results come back as [`DesignResponse`].
//!
//! Nothing here performs I/O; callers own the HTTP client.

pub mod error;
pub mod lidar;
pub mod request;
pub mod response;
pub mod timestamp;
pub mod units;

pub use error::{Error, Result};
pub use lidar::{LidarData, LidarPoint};
pub use request::{DesignRequest, StyleReference, WebhookPayload};
pub use response::{DesignResponse, ProcessingStatus};
