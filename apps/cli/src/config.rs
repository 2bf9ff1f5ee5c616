// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline settings loaded from environment variables.

use roomscan_spatial::{FloorAreaSource, SpatialConfig};

/// Environment overrides for [`SpatialConfig`]; unset or unparsable values
/// keep the defaults.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub spatial: SpatialConfig,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SpatialConfig::default();

        let spatial = SpatialConfig {
            attachment_threshold: lookup("ROOMSCAN_ATTACHMENT_THRESHOLD")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.attachment_threshold),
            area_source: lookup("ROOMSCAN_AREA_SOURCE")
                .and_then(|v| parse_area_source(&v))
                .unwrap_or(defaults.area_source),
            parallel_extraction: lookup("ROOMSCAN_PARALLEL")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.parallel_extraction),
            ..defaults
        };

        Self { spatial }
    }
}

fn parse_area_source(value: &str) -> Option<FloorAreaSource> {
    match value.trim().to_ascii_lowercase().as_str() {
        "footprint" => Some(FloorAreaSource::Footprint),
        "first_wall" | "first-wall" => Some(FloorAreaSource::FirstWall),
        _ => None,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
