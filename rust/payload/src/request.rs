// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound design requests

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::Result;
use crate::lidar::LidarData;
use crate::timestamp::now_timestamp;

/// The user's style input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleReference {
    /// Uploaded reference image URLs and any links not recognised below
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinterest_url: Option<String>,
    #[serde(default)]
    pub style_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_thoughts: Option<String>,
}

impl StyleReference {
    /// Build from free-form link fields
    ///
    /// Each field may hold several links, one per line. The first Instagram
    /// and first Pinterest link fill their slots; every other link is kept as
    /// an image reference. Blank thoughts become `None`.
    pub fn from_links<I, S>(links: I, style_keywords: Vec<String>, user_thoughts: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut style = StyleReference {
            style_keywords,
            ..Default::default()
        };

        for field in links {
            for url in field.as_ref().lines().map(str::trim).filter(|l| !l.is_empty()) {
                let lower = url.to_ascii_lowercase();
                if style.instagram_url.is_none() && lower.contains("instagram.com") {
                    style.instagram_url = Some(url.to_string());
                } else if style.pinterest_url.is_none() && is_pinterest(&lower) {
                    style.pinterest_url = Some(url.to_string());
                } else {
                    style.images.push(url.to_string());
                }
            }
        }

        let thoughts = user_thoughts.trim();
        if !thoughts.is_empty() {
            style.user_thoughts = Some(thoughts.to_string());
        }

        style
    }

    /// Replace image references once uploads finish, keeping everything else
    pub fn with_images(self, images: Vec<String>) -> Self {
        Self { images, ..self }
    }

    pub fn has_links(&self) -> bool {
        self.instagram_url.is_some() || self.pinterest_url.is_some()
    }
}

fn is_pinterest(url: &str) -> bool {
    url.contains("pinterest.") || url.contains("pin.it/")
}

/// A stored design request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub id: Uuid,
    pub lidar_data: LidarData,
    pub style_reference: StyleReference,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl DesignRequest {
    pub fn new(lidar_data: LidarData, style_reference: StyleReference) -> Self {
        Self {
            id: Uuid::new_v4(),
            lidar_data,
            style_reference,
            timestamp: OffsetDateTime::now_utc(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_style_reference(self, style_reference: StyleReference) -> Self {
        Self {
            style_reference,
            ..self
        }
    }
}

/// Body posted to the generation webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub request_id: String,
    pub lidar_data: LidarData,
    pub style_reference: StyleReference,
    pub timestamp: String,
}

impl WebhookPayload {
    /// Wrap a stored request under the id the backend assigned it
    pub fn new(request_id: impl Into<String>, request: &DesignRequest) -> Result<Self> {
        let payload = Self {
            request_id: request_id.into(),
            lidar_data: request.lidar_data.clone(),
            style_reference: request.style_reference.clone(),
            timestamp: now_timestamp()?,
        };

        tracing::info!(
            request_id = %payload.request_id,
            room_type = %payload.lidar_data.room_type,
            has_layout = payload.lidar_data.has_spatial_layout(),
            images = payload.style_reference.images.len(),
            "Prepared webhook payload"
        );

        Ok(payload)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
