// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RFC 3339 helpers for string-typed timestamps

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{Error, Result};

/// Format with whole-second precision, e.g. `2024-05-01T12:30:45Z`
pub fn format_timestamp(value: OffsetDateTime) -> Result<String> {
    value
        .replace_nanosecond(0)
        .map_err(|e| Error::Timestamp(e.to_string()))?
        .format(&Rfc3339)
        .map_err(|e| Error::Timestamp(e.to_string()))
}

/// Parse an RFC 3339 string; fractional seconds are optional
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| Error::Timestamp(format!("{value}: {e}")))
}

/// Current time, formatted for the wire
pub fn now_timestamp() -> Result<String> {
    format_timestamp(OffsetDateTime::now_utc())
}
