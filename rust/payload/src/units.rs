// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Imperial formatting for room measurements

use roomscan_spatial::RoomDimensions;

pub const INCHES_PER_METER: f64 = 39.3701;
pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.7639;

/// Whole feet and leftover whole inches, truncated
pub fn meters_to_feet_inches(meters: f64) -> (u32, u32) {
    let total_inches = (meters * INCHES_PER_METER).max(0.0);
    let feet = (total_inches / 12.0).trunc() as u32;
    let inches = (total_inches % 12.0).trunc() as u32;
    (feet, inches)
}

/// `4.0` becomes `13' 1"`
pub fn format_feet_inches(meters: f64) -> String {
    let (feet, inches) = meters_to_feet_inches(meters);
    format!("{feet}' {inches}\"")
}

pub fn square_meters_to_square_feet(square_meters: f64) -> u32 {
    (square_meters * SQUARE_FEET_PER_SQUARE_METER).max(0.0).trunc() as u32
}

/// Width × depth × height
pub fn format_dimensions(dimensions: &RoomDimensions) -> String {
    format!(
        "{} × {} × {}",
        format_feet_inches(dimensions.width()),
        format_feet_inches(dimensions.depth()),
        format_feet_inches(dimensions.height())
    )
}

pub fn format_area(square_meters: f64) -> String {
    format!("{} sq ft", square_meters_to_square_feet(square_meters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_inches() {
        assert_eq!(meters_to_feet_inches(4.0), (13, 1));
        assert_eq!(meters_to_feet_inches(0.0), (0, 0));
        assert_eq!(format_feet_inches(2.8), "9' 2\"");
    }

    #[test]
    fn test_negative_lengths_clamp_to_zero() {
        assert_eq!(meters_to_feet_inches(-1.0), (0, 0));
        assert_eq!(square_meters_to_square_feet(-3.0), 0);
    }

    #[test]
    fn test_room_formatting() {
        let dims = RoomDimensions::new(4.0, 2.8, 3.0);
        assert_eq!(format_dimensions(&dims), "13' 1\" × 9' 10\" × 9' 2\"");
        assert_eq!(format_area(dims.area()), "129 sq ft");
    }
}
