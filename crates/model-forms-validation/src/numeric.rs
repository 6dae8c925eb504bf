//! Numeric validation functions

/// Validates value is within an inclusive range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
) -> Result<(), String> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(format!("Value must be between {} and {}", min, max))
    }
}

/// Range check for integer input against real bounds.
///
/// The integer is widened for the comparison; bounds are reported without
/// their fractional part.
pub fn validate_integer_range(value: i64, min: f64, max: f64) -> Result<(), String> {
    let widened = value as f64;
    if widened >= min && widened <= max {
        Ok(())
    } else {
        Err(format!(
            "Value must be between {} and {}",
            min.trunc() as i64,
            max.trunc() as i64
        ))
    }
}
