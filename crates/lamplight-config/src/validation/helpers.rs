//! Shared range-validation helpers used by all section validators.

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if a set `value` is outside `[min, max]` (float).
pub(crate) fn validate_optional_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: Option<f64>,
    min: f64,
    max: f64,
) {
    if let Some(value) = value {
        if !(min..=max).contains(&value) {
            errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
        }
    }
}
