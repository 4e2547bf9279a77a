//! Validators usable from `#[validate(custom(...))]` attributes.

use validator::ValidationError;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that a capacity is not negative.
pub fn validate_capacity(capacity: i32) -> Result<(), ValidationError> {
    if capacity >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("capacity_range");
        err.message = Some("Capacity must be non-negative".into());
        Err(err)
    }
}

/// Validates that a status label is a short, non-blank token.
pub fn validate_status_label(status: &str) -> Result<(), ValidationError> {
    let trimmed = status.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        let mut err = ValidationError::new("status_label");
        err.message = Some("Status must be 1-50 characters".into());
        return Err(err);
    }
    Ok(())
}
