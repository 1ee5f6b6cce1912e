use crate::parser::calibration::Calibration;
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;

pub const OUTPUT_FORMATS: &[&str] = &["csv", "tsv", "json"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    if values.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();
    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

/// The csv reader only takes single-byte delimiters.
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<()> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character other than a quote or newline".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

impl Validate for Calibration {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("calibration.missing_sentinel", &self.missing_sentinel)?;
        for vendor in &self.chipset_vendors {
            validate_non_empty_string("calibration.chipset_vendors", vendor)?;
        }
        for port in &self.charging_ports {
            validate_non_empty_string("calibration.charging_ports", port)?;
        }
        for word in &self.camera_false_splits {
            validate_non_empty_string("calibration.camera_false_splits", word)?;
        }
        for name in self.core_counts.keys() {
            validate_non_empty_string("calibration.core_counts", name)?;
        }
        Ok(())
    }
}
