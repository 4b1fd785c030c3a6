use crate::config::QcsConfig;
use crate::error::ApiError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Arguments
/// * `qcs` - The server connection section to validate
/// * `log_file_path` - Optional log file path to validate
///
/// # Returns
/// * `Ok(())` - Configuration is valid
/// * `Err(ApiError)` - Configuration validation failed
///
/// # Validation Rules
/// - A hostname, if present, cannot be empty and cannot embed a scheme
///   (the `https` flag controls the scheme)
/// - A port of 0 is rejected
/// - If a log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(qcs: &QcsConfig, log_file_path: &Option<String>) -> Result<(), ApiError> {
    if let Some(hostname) = &qcs.hostname {
        if hostname.is_empty() {
            return Err(ApiError::config_error("Hostname cannot be empty"));
        }

        if hostname.contains("://") {
            return Err(ApiError::config_error(
                "Hostname must not include a scheme; use the 'https' flag instead",
            ));
        }
    }

    if qcs.port == Some(0) {
        return Err(ApiError::config_error("Port 0 is not a valid server port"));
    }

    // Validate log file path if provided
    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(ApiError::config_error("Log file path cannot be empty"));
        }

        // Check if parent directory exists or can be created
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.exists()
        {
            // Try to create the directory to validate the path
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
