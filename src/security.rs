//! Allow-list validators for untrusted request strings. Everything not
//! explicitly accepted is rejected before any filesystem or subprocess call.

use crate::errors::AppError;

const MAX_FILENAME_LEN: usize = 255;
const MAX_HOST_LEN: usize = 253;

/// Accepts a bare filename: `[A-Za-z0-9._-]` only, no separators, and never
/// `.` or `..`. Traversal is impossible by construction; the confinement
/// check in `tools` is a second, independent layer.
pub fn validate_filename(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.len() > MAX_FILENAME_LEN {
        return Err(AppError::InvalidInput);
    }
    if name == "." || name == ".." {
        return Err(AppError::InvalidInput);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(AppError::InvalidInput);
    }
    Ok(())
}

/// Accepts a hostname or IP literal: `[A-Za-z0-9.-]` only. Shell
/// metacharacters cannot pass, and a leading `-` is rejected so the value
/// can never be read as an option by the ping binary.
pub fn validate_host(host: &str) -> Result<(), AppError> {
    if host.is_empty() || host.len() > MAX_HOST_LEN {
        return Err(AppError::InvalidInput);
    }
    if host.starts_with('-') {
        return Err(AppError::InvalidInput);
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
    {
        return Err(AppError::InvalidInput);
    }
    Ok(())
}
