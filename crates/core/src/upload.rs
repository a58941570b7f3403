//! Rules for uploaded panorama and logo images.
//!
//! Pure naming and type checks; the API layer does the file I/O.

use crate::error::CoreError;

/// Accepted image types, checked against both extension and MIME subtype.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Maximum number of panorama files accepted in one tour request.
pub const MAX_IMAGES_PER_REQUEST: usize = 30;

/// URL prefix under which stored uploads are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Check that an uploaded file is an image by extension AND MIME type.
pub fn validate_image_upload(file_name: &str, content_type: Option<&str>) -> Result<(), CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    let mime_ok = content_type
        .map(|ct| ct.to_lowercase())
        .is_some_and(|ct| ALLOWED_IMAGE_TYPES.iter().any(|t| ct.contains(t)));

    if ALLOWED_IMAGE_TYPES.contains(&ext.as_str()) && mime_ok {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{file_name}' is not an accepted image (allowed: jpeg, jpg, png, gif)"
        )))
    }
}

/// Reduce a client-supplied file name to a safe single path segment.
///
/// Path components are stripped and anything outside `[A-Za-z0-9._-]` becomes
/// `_`. An empty result falls back to `image`.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Stored file name: `{unix_millis}-{sanitized original}`.
pub fn stored_file_name(original: &str, unix_millis: i64) -> String {
    format!("{unix_millis}-{}", sanitize_file_name(original))
}

/// Public URL of a stored upload.
pub fn public_url(stored_name: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{stored_name}")
}
