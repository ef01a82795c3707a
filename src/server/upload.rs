//! Multipart image upload handling.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::error::AppError;
use crate::types::Preferences;

/// Accepted image file extensions, compared case-insensitively
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

const IMAGE_FIELD: &str = "image";
const PREFERENCES_FIELD: &str = "preferences";

/// True when the file name ends in an allowed image extension
pub fn allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// A validated image upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
    /// Parsed `preferences` text field; empty when absent or `null`
    pub preferences: Preferences,
}

/// Read the `image` file field and optional `preferences` JSON field.
///
/// Anything but a named file with an allowed extension is a `BadRequest`.
pub async fn read_upload(mut multipart: Multipart) -> Result<ImageUpload, AppError> {
    let mut image: Option<(String, Bytes)> = None;
    let mut preferences_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            IMAGE_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read image: {e}")))?;
                image = Some((file_name, bytes));
            }
            PREFERENCES_FIELD => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read preferences: {e}"))
                })?;
                preferences_text = Some(text);
            }
            other => {
                debug!(field = other, "Ignoring multipart field");
            }
        }
    }

    let (file_name, bytes) =
        image.ok_or_else(|| AppError::BadRequest("No image file provided".to_string()))?;

    if file_name.is_empty() {
        return Err(AppError::BadRequest("No file selected".to_string()));
    }
    if !allowed_file(&file_name) {
        return Err(AppError::BadRequest("Invalid file type".to_string()));
    }

    let preferences = match preferences_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => serde_json::from_str::<Option<Preferences>>(text)
            .map_err(|e| AppError::BadRequest(format!("Invalid preferences: {e}")))?
            .unwrap_or_default(),
        _ => Preferences::default(),
    };

    debug!(file_name = %file_name, size = bytes.len(), "Received image upload");

    Ok(ImageUpload {
        file_name,
        bytes,
        preferences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("shirt.png"));
        assert!(allowed_file("photo.final.JPEG"));
        assert!(allowed_file("x.webp"));
        assert!(!allowed_file("shirt"));
        assert!(!allowed_file("shirt.tiff"));
        assert!(!allowed_file("png"));
        assert!(!allowed_file("archive.png.zip"));
    }
}
