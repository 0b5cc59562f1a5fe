use std::fmt;
use std::path::Path;
use std::sync::Arc;
use image::ImageFormat;
use tt_core::SubmitError;
use crate::error::AppError;

pub const MISSING_INPUT_MESSAGE: &str = "Please provide both product name and image";

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Product photo chosen by the user
#[derive(Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<Vec<u8>>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = ImageFormat::from_path(&file_name)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| "application/octet-stream".to_string());

        Self {
            file_name,
            mime,
            bytes: Arc::new(bytes),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path).map_err(|e| AppError::UnreadableImage {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let file_name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::from_bytes(file_name, bytes))
    }
}

/// Form contents at the moment the user pressed Generate
#[derive(Debug, Clone, Default)]
pub struct UploadInput {
    pub image: Option<ImageFile>,
    pub product_name: String,
}

impl UploadInput {
    pub fn new(image: Option<ImageFile>, product_name: impl Into<String>) -> Self {
        Self {
            image,
            product_name: product_name.into(),
        }
    }

    pub fn validate(&self) -> Result<&ImageFile, SubmitError> {
        match &self.image {
            Some(image) if !self.product_name.trim().is_empty() => Ok(image),
            _ => Err(SubmitError::Validation(MISSING_INPUT_MESSAGE.into())),
        }
    }

    pub fn product_name(&self) -> &str {
        self.product_name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImageFile {
        ImageFile::from_bytes("mug.png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(png().mime, "image/png");
        assert_eq!(ImageFile::from_bytes("photo.JPG", vec![]).mime, "image/jpeg");
        assert_eq!(ImageFile::from_bytes("notes.xyz", vec![]).mime, "application/octet-stream");
    }

    #[test]
    fn test_validate_missing_fields() {
        let cases = [
            UploadInput::new(None, "Red Mug"),
            UploadInput::new(Some(png()), ""),
            UploadInput::new(Some(png()), "   "),
            UploadInput::new(None, ""),
        ];

        for input in cases {
            let err = input.validate().unwrap_err();
            assert_eq!(err, SubmitError::Validation(MISSING_INPUT_MESSAGE.into()));
        }
    }

    #[test]
    fn test_validate_complete_input() {
        let input = UploadInput::new(Some(png()), " Red Mug ");
        assert_eq!(input.validate().unwrap().file_name, "mug.png");
        assert_eq!(input.product_name(), "Red Mug");
    }

    #[test]
    fn test_from_missing_path() {
        let err = ImageFile::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AppError::UnreadableImage { .. }));
    }
}
