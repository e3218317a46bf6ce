use std::path::Path;

use reqwest::multipart::Part;

use crate::error::{ClientResult, ValidationError};

pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Image bytes picked by the user, ready to be sent as a form part.
#[derive(Clone, Eq, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// Read a file, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "imagen".to_string());
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if ALLOWED_IMAGE_TYPES.contains(&self.mime_type.as_str()) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedImageType(self.mime_type.clone()))
        }
    }

    pub fn to_part(&self) -> ClientResult<Part> {
        Ok(Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_mime() {
        for mime in ALLOWED_IMAGE_TYPES {
            assert!(ImageUpload::new("a", mime, vec![1]).validate().is_ok());
        }
        assert_eq!(
            ImageUpload::new("notes.txt", "text/plain", vec![1]).validate(),
            Err(ValidationError::UnsupportedImageType(
                "text/plain".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let path = std::env::temp_dir()
            .join(format!("pokecatalog-{}-pikachu.png", std::process::id()));
        tokio::fs::write(&path, b"\x89PNG").await.expect("write");
        let image = ImageUpload::from_path(&path).await.expect("read");
        tokio::fs::remove_file(&path).await.expect("cleanup");

        assert_eq!(image.mime_type, "image/png");
        assert!(image.file_name.ends_with("pikachu.png"));
        assert_eq!(image.bytes, b"\x89PNG");
    }
}
