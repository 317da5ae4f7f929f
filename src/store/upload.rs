//! Files selected for upload

use super::StoreResult;
use std::path::Path;

/// A file picked by the user, held in memory until uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// Original file name, used only for its extension
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: &Path) -> StoreResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    /// Extension of the original name, without the dot
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
    }
}

/// Random object name keeping the original extension, e.g. `3f2a...c1.jpg`
pub fn random_object_name(file: &UploadFile) -> String {
    let id = uuid::Uuid::new_v4();
    match file.extension() {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(UploadFile::new("a.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(
            UploadFile::new("brochure.pdf", vec![]).content_type,
            "application/pdf"
        );
        assert_eq!(
            UploadFile::new("README", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_content_type_less_common_formats() {
        assert_eq!(UploadFile::new("hall.bmp", vec![]).content_type, "image/bmp");
        assert_eq!(UploadFile::new("hall.tiff", vec![]).content_type, "image/tiff");
        assert_eq!(
            UploadFile::new("plan.docx", vec![]).content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }

    #[test]
    fn test_random_name_keeps_extension() {
        let file = UploadFile::new("garden.view.png", vec![1, 2, 3]);
        let name = random_object_name(&file);
        assert!(name.ends_with(".png"));
        assert_ne!(name, random_object_name(&file));

        let bare = UploadFile::new("noext", vec![]);
        assert!(!random_object_name(&bare).contains('.'));
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hall.webp");
        std::fs::write(&path, b"fake").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "hall.webp");
        assert_eq!(file.content_type, "image/webp");
        assert_eq!(file.bytes, b"fake");
    }
}
