//! Image fixtures for upload scenarios.

use std::path::{Path, PathBuf};

use petfriends_core::PhotoUpload;

use crate::error::FixtureError;

pub const DEFAULT_PHOTO: &str = "images/0.jpg";

/// Resolve `path` against this crate's directory unless it is absolute.
pub fn fixture_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
    }
}

pub fn load_photo(path: impl AsRef<Path>) -> Result<PhotoUpload, FixtureError> {
    let path = fixture_path(path);
    let bytes = std::fs::read(&path).map_err(|source| FixtureError::Read {
        path: path.clone(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    Ok(PhotoUpload::new(file_name, bytes))
}

pub fn default_photo() -> Result<PhotoUpload, FixtureError> {
    load_photo(DEFAULT_PHOTO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_photo_is_a_jpeg() {
        let photo = default_photo().unwrap();
        assert_eq!(photo.file_name, "0.jpg");
        assert_eq!(photo.content_type, "image/jpeg");
        assert_eq!(&photo.bytes[..3], &[0xff, 0xd8, 0xff]);
    }

    #[test]
    fn absolute_paths_are_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, b"png").unwrap();

        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.file_name, "cat.png");
        assert_eq!(photo.content_type, "image/png");
        assert_eq!(photo.bytes, b"png");
    }

    #[test]
    fn missing_fixture_names_the_path() {
        let err = load_photo("images/missing.jpg").unwrap_err();
        assert!(err.to_string().contains("missing.jpg"));
    }
}
