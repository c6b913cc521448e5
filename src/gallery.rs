//! The local picture gallery backing the image picker.
//!
//! A gallery is a flat directory of image files. Scanning does not
//! recurse; subdirectories and non-image files are skipped.

use std::path::{Path, PathBuf};

/// File extensions treated as images, matched case-insensitively.
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// An image the picker can offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub path: PathBuf,
}

impl GalleryImage {
    /// The `file://` URI stored on a POI that uses this image.
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// The file name shown in the picker list.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The gallery directory used when the config names none: the platform
/// pictures directory, or the home directory when there is none.
pub fn default_dir() -> Option<PathBuf> {
    dirs::picture_dir().or_else(dirs::home_dir)
}

/// Scans a gallery directory and returns its images sorted by file name.
///
/// An unreadable or missing directory yields an empty gallery; the
/// picker then simply has nothing to offer.
pub fn scan(dir: &Path) -> Vec<GalleryImage> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "gallery directory is not readable");
        return Vec::new();
    };

    let mut images: Vec<GalleryImage> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .map(|path| GalleryImage { path })
        .collect();
    images.sort_by(|a, b| a.path.cmp(&b.path));
    images
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn scan_finds_images_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.png");
        touch(dir.path(), "a.jpg");

        let images = scan(dir.path());
        let names: Vec<String> = images.iter().map(GalleryImage::name).collect();
        assert_eq!(names, ["a.jpg", "b.png"]);
    }

    #[test]
    fn scan_skips_non_images_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "photo.JPG");
        std::fs::create_dir(dir.path().join("albums.png")).unwrap();

        let images = scan(dir.path());
        let names: Vec<String> = images.iter().map(GalleryImage::name).collect();
        assert_eq!(names, ["photo.JPG"]);
    }

    #[test]
    fn scan_of_a_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn uri_is_a_file_scheme_path() {
        let image = GalleryImage {
            path: PathBuf::from("/tmp/photo.png"),
        };
        assert_eq!(image.uri(), "file:///tmp/photo.png");
    }
}
