use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::error::{OverlayError, OverlayResult};

// Extension to MIME type table for everything the intake recognises.
// Unlisted extensions map to `application/octet-stream`.
const MIME_TABLE: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    ("ogv", "video/ogg"),
    ("mpg", "video/mpeg"),
    ("mpeg", "video/mpeg"),
    ("wmv", "video/x-ms-wmv"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tga", "image/x-tga"),
    ("qoi", "image/qoi"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
];

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}

/// Opaque reference to an accepted media file. A new one is issued for every
/// accepted selection, so two selections of the same path never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaHandle(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub handle: MediaHandle,
    pub kind: MediaKind,
    pub path: PathBuf,
}

/// Which MIME families the intake admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    VideoOnly,
    VideoAndImage,
}

impl Accept {
    pub fn classify(self, mime: &str) -> Option<MediaKind> {
        if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else if mime.starts_with("image/") && self == Accept::VideoAndImage {
            Some(MediaKind::Image)
        } else {
            None
        }
    }

    /// Extensions offered by the file dialog filter.
    pub fn extensions(self) -> Vec<&'static str> {
        MIME_TABLE
            .iter()
            .filter(|(_, mime)| self.classify(mime).is_some())
            .map(|(ext, _)| *ext)
            .collect()
    }

    pub fn filter_label(self) -> &'static str {
        match self {
            Accept::VideoOnly => "Video",
            Accept::VideoAndImage => "Video or image",
        }
    }
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return FALLBACK_MIME;
    };
    let ext = ext.to_lowercase();
    MIME_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

/// Issues handles for accepted files.
#[derive(Debug)]
pub struct MediaIntake {
    accept: Accept,
    next_handle: u64,
}

impl MediaIntake {
    pub fn new(accept: Accept) -> Self {
        Self { accept, next_handle: 1 }
    }

    pub fn accept(&self) -> Accept {
        self.accept
    }

    pub fn admit(&mut self, path: &Path) -> OverlayResult<MediaAsset> {
        let mime = mime_for_path(path);
        let kind = self
            .accept
            .classify(mime)
            .ok_or_else(|| OverlayError::UnsupportedMediaType { mime: mime.to_string() })?;
        debug!(?path, mime, "classified media");

        if !path.is_file() {
            return Err(OverlayError::MediaNotFound(path.to_path_buf()));
        }

        let handle = MediaHandle(self.next_handle);
        self.next_handle += 1;
        info!(?handle, kind = kind.label(), path = %path.display(), "media admitted");

        Ok(MediaAsset { handle, kind, path: path.to_path_buf() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn mime_lookup_is_case_insensitive() {
        assert_eq!(mime_for_path(Path::new("clip.MP4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("photo.JpEg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_for_path(Path::new("README")), FALLBACK_MIME);
    }

    #[test]
    fn classify_by_prefix() {
        assert_eq!(Accept::VideoAndImage.classify("video/webm"), Some(MediaKind::Video));
        assert_eq!(Accept::VideoAndImage.classify("image/png"), Some(MediaKind::Image));
        assert_eq!(Accept::VideoOnly.classify("image/png"), None);
        assert_eq!(Accept::VideoAndImage.classify("audio/mpeg"), None);
    }

    #[test]
    fn dialog_extensions_follow_accept_mode() {
        let video_only = Accept::VideoOnly.extensions();
        assert!(video_only.contains(&"mp4"));
        assert!(!video_only.contains(&"png"));

        let both = Accept::VideoAndImage.extensions();
        assert!(both.contains(&"png"));
        assert!(!both.contains(&"pdf"));
    }

    #[test]
    fn admit_issues_fresh_handles() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch(&dir, "loop.mp4");
        let image = touch(&dir, "still.png");

        let mut intake = MediaIntake::new(Accept::VideoAndImage);
        let first = intake.admit(&video).unwrap();
        let second = intake.admit(&image).unwrap();
        let third = intake.admit(&video).unwrap();

        assert_eq!(first.kind, MediaKind::Video);
        assert_eq!(second.kind, MediaKind::Image);
        assert_ne!(first.handle, second.handle);
        assert_ne!(first.handle, third.handle);
    }

    #[test]
    fn admit_rejects_unsupported_types() {
        let dir = tempfile::tempdir().unwrap();
        let doc = touch(&dir, "doc.pdf");

        let mut intake = MediaIntake::new(Accept::VideoAndImage);
        match intake.admit(&doc) {
            Err(OverlayError::UnsupportedMediaType { mime }) => assert_eq!(mime, "application/pdf"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn video_only_rejects_images() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch(&dir, "still.jpg");

        let mut intake = MediaIntake::new(Accept::VideoOnly);
        assert!(matches!(
            intake.admit(&image),
            Err(OverlayError::UnsupportedMediaType { .. })
        ));
    }

    #[test]
    fn admit_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.mp4");

        let mut intake = MediaIntake::new(Accept::VideoAndImage);
        assert!(matches!(intake.admit(&missing), Err(OverlayError::MediaNotFound(_))));
    }
}
