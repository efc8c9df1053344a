//! Output naming policy.
//!
//! Default names keep the input's directory and stem and append an
//! operation-specific suffix (`clip.mp4` -> `clip-cut.mp4`). An explicit
//! name always wins and is used verbatim.

use crate::error::{CoreError, CoreResult};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// An input file together with its derived stem and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPath {
    path: PathBuf,
    stem: OsString,
    extension: Option<OsString>,
}

impl MediaPath {
    /// Splits `path` into stem and extension. Fails if the path has no file name.
    pub fn new(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let stem = path
            .file_stem()
            .ok_or_else(|| {
                CoreError::PathError(format!("'{}' does not name a file", path.display()))
            })?
            .to_os_string();
        let extension = path.extension().map(|e| e.to_os_string());
        Ok(Self {
            path,
            stem,
            extension,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn stem(&self) -> &std::ffi::OsStr {
        &self.stem
    }

    #[must_use]
    pub fn extension(&self) -> Option<&std::ffi::OsStr> {
        self.extension.as_deref()
    }

    /// `{dir}/{stem}{suffix}{.ext}`, keeping the original extension.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.stem.clone();
        name.push(suffix);
        if let Some(ext) = &self.extension {
            name.push(".");
            name.push(ext);
        }
        self.path.with_file_name(name)
    }

    /// `{dir}/{stem}.{extension}`, replacing the container.
    #[must_use]
    pub fn with_extension(&self, extension: &str) -> PathBuf {
        let mut name = self.stem.clone();
        name.push(".");
        name.push(extension);
        self.path.with_file_name(name)
    }
}

/// Returns the explicit name if one was given, otherwise `default()`.
pub fn resolve_output(explicit: Option<&Path>, default: impl FnOnce() -> PathBuf) -> PathBuf {
    match explicit {
        Some(name) => name.to_path_buf(),
        None => default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_keeps_extension() {
        let media = MediaPath::new("clip.mp4").unwrap();
        assert_eq!(media.with_suffix("-cut"), PathBuf::from("clip-cut.mp4"));
        assert_eq!(media.with_suffix("-resized"), PathBuf::from("clip-resized.mp4"));
    }

    #[test]
    fn suffix_keeps_directory() {
        let media = MediaPath::new("footage/day1/clip.MOV").unwrap();
        assert_eq!(
            media.with_suffix("-slow"),
            PathBuf::from("footage/day1/clip-slow.MOV")
        );
    }

    #[test]
    fn extension_replaces_container() {
        let media = MediaPath::new("clip.mov").unwrap();
        assert_eq!(media.with_extension("gif"), PathBuf::from("clip.gif"));
        assert_eq!(media.with_extension("mkv"), PathBuf::from("clip.mkv"));
    }

    #[test]
    fn only_last_extension_is_replaced() {
        let media = MediaPath::new("holiday.final.mp4").unwrap();
        assert_eq!(media.stem(), "holiday.final");
        assert_eq!(media.with_suffix("-clip"), PathBuf::from("holiday.final-clip.mp4"));
    }

    #[test]
    fn file_without_extension() {
        let media = MediaPath::new("recording").unwrap();
        assert!(media.extension().is_none());
        assert_eq!(media.with_suffix("-noaudio"), PathBuf::from("recording-noaudio"));
    }

    #[test]
    fn rejects_path_without_file_name() {
        assert!(matches!(MediaPath::new(".."), Err(CoreError::PathError(_))));
    }

    #[test]
    fn explicit_name_wins() {
        let media = MediaPath::new("clip.mp4").unwrap();
        let explicit = PathBuf::from("out/final.mp4");
        assert_eq!(
            resolve_output(Some(&explicit), || media.with_suffix("-cut")),
            explicit
        );
        assert_eq!(
            resolve_output(None, || media.with_suffix("-cut")),
            PathBuf::from("clip-cut.mp4")
        );
    }
}
