//! Category folders and the ordered video lists discovered inside them.

use std::path::{Path, PathBuf};

use crate::assets::media::VideoBackend;
use crate::foundation::error::{PlayerError, PlayerResult};

/// File extensions (compared case-insensitively) treated as video candidates.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Return `true` when `path` carries one of [`VIDEO_EXTENSIONS`].
pub fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// A named video folder shown as one button in the overlay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Folder name relative to the library root.
    pub folder: String,
    /// Short button label.
    pub label: String,
}

impl Category {
    /// Build a category from its folder name and label.
    pub fn new(folder: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            label: label.into(),
        }
    }
}

/// One playable video in a loaded category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoEntry {
    /// Absolute or root-relative path of the file.
    pub path: PathBuf,
    /// Position within the sorted candidate list, before unplayable files were skipped.
    pub ordinal: usize,
}

/// Lists candidate files inside a category folder.
pub trait FileEnumerator {
    /// Return video-extension files in `folder`, in any order. A missing folder yields an empty list.
    fn candidates(&self, folder: &Path) -> PlayerResult<Vec<PathBuf>>;
}

/// [`FileEnumerator`] backed by the local filesystem (non-recursive).
#[derive(Clone, Copy, Debug, Default)]
pub struct DirEnumerator;

impl FileEnumerator for DirEnumerator {
    fn candidates(&self, folder: &Path) -> PlayerResult<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(folder = %folder.display(), "category folder missing");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(PlayerError::Other(anyhow::anyhow!(
                    "read category folder '{}': {e}",
                    folder.display()
                )));
            }
        };

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                PlayerError::Other(anyhow::anyhow!(
                    "read entry in '{}': {e}",
                    folder.display()
                ))
            })?;
            let path = entry.path();
            if path.is_file() && has_video_extension(&path) {
                out.push(path);
            }
        }
        Ok(out)
    }
}

/// Ordered set of categories under a common root.
pub struct Library {
    root: PathBuf,
    categories: Vec<Category>,
    enumerator: Box<dyn FileEnumerator>,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("root", &self.root)
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}

impl Library {
    /// Create a library. At least one category is required.
    pub fn new(
        root: impl Into<PathBuf>,
        categories: Vec<Category>,
        enumerator: Box<dyn FileEnumerator>,
    ) -> PlayerResult<Self> {
        if categories.is_empty() {
            return Err(PlayerError::validation(
                "library needs at least one category",
            ));
        }
        Ok(Self {
            root: root.into(),
            categories,
            enumerator,
        })
    }

    /// Configured categories in button order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Library root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder of category `k`, or `None` when out of range.
    pub fn folder(&self, k: usize) -> Option<PathBuf> {
        self.categories.get(k).map(|c| self.root.join(&c.folder))
    }

    /// Enumerate category `k`, keep files `backend` can open with a non-empty size and at least
    /// one frame, and return them sorted by file name.
    ///
    /// Every probe handle is released before returning. Unplayable files are skipped with a warning.
    #[tracing::instrument(skip(self, backend), fields(category = k))]
    pub fn load(&self, k: usize, backend: &mut dyn VideoBackend) -> PlayerResult<Vec<VideoEntry>> {
        let folder = self.folder(k).ok_or_else(|| {
            PlayerError::validation(format!(
                "category index {k} out of range (have {})",
                self.categories.len()
            ))
        })?;

        let mut candidates = self.enumerator.candidates(&folder)?;
        candidates.retain(|p| has_video_extension(p));
        candidates.sort();

        let mut out = Vec::with_capacity(candidates.len());
        for (ordinal, path) in candidates.into_iter().enumerate() {
            match backend.open(&path) {
                Ok(mut source) => {
                    let playable = source.info().is_playable();
                    source.release();
                    if playable {
                        out.push(VideoEntry { path, ordinal });
                    } else {
                        tracing::warn!(path = %path.display(), "skipping video with no frames");
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable video");
                }
            }
        }

        tracing::info!(
            folder = %folder.display(),
            videos = out.len(),
            "loaded category"
        );
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
