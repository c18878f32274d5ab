//! Locations of repository assets, independent of the test's working directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Repository root: the nearest ancestor of this crate holding `contours/`.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .find(|dir| dir.join("contours").is_dir())
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// The 8x8 stencil set shipped in the repository.
pub fn contours_dir() -> PathBuf {
    workspace_root().join("contours")
}

/// Scratch directory removed when dropped.
pub fn temp_test_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("contour_test_")
        .tempdir()
        .expect("Failed to create scratch directory")
}
