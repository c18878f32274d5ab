//! On-disk fixtures for codec, stencil and CLI tests.

use std::path::{Path, PathBuf};

use raster::{ppm, Image, PpmFormat};
use tempfile::TempDir;

/// Writes `image` as `dir/name` and returns the full path.
pub fn write_image(dir: &Path, name: &str, image: &Image, format: PpmFormat) -> PathBuf {
    let path = dir.join(name);
    ppm::write_file(image, &path, format).expect("Failed to write test image");
    path
}

/// Creates a temporary stencil directory holding `0.ppm`, `1.ppm`, ...
///
/// Stencils are written in ASCII form, like the shipped asset set.
pub fn stencil_dir(stencils: &[Image]) -> TempDir {
    let dir = tempfile::Builder::new()
        .prefix("contours_")
        .tempdir()
        .expect("Failed to create temporary stencil directory");
    for (index, stencil) in stencils.iter().enumerate() {
        write_image(dir.path(), &format!("{index}.ppm"), stencil, PpmFormat::Ascii);
    }
    dir
}
