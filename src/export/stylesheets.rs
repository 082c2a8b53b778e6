//! Discovery of stylesheet files to hand to the renderer.

use anyhow::{Context, Result};
use globset::Glob;
use std::path::{Path, PathBuf};

/// Collect the `*.css` files directly inside `css_directory`, sorted by
/// name so the cascade order is stable between runs.
///
/// A missing directory yields an empty list; stylesheets are optional.
pub fn find_stylesheets(css_directory: &Path) -> Result<Vec<PathBuf>> {
    if !css_directory.is_dir() {
        return Ok(Vec::new());
    }

    let matcher = Glob::new("*.css")
        .with_context(|| "Failed to parse stylesheet glob")?
        .compile_matcher();

    let mut stylesheets = Vec::new();
    for entry in std::fs::read_dir(css_directory).with_context(|| {
        format!("Failed to read CSS directory {}", css_directory.display())
    })? {
        let entry = entry.with_context(|| "Failed to read CSS directory entry")?;
        let path = entry.path();
        if path.is_file() && path.file_name().is_some_and(|name| matcher.is_match(name)) {
            stylesheets.push(path);
        }
    }

    stylesheets.sort();
    Ok(stylesheets)
}
