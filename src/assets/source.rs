use std::path::{Path, PathBuf};

use crate::foundation::error::{SynthError, SynthResult};

/// Anything that can enumerate candidate rasters for the pipeline.
pub trait ImageSource {
    /// Paths of the available rasters, in a stable order.
    fn list(&self) -> SynthResult<Vec<PathBuf>>;
}

/// Lists image files directly inside one directory.
///
/// Hidden entries, sub-directories and files whose extension is not a known raster format are
/// skipped. Results are sorted by file name.
#[derive(Clone, Debug)]
pub struct DirImageSource {
    dir: PathBuf,
}

impl DirImageSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

impl ImageSource for DirImageSource {
    fn list(&self) -> SynthResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            SynthError::io(format!("list directory '{}': {e}", self.dir.display()))
        })?;

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SynthError::io(format!("list directory '{}': {e}", self.dir.display()))
            })?;
            let path = entry.path();
            if !path.is_file() || is_hidden(&path) {
                continue;
            }
            if image::ImageFormat::from_path(&path).is_err() {
                continue;
            }
            out.push(path);
        }
        out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(out)
    }
}

/// Fixed list of paths, mostly useful for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct StaticImageSource(pub Vec<PathBuf>);

impl ImageSource for StaticImageSource {
    fn list(&self) -> SynthResult<Vec<PathBuf>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
