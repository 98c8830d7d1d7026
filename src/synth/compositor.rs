use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::effects::composite::alpha_composite_at;
use crate::effects::geometry::rotate_expand;
use crate::foundation::core::PaperPlacement;
use crate::foundation::error::{SynthError, SynthResult};

/// Rotate the word canvas with the paper's angle and composite it at the paper's offset.
///
/// The canvas has the unrotated paper's size, so after the shared rotation it lines up with
/// the pasted paper exactly.
pub fn composite_words(
    background: &mut RgbaImage,
    word_canvas: &RgbaImage,
    placement: PaperPlacement,
) -> SynthResult<()> {
    let rotated = rotate_expand(word_canvas, f64::from(placement.angle_deg))?;
    alpha_composite_at(
        background,
        &rotated,
        i64::from(placement.x),
        i64::from(placement.y),
    );
    Ok(())
}

/// `true` for extensions whose encoders cannot store alpha.
pub fn is_lossy_output(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

/// Convert the final raster to the color mode the output path calls for.
pub fn finalize_for_output(image: RgbaImage, path: &Path) -> DynamicImage {
    let image = DynamicImage::ImageRgba8(image);
    if is_lossy_output(path) {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}

/// Encode `image` to `path`, creating parent directories as needed.
///
/// The encoder writes a hidden sibling file which is renamed into place once complete, so a
/// failure never leaves a truncated output behind.
pub fn write_output(image: &DynamicImage, path: &Path) -> SynthResult<()> {
    let format = ImageFormat::from_path(path).map_err(|e| {
        SynthError::validation(format!(
            "unsupported output format '{}': {e}",
            path.display()
        ))
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            SynthError::io(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }

    let tmp = temp_sibling(path);
    if let Err(e) = image.save_with_format(&tmp, format) {
        let _ = std::fs::remove_file(&tmp);
        return Err(SynthError::io(format!(
            "write image '{}': {e}",
            path.display()
        )));
    }
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SynthError::io(format!("move image into '{}': {e}", path.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/synth/compositor.rs"]
mod tests;
