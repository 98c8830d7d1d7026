use std::path::Path;

use image::RgbaImage;

use crate::foundation::error::{SynthError, SynthResult};

/// Decode an encoded raster (any format the `image` crate recognises) into straight RGBA8.
pub fn decode_raster(bytes: &[u8]) -> SynthResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SynthError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(SynthError::decode("image has zero width or height"));
    }
    Ok(rgba)
}

/// Read and decode a raster file.
pub fn load_raster(path: &Path) -> SynthResult<RgbaImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| SynthError::io(format!("read image '{}': {e}", path.display())))?;
    decode_raster(&bytes).map_err(|e| match e {
        SynthError::Decode(msg) => SynthError::decode(format!("'{}': {msg}", path.display())),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
