use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, RgbaImage};

use crate::foundation::error::PetpetResult;

/// Decode avatar bytes into straight-alpha RGBA8 frames.
///
/// GIF input yields every frame, already composited onto the logical screen; other formats yield a
/// single frame.
pub fn decode_frames(bytes: &[u8]) -> PetpetResult<Vec<RgbaImage>> {
    if matches!(image::guess_format(bytes), Ok(ImageFormat::Gif)) {
        let decoder = GifDecoder::new(Cursor::new(bytes)).context("open gif decoder")?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .context("decode gif frames")?;
        if !frames.is_empty() {
            return Ok(frames.into_iter().map(|f| f.into_buffer()).collect());
        }
    }
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(vec![dyn_img.to_rgba8()])
}

/// Read and decode an avatar file from disk.
pub fn decode_path(path: &Path) -> PetpetResult<Vec<RgbaImage>> {
    let bytes = std::fs::read(path).with_context(|| format!("read avatar '{}'", path.display()))?;
    decode_frames(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
