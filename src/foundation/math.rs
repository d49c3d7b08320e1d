pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Integer BT.601 luma: `(299 R + 587 G + 114 B) / 1000`.
///
/// Exact on gray input (`r == g == b`), so repeated application is stable.
pub(crate) fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let sum = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    (sum / 1000) as u8
}

/// Largest RGBA8 buffer, in bytes, any pipeline stage allocates.
pub(crate) const MAX_RGBA_BYTES: u64 = 1 << 32;

/// Byte length of a `width x height` RGBA8 buffer, or `None` past [`MAX_RGBA_BYTES`].
pub(crate) fn rgba_len(width: u32, height: u32) -> Option<usize> {
    let len = u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(4)?;
    if len > MAX_RGBA_BYTES {
        return None;
    }
    usize::try_from(len).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
