use anyhow::{bail, Context, Result};
use image::{imageops, ImageBuffer, Rgba, RgbaImage};
use tracing::trace;

use crate::loader::{DecodedFrame, PatchDims};

/// A mutable rendering target exposing a single pixel-buffer-write
/// primitive. Implementations own the coordinate system; this crate only
/// writes through it and never reads the surface back.
pub trait DrawSurface {
    /// Writes an RGBA buffer of `dims.width x dims.height` pixels so its
    /// top-left corner lands at `(dims.left, dims.top)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the write.
    fn put_patch(&mut self, pixels: &[u8], dims: PatchDims) -> Result<()>;
}

impl DrawSurface for RgbaImage {
    fn put_patch(&mut self, pixels: &[u8], dims: PatchDims) -> Result<()> {
        let patch = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
            u32::from(dims.width),
            u32::from(dims.height),
            pixels,
        )
        .context("Patch byte length does not match its dimensions")?;
        imageops::replace(self, &patch, i64::from(dims.left), i64::from(dims.top));
        Ok(())
    }
}

/// Overwrites the surface region at the frame's offset with the frame's
/// RGBA patch. Pure overwrite: no other region is touched, the surface is
/// never cleared, and no disposal method is interpreted here. Callers
/// compose successive frames onto a persistent surface themselves.
///
/// `width` and `height` are the logical screen dimensions reported by the
/// loader. They document the surface the frame was decoded for; the write
/// itself is not clipped or validated against them.
///
/// # Errors
///
/// Returns an error without touching the surface if the patch byte length
/// does not match `dims.width * dims.height * 4`, or if the surface
/// rejects the write.
#[tracing::instrument(level = "trace", skip(surface, frame))]
pub fn draw_patch<S>(surface: &mut S, frame: &DecodedFrame, width: u16, height: u16) -> Result<()>
where
    S: DrawSurface,
{
    let dims = frame.dims;
    trace!(
        "Drawing {}x{} patch at ({}, {}) onto a {width}x{height} canvas.",
        dims.width,
        dims.height,
        dims.left,
        dims.top
    );

    let expected = usize::from(dims.width) * usize::from(dims.height) * 4;
    if frame.patch.len() != expected {
        bail!(
            "Patch has {} bytes but {}x{} RGBA requires {expected}",
            frame.patch.len(),
            dims.width,
            dims.height
        );
    }

    surface.put_patch(&frame.patch, dims)
}
