use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use gif::{ColorOutput, DecodeOptions};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

/// Size and offset of a frame's sub-region within the logical screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchDims {
    pub width: u16,
    pub height: u16,
    pub left: u16,
    pub top: u16,
}

/// One decoded frame: a flat RGBA buffer covering the frame's sub-region,
/// plus the delay the file requests before the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub patch: Vec<u8>,
    pub dims: PatchDims,
    pub delay_ms: u32,
}

/// The frames of a GIF in file order, together with the logical screen
/// dimensions from the file header. The screen size is fixed for the whole
/// animation and is independent of any single frame's sub-region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedGif {
    pub frames: Vec<DecodedFrame>,
    pub width: u16,
    pub height: u16,
}

/// Reads a complete GIF byte stream from `reader` and decodes it into
/// RGBA frame patches.
///
/// Suspends until the reader is exhausted; decoding itself is synchronous.
/// No format pre-validation happens here, malformed input is rejected by
/// the decoder.
///
/// # Errors
///
/// Returns an error if reading fails or if the `gif` crate rejects the
/// byte stream. No partial result is produced.
#[tracing::instrument(level = "trace", skip(reader))]
pub async fn load<R>(reader: &mut R) -> Result<DecodedGif>
where
    R: AsyncRead + Unpin,
{
    trace!("Loading GIF frames from reader.");

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .await
        .context("Failed to read GIF byte stream")?;

    decode_frames(&bytes)
}

/// Opens the file at `path` and decodes it via [`load`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened, read or decoded.
#[tracing::instrument(level = "trace")]
pub async fn load_path<P>(path: P) -> Result<DecodedGif>
where
    P: AsRef<Path> + std::fmt::Debug,
{
    let mut file = tokio::fs::File::open(&path)
        .await
        .with_context(|| format!("Failed to open GIF file: {}", path.as_ref().display()))?;
    load(&mut file).await
}

fn decode_frames(bytes: &[u8]) -> Result<DecodedGif> {
    let mut options = DecodeOptions::new();
    // Full RGBA patches rather than raw palette indices.
    options.set_color_output(ColorOutput::RGBA);

    let mut decoder = options
        .read_info(Cursor::new(bytes))
        .context("Failed to parse GIF structure")?;

    let width = decoder.width();
    let height = decoder.height();

    let mut frames = Vec::new();
    while let Some(frame) = decoder
        .read_next_frame()
        .context("Failed to decompress GIF frame")?
    {
        frames.push(DecodedFrame {
            patch: frame.buffer.to_vec(),
            dims: PatchDims {
                width: frame.width,
                height: frame.height,
                left: frame.left,
                top: frame.top,
            },
            // The wire format counts delay in hundredths of a second.
            delay_ms: u32::from(frame.delay) * 10,
        });
    }

    debug!(
        "Decoded {} frames, logical screen {width}x{height}.",
        frames.len()
    );

    Ok(DecodedGif {
        frames,
        width,
        height,
    })
}
