#![warn(clippy::pedantic, clippy::nursery)]
//! Thin adapter around the [`gif`] crate: load a GIF file into a list of
//! per-frame RGBA patches, then blit each patch onto a drawing surface at
//! its declared offset. All bitstream decoding, palette resolution and
//! disposal bookkeeping stays in the `gif` crate; composing successive
//! frames onto a persistent surface is the caller's job.

pub mod loader;
pub mod renderer;

pub use loader::{load, load_path, DecodedFrame, DecodedGif, PatchDims};
pub use renderer::{draw_patch, DrawSurface};
