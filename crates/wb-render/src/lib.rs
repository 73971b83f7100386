//! Host-independent drawing surfaces.
//!
//! `RasterSurface` rasterizes into an RGBA8 buffer on the CPU and can be
//! read back pixel by pixel. `RecordingSurface` keeps a log of every draw
//! call. Both implement `wb_core::Surface`.

pub mod raster;
pub mod record;

pub use raster::RasterSurface;
pub use record::{DrawOp, RecordingSurface};
