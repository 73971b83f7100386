pub mod background;
pub mod config;
pub mod metrics;
pub mod model;
pub mod surface;

pub use background::{BackgroundStyle, render_background};
pub use config::{ShapePreview, ToolbarDefaults, WhiteboardConfig};
pub use metrics::{ClientRect, SurfaceMetrics};
pub use model::*;
pub use surface::Surface;
