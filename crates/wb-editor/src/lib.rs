pub mod board;
pub mod input;
pub mod manager;
pub mod renderer;
pub mod session;
pub mod toolbar;

pub use board::Whiteboard;
pub use input::{InputEvent, PointerKind, PointerSample};
pub use manager::SurfaceManager;
pub use renderer::StrokeRenderer;
pub use session::{StrokeSession, StrokeState};
pub use toolbar::ToolbarState;
