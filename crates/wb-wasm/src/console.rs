//! Browser console logging and panic reporting.

use log::{Level, LevelFilter};

/// Install the console logger and the panic hook. Safe to call repeatedly.
pub fn setup() {
    use std::sync::Once;
    static SETUP: Once = Once::new();
    SETUP.call_once(|| {
        if let Err(e) = console_log::init_with_level(Level::Warn) {
            web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
        }
        std::panic::set_hook(Box::new(|info| {
            let msg = format!("Whiteboard WASM panic: {info}");
            web_sys::console::error_1(&msg.into());
        }));
    });
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}
