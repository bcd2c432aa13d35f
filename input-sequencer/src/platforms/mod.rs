use crate::errors::Result;
use crate::events::{KeyCode, MouseButton};
use std::sync::Arc;

/// The primitives every platform-specific backend must provide.
///
/// Each call posts exactly one event and returns once the OS has taken it.
pub trait InputBackend: Send + Sync {
    /// Post a single key transition
    fn post_key_event(&self, code: KeyCode, is_down: bool) -> Result<()>;

    /// Post a single mouse button transition at `(x, y)`
    fn post_mouse_button_event(
        &self,
        button: MouseButton,
        is_down: bool,
        x: i32,
        y: i32,
    ) -> Result<()>;

    /// Move the cursor to an absolute position on the primary monitor.
    /// `Ok(false)` means the OS refused the position.
    fn set_cursor_position(&self, x: i32, y: i32) -> Result<bool>;

    /// Enable downcasting to concrete backend types
    fn as_any(&self) -> &dyn std::any::Any;
}

pub mod recording;
#[cfg(target_os = "windows")]
pub mod windows;

pub use recording::RecordingBackend;

/// Create the appropriate backend for the current platform
pub fn create_backend() -> Result<Arc<dyn InputBackend>> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsBackend::new()))
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(crate::errors::InputError::UnsupportedPlatform(format!(
            "no input backend for {}",
            std::env::consts::OS
        )))
    }
}
