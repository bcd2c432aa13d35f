//! In-memory backend that records every primitive instead of posting it.
//!
//! Useful for dry runs and as the fake platform in tests. It can also be told
//! to reject cursor moves or to fail a given post, to drive error paths.

use super::InputBackend;
use crate::errors::{InputError, Result};
use crate::events::{InputEvent, KeyCode, MouseButton};
use std::sync::Mutex;
use tracing::trace;

#[derive(Debug, Default)]
struct RecordingState {
    events: Vec<InputEvent>,
    attempts: usize,
    fail_at: Option<usize>,
    reject_cursor: bool,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    state: Mutex<RecordingState>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `set_cursor_position` answers `Ok(false)`, like an off-screen target
    pub fn rejecting_cursor(self) -> Self {
        self.with_state(|state| state.reject_cursor = true);
        self
    }

    /// The post attempt with zero-based index `attempt` fails with a
    /// platform error and is not recorded.
    pub fn failing_at(self, attempt: usize) -> Self {
        self.with_state(|state| state.fail_at = Some(attempt));
        self
    }

    /// Snapshot of the recorded trace
    pub fn events(&self) -> Vec<InputEvent> {
        self.with_state(|state| state.events.clone())
    }

    pub fn clear(&self) {
        self.with_state(|state| {
            state.events.clear();
            state.attempts = 0;
        });
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.events())?)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut RecordingState) -> T) -> T {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state)
    }

    fn record(&self, event: InputEvent) -> Result<()> {
        self.with_state(|state| {
            let attempt = state.attempts;
            state.attempts += 1;
            if state.fail_at == Some(attempt) {
                return Err(InputError::Platform(format!(
                    "injected failure on post #{attempt}"
                )));
            }
            trace!(?event, "recorded input event");
            state.events.push(event);
            Ok(())
        })
    }
}

impl InputBackend for RecordingBackend {
    fn post_key_event(&self, code: KeyCode, is_down: bool) -> Result<()> {
        self.record(InputEvent::Key { code, is_down })
    }

    fn post_mouse_button_event(
        &self,
        button: MouseButton,
        is_down: bool,
        x: i32,
        y: i32,
    ) -> Result<()> {
        self.record(InputEvent::MouseButton {
            button,
            is_down,
            x,
            y,
        })
    }

    fn set_cursor_position(&self, x: i32, y: i32) -> Result<bool> {
        if self.with_state(|state| state.reject_cursor) {
            return Ok(false);
        }
        self.record(InputEvent::CursorMove { x, y })?;
        Ok(true)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
