use super::InputBackend;
use crate::errors::{InputError, Result};
use crate::events::{KeyCode, MouseButton};
use tracing::{debug, warn};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
    MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP,
    MOUSEINPUT, MOUSE_EVENT_FLAGS, SendInput, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::SetCursorPos;

/// Posts events through `SendInput` and places the cursor with `SetCursorPos`
#[derive(Debug, Default)]
pub struct WindowsBackend;

impl WindowsBackend {
    pub fn new() -> Self {
        Self
    }

    fn send(&self, input: INPUT) -> Result<()> {
        let inserted = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if inserted != 1 {
            // SendInput returns 0 when the input was blocked, e.g. by UIPI
            let error = windows::core::Error::from_win32();
            warn!(%error, "SendInput did not insert the event");
            return Err(error.into());
        }
        Ok(())
    }
}

fn mouse_flags(button: MouseButton, is_down: bool) -> MOUSE_EVENT_FLAGS {
    match (button, is_down) {
        (MouseButton::Left, true) => MOUSEEVENTF_LEFTDOWN,
        (MouseButton::Left, false) => MOUSEEVENTF_LEFTUP,
        (MouseButton::Right, true) => MOUSEEVENTF_RIGHTDOWN,
        (MouseButton::Right, false) => MOUSEEVENTF_RIGHTUP,
    }
}

impl InputBackend for WindowsBackend {
    fn post_key_event(&self, code: KeyCode, is_down: bool) -> Result<()> {
        debug!(%code, is_down, "posting key event");
        let flags = if is_down {
            KEYBD_EVENT_FLAGS(0)
        } else {
            KEYEVENTF_KEYUP
        };
        self.send(INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(code.value()),
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        })
    }

    fn post_mouse_button_event(
        &self,
        button: MouseButton,
        is_down: bool,
        x: i32,
        y: i32,
    ) -> Result<()> {
        debug!(?button, is_down, x, y, "posting mouse button event");
        // Without MOUSEEVENTF_MOVE the button acts at the current cursor
        // position, which the sequencer has already set to (x, y).
        self.send(INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: 0,
                    dy: 0,
                    mouseData: 0,
                    dwFlags: mouse_flags(button, is_down),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        })
    }

    fn set_cursor_position(&self, x: i32, y: i32) -> Result<bool> {
        match unsafe { SetCursorPos(x, y) } {
            Ok(()) => Ok(true),
            Err(error) => {
                debug!(x, y, %error, "SetCursorPos rejected position");
                Ok(false)
            }
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl From<windows::core::Error> for InputError {
    fn from(error: windows::core::Error) -> Self {
        InputError::Platform(error.to_string())
    }
}
