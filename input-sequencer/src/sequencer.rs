//! Composes single down/up primitives into keystrokes, chords, sequences and
//! clicks, with a humanized pause between the down and up phase.

use crate::errors::{InputError, Result};
use crate::events::{Chord, KeyCode, MouseButton, Stroke};
use crate::platforms::{self, InputBackend};
use crate::timing::{TimingPolicy, TimingSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace, warn};

/// Construction-time settings for a [`Sequencer`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    pub timing: TimingPolicy,

    /// Seed for the delay generator; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl SequencerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.timing.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy)]
enum Pressed {
    Key(KeyCode),
    Button { button: MouseButton, x: i32, y: i32 },
}

/// A key (or button) that is currently down.
///
/// The up-event is emitted by [`Hold::release`], or by `Drop` on any other
/// exit path, including unwinding out of a delay.
#[must_use = "dropping a Hold releases the key immediately"]
pub struct Hold<'a> {
    backend: &'a dyn InputBackend,
    pressed: Pressed,
    released: bool,
}

impl<'a> Hold<'a> {
    fn key(backend: &'a dyn InputBackend, code: KeyCode) -> Result<Self> {
        backend.post_key_event(code, true)?;
        Ok(Self {
            backend,
            pressed: Pressed::Key(code),
            released: false,
        })
    }

    fn button(backend: &'a dyn InputBackend, button: MouseButton, x: i32, y: i32) -> Result<Self> {
        backend.post_mouse_button_event(button, true, x, y)?;
        Ok(Self {
            backend,
            pressed: Pressed::Button { button, x, y },
            released: false,
        })
    }

    /// The held key, or `None` for a mouse button
    pub fn key_code(&self) -> Option<KeyCode> {
        match self.pressed {
            Pressed::Key(code) => Some(code),
            Pressed::Button { .. } => None,
        }
    }

    /// Emit the up-event and report whether the platform accepted it
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.emit_up()
    }

    fn emit_up(&self) -> Result<()> {
        match self.pressed {
            Pressed::Key(code) => self.backend.post_key_event(code, false),
            Pressed::Button { button, x, y } => {
                self.backend.post_mouse_button_event(button, false, x, y)
            }
        }
    }
}

impl Drop for Hold<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(error) = self.emit_up() {
            warn!(pressed = ?self.pressed, %error, "Failed to release held input");
        }
    }
}

/// Releases every hold in order. All holds get an up-event attempt; the first
/// failure is returned.
fn release_in_order(holds: Vec<Hold<'_>>) -> Result<()> {
    let mut first_error = None;
    for hold in holds {
        if let Err(error) = hold.release() {
            first_error.get_or_insert(error);
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// The main entry point for synthesizing input
#[derive(Clone)]
pub struct Sequencer {
    backend: Arc<dyn InputBackend>,
    timing: Arc<TimingSource>,
    policy: TimingPolicy,
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Sequencer {
    /// Sequencer with its own entropy-seeded timing source
    pub fn new(backend: Arc<dyn InputBackend>, policy: TimingPolicy) -> Result<Self> {
        Self::with_timing_source(backend, policy, Arc::new(TimingSource::new()))
    }

    /// Sequencer drawing delays from `timing`, which may be shared
    pub fn with_timing_source(
        backend: Arc<dyn InputBackend>,
        policy: TimingPolicy,
        timing: Arc<TimingSource>,
    ) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            backend,
            timing,
            policy,
        })
    }

    pub fn from_config(backend: Arc<dyn InputBackend>, config: &SequencerConfig) -> Result<Self> {
        let timing = match config.seed {
            Some(seed) => TimingSource::seeded(seed),
            None => TimingSource::new(),
        };
        Self::with_timing_source(backend, config.timing, Arc::new(timing))
    }

    /// Sequencer posting to the OS input subsystem of the current platform
    #[instrument(skip(policy))]
    pub fn for_current_platform(policy: TimingPolicy) -> Result<Self> {
        let start = Instant::now();
        info!("Initializing platform input backend");

        let sequencer = Self::new(platforms::create_backend()?, policy)?;

        info!(
            duration_ms = start.elapsed().as_millis(),
            humanize = policy.enabled,
            "Platform input backend initialized"
        );
        Ok(sequencer)
    }

    pub fn policy(&self) -> &TimingPolicy {
        &self.policy
    }

    pub fn backend(&self) -> &Arc<dyn InputBackend> {
        &self.backend
    }

    pub fn timing_source(&self) -> &Arc<TimingSource> {
        &self.timing
    }

    /// Press `key` and keep it down until the returned [`Hold`] is released
    /// or dropped.
    pub fn hold(&self, key: KeyCode) -> Result<Hold<'_>> {
        Hold::key(&*self.backend, key)
    }

    /// Press and release `key`, pausing in between when humanization is on
    #[instrument(skip(self))]
    pub fn send_key(&self, key: KeyCode) -> Result<()> {
        let delay = self.draw_delay()?;
        self.tap(key, delay)
    }

    /// Hold `modifier` across a full `send_key(key)`
    #[instrument(skip(self))]
    pub fn send_key_with_modifier(&self, key: KeyCode, modifier: KeyCode) -> Result<()> {
        self.send_key_with_modifiers(key, &[modifier])
    }

    /// Press `modifiers` in order, `send_key(key)`, then release `modifiers`
    /// in the same order they were pressed.
    #[instrument(skip(self))]
    pub fn send_key_with_modifiers(&self, key: KeyCode, modifiers: &[KeyCode]) -> Result<()> {
        let delay = self.draw_delay()?;
        let holds = self.press_all(modifiers)?;
        self.tap(key, delay)?;
        release_in_order(holds)
    }

    pub fn send_chord(&self, chord: &Chord) -> Result<()> {
        self.send_key_with_modifiers(chord.key, &chord.modifiers)
    }

    /// `send_key` for each key, strictly in order
    #[instrument(skip(self, keys), fields(count = keys.len()))]
    pub fn send_sequence(&self, keys: &[KeyCode]) -> Result<()> {
        let start = Instant::now();
        for &key in keys {
            self.send_key(key)?;
        }
        info!(
            duration_ms = start.elapsed().as_millis(),
            count = keys.len(),
            "Sequence sent"
        );
        Ok(())
    }

    #[instrument(skip(self, keys), fields(count = keys.len()))]
    pub fn send_sequence_with_modifier(&self, keys: &[KeyCode], modifier: KeyCode) -> Result<()> {
        self.send_sequence_with_modifiers(keys, &[modifier])
    }

    /// Each key is sent as its own chord: modifiers go down and up again
    /// around every key.
    #[instrument(skip(self, keys), fields(count = keys.len()))]
    pub fn send_sequence_with_modifiers(
        &self,
        keys: &[KeyCode],
        modifiers: &[KeyCode],
    ) -> Result<()> {
        let start = Instant::now();
        for &key in keys {
            self.send_key_with_modifiers(key, modifiers)?;
        }
        info!(
            duration_ms = start.elapsed().as_millis(),
            count = keys.len(),
            "Chord sequence sent"
        );
        Ok(())
    }

    /// Play a mix of bare keys and chords in order
    #[instrument(skip(self, strokes), fields(count = strokes.len()))]
    pub fn send_strokes(&self, strokes: &[Stroke]) -> Result<()> {
        let start = Instant::now();
        for stroke in strokes {
            match stroke {
                Stroke::Key(key) => self.send_key(*key)?,
                Stroke::Chord(chord) => self.send_chord(chord)?,
            }
        }
        info!(
            duration_ms = start.elapsed().as_millis(),
            count = strokes.len(),
            "Strokes sent"
        );
        Ok(())
    }

    /// Move the cursor to `(x, y)` with no button activity
    #[instrument(skip(self))]
    pub fn move_to(&self, x: i32, y: i32) -> Result<()> {
        if !self.backend.set_cursor_position(x, y)? {
            warn!(x, y, "Cursor position rejected");
            return Err(InputError::CursorRejected { x, y });
        }
        Ok(())
    }

    /// Move to `(x, y)`, press `button`, pause, release
    #[instrument(skip(self))]
    pub fn click(&self, button: MouseButton, x: i32, y: i32) -> Result<()> {
        let start = Instant::now();
        let delay = self.draw_delay()?;
        self.move_to(x, y)?;

        let hold = Hold::button(&*self.backend, button, x, y)?;
        self.pause(delay);
        hold.release()?;

        info!(
            duration_ms = start.elapsed().as_millis(),
            ?button,
            x,
            y,
            "Click sent"
        );
        Ok(())
    }

    pub fn click_left(&self, x: i32, y: i32) -> Result<()> {
        self.click(MouseButton::Left, x, y)
    }

    pub fn click_right(&self, x: i32, y: i32) -> Result<()> {
        self.click(MouseButton::Right, x, y)
    }

    /// Drawn before the first event of a gesture, so a bad bound never
    /// leaves a key down.
    fn draw_delay(&self) -> Result<Option<Duration>> {
        self.timing.delay_for(&self.policy)
    }

    fn tap(&self, key: KeyCode, delay: Option<Duration>) -> Result<()> {
        let hold = self.hold(key)?;
        self.pause(delay);
        hold.release()?;
        debug!(?key, delay_ms = delay.map(|d| d.as_millis()), "Key sent");
        Ok(())
    }

    fn press_all(&self, keys: &[KeyCode]) -> Result<Vec<Hold<'_>>> {
        let mut holds = Vec::with_capacity(keys.len());
        for &key in keys {
            // On failure the holds collected so far drop, front to back
            holds.push(self.hold(key)?);
        }
        Ok(holds)
    }

    fn pause(&self, delay: Option<Duration>) {
        if let Some(delay) = delay {
            trace!(delay_ms = delay.as_millis(), "Pausing between down and up");
            std::thread::sleep(delay);
        }
    }
}
