//! Humanized keyboard and mouse input synthesis
//!
//! This crate sequences OS-level input events: key presses, modifier chords,
//! key sequences and mouse clicks. Every down-event is paired with its
//! up-event, and a random delay can be inserted between the two so the input
//! does not arrive with machine-perfect timing.
//!
//! ```no_run
//! use input_sequencer::{KeyTable, Sequencer, TimingPolicy};
//!
//! # fn main() -> input_sequencer::Result<()> {
//! let keys = KeyTable::windows()?;
//! let sequencer = Sequencer::for_current_platform(TimingPolicy::default())?;
//! sequencer.send_chord(&keys.parse_chord("ctrl+shift+r")?)?;
//! sequencer.click_left(100, 200)?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod events;
pub mod keys;
pub mod platforms;
pub mod sequencer;
#[cfg(test)]
mod tests;
pub mod timing;

pub use errors::{InputError, Result};
pub use events::{Chord, InputEvent, KeyCode, MouseButton, Stroke};
pub use keys::KeyTable;
pub use platforms::{InputBackend, RecordingBackend};
pub use sequencer::{Hold, Sequencer, SequencerConfig};
pub use timing::{TimingPolicy, TimingSource, MAX_DELAY_MS};
