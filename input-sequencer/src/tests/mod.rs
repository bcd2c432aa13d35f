mod playback_tests;

use crate::platforms::RecordingBackend;
use crate::{Sequencer, TimingPolicy, TimingSource};
use std::sync::Arc;

// Initialize tracing for tests
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_target(true)
        .with_thread_ids(true)
        .with_test_writer()
        .try_init();
}

// Sequencer over a recording backend with a fixed seed
pub fn setup_recording_sequencer(policy: TimingPolicy) -> (Arc<RecordingBackend>, Sequencer) {
    let backend = Arc::new(RecordingBackend::new());
    let sequencer = Sequencer::with_timing_source(
        backend.clone(),
        policy,
        Arc::new(TimingSource::seeded(TEST_SEED)),
    )
    .unwrap();
    (backend, sequencer)
}

// Test constants
pub const TEST_SEED: u64 = 0x5EED;
pub const TEST_MIN_DELAY_MS: i64 = 2;
pub const TEST_MAX_DELAY_MS: i64 = 6;
