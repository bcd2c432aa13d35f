use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use input_sequencer::{KeyCode, KeyTable, RecordingBackend, Sequencer, TimingPolicy, TimingSource};
use std::sync::Arc;

/// Benchmark drawing delays from a shared timing source
fn bench_next_delay(c: &mut Criterion) {
    let source = TimingSource::seeded(1);

    c.bench_function("next_delay_50_300", |b| {
        b.iter(|| black_box(source.next_delay(black_box(50), black_box(300)).unwrap()))
    });
}

/// Benchmark sequencing overhead against the recording backend, without delays
fn bench_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("send_sequence");

    for len in [1usize, 16, 256] {
        let keys: Vec<KeyCode> = (0..len).map(|i| KeyCode(0x41 + (i % 26) as u16)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &keys, |b, keys| {
            let backend = Arc::new(RecordingBackend::new());
            let sequencer = Sequencer::new(backend.clone(), TimingPolicy::disabled()).unwrap();
            b.iter(|| {
                sequencer.send_sequence(black_box(keys)).unwrap();
                backend.clear();
            })
        });
    }

    group.finish();
}

/// Benchmark chord parsing against the bundled key table
fn bench_parse_chord(c: &mut Criterion) {
    let table = KeyTable::windows().unwrap();

    c.bench_function("parse_chord", |b| {
        b.iter(|| black_box(table.parse_chord(black_box("ctrl+shift+alt+f12")).unwrap()))
    });
}

criterion_group!(benches, bench_next_delay, bench_sequences, bench_parse_chord);
criterion_main!(benches);
