use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::{
    engine::AudioContext,
    graph::{
        extensions::NodeExt,
        gain::GainNode,
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
    },
    sequencing::NOTES,
    synth::tone::Tone,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/voice");
    let tone = Tone::new(440.0, 0.0, 3600.0);
    let ctx = RenderCtx::from_freq(SAMPLE_RATE, tone.frequency, 1.0).at_time(0.25);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut voice = OscNode::sine().amplify(GainNode::ramp(tone.envelope));
        voice.note_on(&ctx);

        group.bench_with_input(BenchmarkId::new("sine_ramp", size), &size, |b, _| {
            b.iter(|| voice.render_block(black_box(&mut buffer), black_box(&ctx)))
        });
    }

    group.finish();
}

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/mixer");

    for &voices in &[1usize, 12, 48] {
        for &size in BLOCK_SIZES {
            let (mut context, mut mixer) = AudioContext::offline(SAMPLE_RATE);
            // Long tones so none finish while the benchmark runs
            for note in NOTES.iter().cycle().take(voices) {
                let tone = context.create_tone(note.frequency, 3600.0);
                let _ = context.start_tone(tone);
            }
            let mut buffer = vec![0.0f32; size];

            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, _| b.iter(|| mixer.render_block(black_box(&mut buffer))),
            );
        }
    }

    group.finish();
}
