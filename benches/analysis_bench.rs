//! Benchmarks for the per-turn scoring pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mindecho_core::chat::{respond, ChatRequest};
use mindecho_core::emotion::audio::analyze_voice_emotion;
use mindecho_core::emotion::image::analyze_visual_emotion;
use mindecho_core::emotion::text::analyze_text_emotion;
use mindecho_core::mood::{MoodEntry, MoodLabel};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MESSAGE: &str = "Work has been overwhelming lately and I feel anxious and tired all the time";

fn bench_classifiers(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("text_emotion", |b| {
        b.iter(|| analyze_text_emotion(black_box(MESSAGE), &mut rng))
    });

    // ~3 seconds of 8-bit audio
    let audio: Vec<u8> = (0..48_000u32)
        .map(|i| (128.0 + 90.0 * (i as f32 / 7.0).sin()) as u8)
        .collect();
    c.bench_function("voice_emotion", |b| {
        b.iter(|| analyze_voice_emotion(black_box(&audio)))
    });

    // 200x200 RGBA, the post-downscale ceiling
    let pixels: Vec<u8> = (0..200 * 200)
        .flat_map(|i: u32| [(i % 256) as u8, 120, 90, 255])
        .collect();
    c.bench_function("visual_emotion", |b| {
        b.iter(|| analyze_visual_emotion(black_box(&pixels)))
    });
}

fn bench_chat_turn(c: &mut Criterion) {
    let moods: Vec<MoodEntry> = [MoodLabel::Bad, MoodLabel::Stressed, MoodLabel::Okay]
        .into_iter()
        .filter_map(|m| MoodEntry::new(m, None, None).ok())
        .collect();
    let request = ChatRequest {
        message: MESSAGE.into(),
        ..ChatRequest::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    c.bench_function("chat_turn", |b| {
        b.iter(|| respond(black_box(&request), black_box(&moods), &mut rng))
    });
}

criterion_group!(benches, bench_classifiers, bench_chat_turn);
criterion_main!(benches);
