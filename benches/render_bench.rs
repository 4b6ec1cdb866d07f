// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url::Url;

use dropscan::page::strip_marker;
use dropscan::{classify_reply, AnalysisResults, ResultRenderer, Response, SessionTexts, SurfaceIds, UiSurface};

fn sample_results() -> AnalysisResults {
    AnalysisResults::new(
        (0..50).map(|i| format!("⚠️ finding {} <b>eval()</b> on line {}", i, i * 3)),
        (0..50).map(|i| format!("✅ check {} passed", i)),
    )
}

fn render_benchmark(c: &mut Criterion) {
    let surface = UiSurface::from_template(&SurfaceIds::default()).unwrap();
    let texts = SessionTexts::default();
    let renderer = ResultRenderer::new(
        surface,
        "⚠️",
        "✅",
        texts.no_vulnerabilities,
        texts.status_complete,
    );
    let results = sample_results();

    c.bench_function("render_report", |b| {
        b.iter(|| renderer.render(black_box(&results)))
    });
}

fn classify_benchmark(c: &mut Criterion) {
    let body = serde_json::json!({"success": true, "results": sample_results()}).to_string();
    let url = Url::parse("http://127.0.0.1:5000/upload").unwrap();
    let response = Response::from_parts(200, body, url).unwrap();

    c.bench_function("classify_reply", |b| {
        b.iter(|| classify_reply(black_box(&response)).unwrap())
    });
}

fn strip_marker_benchmark(c: &mut Criterion) {
    let messages: Vec<String> = sample_results().vulnerabilities;

    c.bench_function("strip_marker", |b| {
        b.iter(|| {
            for message in &messages {
                black_box(strip_marker(message, "⚠️"));
            }
        })
    });
}

criterion_group!(benches, render_benchmark, classify_benchmark, strip_marker_benchmark);
criterion_main!(benches);
