// Performance benchmarks for report extraction
//
// Run with: cargo bench -p venue-core --bench extract_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use venue_core::domain::discover_devices;
use venue_core::{clean_name, ExtractorConfig, Venue};
use venue_infra::HtmlDocument;

/// VENUE 4.x style report with `stages` stage boxes of 48 in / 48 out
fn report(stages: usize) -> String {
    let mut html = String::from(
        r#"<html><body><table class="header">
        <tr><td class="console">Avid VENUE</td><td class="version">VENUE 4.5.3</td></tr>
        <tr><td class="show">Bench\Show</td></tr></table>"#,
    );
    for stage in 1..=stages {
        html.push_str(&format!(r#"<div class="device"><h2>Stage {stage}</h2>"#));
        for class in ["inputs", "outputs"] {
            html.push_str(&format!(r#"<table class="{class}"><tr><th>#</th><th>Name</th></tr>"#));
            for ch in 1..=48 {
                html.push_str(&format!("<tr><td>{ch}</td><td>Ch {ch}-L, Ch {ch}-R</td></tr>"));
            }
            html.push_str("</table>");
        }
        html.push_str("</div>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_clean_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_name");

    for raw in ["eGit", "eGit-L, eGit-R", "v1, v2", "Lead-L, Lead2-R"] {
        group.bench_with_input(BenchmarkId::from_parameter(raw), raw, |b, raw| {
            b.iter(|| black_box(clean_name(black_box(raw))));
        });
    }

    group.finish();
}

fn bench_discover_devices(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover_devices");
    let config = ExtractorConfig::default();

    for stages in [1, 4, 8] {
        let doc = HtmlDocument::parse(&report(stages)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(stages), &doc, |b, doc| {
            b.iter(|| black_box(discover_devices(doc, &config.devices).unwrap()));
        });
    }

    group.finish();
}

fn bench_full_parse(c: &mut Criterion) {
    let html = report(4);
    let config = ExtractorConfig::default();

    c.bench_function("load_and_parse_4_stages", |b| {
        b.iter(|| {
            let doc = HtmlDocument::parse(black_box(&html)).unwrap();
            black_box(Venue::from_document(&doc, &config).unwrap());
        });
    });
}

criterion_group!(benches, bench_clean_name, bench_discover_devices, bench_full_parse);
criterion_main!(benches);
