//! Benchmarks for the editor core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rich_pad::{Editor, EditorConfig, History, HistoryPolicy, HostEngine, MemoryHost};

fn paragraphs(count: usize) -> String {
    (0..count)
        .map(|i| format!("<p>Paragraph {} with enough text to look like a real document.</p>", i))
        .collect()
}

fn bench_record_keystrokes(c: &mut Criterion) {
    c.bench_function("record_keystrokes", |b| {
        let content = paragraphs(50);
        b.iter(|| {
            let mut history = History::default();
            for _ in 0..100 {
                history.record(black_box(content.as_str()));
            }
        });
    });
}

fn bench_record_bounded(c: &mut Criterion) {
    c.bench_function("record_bounded_history", |b| {
        let content = paragraphs(50);
        let mut history = History::new(HistoryPolicy {
            max_entries: Some(100),
            ..HistoryPolicy::default()
        });
        b.iter(|| {
            history.record(black_box(content.as_str()));
        });
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    c.bench_function("undo_redo_cycle", |b| {
        let mut editor = Editor::new(MemoryHost::new());
        editor.mount();
        for i in 0..100 {
            editor.host_mut().set_content(&paragraphs(i % 10 + 1));
            editor.record_input();
        }
        b.iter(|| {
            editor.undo();
            editor.redo();
        });
    });
}

fn bench_style_selection(c: &mut Criterion) {
    c.bench_function("style_selection", |b| {
        let content = paragraphs(20);
        b.iter(|| {
            let mut editor = Editor::new(MemoryHost::with_content(content.as_str()));
            editor.mount();
            editor.host_mut().select_text("Paragraph 7");
            editor.change_style(black_box("fontSize"), black_box("24px"));
        });
    });
}

fn bench_style_surface(c: &mut Criterion) {
    c.bench_function("style_surface", |b| {
        let config = EditorConfig {
            history: HistoryPolicy {
                max_entries: Some(100),
                ..HistoryPolicy::default()
            },
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(MemoryHost::with_content(paragraphs(20)), config);
        editor.mount();
        b.iter(|| {
            editor.change_style(black_box("textColor"), black_box("#ff0000"));
        });
    });
}

criterion_group!(
    benches,
    bench_record_keystrokes,
    bench_record_bounded,
    bench_undo_redo,
    bench_style_selection,
    bench_style_surface,
);
criterion_main!(benches);
