use criterion::Criterion;
use messenger_send::{element::QuickReplyButton, project::Fragment, Project, QuickReply, TextMessage};
use serde_json::json;

use crate::RECIPIENT_ID;

pub fn bench_project_text_message(c: &mut Criterion) {
    let message = TextMessage::new(RECIPIENT_ID, "Hello from a benchmark!");

    c.bench_function("project_text_message", |b| {
        b.iter(|| message.to_data().unwrap());
    });
}

pub fn bench_project_quick_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quick Reply Projection");

    let typed = QuickReply::new(
        RECIPIENT_ID,
        "Pick a color:",
        (0..11).map(|i| QuickReplyButton::text(format!("Color {i}"), format!("PICK_{i}"))),
    );
    group.bench_function("typed_options", |b| {
        b.iter(|| typed.to_data().unwrap());
    });

    let raw = QuickReply::new(
        RECIPIENT_ID,
        "Pick a color:",
        (0..11).map(|i| {
            Fragment::<QuickReplyButton>::raw(json!({
                "content_type": "text",
                "title": format!("Color {i}"),
                "payload": format!("PICK_{i}")
            }))
            .unwrap()
        }),
    );
    group.bench_function("raw_options", |b| {
        b.iter(|| raw.to_data().unwrap());
    });

    group.finish();
}
