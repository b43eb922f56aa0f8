use criterion::Criterion;
use messenger_send::{
    element::{Button, Element},
    template::{GenericTemplate, TemplateKind},
    Project, StructuredMessage,
};
use serde_json::json;

use crate::{IMAGE_URL, RECIPIENT_ID};

pub fn bench_project_generic_template(c: &mut Criterion) {
    let elements = (0..10).map(|i| {
        Element::new(format!("Item {i}"))
            .subtitle("In stock")
            .image_url(IMAGE_URL)
            .default_action(format!("https://example.com/items/{i}"))
            .buttons([
                Button::postback("Buy", format!("BUY_{i}")),
                Button::share(),
            ])
    });
    let message =
        StructuredMessage::from_template(RECIPIENT_ID, GenericTemplate::new(elements)).unwrap();

    c.bench_function("project_generic_template", |b| {
        b.iter(|| message.to_data().unwrap());
    });
}

pub fn bench_build_from_data_bag(c: &mut Criterion) {
    let data = json!({
        "elements": [
            {"title": "Collection", "image_url": IMAGE_URL},
            {"title": "White T-Shirt", "subtitle": "100% cotton"},
            {"title": "Gray T-Shirt", "subtitle": "100% cotton"}
        ],
        "top_element_style": "large",
        "buttons": [{"type": "postback", "title": "View More", "payload": "MORE"}]
    });

    c.bench_function("build_list_from_data_bag", |b| {
        b.iter(|| StructuredMessage::new(RECIPIENT_ID, TemplateKind::List, data.clone()).unwrap());
    });
}
