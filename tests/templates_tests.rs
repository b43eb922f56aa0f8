mod common;

use common::*;
use messenger_send::{
    config::TemplateDefaults,
    element::{Adjustment, Button, Element, QuickReplyButton},
    error::Constraint,
    template::{
        ButtonTemplate, GenericTemplate, ImageAspectRatio, ListTemplate, ReceiptTemplate,
        TemplateKind, TopElementStyle,
    },
    Error, Message, Project, Recipient, StructuredMessage, Tag,
};
use serde_json::{json, Value};

fn payload(message: &StructuredMessage) -> Value {
    let data = message.to_data().unwrap();
    assert_eq!(data["message"]["attachment"]["type"], "template");
    data["message"]["attachment"]["payload"].clone()
}

#[test]
fn test_button_template() {
    let message = StructuredMessage::from_template(
        RECIPIENT_ID,
        ButtonTemplate::new(
            "What do you want to do next?",
            [
                Button::url("https://www.messenger.com", "Visit Messenger"),
                Button::postback("Start Chatting", "START_CHAT"),
            ],
        ),
    )
    .unwrap();

    assert_eq!(
        message.to_data().unwrap(),
        json!({
            "recipient": {"id": RECIPIENT_ID},
            "message": {
                "attachment": {
                    "type": "template",
                    "payload": {
                        "template_type": "button",
                        "text": "What do you want to do next?",
                        "buttons": [
                            {"type": "web_url", "url": "https://www.messenger.com", "title": "Visit Messenger"},
                            {"type": "postback", "title": "Start Chatting", "payload": "START_CHAT"}
                        ]
                    }
                }
            },
            "tag": null
        })
    );
}

#[test]
fn test_generic_template_defaults_aspect_ratio() {
    let message = StructuredMessage::new(
        "123",
        TemplateKind::Generic,
        json!({"elements": [{"title": "e0"}, {"title": "e1"}]}),
    )
    .unwrap();

    assert_eq!(
        payload(&message),
        json!({
            "template_type": "generic",
            "elements": [{"title": "e0"}, {"title": "e1"}],
            "image_aspect_ratio": "horizontal"
        })
    );
}

#[test]
fn test_generic_template_typed_matches_data_bag() {
    let typed = StructuredMessage::from_template(
        RECIPIENT_ID,
        GenericTemplate::new([element("shirt"), element("hat")])
            .image_aspect_ratio(ImageAspectRatio::Square),
    )
    .unwrap();

    let from_bag = StructuredMessage::new(
        RECIPIENT_ID,
        TemplateKind::Generic,
        json!({
            "elements": [element("shirt").to_data().unwrap(), element("hat").to_data().unwrap()],
            "image_aspect_ratio": "square"
        }),
    )
    .unwrap();

    assert_eq!(typed.to_data().unwrap(), from_bag.to_data().unwrap());
    assert_eq!(
        serde_json::to_string(&typed.to_data().unwrap()).unwrap(),
        serde_json::to_string(&from_bag.to_data().unwrap()).unwrap()
    );
}

#[test]
fn test_large_list_requires_top_image() {
    let result = StructuredMessage::new(
        "123",
        TemplateKind::List,
        json!({
            "elements": [
                {"title": "e0", "image_url": ""},
                {"title": "e1", "image_url": IMAGE_URL}
            ],
            "top_element_style": "large"
        }),
    );

    let err = result.unwrap_err();
    assert_eq!(
        err.constraint(),
        Some(Constraint::LargeTopElementRequiresImage)
    );
    assert!(matches!(err, Error::Validation(_)));
    assert!(err
        .to_string()
        .contains("list.large_top_element_requires_image"));
}

#[test]
fn test_list_style_defaults_to_large() {
    let result = StructuredMessage::new(
        RECIPIENT_ID,
        TemplateKind::List,
        json!({"elements": [{"title": "e0"}, {"title": "e1"}]}),
    );
    assert!(matches!(result, Err(Error::Validation(_))));

    let defaults = TemplateDefaults::new().top_element_style(TopElementStyle::Compact);
    let message = StructuredMessage::with_defaults(
        RECIPIENT_ID,
        TemplateKind::List,
        json!({"elements": [{"title": "e0"}, {"title": "e1"}]}),
        &defaults,
    )
    .unwrap();
    assert_eq!(payload(&message)["top_element_style"], "compact");
}

#[test]
fn test_list_template() {
    let message = StructuredMessage::from_template(
        RECIPIENT_ID,
        ListTemplate::new([
            Element::new("Classic T-Shirt Collection")
                .subtitle("See all our colors")
                .image_url(IMAGE_URL)
                .default_action("https://example.com/collection"),
            Element::new("Classic White T-Shirt").buttons([Button::url(
                "https://example.com/shop?item=100",
                "Shop Now",
            )]),
        ])
        .button(Button::postback("View More", "VIEW_MORE")),
    )
    .unwrap();

    assert_eq!(
        payload(&message),
        json!({
            "template_type": "list",
            "elements": [
                {
                    "title": "Classic T-Shirt Collection",
                    "subtitle": "See all our colors",
                    "image_url": IMAGE_URL,
                    "default_action": {"type": "web_url", "url": "https://example.com/collection"}
                },
                {
                    "title": "Classic White T-Shirt",
                    "buttons": [
                        {"type": "web_url", "url": "https://example.com/shop?item=100", "title": "Shop Now"}
                    ]
                }
            ],
            "top_element_style": "large",
            "buttons": [{"type": "postback", "title": "View More", "payload": "VIEW_MORE"}]
        })
    );
}

#[test]
fn test_receipt_template() {
    let receipt = ReceiptTemplate::new(
        "Stephane Crozatier",
        "12345678902",
        "Visa 2345",
        "https://example.com/order?order_id=123456",
        "1428444852",
        address(),
        summary(),
    )
    .elements(line_items())
    .adjustments([
        Adjustment::new("New Customer Discount", 20.0),
        Adjustment::new("$10 Off Coupon", 10.0),
    ]);
    let message = StructuredMessage::from_template(RECIPIENT_ID, receipt)
        .unwrap()
        .with_tag(Tag::PostPurchaseUpdate);

    assert_eq!(
        message.to_data().unwrap(),
        json!({
            "recipient": {"id": RECIPIENT_ID},
            "message": {
                "attachment": {
                    "type": "template",
                    "payload": {
                        "template_type": "receipt",
                        "recipient_name": "Stephane Crozatier",
                        "order_number": "12345678902",
                        "currency": "USD",
                        "payment_method": "Visa 2345",
                        "order_url": "https://example.com/order?order_id=123456",
                        "timestamp": "1428444852",
                        "elements": [
                            {
                                "title": "Classic White T-Shirt",
                                "subtitle": "100% Soft and Luxurious Cotton",
                                "quantity": 2,
                                "price": 50.0,
                                "currency": "USD",
                                "image_url": "https://example.com/img/whiteshirt.png"
                            },
                            {
                                "title": "Classic Gray T-Shirt",
                                "quantity": 1,
                                "price": 25.0,
                                "currency": "USD"
                            }
                        ],
                        "address": {
                            "street_1": "1 Hacker Way",
                            "city": "Menlo Park",
                            "postal_code": "94025",
                            "state": "CA",
                            "country": "US"
                        },
                        "summary": {
                            "subtotal": 75.0,
                            "shipping_cost": 4.95,
                            "total_tax": 6.19,
                            "total_cost": 56.14
                        },
                        "adjustments": [
                            {"name": "New Customer Discount", "amount": 20.0},
                            {"name": "$10 Off Coupon", "amount": 10.0}
                        ]
                    }
                }
            },
            "tag": "POST_PURCHASE_UPDATE"
        })
    );
}

#[test]
fn test_receipt_data_bag_uses_configured_currency() {
    let data = json!({
        "recipient_name": "Stephane Crozatier",
        "order_number": "12345678902",
        "payment_method": "Visa 2345",
        "order_url": "https://example.com/order?order_id=123456",
        "timestamp": "1428444852",
        "elements": [],
        "address": address().to_data().unwrap(),
        "summary": summary().to_data().unwrap(),
        "adjustments": []
    });

    let default = StructuredMessage::new(RECIPIENT_ID, TemplateKind::Receipt, data.clone()).unwrap();
    assert_eq!(payload(&default)["currency"], "USD");

    let defaults = TemplateDefaults::new().currency("EUR");
    let configured =
        StructuredMessage::with_defaults(RECIPIENT_ID, TemplateKind::Receipt, data, &defaults)
            .unwrap();
    assert_eq!(payload(&configured)["currency"], "EUR");
}

#[test]
fn test_receipt_data_bag_missing_summary() {
    let err = StructuredMessage::new(
        RECIPIENT_ID,
        TemplateKind::Receipt,
        json!({
            "recipient_name": "Stephane Crozatier",
            "order_number": "12345678902",
            "payment_method": "Visa 2345",
            "order_url": "https://example.com/order?order_id=123456",
            "timestamp": "1428444852",
            "elements": [],
            "address": address().to_data().unwrap(),
            "adjustments": []
        }),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::MissingField {
            kind: TemplateKind::Receipt,
            field: "summary"
        }
    ));
    assert_eq!(err.constraint(), None);
}

#[test]
fn test_structured_message_with_quick_replies() {
    let message = StructuredMessage::from_template(
        Recipient::user_ref(USER_REF),
        ButtonTemplate::new("Rate us", [Button::postback("Great", "RATE_5")]),
    )
    .unwrap()
    .with_quick_replies([QuickReplyButton::text("Later", "RATE_LATER")]);

    let data = message.to_data().unwrap();
    assert_eq!(data["recipient"], json!({"id": USER_REF}));

    let keys: Vec<_> = data["message"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["attachment", "quick_replies"]);
    assert_eq!(
        data["message"]["quick_replies"],
        json!([{"content_type": "text", "title": "Later", "payload": "RATE_LATER"}])
    );
}

#[test]
fn test_payload_has_only_its_kinds_fields() {
    let message = StructuredMessage::new(
        RECIPIENT_ID,
        TemplateKind::Button,
        json!({
            "text": "Hello",
            "buttons": [{"type": "postback", "title": "Hi", "payload": "HI"}],
            "elements": [{"title": "stray"}],
            "currency": "EUR",
            "order_number": 42
        }),
    )
    .unwrap();

    let keys: Vec<_> = payload(&message).as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["template_type", "text", "buttons"]);
}

#[test]
fn test_data_bag_ignores_malformed_fields_of_other_kinds() {
    let message = StructuredMessage::new(
        "123",
        TemplateKind::Button,
        json!({
            "text": "Hi",
            "buttons": [],
            "top_element_style": "huge",
            "order_number": true
        }),
    )
    .unwrap();

    assert_eq!(
        payload(&message),
        json!({"template_type": "button", "text": "Hi", "buttons": []})
    );
}

#[test]
fn test_message_wraps_structured() {
    let structured = StructuredMessage::from_template(
        RECIPIENT_ID,
        GenericTemplate::new([element("shirt")]),
    )
    .unwrap();
    let message = Message::from(structured.clone());

    assert_eq!(message.to_data().unwrap(), structured.to_data().unwrap());
    assert_eq!(message.recipient(), &Recipient::id(RECIPIENT_ID));
}

#[test]
#[tracing_test::traced_test]
fn test_rejection_is_logged() {
    let result = StructuredMessage::from_template(
        RECIPIENT_ID,
        ListTemplate::new([Element::new("no image")]),
    );

    assert!(result.is_err());
    assert!(logs_contain("rejecting structured message"));
    assert!(logs_contain("list.large_top_element_requires_image"));
}

#[test]
#[tracing_test::traced_test]
fn test_structured_projection_is_logged() {
    let message = StructuredMessage::new(
        RECIPIENT_ID,
        TemplateKind::Generic,
        json!({"elements": [{"title": "e0"}]}),
    )
    .unwrap();

    message.to_data().unwrap();
    assert!(logs_contain("projecting message"));
    assert!(logs_contain("generic template"));
}
