use messenger_send::element::{Address, Button, Element, ReceiptElement, Summary};

// --- CONSTANTS ---
#[allow(dead_code)]
pub const RECIPIENT_ID: &str = "1254477777772919";
#[allow(dead_code)]
pub const USER_REF: &str = "UNIQUE_REF_PARAM";
#[allow(dead_code)]
pub const IMAGE_URL: &str = "https://example.com/img/collection.png";

// --- FIXTURES ---

#[allow(dead_code)]
pub fn element(title: &str) -> Element {
    Element::new(title)
        .subtitle(format!("{title} subtitle"))
        .image_url(format!("https://example.com/img/{title}.png"))
        .buttons([Button::postback("View", format!("VIEW_{title}"))])
}

#[allow(dead_code)]
pub fn address() -> Address {
    Address::new("1 Hacker Way", "Menlo Park", "94025", "CA", "US")
}

#[allow(dead_code)]
pub fn summary() -> Summary {
    Summary::new(56.14)
        .subtotal(75.0)
        .shipping_cost(4.95)
        .total_tax(6.19)
}

#[allow(dead_code)]
pub fn line_items() -> [ReceiptElement; 2] {
    [
        ReceiptElement::new("Classic White T-Shirt", 50.0)
            .subtitle("100% Soft and Luxurious Cotton")
            .quantity(2)
            .currency("USD")
            .image_url("https://example.com/img/whiteshirt.png"),
        ReceiptElement::new("Classic Gray T-Shirt", 25.0)
            .quantity(1)
            .currency("USD"),
    ]
}
