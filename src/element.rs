//! Leaf elements
//!
//! Small value objects that fill the slots of a message: buttons, quick-reply
//! options, carousel/list elements and the records of a receipt. Each one knows
//! only its own wire shape, documented by the platform, and exposes it through
//! [`Project`](crate::Project). Containers never look inside them.
//!
//! Any slot that takes one of these also takes a raw JSON object through
//! [`Fragment::Raw`](crate::project::Fragment::Raw).

use serde::Serialize;

use crate::project::{fragments, Fragment};

/// Buttons attached to button templates, list templates and elements.
///
/// Serialized with a `type` discriminator, as the platform expects:
///
/// ```rust
/// use messenger_send::{element::Button, Project};
/// use serde_json::json;
///
/// let button = Button::postback("Start", "GET_STARTED");
/// assert_eq!(
///     button.to_data()?,
///     json!({"type": "postback", "title": "Start", "payload": "GET_STARTED"})
/// );
/// # Ok::<(), messenger_send::Error>(())
/// ```
#[derive(Serialize, PartialEq, Clone, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    /// Opens a web page.
    WebUrl(UrlButton),
    /// Sends a postback with a developer-defined payload.
    Postback(PostbackButton),
    /// Dials a phone number.
    PhoneNumber(CallButton),
    /// Opens the share dialog for the element it belongs to.
    ElementShare,
    /// Starts the account linking flow.
    AccountLink(AccountLinkButton),
    /// Unlinks the user's account.
    AccountUnlink,
}

/// A button that opens a URL in the in-app browser.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct UrlButton {
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webview_height_ratio: Option<WebviewHeightRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messenger_extensions: Option<bool>,
    /// Opened instead of `url` by clients without Messenger Extensions support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

impl UrlButton {
    #[inline]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            webview_height_ratio: None,
            messenger_extensions: None,
            fallback_url: None,
        }
    }

    /// Sets how tall the in-app browser opens.
    pub fn webview_height_ratio(mut self, ratio: WebviewHeightRatio) -> Self {
        self.webview_height_ratio = Some(ratio);
        self
    }

    /// Enables Messenger Extensions for the opened page.
    pub fn messenger_extensions(mut self, enabled: bool) -> Self {
        self.messenger_extensions = Some(enabled);
        self
    }

    pub fn fallback_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_url = Some(url.into());
        self
    }
}

#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct PostbackButton {
    pub title: String,
    /// Sent back to the webhook when the button is tapped.
    pub payload: String,
}

impl PostbackButton {
    #[inline]
    pub fn new(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: payload.into(),
        }
    }
}

/// A button that calls a phone number.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct CallButton {
    pub title: String,
    /// The number to dial, in `+<country code><number>` form.
    #[serde(rename = "payload")]
    pub phone_number: String,
}

impl CallButton {
    #[inline]
    pub fn new(title: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            phone_number: phone_number.into(),
        }
    }
}

#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct AccountLinkButton {
    /// Your login page.
    pub url: String,
}

impl AccountLinkButton {
    #[inline]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Button {
    /// Create a URL button
    #[inline]
    pub fn url(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::WebUrl(UrlButton::new(url, title))
    }

    /// Create a postback button
    #[inline]
    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Postback(PostbackButton::new(title, payload))
    }

    /// Create a call button
    #[inline]
    pub fn call(title: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self::PhoneNumber(CallButton::new(title, phone_number))
    }

    #[inline]
    pub fn share() -> Self {
        Self::ElementShare
    }

    #[inline]
    pub fn account_link(url: impl Into<String>) -> Self {
        Self::AccountLink(AccountLinkButton::new(url))
    }

    #[inline]
    pub fn account_unlink() -> Self {
        Self::AccountUnlink
    }

    /// Returns the visible title of the button.
    ///
    /// Share and account-link buttons are labelled by the platform, so they
    /// return `None`.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::WebUrl(b) => Some(&b.title),
            Self::Postback(b) => Some(&b.title),
            Self::PhoneNumber(b) => Some(&b.title),
            Self::ElementShare | Self::AccountLink(_) | Self::AccountUnlink => None,
        }
    }
}

wire_enum! {
    /// Height of the in-app browser opened by a URL button or default action.
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    pub enum WebviewHeightRatio {
        Compact => "compact",
        Tall => "tall",
        Full => "full",
    }
}

/// One option of a quick-reply prompt.
///
/// ```rust
/// use messenger_send::element::QuickReplyButton;
///
/// let yes = QuickReplyButton::text("Yes", "ANSWER_YES").image_url("https://example.com/yes.png");
/// let email = QuickReplyButton::user_email();
/// # let _ = (yes, email);
/// ```
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct QuickReplyButton {
    pub content_type: QuickReplyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QuickReplyButton {
    /// Creates an option with the given content type and nothing else set.
    #[inline]
    pub fn new(content_type: QuickReplyKind) -> Self {
        Self {
            content_type,
            title: None,
            payload: None,
            image_url: None,
        }
    }

    /// Create a text option that posts `payload` back when tapped.
    #[inline]
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            payload: Some(payload.into()),
            ..Self::new(QuickReplyKind::Text)
        }
    }

    /// Create an option asking the user to share their location.
    #[inline]
    pub fn location() -> Self {
        Self::new(QuickReplyKind::Location)
    }

    /// Create an option offering the user's phone number.
    #[inline]
    pub fn user_phone_number() -> Self {
        Self::new(QuickReplyKind::UserPhoneNumber)
    }

    /// Create an option offering the user's email address.
    #[inline]
    pub fn user_email() -> Self {
        Self::new(QuickReplyKind::UserEmail)
    }

    /// Adds an icon shown next to the title.
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

wire_enum! {
    /// What a quick-reply option collects from the user.
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    pub enum QuickReplyKind {
        Text => "text",
        Location => "location",
        UserPhoneNumber => "user_phone_number",
        UserEmail => "user_email",
    }
}

/// An item of a generic (carousel) or list template.
///
/// ```rust
/// use messenger_send::element::{Button, Element};
///
/// let shoe = Element::new("Classic white sneaker")
///     .subtitle("Size 42")
///     .image_url("https://example.com/sneaker.png")
///     .default_action("https://example.com/sneaker")
///     .buttons([Button::postback("Buy", "BUY_SNEAKER")]);
/// assert_eq!(shoe.image_url.as_deref(), Some("https://example.com/sneaker.png"));
/// ```
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct Element {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action: Option<DefaultAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Fragment<Button>>,
}

impl Element {
    #[inline]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            image_url: None,
            default_action: None,
            buttons: Vec::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets the action taken when the element itself is tapped.
    pub fn default_action(mut self, action: impl Into<DefaultAction>) -> Self {
        self.default_action = Some(action.into());
        self
    }

    /// Replaces the element's buttons, keeping their order.
    pub fn buttons<I, B>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Fragment<Button>>,
    {
        self.buttons = fragments(buttons);
        self
    }
}

/// The URL opened when an [`Element`] is tapped.
///
/// Serialized as a `web_url` action without a title.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[serde(tag = "type", rename = "web_url")]
#[non_exhaustive]
pub struct DefaultAction {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webview_height_ratio: Option<WebviewHeightRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messenger_extensions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

impl DefaultAction {
    #[inline]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            webview_height_ratio: None,
            messenger_extensions: None,
            fallback_url: None,
        }
    }

    pub fn webview_height_ratio(mut self, ratio: WebviewHeightRatio) -> Self {
        self.webview_height_ratio = Some(ratio);
        self
    }

    pub fn messenger_extensions(mut self, enabled: bool) -> Self {
        self.messenger_extensions = Some(enabled);
        self
    }

    pub fn fallback_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_url = Some(url.into());
        self
    }
}

impl From<&str> for DefaultAction {
    #[inline]
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for DefaultAction {
    #[inline]
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

/// A line item of a receipt.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct ReceiptElement {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Price of the line; may be `0` for free items.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ReceiptElement {
    #[inline]
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            quantity: None,
            price,
            currency: None,
            image_url: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// The shipping address printed on a receipt.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct Address {
    pub street_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_2: Option<String>,
    pub city: String,
    pub postal_code: String,
    /// State abbreviation, or region/province for addresses outside the US.
    pub state: String,
    pub country: String,
}

impl Address {
    /// Creates an address without a second street line.
    #[inline]
    pub fn new(
        street_1: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street_1: street_1.into(),
            street_2: None,
            city: city.into(),
            postal_code: postal_code.into(),
            state: state.into(),
            country: country.into(),
        }
    }

    pub fn street_2(mut self, street_2: impl Into<String>) -> Self {
        self.street_2 = Some(street_2.into());
        self
    }
}

/// The payment summary of a receipt. Only `total_cost` is mandatory.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<f64>,
    pub total_cost: f64,
}

impl Summary {
    #[inline]
    pub fn new(total_cost: f64) -> Self {
        Self {
            subtotal: None,
            shipping_cost: None,
            total_tax: None,
            total_cost,
        }
    }

    pub fn subtotal(mut self, subtotal: f64) -> Self {
        self.subtotal = Some(subtotal);
        self
    }

    pub fn shipping_cost(mut self, shipping_cost: f64) -> Self {
        self.shipping_cost = Some(shipping_cost);
        self
    }

    pub fn total_tax(mut self, total_tax: f64) -> Self {
        self.total_tax = Some(total_tax);
        self
    }
}

/// A discount or surcharge line of a receipt.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct Adjustment {
    pub name: String,
    pub amount: f64,
}

impl Adjustment {
    #[inline]
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

enum_traits! {
    |Button|
    UrlButton => WebUrl,
    PostbackButton => Postback,
    CallButton => PhoneNumber,
    AccountLinkButton => AccountLink
}

leaves! {
    Button
    QuickReplyButton
    Element
    DefaultAction
    ReceiptElement
    Address
    Summary
    Adjustment
}

impl Fragment<Element> {
    /// Returns the element's non-empty `image_url`, whether it is typed or raw.
    pub(crate) fn image_url(&self) -> Option<&str> {
        let url = match self {
            Self::Typed(element) => element.image_url.as_deref(),
            Self::Raw(map) => map.get("image_url").and_then(|v| v.as_str()),
        };
        url.filter(|url| !url.is_empty())
    }
}
