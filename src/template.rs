//! Structured templates
//!
//! A [`StructuredMessage`] carries exactly one [`Template`]: a button, generic
//! (carousel), list or receipt template. Each kind only holds the fields that
//! belong to it, so the payload of a projected message never contains fields of
//! another kind.
//!
//! Templates can be built two ways, and both end in the same validation step:
//!
//! - typed, with [`ButtonTemplate`], [`GenericTemplate`], [`ListTemplate`] or
//!   [`ReceiptTemplate`] and [`StructuredMessage::from_template`];
//! - from a loosely-structured JSON data bag with [`StructuredMessage::new`],
//!   whose leaves are passed through as raw fragments.
//!
//! ## Example: a receipt
//! ```rust
//! use messenger_send::{
//!     element::{Address, Adjustment, ReceiptElement, Summary},
//!     template::ReceiptTemplate,
//!     Project, StructuredMessage, Tag,
//! };
//!
//! let receipt = ReceiptTemplate::new(
//!     "Stephane Crozatier",
//!     "12345678902",
//!     "Visa 2345",
//!     "https://example.com/order?order_id=123456",
//!     "1428444852",
//!     Address::new("1 Hacker Way", "Menlo Park", "94025", "CA", "US"),
//!     Summary::new(56.14).subtotal(75.0).shipping_cost(4.95).total_tax(6.19),
//! )
//! .elements([ReceiptElement::new("Classic White T-Shirt", 50.0).quantity(2)])
//! .adjustments([Adjustment::new("New Customer Discount", 20.0)]);
//!
//! let message = StructuredMessage::from_template("1254477777772919", receipt)?
//!     .with_tag(Tag::PostPurchaseUpdate);
//! let body = message.to_data()?;
//! assert_eq!(body["message"]["attachment"]["payload"]["currency"], "USD");
//! assert_eq!(body["tag"], "POST_PURCHASE_UPDATE");
//! # Ok::<(), messenger_send::Error>(())
//! ```

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

use crate::{
    config::TemplateDefaults,
    element::{Address, Adjustment, Button, Element, QuickReplyButton, ReceiptElement, Summary},
    error::{Constraint, Error, ValidationError},
    message::project_message,
    project::{fragments, Fragment, Project, RawFragment},
    Recipient, Tag,
};

/// The kind of a structured template.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Button,
    Generic,
    List,
    Receipt,
}

impl TemplateKind {
    /// Returns the `template_type` wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Generic => "generic",
            Self::List => "list",
            Self::Receipt => "receipt",
        }
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "button" => Ok(Self::Button),
            "generic" => Ok(Self::Generic),
            "list" => Ok(Self::List),
            "receipt" => Ok(Self::Receipt),
            other => Err(Error::UnknownTemplateKind(other.to_owned())),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

wire_enum! {
    /// Aspect ratio used to render the images of a generic template.
    #[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
    pub enum ImageAspectRatio {
        #[default]
        Horizontal => "horizontal",
        Square => "square",
    }
}

wire_enum! {
    /// Whether the first item of a list template is featured.
    ///
    /// `Large` requires the first element to carry an `image_url`.
    #[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
    pub enum TopElementStyle {
        #[default]
        Large => "large",
        Compact => "compact",
    }
}

/// Text with up to three buttons below it.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct ButtonTemplate {
    pub text: String,
    pub buttons: Vec<Fragment<Button>>,
}

impl ButtonTemplate {
    #[inline]
    pub fn new<I, B>(text: impl Into<String>, buttons: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Fragment<Button>>,
    {
        Self {
            text: text.into(),
            buttons: fragments(buttons),
        }
    }
}

/// A horizontally scrollable carousel of elements.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct GenericTemplate {
    pub elements: Vec<Fragment<Element>>,
    pub image_aspect_ratio: ImageAspectRatio,
}

impl GenericTemplate {
    /// Creates a carousel with the default `horizontal` image aspect ratio.
    #[inline]
    pub fn new<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Fragment<Element>>,
    {
        Self {
            elements: fragments(elements),
            image_aspect_ratio: ImageAspectRatio::default(),
        }
    }

    pub fn image_aspect_ratio(mut self, ratio: ImageAspectRatio) -> Self {
        self.image_aspect_ratio = ratio;
        self
    }
}

/// A vertical list of elements, optionally with one button for the whole list.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct ListTemplate {
    pub elements: Vec<Fragment<Element>>,
    pub top_element_style: TopElementStyle,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Fragment<Button>>,
}

impl ListTemplate {
    /// Creates a list with the default `large` top element style.
    #[inline]
    pub fn new<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Fragment<Element>>,
    {
        Self {
            elements: fragments(elements),
            top_element_style: TopElementStyle::default(),
            buttons: Vec::new(),
        }
    }

    pub fn top_element_style(mut self, style: TopElementStyle) -> Self {
        self.top_element_style = style;
        self
    }

    /// Sets the button shown below the whole list.
    pub fn button(mut self, button: impl Into<Fragment<Button>>) -> Self {
        self.buttons = vec![button.into()];
        self
    }
}

/// An order confirmation.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct ReceiptTemplate {
    pub recipient_name: String,
    /// Must be unique per order.
    pub order_number: String,
    pub currency: String,
    pub payment_method: String,
    pub order_url: String,
    /// Seconds since the epoch.
    pub timestamp: String,
    pub elements: Vec<Fragment<ReceiptElement>>,
    pub address: Fragment<Address>,
    pub summary: Fragment<Summary>,
    pub adjustments: Vec<Fragment<Adjustment>>,
}

impl ReceiptTemplate {
    /// Creates a receipt with no line items or adjustments, priced in the
    /// default currency (`USD`).
    #[inline]
    pub fn new(
        recipient_name: impl Into<String>,
        order_number: impl Into<String>,
        payment_method: impl Into<String>,
        order_url: impl Into<String>,
        timestamp: impl Into<String>,
        address: impl Into<Fragment<Address>>,
        summary: impl Into<Fragment<Summary>>,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            order_number: order_number.into(),
            currency: TemplateDefaults::DEFAULT_CURRENCY.to_owned(),
            payment_method: payment_method.into(),
            order_url: order_url.into(),
            timestamp: timestamp.into(),
            elements: Vec::new(),
            address: address.into(),
            summary: summary.into(),
            adjustments: Vec::new(),
        }
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Replaces the line items, keeping their order.
    pub fn elements<I, E>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Fragment<ReceiptElement>>,
    {
        self.elements = fragments(elements);
        self
    }

    /// Replaces the adjustments, keeping their order.
    pub fn adjustments<I, A>(mut self, adjustments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Fragment<Adjustment>>,
    {
        self.adjustments = fragments(adjustments);
        self
    }
}

/// One of the four structured templates.
///
/// Serialized as the attachment payload, with `template_type` first.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[serde(tag = "template_type", rename_all = "snake_case")]
pub enum Template {
    Button(ButtonTemplate),
    Generic(GenericTemplate),
    List(ListTemplate),
    Receipt(ReceiptTemplate),
}

impl Template {
    /// Returns the kind of this template.
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Button(_) => TemplateKind::Button,
            Self::Generic(_) => TemplateKind::Generic,
            Self::List(_) => TemplateKind::List,
            Self::Receipt(_) => TemplateKind::Receipt,
        }
    }

    /// Builds a template of the given kind from a JSON data bag.
    ///
    /// Only the fields of `kind` are read; anything else in the bag is ignored.
    /// Leaves (buttons, elements, address, summary, adjustments) are kept as raw
    /// fragments. Missing optional fields take their value from `defaults`.
    ///
    /// The result is not validated yet; [`StructuredMessage`] does that.
    pub fn from_data(
        kind: TemplateKind,
        data: Value,
        defaults: &TemplateDefaults,
    ) -> Result<Self, Error> {
        if !data.is_object() {
            return Err(Error::InvalidData(
                <serde_json::Error as serde::de::Error>::custom(format!(
                    "{kind} template data must be a JSON object"
                )),
            ));
        }
        Ok(match kind {
            TemplateKind::Button => {
                let data: ButtonData = read(data)?;
                Self::Button(ButtonTemplate {
                    text: required(kind, "text", data.text)?,
                    buttons: raw(required(kind, "buttons", data.buttons)?),
                })
            }
            TemplateKind::Generic => {
                let data: GenericData = read(data)?;
                Self::Generic(GenericTemplate {
                    elements: raw(required(kind, "elements", data.elements)?),
                    image_aspect_ratio: data
                        .image_aspect_ratio
                        .unwrap_or(defaults.image_aspect_ratio),
                })
            }
            TemplateKind::List => {
                let data: ListData = read(data)?;
                Self::List(ListTemplate {
                    elements: raw(required(kind, "elements", data.elements)?),
                    top_element_style: data
                        .top_element_style
                        .unwrap_or(defaults.top_element_style),
                    buttons: raw(data.buttons.unwrap_or_default()),
                })
            }
            TemplateKind::Receipt => {
                let data: ReceiptData = read(data)?;
                Self::Receipt(ReceiptTemplate {
                    recipient_name: required(kind, "recipient_name", data.recipient_name)?,
                    order_number: required(kind, "order_number", data.order_number)?,
                    currency: data.currency.unwrap_or_else(|| defaults.currency.clone()),
                    payment_method: required(kind, "payment_method", data.payment_method)?,
                    order_url: required(kind, "order_url", data.order_url)?,
                    timestamp: required(kind, "timestamp", data.timestamp)?,
                    elements: raw(required(kind, "elements", data.elements)?),
                    address: Fragment::Raw(required(kind, "address", data.address)?),
                    summary: Fragment::Raw(required(kind, "summary", data.summary)?),
                    adjustments: raw(required(kind, "adjustments", data.adjustments)?),
                })
            }
        })
    }

    /// Checks the template against the platform's cross-field constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::List(list) if list.top_element_style == TopElementStyle::Large => {
                let has_image = list
                    .elements
                    .first()
                    .and_then(|element| element.image_url())
                    .is_some();
                if !has_image {
                    return Err(ValidationError::new(
                        TemplateKind::List,
                        Constraint::LargeTopElementRequiresImage,
                    ));
                }
                Ok(())
            }
            Self::Button(_) | Self::Generic(_) | Self::List(_) | Self::Receipt(_) => Ok(()),
        }
    }
}

enum_traits! {
    |Template|
    ButtonTemplate => Button,
    GenericTemplate => Generic,
    ListTemplate => List,
    ReceiptTemplate => Receipt
}

impl Project for Template {}

fn required<T>(kind: TemplateKind, field: &'static str, value: Option<T>) -> Result<T, Error> {
    value.ok_or_else(|| {
        tracing::debug!(%kind, field, "template data is missing a required field");
        Error::missing(kind, field)
    })
}

fn raw<T>(items: Vec<RawFragment>) -> Vec<Fragment<T>> {
    items.into_iter().map(Fragment::Raw).collect()
}

fn read<T: DeserializeOwned>(data: Value) -> Result<T, Error> {
    serde_json::from_value(data).map_err(Error::InvalidData)
}

// Data bags of each kind. Every field is optional here; `from_data` decides
// which ones are required. Keys of other kinds are never looked at.

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct ButtonData {
    text: Option<String>,
    buttons: Option<Vec<RawFragment>>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct GenericData {
    elements: Option<Vec<RawFragment>>,
    image_aspect_ratio: Option<ImageAspectRatio>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct ListData {
    elements: Option<Vec<RawFragment>>,
    top_element_style: Option<TopElementStyle>,
    buttons: Option<Vec<RawFragment>>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct ReceiptData {
    recipient_name: Option<String>,
    #[serde(deserialize_with = "deserialize_str_or_number")]
    order_number: Option<String>,
    currency: Option<String>,
    payment_method: Option<String>,
    order_url: Option<String>,
    #[serde(deserialize_with = "deserialize_str_or_number")]
    timestamp: Option<String>,
    elements: Option<Vec<RawFragment>>,
    address: Option<RawFragment>,
    summary: Option<RawFragment>,
    adjustments: Option<Vec<RawFragment>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNumber {
    Str(String),
    Number(serde_json::Number),
}

/// Accepts `"12345"` as well as `12345` for identifier-like fields.
fn deserialize_str_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let v = <Option<StrOrNumber>>::deserialize(deserializer)?;
    Ok(v.map(|v| match v {
        StrOrNumber::Str(s) => s,
        StrOrNumber::Number(n) => n.to_string(),
    }))
}

/// A message carrying a structured template, optionally with quick replies.
///
/// Construction validates the template, so every `StructuredMessage` that
/// exists satisfies the platform's constraints. Structured messages are always
/// addressed by persistent user id.
///
/// # Example
/// ```rust
/// use messenger_send::{
///     element::{Button, QuickReplyButton},
///     template::ButtonTemplate,
///     Project, StructuredMessage,
/// };
///
/// let message = StructuredMessage::from_template(
///     "1254477777772919",
///     ButtonTemplate::new("Need help?", [Button::call("Call us", "+16505551234")]),
/// )?
/// .with_quick_replies([QuickReplyButton::text("No thanks", "NO_HELP")]);
///
/// let body = message.to_data()?;
/// assert_eq!(body["message"]["quick_replies"][0]["payload"], "NO_HELP");
/// assert_eq!(body["message"]["attachment"]["type"], "template");
/// # Ok::<(), messenger_send::Error>(())
/// ```
#[derive(Serialize, PartialEq, Clone, Debug)]
#[must_use = "StructuredMessage is an unsent message that might need to be sent."]
pub struct StructuredMessage {
    recipient: Recipient,
    message: StructuredBody,
    tag: Option<Tag>,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
struct StructuredBody {
    attachment: Attachment,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    quick_replies: Vec<Fragment<QuickReplyButton>>,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
enum Attachment {
    Template(Template),
}

impl StructuredMessage {
    /// Builds a structured message from a JSON data bag, using the built-in
    /// defaults for optional fields.
    ///
    /// # Errors
    /// - [`Error::InvalidData`] if `data` is not an object or a field has the wrong type.
    /// - [`Error::MissingField`] if a field required by `kind` is absent.
    /// - [`Error::Validation`] if the template breaks a platform constraint.
    pub fn new(
        recipient: impl Into<Recipient>,
        kind: TemplateKind,
        data: Value,
    ) -> Result<Self, Error> {
        Self::with_defaults(recipient, kind, data, &TemplateDefaults::default())
    }

    /// Like [`StructuredMessage::new`], with caller-supplied defaults.
    pub fn with_defaults(
        recipient: impl Into<Recipient>,
        kind: TemplateKind,
        data: Value,
        defaults: &TemplateDefaults,
    ) -> Result<Self, Error> {
        let template = Template::from_data(kind, data, defaults)?;
        Self::from_template(recipient, template)
    }

    /// Builds a structured message from a typed template.
    ///
    /// # Errors
    /// [`Error::Validation`] if the template breaks a platform constraint.
    pub fn from_template(
        recipient: impl Into<Recipient>,
        template: impl Into<Template>,
    ) -> Result<Self, Error> {
        let template = template.into();
        if let Err(err) = template.validate() {
            tracing::debug!(
                kind = %template.kind(),
                constraint = err.constraint().code(),
                "rejecting structured message"
            );
            return Err(err.into());
        }

        let recipient = recipient.into();
        if recipient.is_transient() {
            tracing::warn!(
                recipient = recipient.value(),
                "structured messages are addressed by id; ignoring the user_ref form"
            );
        }

        Ok(Self {
            recipient: recipient.into_persistent(),
            message: StructuredBody {
                attachment: Attachment::Template(template),
                quick_replies: Vec::new(),
            },
            tag: None,
        })
    }

    /// Attaches quick replies, shown in the given order.
    pub fn with_quick_replies<I, Q>(mut self, quick_replies: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Fragment<QuickReplyButton>>,
    {
        self.message.quick_replies = fragments(quick_replies);
        self
    }

    /// Tags the message.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn template(&self) -> &Template {
        let Attachment::Template(template) = &self.message.attachment;
        template
    }

    pub fn kind(&self) -> TemplateKind {
        self.template().kind()
    }

    pub fn quick_replies(&self) -> &[Fragment<QuickReplyButton>] {
        &self.message.quick_replies
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }
}

impl Project for StructuredMessage {
    fn to_data(&self) -> Result<Value, Error> {
        project_message(self)
    }
}

impl fmt::Display for StructuredMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[→ {}] {} template", self.recipient, self.kind())
    }
}
