//! # messenger_send
//!
//! Typed builders for the request bodies of the Messenger Platform **Send API**.
//!
//! The crate covers plain text messages, quick-reply prompts and the four
//! structured templates (button, generic carousel, list and receipt). Each
//! message is validated when it is constructed and then projected, through
//! [`Project::to_data`], into the exact JSON body the platform expects. Sending
//! that body is left to whichever HTTP client you already use.
//!
//! ## ✨ Features
//!
//! - **Closed message model**: [`Message`] is a sum type over [`TextMessage`],
//!   [`QuickReply`] and [`StructuredMessage`]; templates are a sum type over
//!   button, generic, list and receipt kinds.
//! - **Fail-fast validation**: platform constraints are checked at construction,
//!   so an invalid message never exists.
//! - **Typed or raw leaves**: every button, element or receipt record slot takes
//!   either a typed leaf or a raw JSON object that is passed through untouched.
//! - **Data bags**: templates can also be built from loosely-structured JSON.
//!
//! ## 🚀 Examples
//!
//! ---
//!
//! ### Build a Simple Text Message
//! ```rust
//! use messenger_send::{Project, Recipient, TextMessage};
//! use serde_json::json;
//!
//! let message = TextMessage::new("1254477777772919", "Hello from Rust!");
//! assert_eq!(
//!     message.to_data()?,
//!     json!({
//!         "recipient": {"id": "1254477777772919"},
//!         "message": {"text": "Hello from Rust!"},
//!         "tag": null
//!     })
//! );
//!
//! // Reply to someone who arrived through a checkbox plugin
//! let message = TextMessage::new(Recipient::user_ref("UNIQUE_REF_PARAM"), "Thanks!");
//! assert_eq!(message.to_data()?["recipient"], json!({"user_ref": "UNIQUE_REF_PARAM"}));
//! # Ok::<(), messenger_send::Error>(())
//! ```
//!
//! ---
//!
//! ### Build a Generic Template (Carousel)
//! ```rust
//! use messenger_send::{
//!     element::{Button, Element},
//!     template::GenericTemplate,
//!     Project, StructuredMessage,
//! };
//!
//! let template = GenericTemplate::new([
//!     Element::new("Welcome!")
//!         .image_url("https://example.com/welcome.png")
//!         .buttons([Button::postback("Start Chatting", "DEVELOPER_DEFINED_PAYLOAD")]),
//!     Element::new("Our shop").default_action("https://example.com/shop"),
//! ]);
//!
//! let message = StructuredMessage::from_template("1254477777772919", template)?;
//! let body = message.to_data()?;
//! assert_eq!(body["message"]["attachment"]["payload"]["image_aspect_ratio"], "horizontal");
//! # Ok::<(), messenger_send::Error>(())
//! ```
//!
//! ---
//!
//! ### Build a Template from a Data Bag
//! ```rust
//! use messenger_send::{template::TemplateKind, Project, StructuredMessage};
//! use serde_json::json;
//!
//! let message = StructuredMessage::new(
//!     "1254477777772919",
//!     TemplateKind::Button,
//!     json!({
//!         "text": "What do you want to do next?",
//!         "buttons": [
//!             {"type": "web_url", "url": "https://example.com", "title": "Visit"},
//!             {"type": "postback", "title": "Talk to a human", "payload": "HUMAN"}
//!         ]
//!     }),
//! )?;
//! assert_eq!(
//!     message.to_data()?["message"]["attachment"]["payload"]["buttons"][1]["payload"],
//!     "HUMAN"
//! );
//! # Ok::<(), messenger_send::Error>(())
//! ```
//!
//! ---
//!
//! ### Constraints Fail at Construction
//! ```rust
//! use messenger_send::{
//!     element::Element, error::Constraint, template::ListTemplate, StructuredMessage,
//! };
//!
//! // `large` is the default top element style and needs an image on the first element
//! let list = ListTemplate::new([Element::new("No picture"), Element::new("Second")]);
//! let err = StructuredMessage::from_template("1254477777772919", list).unwrap_err();
//! assert_eq!(err.constraint(), Some(Constraint::LargeTopElementRequiresImage));
//! ```

use serde::Serialize;
use std::fmt;

#[macro_use]
mod macros;
pub mod config;
pub mod element;
pub mod error;
pub mod message;
pub mod project;
pub mod template;

macro_rules! recipient {
    // Generate recipient constructors with documentation
    ($($variant:ident)*) => {
        paste::paste! {
            impl Recipient {
                $(
                    #[doc = "Create a `" $variant "` recipient"]
                    pub fn [<$variant:snake>](value: impl Into<String>) -> Self {
                        Self::$variant(value.into())
                    }
                )*
            }
        }
    }
}

/// The person a message is addressed to.
///
/// Messages are normally addressed by the page-scoped id the platform assigned
/// to the user. Before such an id exists (for example when the user came in
/// through the checkbox plugin) a transient `user_ref` handle is used instead.
///
/// Serialized as `{"id": ...}` or `{"user_ref": ...}`.
///
/// ```rust
/// use messenger_send::Recipient;
///
/// assert_eq!(Recipient::from("1254477777772919"), Recipient::id("1254477777772919"));
/// assert!(Recipient::new("UNIQUE_REF_PARAM", true).is_transient());
/// ```
#[derive(Serialize, PartialEq, Eq, Hash, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    /// A page-scoped user id.
    Id(String),
    /// A transient reference issued before a user id exists.
    UserRef(String),
}

recipient! {
    Id
    UserRef
}

impl Recipient {
    /// Creates a recipient, using the transient `user_ref` form when
    /// `is_transient` is set.
    #[inline]
    pub fn new(value: impl Into<String>, is_transient: bool) -> Self {
        if is_transient {
            Self::UserRef(value.into())
        } else {
            Self::Id(value.into())
        }
    }

    /// Returns the id or reference string.
    pub fn value(&self) -> &str {
        match self {
            Self::Id(value) | Self::UserRef(value) => value,
        }
    }

    /// Checks whether this is a transient `user_ref` recipient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::UserRef(_))
    }

    /// Returns the persistent form of this recipient, keeping the same value.
    #[inline]
    pub(crate) fn into_persistent(self) -> Self {
        match self {
            Self::UserRef(value) => Self::Id(value),
            id => id,
        }
    }
}

impl<T: Into<String>> From<T> for Recipient {
    /// Treats a bare string as a persistent user id.
    #[inline]
    fn from(value: T) -> Self {
        Self::Id(value.into())
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id:{id}"),
            Self::UserRef(user_ref) => write!(f, "user_ref:{user_ref}"),
        }
    }
}

wire_enum! {
    /// A message tag, allowing a message to be sent outside the standard
    /// messaging window for the use case it names.
    ///
    /// Tags the crate does not list are kept in [`Tag::Other`] and sent verbatim.
    ///
    /// ```rust
    /// use messenger_send::Tag;
    ///
    /// let tag: Tag = "SHIPPING_UPDATE".parse().unwrap();
    /// assert_eq!(tag, Tag::ShippingUpdate);
    /// assert_eq!("SOMETHING_NEW".parse::<Tag>().unwrap(), Tag::Other("SOMETHING_NEW".into()));
    /// ```
    #[derive(PartialEq, Eq, Hash, Clone, Debug)]
    #[non_exhaustive]
    pub enum Tag {
        ConfirmedEventUpdate => "CONFIRMED_EVENT_UPDATE",
        PostPurchaseUpdate => "POST_PURCHASE_UPDATE",
        AccountUpdate => "ACCOUNT_UPDATE",
        HumanAgent => "HUMAN_AGENT",
        ShippingUpdate => "SHIPPING_UPDATE",
        ReservationUpdate => "RESERVATION_UPDATE",
        IssueResolution => "ISSUE_RESOLUTION",
        AppointmentUpdate => "APPOINTMENT_UPDATE",
        GameEvent => "GAME_EVENT",
        TransportationUpdate => "TRANSPORTATION_UPDATE",
        FeatureFunctionalityUpdate => "FEATURE_FUNCTIONALITY_UPDATE",
        TicketUpdate => "TICKET_UPDATE",
        PaymentUpdate => "PAYMENT_UPDATE",
        PersonalFinanceUpdate => "PERSONAL_FINANCE_UPDATE",
        PairingUpdate => "PAIRING_UPDATE",
        CommunityAlert => "COMMUNITY_ALERT",
        ConfirmedEventReminder => "CONFIRMED_EVENT_REMINDER",
        NonPromotionalSubscription => "NON_PROMOTIONAL_SUBSCRIPTION",
    }
    other: Other
}

pub use error::Error;
pub use message::{Message, QuickReply, TextMessage};
pub use project::Project;
pub use template::StructuredMessage;
