//! Message variants
//!
//! This module defines the messages that can be sent: [`TextMessage`],
//! [`QuickReply`] and, through [`Message`], the [`StructuredMessage`] built in
//! the [`template`](crate::template) module.
//!
//! Every message is immutable once built and projects into a body with three
//! top-level keys: `recipient`, `message` and `tag`. `tag` is `null` when the
//! message is not tagged.
//!
//! ## Examples
//!
//! ---
//! ### Ask a Question With Quick Replies
//! ```rust
//! use messenger_send::{element::QuickReplyButton, Project, QuickReply};
//! use serde_json::json;
//!
//! let message = QuickReply::new(
//!     "1254477777772919",
//!     "Pick a color:",
//!     [
//!         QuickReplyButton::text("Red", "PICK_RED"),
//!         QuickReplyButton::text("Green", "PICK_GREEN"),
//!     ],
//! );
//!
//! assert_eq!(
//!     message.to_data()?["message"],
//!     json!({
//!         "text": "Pick a color:",
//!         "quick_replies": [
//!             {"content_type": "text", "title": "Red", "payload": "PICK_RED"},
//!             {"content_type": "text", "title": "Green", "payload": "PICK_GREEN"}
//!         ]
//!     })
//! );
//! # Ok::<(), messenger_send::Error>(())
//! ```
//!
//! ---
//! ### Handle Any Message Kind Uniformly
//! ```rust
//! use messenger_send::{Message, Project, TextMessage, Tag};
//!
//! let outbox: Vec<Message> = vec![
//!     TextMessage::new("1254477777772919", "Your order has shipped")
//!         .with_tag(Tag::ShippingUpdate)
//!         .into(),
//! ];
//!
//! for message in &outbox {
//!     let body = message.to_data()?;
//!     // hand `body` to your HTTP client
//!     # assert_eq!(body["tag"], "SHIPPING_UPDATE");
//! }
//! # Ok::<(), messenger_send::Error>(())
//! ```

use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    element::QuickReplyButton,
    error::Error,
    project::{fragments, Fragment, Project},
    template::StructuredMessage,
    Recipient, Tag,
};

/// A plain text message.
///
/// The only message that can be addressed to a transient `user_ref` recipient.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[must_use = "TextMessage is an unsent message that might need to be sent."]
pub struct TextMessage {
    recipient: Recipient,
    message: TextBody,
    tag: Option<Tag>,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
struct TextBody {
    text: String,
}

impl TextMessage {
    /// Creates a text message.
    ///
    /// `recipient` is anything convertible into a [`Recipient`]; a bare string is
    /// a persistent user id.
    #[inline]
    pub fn new(recipient: impl Into<Recipient>, text: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: TextBody { text: text.into() },
            tag: None,
        }
    }

    /// Tags the message.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }
}

/// A text message followed by quick-reply options.
///
/// Options are shown in the order given. Each one is either a typed
/// [`QuickReplyButton`] or a raw JSON object sent as-is, which is how options
/// this crate does not model can still be used. Quick replies are always
/// addressed by persistent user id.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[must_use = "QuickReply is an unsent message that might need to be sent."]
pub struct QuickReply {
    recipient: Recipient,
    message: QuickReplyBody,
    tag: Option<Tag>,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
struct QuickReplyBody {
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    quick_replies: Vec<Fragment<QuickReplyButton>>,
}

impl QuickReply {
    /// Creates a quick-reply message.
    ///
    /// A transient `user_ref` recipient is turned into the persistent `id` form,
    /// keeping the same value.
    pub fn new<I, Q>(
        recipient: impl Into<Recipient>,
        text: impl Into<String>,
        quick_replies: I,
    ) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Fragment<QuickReplyButton>>,
    {
        let recipient = recipient.into();
        if recipient.is_transient() {
            tracing::warn!(
                recipient = recipient.value(),
                "quick replies are addressed by id; ignoring the user_ref form"
            );
        }

        Self {
            recipient: recipient.into_persistent(),
            message: QuickReplyBody {
                text: text.into(),
                quick_replies: fragments(quick_replies),
            },
            tag: None,
        }
    }

    /// Tags the message.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }

    pub fn quick_replies(&self) -> &[Fragment<QuickReplyButton>] {
        &self.message.quick_replies
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }
}

/// Any message this crate can build.
///
/// Serialized exactly as the variant it holds.
#[derive(Serialize, PartialEq, Clone, Debug)]
#[serde(untagged)]
#[must_use = "Message is an unsent message that might need to be sent."]
pub enum Message {
    Text(TextMessage),
    QuickReply(QuickReply),
    Structured(StructuredMessage),
}

impl Message {
    pub fn recipient(&self) -> &Recipient {
        match self {
            Self::Text(m) => m.recipient(),
            Self::QuickReply(m) => m.recipient(),
            Self::Structured(m) => m.recipient(),
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Self::Text(m) => m.tag(),
            Self::QuickReply(m) => m.tag(),
            Self::Structured(m) => m.tag(),
        }
    }
}

enum_traits! {
    |Message|
    TextMessage => Text,
    QuickReply => QuickReply,
    StructuredMessage => Structured
}

impl Project for TextMessage {
    fn to_data(&self) -> Result<Value, Error> {
        project_message(self)
    }
}

impl Project for QuickReply {
    fn to_data(&self) -> Result<Value, Error> {
        project_message(self)
    }
}

impl Project for Message {
    fn to_data(&self) -> Result<Value, Error> {
        project_message(self)
    }
}

/// Projects a top-level message, leaving a trace line per body built.
pub(crate) fn project_message<M: Serialize + Display>(message: &M) -> Result<Value, Error> {
    tracing::trace!(summary = %message, "projecting message");
    serde_json::to_value(message).map_err(Error::Projection)
}

impl Display for TextMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[→ {}] text: {}", self.recipient, self.message.text)
    }
}

impl Display for QuickReply {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "[→ {}] quick reply: {} ({} options)",
            self.recipient,
            self.message.text,
            self.message.quick_replies.len()
        )
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text(m) => Display::fmt(m, f),
            Self::QuickReply(m) => Display::fmt(m, f),
            Self::Structured(m) => Display::fmt(m, f),
        }
    }
}
