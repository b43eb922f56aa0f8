//! Projection into the wire shape
//!
//! Every message variant and every leaf element in this crate implements
//! [`Project`], whose single operation, [`to_data`](Project::to_data), turns the
//! in-memory value into the exact JSON the Send API expects.
//!
//! Projection is built on `serde::Serialize`: a container serializes each leaf it
//! owns through that leaf's own implementation and splices the result in place,
//! so a change to a leaf's shape never touches its containers.
//!
//! Leaf slots are [`Fragment`]s, which hold either a typed leaf or a raw JSON
//! object that is passed through untouched. Raw fragments cover platform fields
//! this crate does not model.
//!
//! ```rust
//! use messenger_send::{element::QuickReplyButton, project::Fragment, Project};
//! use serde_json::json;
//!
//! let typed: Fragment<QuickReplyButton> = QuickReplyButton::text("Yes", "Y").into();
//! let raw: Fragment<QuickReplyButton> =
//!     Fragment::raw(json!({"content_type": "text", "title": "No", "payload": "N"}))?;
//!
//! assert_eq!(
//!     typed.to_data()?,
//!     json!({"content_type": "text", "title": "Yes", "payload": "Y"})
//! );
//! assert_eq!(
//!     raw.to_data()?,
//!     json!({"content_type": "text", "title": "No", "payload": "N"})
//! );
//! # Ok::<(), messenger_send::Error>(())
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;

/// Conversion of a message or leaf element into its wire-ready JSON value.
///
/// `to_data` is pure: calling it twice on the same value yields the same output.
pub trait Project: Serialize {
    /// Projects `self` into the JSON value sent to the platform.
    fn to_data(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::Projection)
    }
}

/// A raw, pre-shaped JSON object.
pub type RawFragment = Map<String, Value>;

/// A leaf slot holding either a typed leaf or a raw JSON object.
///
/// Typed leaves are projected through their own [`Project`] implementation;
/// raw objects are emitted verbatim. Which case applies is settled when the
/// fragment is built and never re-checked during projection.
///
/// Deserializing a `Fragment` (as happens for template data bags) always yields
/// [`Fragment::Raw`], so every key of the input survives.
#[derive(PartialEq, Clone, Debug)]
pub enum Fragment<T> {
    /// A leaf modelled by this crate.
    Typed(T),
    /// A JSON object passed through as-is.
    Raw(RawFragment),
}

impl<T> Fragment<T> {
    /// Builds a raw fragment from a JSON value.
    ///
    /// Returns [`Error::InvalidData`] if the value is not a JSON object.
    pub fn raw(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self::Raw(map)),
            other => Err(Error::InvalidData(<serde_json::Error as serde::de::Error>::custom(
                format!("expected a JSON object for a leaf element, got `{other}`"),
            ))),
        }
    }

    /// Returns the typed leaf, if this fragment holds one.
    pub fn as_typed(&self) -> Option<&T> {
        match self {
            Self::Typed(leaf) => Some(leaf),
            Self::Raw(_) => None,
        }
    }

    /// Returns the raw object, if this fragment holds one.
    pub fn as_raw(&self) -> Option<&RawFragment> {
        match self {
            Self::Typed(_) => None,
            Self::Raw(map) => Some(map),
        }
    }

    /// Checks whether this fragment is passed through verbatim.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl<T> From<RawFragment> for Fragment<T> {
    #[inline]
    fn from(value: RawFragment) -> Self {
        Self::Raw(value)
    }
}

impl<T: Serialize> Serialize for Fragment<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Typed(leaf) => leaf.serialize(serializer),
            Self::Raw(map) => map.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Fragment<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawFragment::deserialize(deserializer).map(Self::Raw)
    }
}

impl<T: Project> Project for Fragment<T> {}

/// Collects anything convertible into fragments, keeping input order.
pub(crate) fn fragments<I, F, T>(items: I) -> Vec<Fragment<T>>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<T>>,
{
    items.into_iter().map(Into::into).collect()
}
