//! Error Handling
//!
//! This module defines the crate's error types. Every failure here is
//! deterministic and input-dependent: nothing in this crate talks to the
//! network, so an error always means the message (or the configuration used
//! to build it) has to change before it can be sent.

use std::fmt;

use crate::template::TemplateKind;

/// The **top-level error enum** for the `messenger-send` crate.
///
/// Construction errors ([`Error::Validation`], [`Error::MissingField`],
/// [`Error::InvalidData`]) are raised before a message value exists, so an
/// invalid message can never reach the transport. It uses `#[non_exhaustive]`
/// to allow for future additions of error variants without breaking client code.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A template violates a cross-field constraint imposed by the platform.
    ///
    /// Match on [`ValidationError::constraint`] to tell constraints apart.
    #[error("The template violates a platform constraint: {0}")]
    Validation(#[from] ValidationError),

    /// A data bag did not carry a field the template kind requires.
    #[error("The `{kind}` template data is missing the required `{field}` field")]
    MissingField {
        kind: TemplateKind,
        field: &'static str,
    },

    /// A data bag could not be read into the template's fields
    /// (wrong JSON type, not an object, unknown enum value...).
    #[error("The template data could not be read: {0}")]
    InvalidData(#[source] serde_json::Error),

    /// A template kind string is not one of `button`, `generic`, `list` or `receipt`.
    #[error("Unknown template kind `{0}`")]
    UnknownTemplateKind(String),

    /// A configuration value (e.g. from the environment) could not be used.
    #[error("Invalid configuration value for `{key}`: '{value}'")]
    Config { key: &'static str, value: String },

    /// Serializing a message into its wire shape failed.
    #[error("Failed to project the message into its wire shape: {0}")]
    Projection(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn missing(kind: TemplateKind, field: &'static str) -> Self {
        Self::MissingField { kind, field }
    }

    pub(crate) fn config(key: &'static str, value: impl Into<String>) -> Self {
        Self::Config {
            key,
            value: value.into(),
        }
    }

    /// Returns the platform constraint this error reports, if it is a
    /// [`Error::Validation`].
    pub fn constraint(&self) -> Option<Constraint> {
        match self {
            Self::Validation(err) => Some(err.constraint),
            _ => None,
        }
    }
}

/// A **platform constraint violation**, raised while a template is being
/// constructed.
///
/// # Fields
/// - `kind`: The template kind that was being built.
/// - `constraint`: The violated [`Constraint`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} template: {constraint} ({})", .constraint.code())]
#[non_exhaustive]
pub struct ValidationError {
    pub kind: TemplateKind,
    pub constraint: Constraint,
}

impl ValidationError {
    pub(crate) fn new(kind: TemplateKind, constraint: Constraint) -> Self {
        Self { kind, constraint }
    }

    /// Returns the violated constraint.
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }
}

/// The cross-field rules a template is checked against at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Constraint {
    /// A list template shown with the `large` top element style needs an
    /// `image_url` on its first element.
    LargeTopElementRequiresImage,
}

impl Constraint {
    /// A stable, machine-readable code for this constraint.
    pub fn code(self) -> &'static str {
        match self {
            Self::LargeTopElementRequiresImage => "list.large_top_element_requires_image",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargeTopElementRequiresImage => f.write_str(
                "the first element must have an image_url when top_element_style is large; \
                 set the image_url or change the top_element_style to compact",
            ),
        }
    }
}

/// A wire string that does not name any value of the expected enum.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {expected} value `{value}`")]
pub struct UnknownValue {
    pub expected: &'static str,
    pub value: String,
}
