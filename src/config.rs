//! Template defaults
//!
//! Optional template fields left out of a data bag are filled from a
//! [`TemplateDefaults`] while the template is built, never later. The built-in
//! values are the platform's own defaults; they can be overridden in code or
//! from the environment.
//!
//! | field | built-in | environment variable |
//! |---|---|---|
//! | receipt `currency` | `USD` | `MESSENGER_DEFAULT_CURRENCY` |
//! | generic `image_aspect_ratio` | `horizontal` | `MESSENGER_IMAGE_ASPECT_RATIO` |
//! | list `top_element_style` | `large` | `MESSENGER_TOP_ELEMENT_STYLE` |

use std::env;

use crate::{
    error::Error,
    template::{ImageAspectRatio, TopElementStyle},
};

const CURRENCY_VAR: &str = "MESSENGER_DEFAULT_CURRENCY";
const IMAGE_ASPECT_RATIO_VAR: &str = "MESSENGER_IMAGE_ASPECT_RATIO";
const TOP_ELEMENT_STYLE_VAR: &str = "MESSENGER_TOP_ELEMENT_STYLE";

/// Values used for optional template fields a data bag leaves out.
///
/// # Example
/// ```rust
/// use messenger_send::{
///     config::TemplateDefaults, template::TemplateKind, Project, StructuredMessage,
/// };
/// use serde_json::json;
///
/// let defaults = TemplateDefaults::new().currency("EUR");
/// let message = StructuredMessage::with_defaults(
///     "1254477777772919",
///     TemplateKind::Receipt,
///     json!({
///         "recipient_name": "Stephane Crozatier",
///         "order_number": "12345678902",
///         "payment_method": "Visa 2345",
///         "order_url": "https://example.com/order?order_id=123456",
///         "timestamp": "1428444852",
///         "elements": [],
///         "address": {"street_1": "1 Hacker Way", "city": "Menlo Park",
///                     "postal_code": "94025", "state": "CA", "country": "US"},
///         "summary": {"total_cost": 56.14},
///         "adjustments": []
///     }),
///     &defaults,
/// )?;
/// assert_eq!(message.to_data()?["message"]["attachment"]["payload"]["currency"], "EUR");
/// # Ok::<(), messenger_send::Error>(())
/// ```
#[derive(PartialEq, Eq, Clone, Debug)]
#[non_exhaustive]
pub struct TemplateDefaults {
    pub currency: String,
    pub image_aspect_ratio: ImageAspectRatio,
    pub top_element_style: TopElementStyle,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            currency: Self::DEFAULT_CURRENCY.to_owned(),
            image_aspect_ratio: ImageAspectRatio::default(),
            top_element_style: TopElementStyle::default(),
        }
    }
}

impl TemplateDefaults {
    /// Currency of a receipt that does not name one.
    pub const DEFAULT_CURRENCY: &'static str = "USD";

    /// Creates the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the environment, falling back to the built-in
    /// value for every variable that is unset.
    ///
    /// # Errors
    /// [`Error::Config`] if a variable is set but empty, not unicode, or not a
    /// known value.
    pub fn from_env() -> Result<Self, Error> {
        let mut defaults = Self::default();

        if let Some(currency) = var(CURRENCY_VAR)? {
            defaults.currency = currency;
        }
        if let Some(ratio) = var(IMAGE_ASPECT_RATIO_VAR)? {
            defaults.image_aspect_ratio = ratio
                .parse()
                .map_err(|_| Error::config(IMAGE_ASPECT_RATIO_VAR, ratio))?;
        }
        if let Some(style) = var(TOP_ELEMENT_STYLE_VAR)? {
            defaults.top_element_style = style
                .parse()
                .map_err(|_| Error::config(TOP_ELEMENT_STYLE_VAR, style))?;
        }

        tracing::debug!(?defaults, "loaded template defaults from the environment");
        Ok(defaults)
    }

    /// Sets the receipt currency (ISO 4217 code).
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn image_aspect_ratio(mut self, ratio: ImageAspectRatio) -> Self {
        self.image_aspect_ratio = ratio;
        self
    }

    pub fn top_element_style(mut self, style: TopElementStyle) -> Self {
        self.top_element_style = style;
        self
    }
}

fn var(key: &'static str) -> Result<Option<String>, Error> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(Error::config(key, value)),
        Ok(value) => Ok(Some(value.trim().to_owned())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(value)) => {
            Err(Error::config(key, value.to_string_lossy()))
        }
    }
}
