//! Configuration options for rendering a property table.
//!
//! This module provides types to customize the textual output:
//!
//! - [`PropertiesOptions`]: Main configuration struct
//! - [`Separator`]: What goes between a key and its value
//!
//! The defaults produce the canonical form: `key = value` lines joined by `\n`,
//! sorted by key, values escaped, no trailing newline. Every separator choice
//! decodes back to the same table.
//!
//! ## Examples
//!
//! ```rust
//! use serde_properties::{properties, PropertiesOptions, Separator};
//!
//! let table = properties! { "b" => "2", "a" => "1" };
//!
//! let options = PropertiesOptions::new().with_separator(Separator::Colon);
//! assert_eq!(table.render(&options), "a: 1\nb: 2");
//! ```

/// Separator written between key and value.
///
/// # Examples
///
/// ```rust
/// use serde_properties::Separator;
///
/// assert_eq!(Separator::Equals.as_str(), " = ");
/// assert_eq!(Separator::Colon.as_str(), ": ");
/// assert_eq!(Separator::Space.as_str(), " ");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Equals,
    Colon,
    Space,
}

impl Separator {
    /// Returns the string representation of this separator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Separator::Equals => " = ",
            Separator::Colon => ": ",
            Separator::Space => " ",
        }
    }
}

/// Configuration options for rendering.
///
/// # Examples
///
/// ```rust
/// use serde_properties::{PropertiesOptions, Separator};
///
/// // Canonical form
/// let options = PropertiesOptions::new();
///
/// // Human readable, values left unescaped
/// let options = PropertiesOptions::display();
///
/// // Custom configuration
/// let options = PropertiesOptions::new()
///     .with_separator(Separator::Space)
///     .with_trailing_newline(true);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertiesOptions {
    pub separator: Separator,
    pub trailing_newline: bool,
    /// Fully escape keys and values so the output decodes to the same table.
    /// When off, only separators and comment markers in keys are escaped.
    pub escape_values: bool,
}

impl Default for PropertiesOptions {
    fn default() -> Self {
        PropertiesOptions {
            separator: Separator::default(),
            trailing_newline: false,
            escape_values: true,
        }
    }
}

impl PropertiesOptions {
    /// Creates default options (canonical form).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::{PropertiesOptions, Separator};
    ///
    /// let options = PropertiesOptions::new();
    /// assert_eq!(options.separator, Separator::Equals);
    /// assert!(options.escape_values);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for the display form: values are written verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::PropertiesOptions;
    ///
    /// let options = PropertiesOptions::display();
    /// assert!(!options.escape_values);
    /// ```
    #[must_use]
    pub fn display() -> Self {
        PropertiesOptions {
            escape_values: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Terminates the last entry with a newline as well.
    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }
}
