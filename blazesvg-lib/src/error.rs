//! Error types shared by the library and the command-line front end.

use thiserror::Error;

use crate::config::{MAX_FLOAT_PRECISION, MAX_INDENT};

/// Raised by [`crate::config::Options::validate`] before any node is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("float precision {0} is out of range (expected 0..={max})", max = MAX_FLOAT_PRECISION)]
    FloatPrecisionOutOfRange(u32),

    #[error("indent of {0} spaces is out of range (expected 0..={max})", max = MAX_INDENT)]
    IndentOutOfRange(usize),

    #[error("invalid property name {0:?} in the removal list")]
    InvalidRemovedProperty(String),
}

/// Raised by a [`crate::style::extract::DocumentHost`] when a mutation cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Attribute access on a text node or on the document root.
    #[error("cannot access attribute `{0}` on a non-element node")]
    NotAnElement(String),

    /// Child insertion into a text node.
    #[error("cannot insert a child into a text node")]
    NotAContainer,
}

#[derive(Debug, Error)]
pub enum BlazeSvgError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("document mutation failed: {0}")]
    Dom(#[from] DomError),

    /// Markup the tree builder placed outside the `<svg>` element, typically after an
    /// HTML tag such as `<p>` or `<font color>` closed it early.
    #[error("{0} ended up outside the <svg> element and would be lost")]
    ContentOutsideSvg(String),
}
