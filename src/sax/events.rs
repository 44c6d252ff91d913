//! SAX Event Types
//!
//! Owned events recorded from reader hooks.

use crate::core::attributes::Attributes;

/// A SAX parsing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaxEvent {
    /// Raw prolog (always the first event, possibly empty)
    Head(String),

    /// Start of an element, including void elements
    Open {
        /// Element name
        name: String,
        /// Attributes in document order
        attributes: Attributes,
    },

    /// End of an element
    Close(String),

    /// Merged text content
    Text(String),
}

impl SaxEvent {
    /// Check if this is a start element event
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, SaxEvent::Open { .. })
    }

    /// Check if this is an end element event
    #[inline]
    pub fn is_close(&self) -> bool {
        matches!(self, SaxEvent::Close(_))
    }

    /// Check if this is a text event
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, SaxEvent::Text(_))
    }

    /// Get the element name if this is a start or end element
    pub fn element_name(&self) -> Option<&str> {
        match self {
            SaxEvent::Open { name, .. } => Some(name),
            SaxEvent::Close(name) => Some(name),
            _ => None,
        }
    }
}
