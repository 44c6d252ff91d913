//! Backend Hooks
//!
//! The reader calls back into a [`Backend`] for every structural event and
//! for entity lookups. Every hook is optional.

use crate::core::attributes::Attributes;
use std::collections::HashMap;
use std::future::Future;

/// Receiver of reader events and source of entity definitions
pub trait Backend {
    /// Replacement text for a general entity (name without `&`/`;`).
    ///
    /// Only consulted for names that are neither numeric nor predefined.
    fn entity(&self, _name: &str) -> Option<&str> {
        None
    }

    /// The raw prolog, called exactly once per read, possibly with `""`
    fn head(&mut self, _prolog: &str) {}

    /// A start tag or void tag, attributes in document order
    fn open(&mut self, _name: &str, _attributes: Attributes) {}

    /// An end tag, or the implicit end of a void tag
    fn close(&mut self, _name: &str) {}

    /// Merged text between two tag boundaries, never empty
    fn text(&mut self, _text: &str) {}
}

/// Backend whose prolog hook suspends the read until it completes
pub trait AsyncBackend: Backend {
    fn head_async(&mut self, prolog: &str) -> impl Future<Output = ()>;
}

/// No hooks, no entities
impl Backend for () {}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn entity(&self, name: &str) -> Option<&str> {
        (**self).entity(name)
    }

    fn head(&mut self, prolog: &str) {
        (**self).head(prolog)
    }

    fn open(&mut self, name: &str, attributes: Attributes) {
        (**self).open(name, attributes)
    }

    fn close(&mut self, name: &str) {
        (**self).close(name)
    }

    fn text(&mut self, text: &str) {
        (**self).text(text)
    }
}

/// An entity table on its own, with no hooks
impl Backend for HashMap<String, String> {
    fn entity(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// How a read ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The top-level lexer ran out at the end of the document
    Completed,
    /// Malformed input stopped the read early; hooks already fired stand
    Truncated,
}

impl Outcome {
    #[inline]
    pub fn is_completed(self) -> bool {
        self == Outcome::Completed
    }
}
