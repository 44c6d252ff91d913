//! Expanding Reader
//!
//! Single-pass reader that re-lexes entity replacement text in place.
//!
//! - Top level: replacement text is lexed as markup, so an entity can
//!   contribute tags, CDATA and further references through the normal hooks
//! - Attribute values: replacement text is lexed with the expansion value
//!   grammar, which has no closing delimiter, so quotes and markup inside it
//!   are plain value text
//!
//! Expansion is an explicit stack of saved cursors, never host recursion.
//! Running out of replacement text pops a frame. Running out of the
//! document, or failing to match, ends the read.

use super::backend::{AsyncBackend, Backend, Outcome};
use crate::core::attributes::Attributes;
use crate::core::entities::{resolve_builtin, Builtin};
use crate::core::expansion::{Cursor, ExpansionStack, Frame};
use crate::core::prolog::scan_prolog;
use crate::core::scanner::Span;
use crate::core::tokenizer::{
    next_attribute, next_markup, next_value, AttributeToken, Markup, ValueGrammar, ValueToken,
};
use log::{debug, trace};
use std::borrow::Cow;

/// Start tag being assembled
#[derive(Debug)]
struct OpenTag {
    name: String,
    attributes: Attributes,
}

/// Which grammar governs the next token
#[derive(Debug)]
enum State {
    TopLevel,
    AttributeList(OpenTag),
    /// Tag plus the name of the attribute whose value is being read
    AttributeValue(OpenTag, String),
}

/// Why the main loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    EndOfDocument,
    UnmatchedMarkup,
    UnterminatedEndTag,
    MalformedAttributeList,
    UnterminatedValue,
    InvalidCharacterReference,
}

impl Halt {
    fn describe(self) -> &'static str {
        match self {
            Halt::EndOfDocument => "end of document",
            Halt::UnmatchedMarkup => "no top-level token matches",
            Halt::UnterminatedEndTag => "end tag without '>'",
            Halt::MalformedAttributeList => "malformed or unterminated attribute list",
            Halt::UnterminatedValue => "unterminated attribute value",
            Halt::InvalidCharacterReference => "invalid numeric character reference",
        }
    }
}

/// One read over one document
pub struct Reader<'a> {
    input: &'a str,
    prolog_end: usize,
    cursor: Cursor<'a>,
    stack: ExpansionStack<'a>,
    /// Value grammar in effect; value-level frames save and restore it
    grammar: ValueGrammar,
    /// Pending text, or the value of the attribute being read
    text: String,
}

impl<'a> Reader<'a> {
    /// Prepare a read of `input`, locating the prolog
    pub fn new(input: &'a str) -> Self {
        let prolog_end = scan_prolog(input);
        Reader {
            input,
            prolog_end,
            cursor: Cursor::new(input, prolog_end),
            stack: ExpansionStack::new(),
            grammar: ValueGrammar::DoubleQuoted,
            text: String::new(),
        }
    }

    /// Raw prolog, everything before the first start tag
    pub fn prolog(&self) -> &'a str {
        &self.input[..self.prolog_end]
    }

    /// Lex the document after the prolog, firing hooks on `backend`
    pub fn run<B: Backend + ?Sized>(mut self, backend: &mut B) -> Outcome {
        let mut state = State::TopLevel;
        loop {
            let step = match state {
                State::TopLevel => self.top_level(backend),
                State::AttributeList(tag) => self.attribute_list(tag, backend),
                State::AttributeValue(tag, attribute) => {
                    self.attribute_value(tag, attribute, backend)
                }
            };
            match step {
                Ok(next) => state = next,
                Err(halt) => return self.finish(halt),
            }
        }
    }

    fn top_level<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<State, Halt> {
        let Some((token, next)) = next_markup(&self.cursor.source, self.cursor.pos) else {
            if self.pop_frame() {
                return Ok(State::TopLevel);
            }
            return Err(if self.cursor.at_end() {
                Halt::EndOfDocument
            } else {
                Halt::UnmatchedMarkup
            });
        };
        self.cursor.pos = next;

        match token {
            Markup::Reference(body) => self.reference(body, false, backend)?,
            Markup::CData(span) | Markup::Text(span) => {
                self.text.push_str(span.of(&self.cursor.source));
            }
            Markup::Comment | Markup::ProcessingInstruction => {}
            Markup::EndTag(name) => {
                self.flush_text(backend);
                backend.close(name.of(&self.cursor.source));
            }
            Markup::UnterminatedEndTag(_) => {
                self.flush_text(backend);
                return Err(Halt::UnterminatedEndTag);
            }
            Markup::StartTag(name) => {
                self.flush_text(backend);
                return Ok(State::AttributeList(OpenTag {
                    name: name.of(&self.cursor.source).to_owned(),
                    attributes: Attributes::new(),
                }));
            }
        }
        Ok(State::TopLevel)
    }

    fn attribute_list<B: Backend + ?Sized>(
        &mut self,
        tag: OpenTag,
        backend: &mut B,
    ) -> Result<State, Halt> {
        // A replacement text cannot end inside an attribute list
        let (token, next) = next_attribute(&self.cursor.source, self.cursor.pos)
            .ok_or(Halt::MalformedAttributeList)?;
        self.cursor.pos = next;

        match token {
            AttributeToken::Close { void } => {
                let OpenTag { name, attributes } = tag;
                backend.open(&name, attributes);
                if void {
                    backend.close(&name);
                }
                Ok(State::TopLevel)
            }
            AttributeToken::Whitespace => Ok(State::AttributeList(tag)),
            AttributeToken::Head { name, grammar } => {
                self.grammar = grammar;
                let attribute = name.of(&self.cursor.source).to_owned();
                Ok(State::AttributeValue(tag, attribute))
            }
        }
    }

    fn attribute_value<B: Backend + ?Sized>(
        &mut self,
        mut tag: OpenTag,
        attribute: String,
        backend: &mut B,
    ) -> Result<State, Halt> {
        let Some((token, next)) = next_value(&self.cursor.source, self.cursor.pos, self.grammar)
        else {
            if self.pop_frame() {
                return Ok(State::AttributeValue(tag, attribute));
            }
            return Err(Halt::UnterminatedValue);
        };
        self.cursor.pos = next;

        match token {
            ValueToken::Reference(body) => self.reference(body, true, backend)?,
            ValueToken::Run(span) => self.text.push_str(span.of(&self.cursor.source)),
            ValueToken::Delimiter => {
                let value = std::mem::take(&mut self.text);
                tag.attributes.insert(attribute, value);
                return Ok(State::AttributeList(tag));
            }
        }
        Ok(State::AttributeValue(tag, attribute))
    }

    /// Handle `&body;` found in the active source
    fn reference<B: Backend + ?Sized>(
        &mut self,
        body: Span,
        in_value: bool,
        backend: &mut B,
    ) -> Result<(), Halt> {
        let name = body.of(&self.cursor.source);
        match resolve_builtin(name) {
            Builtin::Char(c) => {
                self.text.push(c);
                Ok(())
            }
            Builtin::Invalid => Err(Halt::InvalidCharacterReference),
            Builtin::NotBuiltin => {
                let name = name.to_owned();
                self.expand(name, in_value, backend);
                Ok(())
            }
        }
    }

    /// Redirect lexing into the replacement text of `name`.
    ///
    /// Undefined and already-expanding entities are ignored.
    fn expand<B: Backend + ?Sized>(&mut self, name: String, in_value: bool, backend: &B) {
        if self.stack.is_expanding(&name) {
            trace!("skipping recursive reference to entity '{}'", name);
            return;
        }
        let Some(replacement) = backend.entity(&name) else {
            trace!("skipping undefined entity '{}'", name);
            return;
        };

        let replacement = Cursor {
            source: Cow::Owned(replacement.to_owned()),
            pos: 0,
        };
        let saved = std::mem::replace(&mut self.cursor, replacement);
        self.stack.push(
            name,
            Frame {
                cursor: saved,
                grammar: in_value.then_some(self.grammar),
            },
        );
        if in_value {
            self.grammar = ValueGrammar::Expansion;
        }
        trace!("expanding entity, depth {}", self.stack.depth());
    }

    /// Restore the cursor saved by the innermost expansion
    fn pop_frame(&mut self) -> bool {
        match self.stack.pop() {
            Some((name, frame)) => {
                trace!("finished entity '{}', depth {}", name, self.stack.depth());
                self.cursor = frame.cursor;
                if let Some(grammar) = frame.grammar {
                    self.grammar = grammar;
                }
                true
            }
            None => false,
        }
    }

    fn flush_text<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        if !self.text.is_empty() {
            backend.text(&self.text);
            self.text.clear();
        }
    }

    fn finish(self, halt: Halt) -> Outcome {
        if halt == Halt::EndOfDocument {
            return Outcome::Completed;
        }
        debug!(
            "read truncated at byte {} (expansion depth {}): {}",
            self.cursor.pos,
            self.stack.depth(),
            halt.describe()
        );
        Outcome::Truncated
    }
}

/// Read `input`, delivering the prolog then every structural event
pub fn read<B: Backend + ?Sized>(input: &str, backend: &mut B) -> Outcome {
    let reader = Reader::new(input);
    backend.head(reader.prolog());
    reader.run(backend)
}

/// Like [`read`], but awaits the backend's asynchronous prolog hook first
pub async fn read_async<B: AsyncBackend + ?Sized>(input: &str, backend: &mut B) -> Outcome {
    let reader = Reader::new(input);
    backend.head_async(reader.prolog()).await;
    reader.run(backend)
}
