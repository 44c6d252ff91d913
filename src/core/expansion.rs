//! Entity Expansion Stack
//!
//! Saved cursor state for every entity currently being expanded, plus the
//! names of those entities. The two stacks always have the same depth; an
//! entity whose name is on the stack is not expanded again.

use super::tokenizer::ValueGrammar;
use std::borrow::Cow;

/// Source text plus the offset being lexed in it
#[derive(Debug)]
pub struct Cursor<'a> {
    pub source: Cow<'a, str>,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, pos: usize) -> Self {
        Cursor {
            source: Cow::Borrowed(source),
            pos,
        }
    }

    /// True when the cursor sits at the end of its source
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}

/// Snapshot taken when an expansion starts
#[derive(Debug)]
pub struct Frame<'a> {
    pub cursor: Cursor<'a>,
    /// Value grammar to restore on pop. `None` for expansions started at
    /// top level, which leave the grammar of the current value alone.
    pub grammar: Option<ValueGrammar>,
}

/// Frames and recursion-guard names, pushed and popped together
#[derive(Debug, Default)]
pub struct ExpansionStack<'a> {
    frames: Vec<Frame<'a>>,
    names: Vec<String>,
}

impl<'a> ExpansionStack<'a> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Whether `name` is already being expanded
    pub fn is_expanding(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn push(&mut self, name: String, frame: Frame<'a>) {
        self.names.push(name);
        self.frames.push(frame);
    }

    /// Pop the innermost frame and its guard name
    pub fn pop(&mut self) -> Option<(String, Frame<'a>)> {
        let frame = self.frames.pop()?;
        let name = self.names.pop()?;
        Some((name, frame))
    }

    #[inline]
    pub fn depth(&self) -> usize {
        debug_assert_eq!(self.frames.len(), self.names.len());
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(source: &str) -> Frame<'_> {
        Frame {
            cursor: Cursor::new(source, 0),
            grammar: Some(ValueGrammar::DoubleQuoted),
        }
    }

    #[test]
    fn test_push_pop_lockstep() {
        let mut stack = ExpansionStack::new();
        assert!(stack.is_empty());

        stack.push("a".to_string(), frame("outer"));
        stack.push("b".to_string(), frame("inner"));
        assert_eq!(stack.depth(), 2);
        assert!(stack.is_expanding("a"));
        assert!(stack.is_expanding("b"));
        assert!(!stack.is_expanding("c"));

        let (name, popped) = stack.pop().unwrap();
        assert_eq!(name, "b");
        assert_eq!(popped.cursor.source, "inner");
        assert!(!stack.is_expanding("b"));
        assert_eq!(stack.depth(), 1);

        stack.pop().unwrap();
        assert!(stack.pop().is_none());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_cursor_at_end() {
        let mut cursor = Cursor::new("ab", 1);
        assert!(!cursor.at_end());
        cursor.pos = 2;
        assert!(cursor.at_end());
    }
}
