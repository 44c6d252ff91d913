//! SAX Collector
//!
//! Implements Backend to collect SAX events for batch return to Elixir.

use super::events::SaxEvent;
use crate::core::attributes::Attributes;
use crate::reader::{read, Backend, Outcome};
use std::borrow::Cow;
use std::collections::HashMap;

/// Entity name -> replacement text
pub type EntityMap = HashMap<String, String>;

/// Collector that gathers SAX events during a read
pub struct SaxCollector<'e> {
    /// Collected events
    events: Vec<SaxEvent>,
    /// Entities available to the read; copied only when a hook edits them
    entities: Cow<'e, EntityMap>,
}

impl<'e> SaxCollector<'e> {
    /// Create a new collector with no entities
    pub fn new() -> Self {
        Self::with_entities(EntityMap::new())
    }

    /// Create a collector that owns `entities`
    pub fn with_entities(entities: EntityMap) -> Self {
        Self::from_table(Cow::Owned(entities))
    }

    /// Create a collector that reads from a shared table
    pub fn borrowing(entities: &'e EntityMap) -> Self {
        Self::from_table(Cow::Borrowed(entities))
    }

    fn from_table(entities: Cow<'e, EntityMap>) -> Self {
        Self {
            events: Vec::with_capacity(256),
            entities,
        }
    }

    /// Define or replace an entity
    pub fn define(&mut self, name: impl Into<String>, replacement: impl Into<String>) {
        self.entities
            .to_mut()
            .insert(name.into(), replacement.into());
    }

    /// Remove an entity definition
    pub fn remove(&mut self, name: &str) -> Option<String> {
        if !self.entities.contains_key(name) {
            return None;
        }
        self.entities.to_mut().remove(name)
    }

    /// Take the collected events
    pub fn take_events(&mut self) -> Vec<SaxEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get the collected events as a slice
    pub fn events(&self) -> &[SaxEvent] {
        &self.events
    }
}

impl Default for SaxCollector<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SaxCollector<'_> {
    fn entity(&self, name: &str) -> Option<&str> {
        self.entities.get(name).map(String::as_str)
    }

    fn head(&mut self, prolog: &str) {
        self.events.push(SaxEvent::Head(prolog.to_string()));
    }

    fn open(&mut self, name: &str, attributes: Attributes) {
        self.events.push(SaxEvent::Open {
            name: name.to_string(),
            attributes,
        });
    }

    fn close(&mut self, name: &str) {
        self.events.push(SaxEvent::Close(name.to_string()));
    }

    fn text(&mut self, text: &str) {
        self.events.push(SaxEvent::Text(text.to_string()));
    }
}

/// Read input against a shared entity table and return SAX events
pub fn parse_sax(input: &str, entities: &EntityMap) -> (Vec<SaxEvent>, Outcome) {
    let mut collector = SaxCollector::borrowing(entities);
    let outcome = read(input, &mut collector);
    (collector.take_events(), outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(pairs: &[(&str, &str)]) -> EntityMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_parse() {
        let (events, outcome) = parse_sax("<root><child/></root>", &EntityMap::new());

        // head, start root, start+end child, end root
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], SaxEvent::Head(String::new()));
        assert!(events[1].is_open());
        assert!(events[4].is_close());
        assert!(outcome.is_completed());
    }

    #[test]
    fn test_with_text() {
        let (events, _) = parse_sax("<a>hello</a>", &EntityMap::new());
        assert_eq!(events.len(), 4);
        assert_eq!(events[2], SaxEvent::Text("hello".to_string()));
    }

    #[test]
    fn test_with_attributes() {
        let (events, _) = parse_sax("<root id=\"1\" name=\"test\"/>", &EntityMap::new());

        assert_eq!(events.len(), 3); // head, start+end (empty element)

        if let SaxEvent::Open { attributes, .. } = &events[1] {
            assert_eq!(attributes.iter().count(), 2);
            assert_eq!(attributes.get("name"), Some("test"));
        } else {
            panic!("Expected Open");
        }
    }

    #[test]
    fn test_entity_expansion_events() {
        let (events, _) = parse_sax(
            "<doc>&greeting;</doc>",
            &entities(&[("greeting", "<b>hi</b> &who;"), ("who", "there")]),
        );
        assert_eq!(
            events,
            vec![
                SaxEvent::Head(String::new()),
                SaxEvent::Open {
                    name: "doc".to_string(),
                    attributes: Attributes::new()
                },
                SaxEvent::Open {
                    name: "b".to_string(),
                    attributes: Attributes::new()
                },
                SaxEvent::Text("hi".to_string()),
                SaxEvent::Close("b".to_string()),
                SaxEvent::Text(" there".to_string()),
                SaxEvent::Close("doc".to_string()),
            ]
        );
    }

    #[test]
    fn test_define_and_remove() {
        let mut collector = SaxCollector::new();
        collector.define("e", "x");
        assert_eq!(collector.entity("e"), Some("x"));
        assert_eq!(collector.remove("e"), Some("x".to_string()));
        assert_eq!(collector.entity("e"), None);

        read("<r>&e;</r>", &mut collector);
        assert_eq!(collector.events().len(), 3);
        assert!(collector.events().iter().all(|e| !e.is_text()));
    }

    #[test]
    fn test_truncated_read_keeps_prefix() {
        let (events, outcome) = parse_sax("<a><b>x</b><c d=></a>", &EntityMap::new());
        assert_eq!(outcome, Outcome::Truncated);
        assert_eq!(events.len(), 5);
        assert_eq!(events[4], SaxEvent::Close("b".to_string()));
    }

    #[test]
    fn test_borrowed_table_copied_on_edit() {
        let shared = entities(&[("e", "x")]);
        let mut collector = SaxCollector::borrowing(&shared);
        assert!(matches!(collector.entities, Cow::Borrowed(_)));
        assert_eq!(collector.remove("missing"), None);
        assert!(matches!(collector.entities, Cow::Borrowed(_)));

        collector.define("f", "y");
        assert!(matches!(collector.entities, Cow::Owned(_)));
        assert_eq!(collector.entity("e"), Some("x"));
        assert_eq!(collector.entity("f"), Some("y"));
        assert_eq!(shared.len(), 1);
    }
}
