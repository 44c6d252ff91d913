//! XML Attribute Mapping
//!
//! Attributes collected for one start tag, in document order.

/// A parsed XML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, prefix included
    pub name: String,
    /// Attribute value (entities expanded)
    pub value: String,
}

/// Insertion-ordered attribute mapping
///
/// Assigning a name twice keeps its first position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<Attribute>,
}

impl Attributes {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(8), // Most elements have < 8 attrs
        }
    }

    /// Set `name` to `value`
    pub fn insert(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Attribute { name, value }),
        }
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into `(name, value)` pairs
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries.into_iter().map(|a| (a.name, a.value)).collect()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name.into(), value.into());
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order() {
        let attrs: Attributes = [("id", "test"), ("class", "foo")].into_iter().collect();
        let names: Vec<_> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["id", "class"]);
        assert_eq!(attrs.get("class"), Some("foo"));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn test_reassignment_keeps_position() {
        let mut attrs = Attributes::new();
        attrs.insert("a".into(), "1".into());
        attrs.insert("b".into(), "2".into());
        attrs.insert("a".into(), "3".into());
        assert_eq!(
            attrs.into_pairs(),
            vec![("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_empty_attributes() {
        let attrs = Attributes::new();
        assert!(attrs.is_empty());
        assert_eq!(attrs.iter().next(), None);
    }
}
