//! Element-context stack.

/// Ancestry of the element currently being parsed.
///
/// Holds the names of enclosing elements, outermost first. Popping an
/// empty stack is a no-op, so unbalanced end events never underflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStack {
    names: Vec<String>,
}

impl ElementStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Remove and return the innermost name, or `None` when empty.
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    /// Innermost name without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the names, outermost first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Check whether any ancestor has the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Slash-separated path of the ancestry (e.g. "kml/Response/Placemark").
    #[must_use]
    pub fn path(&self) -> String {
        self.names.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = ElementStack::new();
        stack.push("kml");
        stack.push("Response");

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek(), Some("Response"));
        assert_eq!(stack.pop(), Some("Response".to_string()));
        assert_eq!(stack.pop(), Some("kml".to_string()));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty_never_underflows() {
        let mut stack = ElementStack::new();
        stack.push("kml");

        assert!(stack.pop().is_some());
        for _ in 0..3 {
            assert_eq!(stack.pop(), None);
        }
        assert!(stack.is_empty());
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn test_iter_contains_and_path() {
        let mut stack = ElementStack::new();
        stack.push("kml");
        stack.push("Response");
        stack.push("Placemark");

        let names: Vec<_> = stack.iter().collect();
        assert_eq!(names, vec!["kml", "Response", "Placemark"]);
        assert_eq!(stack.iter().next_back(), Some("Placemark"));
        assert!(stack.contains("Response"));
        assert!(!stack.contains("Point"));
        assert_eq!(stack.path(), "kml/Response/Placemark");
    }
}
