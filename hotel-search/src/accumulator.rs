//! Bounded, insertion-ordered map from listing identity (its name) to rendered text.

/// Results of one search run. Re-adding an identity overwrites its text in place; size does not grow.
///
/// Two different listings that share a name therefore collide and only the later text is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultAccumulator {
    entries: Vec<(String, String)>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites.
    pub fn add(&mut self, identity: impl Into<String>, value: impl Into<String>) {
        let identity = identity.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(id, _)| *id == identity) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((identity, value)),
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self, limit: usize) -> bool {
        self.entries.len() >= limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, identity: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == identity)
            .map(|(_, value)| value.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut results = ResultAccumulator::new();
        results.add("B", "1");
        results.add("A", "2");
        let names: Vec<&str> = results.iter().map(|(id, _)| id).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_add_overwrites_same_identity() {
        let mut results = ResultAccumulator::new();
        results.add("Метрополь", "Стоимость: 100");
        results.add("Космос", "Стоимость: 50");
        results.add("Метрополь", "Стоимость: 200");

        assert_eq!(results.size(), 2);
        assert_eq!(results.get("Метрополь"), Some("Стоимость: 200"));
        assert_eq!(results.iter().next().map(|(id, _)| id), Some("Метрополь"));
    }

    #[test]
    fn test_is_full_and_clear() {
        let mut results = ResultAccumulator::new();
        assert!(results.is_full(0));
        assert!(!results.is_full(1));
        results.add("A", "x");
        assert!(results.is_full(1));
        results.clear();
        assert!(results.is_empty());
    }
}
