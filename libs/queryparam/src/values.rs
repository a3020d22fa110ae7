/// Decoded query parameters: an ordered mapping from key to one or more
/// string values.
///
/// Repeated keys keep every value in arrival order, but lookups only ever
/// return the first one — later duplicates are ignored by design, matching
/// common query-string semantics. Building a `UrlValues` from a raw query
/// string (percent-decoding and all) is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct UrlValues {
    entries: Vec<(String, Vec<String>)>,
}

impl UrlValues {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Replace all values for `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == &key) {
            entry.1 = vec![value];
        } else {
            self.entries.push((key, vec![value]));
        }
    }

    /// Add a value for `key`, keeping any existing ones (repeated key).
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == &key) {
            entry.1.push(value.into());
        } else {
            self.entries.push((key, vec![value.into()]));
        }
    }

    /// First value for `key`, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.append(key, value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_first_value_for_repeated_key() {
        let mut values = UrlValues::new();
        values.append("name", "tom");
        values.append("name", "jim");

        assert_eq!(values.get("name"), Some("tom"));
    }

    #[test]
    fn get_absent_key() {
        let values = UrlValues::new();
        assert_eq!(values.get("name"), None);
    }

    #[test]
    fn set_replaces_existing_values() {
        let mut values = UrlValues::new();
        values.append("name", "tom");
        values.append("name", "jim");
        values.set("name", "frank");

        assert_eq!(values.get("name"), Some("frank"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn from_iterator_preserves_order_and_duplicates() {
        let values: UrlValues =
            [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("a"), Some("1"));
        assert_eq!(values.get("b"), Some("2"));
    }
}
