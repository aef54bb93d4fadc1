//! In-page anchor registry.
//!
//! Built once when the dashboard view is constructed; sections that appear
//! later are not wired up, mirroring the one-shot scan the web front end
//! does on page load.

/// Maps anchor names (with or without a leading `#`) to content row offsets.
#[derive(Debug, Default, Clone)]
pub struct AnchorMap {
    entries: Vec<(String, u16)>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at `top`, replacing any previous entry for it.
    pub fn insert(&mut self, name: impl Into<String>, top: u16) {
        let name = normalize(&name.into());
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = top;
        } else {
            self.entries.push((name, top));
        }
    }

    /// Resolve an anchor target like `#performance` (or `performance`) to
    /// its row offset.
    pub fn resolve(&self, target: &str) -> Option<u16> {
        let target = normalize(target);
        self.entries
            .iter()
            .find(|(name, _)| *name == target)
            .map(|(_, top)| *top)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim_start_matches('#').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_with_and_without_hash() {
        let mut anchors = AnchorMap::new();
        anchors.insert("overview", 0);
        anchors.insert("performance", 12);

        assert_eq!(anchors.resolve("#performance"), Some(12));
        assert_eq!(anchors.resolve("performance"), Some(12));
        assert_eq!(anchors.resolve("#overview"), Some(0));
    }

    #[test]
    fn unknown_anchor_is_none() {
        let anchors = AnchorMap::new();
        assert_eq!(anchors.resolve("#missing"), None);
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut anchors = AnchorMap::new();
        anchors.insert("#clusters", 20);
        anchors.insert("clusters", 34);

        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors.resolve("clusters"), Some(34));
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut anchors = AnchorMap::new();
        anchors.insert("Recommendations", 50);
        assert_eq!(anchors.resolve("#recommendations"), Some(50));
    }
}
