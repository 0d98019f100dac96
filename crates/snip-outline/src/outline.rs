//! "On this page" outline derivation.

use snip_content::DocumentCollection;
use snip_renderer::{HeadingEntry, SectionId};

/// Ordered list of addressable headings for one page.
///
/// An empty outline means the outline panel is not shown at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outline {
    entries: Vec<HeadingEntry>,
}

impl Outline {
    /// Derive the outline straight from the content model.
    ///
    /// Produces the same entries, in the same order, as the renderer emits
    /// for `collection`.
    pub fn from_collection(collection: &DocumentCollection) -> Self {
        let entries = collection
            .iter()
            .enumerate()
            .flat_map(|(i, doc)| {
                doc.sections.iter().enumerate().map(move |(j, section)| {
                    HeadingEntry::new(SectionId::new(i, j), section.heading.trim())
                })
            })
            .collect();
        Self { entries }
    }

    /// Wrap entries collected elsewhere (for example from rendered markup).
    #[must_use]
    pub fn from_entries(entries: Vec<HeadingEntry>) -> Self {
        Self { entries }
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, HeadingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Index of the entry with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

/// Outcome of [`OutlineCollector::sync`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineChange {
    /// Same content as before; the outline was left untouched.
    Unchanged,
    /// Content changed; the outline was rebuilt from scratch.
    Replaced,
}

/// Owns the current outline and the identity of the content it came from.
///
/// Recomputation is keyed on content identity (a topic slug, a generation
/// counter) rather than run on every render, and is always a full rebuild.
#[derive(Debug)]
pub struct OutlineCollector<K> {
    key: Option<K>,
    outline: Outline,
}

impl<K: PartialEq + Clone> OutlineCollector<K> {
    pub fn new() -> Self {
        Self {
            key: None,
            outline: Outline::default(),
        }
    }

    /// Rebuild the outline if `key` differs from the last synced key.
    pub fn sync<F>(&mut self, key: &K, derive: F) -> OutlineChange
    where
        F: FnOnce() -> Outline,
    {
        if self.key.as_ref() == Some(key) {
            return OutlineChange::Unchanged;
        }
        self.outline = derive();
        self.key = Some(key.clone());
        tracing::debug!(entries = self.outline.len(), "Outline rebuilt");
        OutlineChange::Replaced
    }

    /// Current outline.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Key of the content the outline was derived from.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Forget the current content.
    pub fn clear(&mut self) {
        self.key = None;
        self.outline = Outline::default();
    }
}

impl<K: PartialEq + Clone> Default for OutlineCollector<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use snip_content::{Document, Library, Section};
    use snip_renderer::{DocsRenderer, collect_headings};

    use super::*;

    fn collection(headings: &[&str]) -> DocumentCollection {
        let doc = headings
            .iter()
            .fold(Document::new("Doc"), |doc, h| doc.with_section(Section::new(*h)));
        DocumentCollection::new(vec![doc])
    }

    #[test]
    fn test_from_collection_matches_renderer() {
        let library = Library::builtin().unwrap();
        let renderer = DocsRenderer::new();
        for topic in library.topics() {
            let rendered = renderer.render(&topic.documents);
            let outline = Outline::from_collection(&topic.documents);
            assert_eq!(outline.entries(), rendered.headings.as_slice(), "{}", topic.slug);
            assert_eq!(
                outline.entries(),
                collect_headings(&rendered.html).unwrap().as_slice()
            );
        }
    }

    #[test]
    fn test_outline_spans_documents() {
        let docs = DocumentCollection::new(vec![
            Document::new("One").with_section(Section::new("A")),
            Document::new("Empty"),
            Document::new("Two")
                .with_section(Section::new("B"))
                .with_section(Section::new("C")),
        ]);
        let outline = Outline::from_collection(&docs);
        let ids: Vec<_> = outline.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["section-0-0", "section-2-0", "section-2-1"]);
        assert_eq!(outline.position("section-2-1"), Some(2));
        assert!(!outline.contains("section-1-0"));
    }

    #[test]
    fn test_empty_collection_gives_empty_outline() {
        let outline = Outline::from_collection(&DocumentCollection::default());
        assert!(outline.is_empty());
    }

    #[test]
    fn test_collector_rebuilds_only_on_key_change() {
        let mut collector = OutlineCollector::new();
        let first = collection(&["A", "B"]);

        assert_eq!(
            collector.sync(&"doc-1", || Outline::from_collection(&first)),
            OutlineChange::Replaced
        );
        let mut calls = 0;
        let change = collector.sync(&"doc-1", || {
            calls += 1;
            Outline::default()
        });
        assert_eq!(change, OutlineChange::Unchanged);
        assert_eq!(calls, 0);
        assert_eq!(collector.outline().len(), 2);
    }

    #[test]
    fn test_document_switch_leaves_no_residue() {
        let mut collector = OutlineCollector::new();
        let first = collection(&["A", "B"]);
        let second = collection(&["X", "Y"]);

        collector.sync(&"doc-1", || Outline::from_collection(&first));
        collector.sync(&"doc-2", || Outline::from_collection(&second));

        let texts: Vec<_> = collector.outline().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["X", "Y"]);
        assert_eq!(collector.key(), Some(&"doc-2"));
    }

    #[test]
    fn test_switch_to_document_without_sections() {
        let mut collector = OutlineCollector::new();
        collector.sync(&1, || Outline::from_collection(&collection(&["A"])));
        collector.sync(&2, || Outline::from_collection(&collection(&[])));
        assert!(collector.outline().is_empty());
    }

    #[test]
    fn test_clear_forces_rebuild() {
        let mut collector = OutlineCollector::new();
        collector.sync(&1, || Outline::from_collection(&collection(&["A"])));
        collector.clear();
        assert!(collector.key().is_none());
        assert_eq!(
            collector.sync(&1, || Outline::from_collection(&collection(&["A"]))),
            OutlineChange::Replaced
        );
    }
}
