//! Documentation content schema.
//!
//! A [`Topic`] is one guide (for example "Node + Express"). It owns a
//! [`DocumentCollection`], an ordered list of [`Document`]s, each made of
//! ordered [`Section`]s. Order is display order everywhere; nothing is sorted
//! or deduplicated.

use serde::{Deserialize, Serialize};

/// One step of a guide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    /// Heading text. Shown verbatim; never used to build identifiers.
    pub heading: String,
    /// Optional prose rendered below the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional multi-line sample rendered as a single copyable block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short snippets (usually shell commands), one copyable block each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,
    /// Highlight the section and badge its heading.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub important: bool,
}

impl Section {
    /// Create a section with only a heading.
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            description: None,
            code: None,
            codes: Vec::new(),
            important: false,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the single code sample.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Append a command snippet.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.codes.push(command.into());
        self
    }

    /// Mark the section as important.
    #[must_use]
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// Number of copyable code units this section renders.
    pub fn code_block_count(&self) -> usize {
        usize::from(self.code.is_some()) + self.codes.len()
    }
}

/// One titled entry of a guide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Informational slug carried over from the source data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Display title.
    pub title: String,
    /// Optional prose shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered sections; may be empty.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a document with a title and no sections.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            slug: None,
            title: title.into(),
            description: None,
            sections: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a section.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

/// Ordered list of documents rendered together on one page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentCollection(Vec<Document>);

impl DocumentCollection {
    /// Wrap documents in display order.
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self(documents)
    }

    /// Documents in display order.
    pub fn documents(&self) -> &[Document] {
        &self.0
    }

    /// Iterate documents in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.0.iter()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection has no documents.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of sections across all documents.
    pub fn section_count(&self) -> usize {
        self.0.iter().map(|doc| doc.sections.len()).sum()
    }
}

impl From<Vec<Document>> for DocumentCollection {
    fn from(documents: Vec<Document>) -> Self {
        Self(documents)
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A guide: one collection of documents under a stable slug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Topic {
    /// URL-safe identifier (`node-setup`).
    pub slug: String,
    /// Label shown in navigation.
    pub label: String,
    /// Documents rendered on the topic page.
    pub documents: DocumentCollection,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_section_optional_fields_default() {
        let section: Section = serde_yaml::from_str("heading: Install").unwrap();
        assert_eq!(section, Section::new("Install"));
        assert_eq!(section.code_block_count(), 0);
    }

    #[test]
    fn test_section_rejects_unknown_fields() {
        let result = serde_yaml::from_str::<Section>("heading: Install\nblock: true");
        assert!(result.is_err());
    }

    #[test]
    fn test_section_code_block_count() {
        let section = Section::new("Setup")
            .with_code("const a = 1;")
            .with_command("npm i")
            .with_command("npm run dev");
        assert_eq!(section.code_block_count(), 3);
    }

    #[test]
    fn test_code_kept_verbatim() {
        let yaml = "heading: Config\ncode: |-\n  {\n    \"strict\": true\n  }\n";
        let section: Section = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(section.code.as_deref(), Some("{\n  \"strict\": true\n}"));
    }

    #[test]
    fn test_collection_section_count() {
        let collection = DocumentCollection::new(vec![
            Document::new("A")
                .with_section(Section::new("one"))
                .with_section(Section::new("two")),
            Document::new("B"),
            Document::new("C").with_section(Section::new("three")),
        ]);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.section_count(), 3);
    }

    #[test]
    fn test_document_without_sections_parses() {
        let doc: Document = serde_yaml::from_str("title: Empty").unwrap();
        assert!(doc.sections.is_empty());
        assert!(doc.description.is_none());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let yaml = serde_yaml::to_string(&Section::new("Only heading")).unwrap();
        assert_eq!(yaml, "heading: Only heading\n");
    }
}
