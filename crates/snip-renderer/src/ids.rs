//! Addressable identifiers for rendered headings.
//!
//! Identifiers are derived from positions only, never from heading text, so
//! two sections with the same heading can never collide.

use std::fmt;

const SECTION_PREFIX: &str = "section-";
const DOCUMENT_PREFIX: &str = "document-";

/// Identifier of a section heading: `section-{document}-{section}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId {
    /// Document index within the collection.
    pub document: usize,
    /// Section index within the document.
    pub section: usize,
}

impl SectionId {
    /// Create an identifier from positional indices.
    #[must_use]
    pub fn new(document: usize, section: usize) -> Self {
        Self { document, section }
    }

    /// Parse an identifier in `section-{i}-{j}` form.
    ///
    /// Returns `None` for anything else, including signed or empty indices.
    ///
    /// ```
    /// use snip_renderer::SectionId;
    ///
    /// assert_eq!(SectionId::parse("section-2-10"), Some(SectionId::new(2, 10)));
    /// assert_eq!(SectionId::parse("section-2"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value.strip_prefix(SECTION_PREFIX)?;
        let (document, section) = rest.split_once('-')?;
        Some(Self {
            document: parse_index(document)?,
            section: parse_index(section)?,
        })
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SECTION_PREFIX}{}-{}", self.document, self.section)
    }
}

/// Identifier of a document region: `document-{index}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(pub usize);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DOCUMENT_PREFIX}{}", self.0)
    }
}

/// Only plain ASCII digits; `usize::from_str` would also take a leading `+`.
fn parse_index(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// One outline entry: an addressable heading and its label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingEntry {
    /// Anchor id, doubling as the URL fragment.
    pub id: String,
    /// Heading text without badges.
    pub text: String,
}

impl HeadingEntry {
    /// Create an entry for a section heading.
    #[must_use]
    pub fn new(id: SectionId, text: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            text: text.into(),
        }
    }

    /// Fragment link target (`#section-0-1`).
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_display() {
        assert_eq!(SectionId::new(0, 3).to_string(), "section-0-3");
        assert_eq!(SectionId::new(12, 0).to_string(), "section-12-0");
    }

    #[test]
    fn test_section_id_parse_roundtrip() {
        let id = SectionId::new(4, 17);
        assert_eq!(SectionId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn test_section_id_parse_rejects_other_forms() {
        for value in [
            "",
            "section-",
            "section-1",
            "section-1-",
            "section--1",
            "section-+1-2",
            "section-1-2-3",
            "section-a-b",
            "document-1",
            "Section-1-2",
        ] {
            assert_eq!(SectionId::parse(value), None, "{value}");
        }
    }

    #[test]
    fn test_document_id_display() {
        assert_eq!(DocumentId(2).to_string(), "document-2");
    }

    #[test]
    fn test_heading_entry_href() {
        let entry = HeadingEntry::new(SectionId::new(1, 0), "Install");
        assert_eq!(entry.href(), "#section-1-0");
    }
}
