//! Heading collection from rendered markup.
//!
//! Scans markup for heading elements carrying a `section-{i}-{j}` id and
//! returns them in document order. The scan is a full pass every time; result
//! sets are small enough that incremental patching is never worth it.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::ids::{HeadingEntry, SectionId};
use crate::util::decode_entity;

/// Class marking the "Important" badge, excluded from heading text.
const BADGE_CLASS: &str = "badge-important";

/// Error while scanning markup.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The markup is not well-formed.
    #[error("Malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),
    /// Text could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
    /// Markup ended inside an addressable heading.
    #[error("Heading {0} is never closed")]
    UnclosedHeading(String),
}

/// Heading currently being captured.
struct Capture {
    id: String,
    text: String,
    /// Nesting depth below the heading element.
    depth: usize,
    /// Depth of the badge element being skipped, if any.
    skip_at: Option<usize>,
}

impl Capture {
    fn push(&mut self, text: &str) {
        if self.skip_at.is_none() {
            self.text.push_str(text);
        }
    }
}

/// Collect addressable headings from rendered markup.
///
/// Returns one entry per `h1`–`h6` element whose `id` is a section id, in
/// document order. Headings with other ids (or none) are skipped.
///
/// # Errors
///
/// Returns an error if the markup is not well-formed.
///
/// # Example
///
/// ```
/// use snip_renderer::collect_headings;
///
/// let html = r#"<h3 id="section-0-0"><span class="badge-important">Important</span>Setup</h3>"#;
/// let headings = collect_headings(html).unwrap();
/// assert_eq!(headings[0].id, "section-0-0");
/// assert_eq!(headings[0].text, "Setup");
/// ```
pub fn collect_headings(markup: &str) -> Result<Vec<HeadingEntry>, CollectError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut headings = Vec::new();
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match capture.as_mut() {
                Some(cap) => {
                    cap.depth += 1;
                    if cap.skip_at.is_none() && has_class(&e, BADGE_CLASS) {
                        cap.skip_at = Some(cap.depth);
                    }
                }
                None => {
                    if is_heading(&e)
                        && let Some(id) = section_id(&e)
                    {
                        capture = Some(Capture {
                            id,
                            text: String::new(),
                            depth: 0,
                            skip_at: None,
                        });
                    }
                }
            },
            Event::End(_) => {
                let closed = match capture.as_mut() {
                    Some(cap) if cap.depth == 0 => true,
                    Some(cap) => {
                        if cap.skip_at == Some(cap.depth) {
                            cap.skip_at = None;
                        }
                        cap.depth -= 1;
                        false
                    }
                    None => false,
                };
                if closed && let Some(Capture { id, text, .. }) = capture.take() {
                    headings.push(HeadingEntry {
                        id,
                        text: text.trim().to_owned(),
                    });
                }
            }
            Event::Text(e) => {
                if let Some(cap) = capture.as_mut() {
                    let text = reader.decoder().decode(&e)?;
                    cap.push(&text);
                }
            }
            Event::GeneralRef(e) => {
                if let Some(cap) = capture.as_mut() {
                    let entity = reader.decoder().decode(&e)?;
                    cap.push(&decode_entity(&entity));
                }
            }
            Event::CData(e) => {
                if let Some(cap) = capture.as_mut() {
                    cap.push(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match capture {
        Some(cap) => Err(CollectError::UnclosedHeading(cap.id)),
        None => Ok(headings),
    }
}

fn is_heading(e: &BytesStart<'_>) -> bool {
    matches!(
        e.name().as_ref(),
        b"h1" | b"h2" | b"h3" | b"h4" | b"h5" | b"h6"
    )
}

/// The element's `id` if it follows the section naming convention.
fn section_id(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"id")
        .and_then(|attr| attr.unescape_value().ok().map(std::borrow::Cow::into_owned))
        .filter(|id| SectionId::parse(id).is_some())
}

fn has_class(e: &BytesStart<'_>, class: &str) -> bool {
    e.attributes()
        .flatten()
        .filter(|attr| attr.key.as_ref() == b"class")
        .filter_map(|attr| attr.unescape_value().ok())
        .any(|value| value.split_ascii_whitespace().any(|c| c == class))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use snip_content::{Document, DocumentCollection, Section};

    use super::*;
    use crate::DocsRenderer;

    fn entry(id: &str, text: &str) -> HeadingEntry {
        HeadingEntry {
            id: id.to_owned(),
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_collects_in_document_order() {
        let html = r#"<div><h3 id="section-0-0">One</h3><p>x</p><h3 id="section-0-1">Two</h3><h3 id="section-1-0">Three</h3></div>"#;
        assert_eq!(
            collect_headings(html).unwrap(),
            vec![
                entry("section-0-0", "One"),
                entry("section-0-1", "Two"),
                entry("section-1-0", "Three"),
            ]
        );
    }

    #[test]
    fn test_ignores_other_ids_and_elements() {
        let html = r#"<div><h2 id="document-0">Doc</h2><h3>No id</h3><h3 id="intro">Intro</h3><p id="section-0-0">Not a heading</p><h3 id="section-0-0">Kept</h3></div>"#;
        assert_eq!(collect_headings(html).unwrap(), vec![entry("section-0-0", "Kept")]);
    }

    #[test]
    fn test_excludes_badge_text() {
        let html = r#"<h3 id="section-2-1" class="section-heading"><span class="badge-important">Important</span><span class="section-heading-text">Init project</span></h3>"#;
        assert_eq!(
            collect_headings(html).unwrap(),
            vec![entry("section-2-1", "Init project")]
        );
    }

    #[test]
    fn test_decodes_entities() {
        let html = r#"<h3 id="section-0-0">Commands &amp; Aggregations &lt;v2&gt; it&#x27;s</h3>"#;
        assert_eq!(
            collect_headings(html).unwrap()[0].text,
            "Commands & Aggregations <v2> it's"
        );
    }

    #[test]
    fn test_nested_inline_markup_kept() {
        let html = r#"<h3 id="section-0-0">Install <code>npm</code> packages</h3>"#;
        assert_eq!(
            collect_headings(html).unwrap()[0].text,
            "Install npm packages"
        );
    }

    #[test]
    fn test_empty_markup() {
        assert!(collect_headings("").unwrap().is_empty());
        assert!(collect_headings("<div></div>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_markup_is_an_error() {
        let result = collect_headings(r#"<div><h3 id="section-0-0">Open</div>"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unclosed_heading_is_an_error() {
        let result = collect_headings(r#"<h3 id="section-0-0">Open"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_matches_renderer_output() {
        let collection = DocumentCollection::new(vec![
            Document::new("Auth & tokens")
                .with_section(Section::new("Install \"jsonwebtoken\"").with_command("npm i jsonwebtoken"))
                .with_section(Section::new("Sign <token>").important().with_code("jwt.sign(p, s)")),
            Document::new("Empty"),
            Document::new("Uploads").with_section(Section::new("Install")),
        ]);
        let result = DocsRenderer::new().render(&collection);
        assert_eq!(collect_headings(&result.html).unwrap(), result.headings);
    }

    #[test]
    fn test_builtin_library_pages_scan_cleanly() {
        let library = snip_content::Library::builtin().unwrap();
        let renderer = DocsRenderer::new();
        for topic in library.topics() {
            let result = renderer.render(&topic.documents);
            let collected = collect_headings(&result.html).unwrap();
            assert_eq!(collected, result.headings, "{}", topic.slug);
            assert_eq!(collected.len(), topic.documents.section_count());
        }
    }
}
