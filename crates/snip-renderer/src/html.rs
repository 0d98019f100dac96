//! HTML rendering of document collections.
//!
//! Produces well-formed markup (every element closed, every value escaped)
//! so the same output can be scanned back by [`collect_headings`](crate::collect_headings).

use std::fmt::Write;

use snip_content::{Document, DocumentCollection, Section};

use crate::ids::{DocumentId, HeadingEntry, SectionId};
use crate::util::escape_html;

/// Language class applied to single code samples.
const DEFAULT_LANGUAGE: &str = "tsx";

/// Badge text shown on important sections.
pub const IMPORTANT_BADGE: &str = "Important";

/// Kind of copyable code unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeBlockKind {
    /// A section's single multi-line `code` sample.
    Snippet,
    /// One entry of a section's `codes` list.
    Command,
}

impl CodeBlockKind {
    /// Value of the `data-kind` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snippet => "snippet",
            Self::Command => "command",
        }
    }

    /// Header label shown above the code.
    pub fn label(self) -> &'static str {
        match self {
            Self::Snippet => "Code",
            Self::Command => "Terminal",
        }
    }
}

/// Result of rendering a collection.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered markup.
    pub html: String,
    /// Addressable headings in document order.
    pub headings: Vec<HeadingEntry>,
    /// Number of copyable code units emitted.
    pub code_blocks: usize,
}

/// Renders a [`DocumentCollection`] into addressable markup.
///
/// Documents and sections are emitted in array order. Section headings get
/// `section-{i}-{j}` ids; nothing is reordered or deduplicated.
#[derive(Clone, Debug)]
pub struct DocsRenderer {
    language: String,
}

impl DocsRenderer {
    /// Create a renderer with the default `tsx` language class.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }

    /// Set the language class used for single code samples.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Render the whole collection.
    pub fn render(&self, collection: &DocumentCollection) -> RenderResult {
        let mut out = String::with_capacity(4096);
        let mut headings = Vec::with_capacity(collection.section_count());
        let mut code_blocks = 0;

        out.push_str(r#"<div class="docs">"#);
        for (i, document) in collection.iter().enumerate() {
            code_blocks += self.render_document(i, document, &mut out, &mut headings);
        }
        out.push_str("</div>");

        RenderResult {
            html: out,
            headings,
            code_blocks,
        }
    }

    fn render_document(
        &self,
        index: usize,
        document: &Document,
        out: &mut String,
        headings: &mut Vec<HeadingEntry>,
    ) -> usize {
        write!(
            out,
            r#"<section id="{}" class="doc"><h2 class="doc-title">{}</h2>"#,
            DocumentId(index),
            escape_html(&document.title)
        )
        .unwrap();
        if let Some(description) = &document.description {
            write!(
                out,
                r#"<p class="doc-description">{}</p>"#,
                escape_html(description)
            )
            .unwrap();
        }

        let mut code_blocks = 0;
        out.push_str(r#"<ol class="doc-sections">"#);
        for (j, section) in document.sections.iter().enumerate() {
            let id = SectionId::new(index, j);
            code_blocks += self.render_section(id, section, out);
            headings.push(HeadingEntry::new(id, section.heading.trim()));
        }
        out.push_str("</ol></section>");
        code_blocks
    }

    fn render_section(&self, id: SectionId, section: &Section, out: &mut String) -> usize {
        if section.important {
            write!(
                out,
                r#"<li class="doc-section doc-section-important" data-section="{id}" data-important="true">"#
            )
            .unwrap();
        } else {
            write!(out, r#"<li class="doc-section" data-section="{id}">"#).unwrap();
        }

        write!(out, r#"<h3 id="{id}" class="section-heading">"#).unwrap();
        if section.important {
            write!(out, r#"<span class="badge-important">{IMPORTANT_BADGE}</span>"#).unwrap();
        }
        write!(
            out,
            r#"<span class="section-heading-text">{}</span></h3>"#,
            escape_html(&section.heading)
        )
        .unwrap();

        if let Some(description) = &section.description {
            write!(
                out,
                r#"<p class="section-description">{}</p>"#,
                escape_html(description)
            )
            .unwrap();
        }

        if let Some(code) = &section.code {
            code_block(CodeBlockKind::Snippet, Some(&self.language), code, out);
        }
        for command in &section.codes {
            code_block(CodeBlockKind::Command, None, command, out);
        }

        out.push_str("</li>");
        section.code_block_count()
    }
}

impl Default for DocsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one copyable code unit.
///
/// The `<code>` element holds the text verbatim (escaped only), so its DOM
/// text content is exactly the stored string.
pub fn code_block(kind: CodeBlockKind, language: Option<&str>, content: &str, out: &mut String) {
    write!(
        out,
        r#"<div class="code-block code-block-{kind}" data-kind="{kind}"><div class="code-block-header"><span class="code-block-label">{label}</span><button type="button" class="copy-button" aria-label="Copy code" data-copied="false">Copy</button></div>"#,
        kind = kind.as_str(),
        label = kind.label(),
    )
    .unwrap();
    if let Some(lang) = language {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre></div>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre></div>", escape_html(content)).unwrap();
    }
}
