//! Section renderer and heading collector for snipdocs.
//!
//! [`DocsRenderer`] maps a [`DocumentCollection`](snip_content::DocumentCollection)
//! to markup where every section heading carries a stable `section-{i}-{j}`
//! id. [`collect_headings`] reads those ids back out of rendered markup.
//!
//! # Example
//!
//! ```
//! use snip_content::{Document, DocumentCollection, Section};
//! use snip_renderer::{DocsRenderer, collect_headings};
//!
//! let docs = DocumentCollection::new(vec![
//!     Document::new("Axios").with_section(Section::new("Install").with_command("npm install axios")),
//! ]);
//! let result = DocsRenderer::new().render(&docs);
//! assert_eq!(result.headings[0].id, "section-0-0");
//! assert_eq!(collect_headings(&result.html).unwrap(), result.headings);
//! ```

mod collect;
mod html;
mod ids;
mod util;

pub use collect::{CollectError, collect_headings};
pub use html::{CodeBlockKind, DocsRenderer, IMPORTANT_BADGE, RenderResult, code_block};
pub use ids::{DocumentId, HeadingEntry, SectionId};
pub use util::escape_html;
