//! Search overlay.
//!
//! The overlay is a modal listing every document title. It opens on the
//! keyboard shortcut or the top-bar button and closes on Escape or a click on
//! the backdrop. The list is static; typing does not filter it.

use snip_content::Library;
use snip_renderer::DocumentId;

use crate::keys::KeyChord;
use crate::nav::NavTarget;

/// How a key press was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyResponse {
    Ignored,
    Handled {
        /// Suppress the browser's own binding (Ctrl+K focuses the URL bar).
        prevent_default: bool,
    },
}

/// One overlay entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchItem {
    /// Document title.
    pub label: String,
    /// Label of the topic holding the document.
    pub topic_label: String,
    pub target: NavTarget,
}

#[derive(Clone, Debug, Default)]
pub struct SearchOverlay {
    open: bool,
    items: Vec<SearchItem>,
}

impl SearchOverlay {
    /// Overlay with an explicit item list.
    pub fn new(items: Vec<SearchItem>) -> Self {
        Self { open: false, items }
    }

    /// One item per document, topics in sidebar order.
    pub fn from_library(library: &Library) -> Self {
        let items = library
            .navigation()
            .groups
            .iter()
            .flat_map(|group| &group.topics)
            .filter_map(|slug| library.topic(slug))
            .flat_map(|topic| {
                topic.documents.iter().enumerate().map(move |(i, doc)| SearchItem {
                    label: doc.title.clone(),
                    topic_label: topic.label.clone(),
                    target: NavTarget::topic(&topic.slug).with_anchor(DocumentId(i).to_string()),
                })
            })
            .collect();
        Self::new(items)
    }

    pub fn open(&mut self) {
        if !self.open {
            tracing::debug!("Search overlay opened");
        }
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    /// Apply a global key press.
    ///
    /// The shortcut opens the overlay (and stays handled while it is already
    /// open so the browser binding never fires). Escape closes an open overlay.
    pub fn handle_key(&mut self, chord: &KeyChord) -> KeyResponse {
        if chord.is_search_shortcut() {
            self.open();
            KeyResponse::Handled {
                prevent_default: true,
            }
        } else if chord.is_escape() && self.open {
            self.close();
            KeyResponse::Handled {
                prevent_default: false,
            }
        } else {
            KeyResponse::Ignored
        }
    }

    /// A click landed on the backdrop outside the panel.
    pub fn backdrop_click(&mut self) {
        self.close();
    }
}
