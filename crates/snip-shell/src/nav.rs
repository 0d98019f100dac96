//! Sidebar navigation tree.
//!
//! Built once from the library's [`NavigationConfig`](snip_content::NavigationConfig):
//! one item per topic, one child per document. Only collapsible groups may be
//! folded.

use snip_content::{Library, Topic};
use snip_renderer::DocumentId;

/// Route prefix for topic pages.
const ROUTE_PREFIX: &str = "#/";

/// Where a navigation link points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavTarget {
    /// Topic slug.
    pub topic: String,
    /// Element id within the topic page, e.g. `document-1`.
    pub anchor: Option<String>,
}

impl NavTarget {
    pub fn topic(slug: impl Into<String>) -> Self {
        Self {
            topic: slug.into(),
            anchor: None,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Hash route for the single-page runtime: `#/react` or `#/react/document-1`.
    pub fn route(&self) -> String {
        match &self.anchor {
            Some(anchor) => format!("{ROUTE_PREFIX}{}/{anchor}", self.topic),
            None => format!("{ROUTE_PREFIX}{}", self.topic),
        }
    }

    /// Parse a location hash produced by [`route`](Self::route).
    ///
    /// Returns `None` for empty or foreign hashes.
    pub fn parse_route(hash: &str) -> Option<Self> {
        let rest = hash.strip_prefix(ROUTE_PREFIX)?;
        let (topic, anchor) = match rest.split_once('/') {
            Some((topic, anchor)) if !anchor.is_empty() => (topic, Some(anchor.to_owned())),
            Some((topic, _)) => (topic, None),
            None => (rest, None),
        };
        if topic.is_empty() {
            return None;
        }
        Some(Self {
            topic: topic.to_owned(),
            anchor,
        })
    }
}

/// Navigation item with children for the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    /// Display label.
    pub label: String,
    pub target: NavTarget,
    pub children: Vec<NavItem>,
}

impl NavItem {
    fn from_topic(topic: &Topic) -> Self {
        let children = topic
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| Self {
                label: doc.title.clone(),
                target: NavTarget::topic(&topic.slug).with_anchor(DocumentId(i).to_string()),
                children: Vec::new(),
            })
            .collect();
        Self {
            label: topic.label.clone(),
            target: NavTarget::topic(&topic.slug),
            children,
        }
    }
}

/// Titled group of sidebar items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGroup {
    pub title: String,
    pub collapsible: bool,
    pub expanded: bool,
    pub items: Vec<NavItem>,
}

/// Sidebar tree with per-group expansion state.
#[derive(Clone, Debug, Default)]
pub struct Sidebar {
    groups: Vec<NavGroup>,
}

impl Sidebar {
    /// Build the sidebar from the library's grouping. All groups start expanded.
    pub fn from_library(library: &Library) -> Self {
        let groups = library
            .navigation()
            .groups
            .iter()
            .map(|group| NavGroup {
                title: group.title.clone(),
                collapsible: group.collapsible,
                expanded: true,
                items: group
                    .topics
                    .iter()
                    .filter_map(|slug| library.topic(slug))
                    .map(NavItem::from_topic)
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[NavGroup] {
        &self.groups
    }

    /// Flip a collapsible group. Returns `false` if nothing changed.
    pub fn toggle_group(&mut self, index: usize) -> bool {
        match self.groups.get_mut(index) {
            Some(group) if group.collapsible => {
                group.expanded = !group.expanded;
                true
            }
            _ => false,
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.groups.get(index).is_some_and(|group| group.expanded)
    }

    /// Index of the group listing `topic`.
    pub fn group_of(&self, topic: &str) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| group.items.iter().any(|item| item.target.topic == topic))
    }

    /// Expand the group holding `topic` so the active link is visible.
    pub fn reveal(&mut self, topic: &str) {
        if let Some(index) = self.group_of(topic) {
            self.groups[index].expanded = true;
        }
    }
}
