//! Sidebar grouping configuration.

use serde::{Deserialize, Serialize};

/// Static sidebar configuration: groups of topics in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationConfig {
    /// Groups in display order.
    pub groups: Vec<NavGroupConfig>,
}

/// One sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavGroupConfig {
    /// Group heading.
    pub title: String,
    /// Whether the reader may collapse the group.
    #[serde(default)]
    pub collapsible: bool,
    /// Topic slugs in display order.
    pub topics: Vec<String>,
}

impl NavigationConfig {
    /// Number of groups listing `slug`.
    pub(crate) fn occurrences(&self, slug: &str) -> usize {
        self.groups
            .iter()
            .flat_map(|group| &group.topics)
            .filter(|topic| *topic == slug)
            .count()
    }
}
