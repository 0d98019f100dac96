//! The compiled-in guide library.

use crate::error::ContentError;
use crate::model::Topic;
use crate::navigation::NavigationConfig;

/// Embedded topic sources in registration order.
const TOPIC_SOURCES: &[(&str, &str)] = &[
    ("react.yaml", include_str!("../content/react.yaml")),
    (
        "tailwind-vite.yaml",
        include_str!("../content/tailwind-vite.yaml"),
    ),
    ("node-setup.yaml", include_str!("../content/node-setup.yaml")),
    (
        "auth-middleware.yaml",
        include_str!("../content/auth-middleware.yaml"),
    ),
    ("file-upload.yaml", include_str!("../content/file-upload.yaml")),
    ("mongodb.yaml", include_str!("../content/mongodb.yaml")),
    (
        "postgres-prisma.yaml",
        include_str!("../content/postgres-prisma.yaml"),
    ),
    (
        "mongodb-commands.yaml",
        include_str!("../content/mongodb-commands.yaml"),
    ),
];

/// Embedded sidebar configuration.
const NAVIGATION_SOURCE: &str = include_str!("../content/navigation.yaml");

/// Immutable set of guides plus their sidebar grouping.
///
/// Loaded once at startup and shared by reference afterwards.
#[derive(Clone, Debug)]
pub struct Library {
    topics: Vec<Topic>,
    navigation: NavigationConfig,
}

impl Library {
    /// Load the guides compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded source is malformed or the library
    /// fails validation.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_sources(TOPIC_SOURCES, NAVIGATION_SOURCE)
    }

    /// Parse a library from named YAML topic sources and a navigation source.
    ///
    /// Topic order is the order of `topics`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Parse`] for malformed YAML and a validation
    /// error if slugs collide, navigation references are dangling, or a
    /// required display string is empty.
    pub fn from_sources(topics: &[(&str, &str)], navigation: &str) -> Result<Self, ContentError> {
        let topics = topics
            .iter()
            .map(|(name, source)| {
                serde_yaml::from_str::<Topic>(source).map_err(|source| ContentError::Parse {
                    source_name: (*name).to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let navigation: NavigationConfig =
            serde_yaml::from_str(navigation).map_err(|source| ContentError::Parse {
                source_name: "navigation.yaml".to_owned(),
                source,
            })?;

        let library = Self { topics, navigation };
        library.validate()?;

        tracing::debug!(
            topics = library.topics.len(),
            groups = library.navigation.groups.len(),
            "Loaded content library"
        );
        Ok(library)
    }

    /// All topics in registration order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Look up a topic by slug.
    pub fn topic(&self, slug: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.slug == slug)
    }

    /// The topic shown first in the sidebar.
    pub fn first_topic(&self) -> Option<&Topic> {
        self.navigation
            .groups
            .iter()
            .flat_map(|group| &group.topics)
            .find_map(|slug| self.topic(slug))
    }

    /// Sidebar grouping.
    pub fn navigation(&self) -> &NavigationConfig {
        &self.navigation
    }

    fn validate(&self) -> Result<(), ContentError> {
        for (index, topic) in self.topics.iter().enumerate() {
            if topic.slug.is_empty() {
                return Err(ContentError::EmptyField {
                    location: format!("topic {index}"),
                    field: "slug",
                });
            }
            if self.topics[..index].iter().any(|t| t.slug == topic.slug) {
                return Err(ContentError::DuplicateTopic(topic.slug.clone()));
            }
            validate_topic(topic)?;
        }

        for group in &self.navigation.groups {
            if let Some(slug) = group.topics.iter().find(|slug| self.topic(slug).is_none()) {
                return Err(ContentError::UnknownTopic {
                    group: group.title.clone(),
                    slug: slug.clone(),
                });
            }
        }

        for topic in &self.topics {
            let count = self.navigation.occurrences(&topic.slug);
            if count != 1 {
                return Err(ContentError::UngroupedTopic {
                    slug: topic.slug.clone(),
                    count,
                });
            }
        }

        Ok(())
    }
}

fn validate_topic(topic: &Topic) -> Result<(), ContentError> {
    if topic.label.trim().is_empty() {
        return Err(ContentError::EmptyField {
            location: topic.slug.clone(),
            field: "label",
        });
    }
    for (i, doc) in topic.documents.iter().enumerate() {
        if doc.title.trim().is_empty() {
            return Err(ContentError::EmptyField {
                location: format!("{}: document {i}", topic.slug),
                field: "title",
            });
        }
        for (j, section) in doc.sections.iter().enumerate() {
            if section.heading.trim().is_empty() {
                return Err(ContentError::EmptyField {
                    location: format!("{}: document {i}, section {j}", topic.slug),
                    field: "heading",
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ALPHA: &str = r"
slug: alpha
label: Alpha
documents:
- title: Alpha guide
  sections:
  - heading: Install
    codes:
    - npm install alpha
";

    const BETA: &str = r"
slug: beta
label: Beta
documents: []
";

    const NAV: &str = r"
groups:
- title: Tools
  topics: [beta, alpha]
";

    #[test]
    fn test_builtin_library_loads() {
        let library = Library::builtin().unwrap();
        assert_eq!(library.topics().len(), 8);
        assert!(library.topic("react").is_some());
        assert!(library.topic("mongodb-commands").is_some());
        assert_eq!(library.first_topic().unwrap().slug, "react");
    }

    #[test]
    fn test_builtin_library_keeps_important_flag() {
        let library = Library::builtin().unwrap();
        let node = library.topic("node-setup").unwrap();
        let section = &node.documents.documents()[0].sections[1];
        assert_eq!(section.heading, "Initialize Node.js project");
        assert!(section.important);
        assert_eq!(section.codes, vec!["npm init -y".to_owned()]);
    }

    #[test]
    fn test_builtin_react_document_order() {
        let library = Library::builtin().unwrap();
        let titles: Vec<_> = library
            .topic("react")
            .unwrap()
            .documents
            .iter()
            .map(|doc| doc.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["React.js Setup (CRA + Vite + TypeScript)", "Redux Toolkit Setup"]
        );
    }

    #[test]
    fn test_from_sources_preserves_order() {
        let library =
            Library::from_sources(&[("alpha.yaml", ALPHA), ("beta.yaml", BETA)], NAV).unwrap();
        let slugs: Vec<_> = library.topics().iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "beta"]);
        // Sidebar order wins for the landing topic.
        assert_eq!(library.first_topic().unwrap().slug, "beta");
    }

    #[test]
    fn test_parse_error_names_source() {
        let err = Library::from_sources(&[("broken.yaml", "slug: [")], NAV).unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let err =
            Library::from_sources(&[("a.yaml", ALPHA), ("b.yaml", ALPHA)], NAV).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateTopic(slug) if slug == "alpha"));
    }

    #[test]
    fn test_unknown_navigation_topic_rejected() {
        let nav = "groups:\n- title: Tools\n  topics: [alpha, gamma]\n";
        let err = Library::from_sources(&[("alpha.yaml", ALPHA)], nav).unwrap_err();
        assert!(matches!(err, ContentError::UnknownTopic { slug, .. } if slug == "gamma"));
    }

    #[test]
    fn test_ungrouped_topic_rejected() {
        let nav = "groups:\n- title: Tools\n  topics: [alpha]\n";
        let err = Library::from_sources(&[("alpha.yaml", ALPHA), ("beta.yaml", BETA)], nav)
            .unwrap_err();
        assert!(
            matches!(err, ContentError::UngroupedTopic { slug, count: 0 } if slug == "beta")
        );
    }

    #[test]
    fn test_empty_heading_rejected() {
        let source = "slug: alpha\nlabel: Alpha\ndocuments:\n- title: T\n  sections:\n  - heading: ' '\n";
        let nav = "groups:\n- title: Tools\n  topics: [alpha]\n";
        let err = Library::from_sources(&[("alpha.yaml", source)], nav).unwrap_err();
        assert!(matches!(err, ContentError::EmptyField { field: "heading", .. }));
    }
}
