//! Content loading errors.

/// Error raised while loading or validating the guide library.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A YAML source failed to parse.
    #[error("Failed to parse {source_name}: {source}")]
    Parse {
        /// Name of the embedded source (e.g. `react.yaml`).
        source_name: String,
        /// Underlying parser error.
        #[source]
        source: serde_yaml::Error,
    },
    /// Two topics share a slug.
    #[error("Duplicate topic slug: {0}")]
    DuplicateTopic(String),
    /// A navigation group references a topic that does not exist.
    #[error("Navigation group '{group}' references unknown topic '{slug}'")]
    UnknownTopic {
        /// Navigation group title.
        group: String,
        /// Referenced slug.
        slug: String,
    },
    /// A topic is not listed by exactly one navigation group.
    #[error("Topic '{slug}' must appear in exactly one navigation group (found {count})")]
    UngroupedTopic {
        /// Topic slug.
        slug: String,
        /// Number of groups listing it.
        count: usize,
    },
    /// A required display string is empty.
    #[error("Empty {field} in {location}")]
    EmptyField {
        /// Where the field lives (`react.yaml: document 0, section 2`).
        location: String,
        /// Field name.
        field: &'static str,
    },
}
