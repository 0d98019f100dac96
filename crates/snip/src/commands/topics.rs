//! `snip topics` command implementation.

use clap::Args;
use snip_content::{Library, Topic};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the topics command.
#[derive(Args)]
pub(crate) struct TopicsArgs {}

impl TopicsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let library = Library::builtin()?;

        for group in &library.navigation().groups {
            output.heading(&group.title);
            for topic in group.topics.iter().filter_map(|slug| library.topic(slug)) {
                output.data(&format!(
                    "  {:<20} {} {}",
                    topic.slug,
                    topic.label,
                    output.dim(&format!("({})", summary(topic)))
                ));
            }
        }
        Ok(())
    }
}

/// Document and section counts, e.g. `2 documents, 9 sections`.
fn summary(topic: &Topic) -> String {
    let documents = topic.documents.len();
    let sections = topic.documents.section_count();
    format!(
        "{documents} document{}, {sections} section{}",
        if documents == 1 { "" } else { "s" },
        if sections == 1 { "" } else { "s" },
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use snip_content::{Document, DocumentCollection, Section};

    use super::*;

    #[test]
    fn test_summary_pluralizes() {
        let topic = Topic {
            slug: "t".to_owned(),
            label: "T".to_owned(),
            documents: DocumentCollection::new(vec![
                Document::new("One").with_section(Section::new("Only")),
            ]),
        };
        assert_eq!(summary(&topic), "1 document, 1 section");
    }
}
