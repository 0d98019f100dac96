//! `snip outline` command implementation.

use clap::Args;
use snip_content::Library;
use snip_outline::Outline;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Topic slug (see `snip topics`).
    topic: String,

    /// Print the outline as JSON.
    #[arg(long)]
    json: bool,
}

impl OutlineArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let library = Library::builtin()?;
        let outline = outline_for(&library, &self.topic)?;

        if self.json {
            output.data(&serde_json::to_string_pretty(outline.entries())?);
            return Ok(());
        }
        if outline.is_empty() {
            output.info("Topic has no sections");
            return Ok(());
        }
        for entry in outline.iter() {
            output.data(&format!("{:<16} {}", entry.id, entry.text));
        }
        Ok(())
    }
}

fn outline_for(library: &Library, slug: &str) -> Result<Outline, CliError> {
    let topic = library
        .topic(slug)
        .ok_or_else(|| CliError::UnknownTopic(slug.to_owned()))?;
    Ok(Outline::from_collection(&topic.documents))
}
