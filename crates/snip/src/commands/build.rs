//! `snip build` command implementation.

use std::path::PathBuf;

use clap::Args;
use snip_config::{CliSettings, Config};
use snip_content::Library;
use snip_site::{BuildConfig, StaticSiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover snip.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Site title shown in the top bar (overrides config).
    #[arg(long, env = "SNIP_TITLE")]
    title: Option<String>,

    /// Do not emit the browser runtime script tag.
    #[arg(long)]
    no_script: bool,

    /// Directory with the prebuilt browser runtime (`wasm-bindgen --target web` output).
    #[arg(long, env = "SNIP_RUNTIME_DIR")]
    runtime_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            title: self.title,
            script: self.no_script.then_some(false),
            runtime_dir: self.runtime_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Output: {}", config.build.output_dir.display()));

        let library = Library::builtin()?;
        tracing::debug!(
            topics = library.topics().len(),
            focus_top = config.outline.focus_top,
            focus_bottom = config.outline.focus_bottom,
            "Loaded library"
        );
        let build_config = BuildConfig {
            site_title: config.site.title.clone(),
            script: config.build.script,
            runtime_dir: config.build.runtime_dir.clone(),
            band: config.outline.band()?,
            sticky: config.outline.sticky_active,
            feedback_ms: config.copy.feedback_ms,
        };

        let report = StaticSiteBuilder::new(&library, build_config).build(&config.build.output_dir)?;

        output.success(&format!(
            "Built {} pages ({} headings, {} code blocks)",
            report.pages, report.headings, report.code_blocks
        ));
        if config.build.script && !report.runtime {
            output.warning("Browser runtime not installed; set build.runtime_dir or pass --runtime-dir");
        }
        Ok(())
    }
}
