//! Static site builder.
//!
//! Renders every topic of a [`Library`] into `<slug>/index.html`, the first
//! sidebar topic into `index.html`, and writes the shared stylesheet. The
//! browser runtime is copied in from a prebuilt `wasm-bindgen --target web`
//! directory; without one, pages are built without the script tag.

use std::fs;
use std::path::{Path, PathBuf};

use snip_content::{Library, Topic};
use snip_outline::{FocusBand, Outline};
use snip_renderer::{CollectError, DocsRenderer, collect_headings};
use snip_shell::{NavTarget, SearchOverlay, Sidebar};

use crate::template::{
    NavGroupData, NavItemData, PageData, RuntimeData, SearchItemData, render_page,
};

/// Stylesheet shipped with every build.
const STYLESHEET: &str = include_str!("../assets/snip.css");

/// Output path of the stylesheet, relative to the site root.
const CSS_PATH: &str = "assets/snip.css";

/// Output path of the runtime module, relative to the site root.
const SCRIPT_PATH: &str = "assets/snip_web.js";

/// Files of the `wasm-bindgen --target web` output the runtime needs.
const RUNTIME_FILES: [&str; 2] = ["snip_web.js", "snip_web_bg.wasm"];

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Title shown in the top bar.
    pub site_title: String,
    /// Emit the runtime `<script>` tag when a runtime bundle is available.
    pub script: bool,
    /// Directory holding the prebuilt runtime bundle.
    pub runtime_dir: Option<PathBuf>,
    pub band: FocusBand,
    pub sticky: bool,
    pub feedback_ms: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_title: "NEW.JS".to_owned(),
            script: true,
            runtime_dir: None,
            band: FocusBand::default(),
            sticky: false,
            feedback_ms: 1200,
        }
    }
}

/// Summary of a completed build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// HTML files written, including `index.html`.
    pub pages: usize,
    /// Addressable headings across all topic pages.
    pub headings: usize,
    /// Copyable code units across all topic pages.
    pub code_blocks: usize,
    /// Whether the browser runtime was installed and referenced.
    pub runtime: bool,
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Library has no topics to build")]
    EmptyLibrary,
    #[error("Runtime bundle file not found: {}", path.display())]
    MissingRuntime { path: PathBuf },
    #[error("Failed to scan rendered page {topic}: {source}")]
    Collect {
        topic: String,
        #[source]
        source: CollectError,
    },
    #[error("Outline of {topic} does not match its rendered headings ({expected} expected, {found} found)")]
    OutlineMismatch {
        topic: String,
        expected: usize,
        found: usize,
    },
}

/// One rendered topic page.
struct RenderedPage {
    html: String,
    headings: usize,
    code_blocks: usize,
}

/// Builds a static documentation site from a [`Library`].
pub struct StaticSiteBuilder<'a> {
    library: &'a Library,
    config: BuildConfig,
    renderer: DocsRenderer,
    sidebar: Sidebar,
    search: SearchOverlay,
}

impl<'a> StaticSiteBuilder<'a> {
    pub fn new(library: &'a Library, config: BuildConfig) -> Self {
        Self {
            library,
            config,
            renderer: DocsRenderer::new(),
            sidebar: Sidebar::from_library(library),
            search: SearchOverlay::from_library(library),
        }
    }

    /// Write the site into `output_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written or a rendered page's
    /// headings disagree with its outline.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let first = self.library.first_topic().ok_or(BuildError::EmptyLibrary)?;

        fs::create_dir_all(output_dir.join("assets"))?;
        fs::write(output_dir.join(CSS_PATH), STYLESHEET)?;
        let runtime = self.install_runtime(output_dir)?;

        let mut report = BuildReport {
            output_dir: output_dir.to_path_buf(),
            pages: 0,
            headings: 0,
            code_blocks: 0,
            runtime,
        };

        for topic in self.library.topics() {
            let page = self.render_topic(topic, "../", runtime)?;
            let dir = output_dir.join(&topic.slug);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("index.html"), &page.html)?;
            tracing::debug!(
                topic = %topic.slug,
                headings = page.headings,
                code_blocks = page.code_blocks,
                "Wrote page"
            );
            report.pages += 1;
            report.headings += page.headings;
            report.code_blocks += page.code_blocks;
        }

        let index = self.render_topic(first, "", runtime)?;
        fs::write(output_dir.join("index.html"), &index.html)?;
        report.pages += 1;

        tracing::info!(
            pages = report.pages,
            headings = report.headings,
            runtime = report.runtime,
            output = %output_dir.display(),
            "Static site built"
        );
        Ok(report)
    }

    /// Copy the runtime bundle into `assets/`. Returns whether pages may load it.
    fn install_runtime(&self, output_dir: &Path) -> Result<bool, BuildError> {
        if !self.config.script {
            return Ok(false);
        }
        let Some(source) = &self.config.runtime_dir else {
            tracing::warn!("No runtime bundle configured, building pages without the browser runtime");
            return Ok(false);
        };
        for name in RUNTIME_FILES {
            let path = source.join(name);
            if !path.is_file() {
                return Err(BuildError::MissingRuntime { path });
            }
            fs::copy(&path, output_dir.join("assets").join(name))?;
        }
        tracing::debug!(source = %source.display(), "Installed runtime bundle");
        Ok(true)
    }

    /// Render one topic page. `prefix` leads from the page back to the site root.
    fn render_topic(
        &self,
        topic: &Topic,
        prefix: &str,
        runtime: bool,
    ) -> Result<RenderedPage, BuildError> {
        let rendered = self.renderer.render(&topic.documents);
        let outline = Outline::from_collection(&topic.documents);

        let scanned = collect_headings(&rendered.html).map_err(|source| BuildError::Collect {
            topic: topic.slug.clone(),
            source,
        })?;
        if scanned != outline.entries() {
            return Err(BuildError::OutlineMismatch {
                topic: topic.slug.clone(),
                expected: outline.len(),
                found: scanned.len(),
            });
        }

        let data = PageData {
            site_title: self.config.site_title.clone(),
            page_title: topic.label.clone(),
            topic: topic.slug.clone(),
            html_content: rendered.html,
            outline: outline.entries().to_vec(),
            navigation: self.navigation(&topic.slug, prefix),
            search: self.search_items(prefix),
            home_href: format!("{prefix}index.html"),
            css_href: format!("{prefix}{CSS_PATH}"),
            runtime: self.runtime(prefix, runtime),
        };

        Ok(RenderedPage {
            html: render_page(&data),
            headings: outline.len(),
            code_blocks: rendered.code_blocks,
        })
    }

    fn navigation(&self, active: &str, prefix: &str) -> Vec<NavGroupData> {
        self.sidebar
            .groups()
            .iter()
            .map(|group| NavGroupData {
                title: group.title.clone(),
                collapsible: group.collapsible,
                items: group
                    .items
                    .iter()
                    .map(|item| NavItemData {
                        title: item.label.clone(),
                        href: page_href(prefix, &item.target),
                        topic: item.target.topic.clone(),
                        route: item.target.route(),
                        children: item
                            .children
                            .iter()
                            .map(|child| NavItemData {
                                title: child.label.clone(),
                                href: page_href(prefix, &child.target),
                                topic: child.target.topic.clone(),
                                route: child.target.route(),
                                children: Vec::new(),
                                is_active: false,
                            })
                            .collect(),
                        is_active: item.target.topic == active,
                    })
                    .collect(),
            })
            .collect()
    }

    fn search_items(&self, prefix: &str) -> Vec<SearchItemData> {
        self.search
            .items()
            .iter()
            .map(|item| SearchItemData {
                label: item.label.clone(),
                topic_label: item.topic_label.clone(),
                href: page_href(prefix, &item.target),
                route: item.target.route(),
            })
            .collect()
    }

    fn runtime(&self, prefix: &str, script: bool) -> RuntimeData {
        let band = self.config.band;
        RuntimeData {
            focus_top: band.top(),
            focus_bottom: band.bottom(),
            sticky: self.config.sticky,
            feedback_ms: self.config.feedback_ms,
            script_src: script.then(|| format!("{prefix}{SCRIPT_PATH}")),
        }
    }
}

/// Static link to a topic page, with the anchor as fragment.
fn page_href(prefix: &str, target: &NavTarget) -> String {
    match &target.anchor {
        Some(anchor) => format!("{prefix}{}/index.html#{anchor}", target.topic),
        None => format!("{prefix}{}/index.html", target.topic),
    }
}
