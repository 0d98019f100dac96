//! HTML page template for static site generation.
//!
//! Emits well-formed markup (void elements self-closed, boolean attributes
//! spelled out) so a whole page can be scanned back with
//! [`collect_headings`](snip_renderer::collect_headings).

use std::fmt::Write;

use snip_renderer::{HeadingEntry, escape_html as escape};

/// A sidebar link.
pub struct NavItemData {
    pub title: String,
    pub href: String,
    /// Topic slug, used by the runtime to move the active highlight.
    pub topic: String,
    /// Hash route for the single-page runtime.
    pub route: String,
    pub children: Vec<NavItemData>,
    pub is_active: bool,
}

/// A sidebar group.
pub struct NavGroupData {
    pub title: String,
    pub collapsible: bool,
    pub items: Vec<NavItemData>,
}

/// One search overlay entry.
pub struct SearchItemData {
    pub label: String,
    pub topic_label: String,
    pub href: String,
    pub route: String,
}

/// Settings handed to the browser runtime through `<body>` data attributes.
pub struct RuntimeData {
    pub focus_top: f64,
    pub focus_bottom: f64,
    pub sticky: bool,
    pub feedback_ms: u64,
    /// Module script loading the runtime; `None` omits the tag.
    pub script_src: Option<String>,
}

/// All data needed to render a static page.
pub struct PageData {
    pub site_title: String,
    pub page_title: String,
    pub topic: String,
    pub html_content: String,
    pub outline: Vec<HeadingEntry>,
    pub navigation: Vec<NavGroupData>,
    pub search: Vec<SearchItemData>,
    pub home_href: String,
    pub css_href: String,
    pub runtime: RuntimeData,
}

/// Render a complete static HTML page.
pub fn render_page(page: &PageData) -> String {
    let mut html = String::with_capacity(16384);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    let _ = writeln!(
        html,
        "<title>{} | {}</title>",
        escape(&page.page_title),
        escape(&page.site_title)
    );
    let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\" />", escape(&page.css_href));
    html.push_str("</head>\n");

    let runtime = &page.runtime;
    let _ = writeln!(
        html,
        "<body data-focus-top=\"{}\" data-focus-bottom=\"{}\" data-sticky=\"{}\" \
         data-feedback-ms=\"{}\">",
        runtime.focus_top,
        runtime.focus_bottom,
        runtime.sticky,
        runtime.feedback_ms,
    );

    render_topbar(&mut html, page);

    html.push_str("<div class=\"layout\">\n");
    render_sidebar(&mut html, &page.navigation);
    let _ = writeln!(
        html,
        "<main id=\"content\" class=\"content\" data-topic=\"{}\">",
        escape(&page.topic)
    );
    html.push_str(&content_inner(&page.page_title, &page.html_content));
    html.push_str("\n</main>\n");
    html.push_str(&render_toc(&page.outline));
    html.push_str("</div>\n");

    render_search(&mut html, &page.search);

    if let Some(src) = &runtime.script_src {
        let _ = writeln!(
            html,
            "<script type=\"module\">import init from \"{}\"; init();</script>",
            escape(src)
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Inner markup of the content area: the page title followed by the documents.
pub fn content_inner(page_title: &str, html_content: &str) -> String {
    format!(
        "<h1 class=\"page-title\">{}</h1>\n{html_content}",
        escape(page_title)
    )
}

/// Render the "On this page" panel. Empty outlines render nothing.
pub fn render_toc(outline: &[HeadingEntry]) -> String {
    if outline.is_empty() {
        return String::new();
    }
    let mut html = String::with_capacity(outline.len() * 96 + 128);
    html.push_str("<aside id=\"toc\" class=\"toc\">\n");
    html.push_str("<p class=\"toc-title\">On this page</p>\n");
    html.push_str("<ul class=\"toc-list\">\n");
    for entry in outline {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\" class=\"toc-link\" data-target=\"{}\">{}</a></li>",
            escape(&entry.href()),
            escape(&entry.id),
            escape(&entry.text),
        );
    }
    html.push_str("</ul>\n</aside>\n");
    html
}

fn render_topbar(html: &mut String, page: &PageData) {
    html.push_str("<header class=\"topbar\">\n");
    html.push_str(
        "<button type=\"button\" id=\"menu-button\" class=\"menu-button\" \
         aria-label=\"Open menu\" aria-expanded=\"false\"><span class=\"menu-icon\"></span></button>\n",
    );
    let _ = writeln!(
        html,
        "<a href=\"{}\" class=\"logo\">{}</a>",
        escape(&page.home_href),
        escape(&page.site_title)
    );
    html.push_str(
        "<button type=\"button\" id=\"search-button\" class=\"search-button\" aria-label=\"Search\">\
         <span class=\"search-button-label\">Search documentation</span>\
         <kbd class=\"search-hint\">Ctrl K</kbd></button>\n",
    );
    html.push_str("</header>\n");
}

fn render_sidebar(html: &mut String, groups: &[NavGroupData]) {
    html.push_str("<aside id=\"sidebar\" class=\"sidebar\" data-open=\"false\">\n");
    html.push_str("<nav class=\"sidebar-nav\">\n");
    for (index, group) in groups.iter().enumerate() {
        if group.collapsible {
            let _ = writeln!(
                html,
                "<div class=\"nav-group nav-group-collapsible\" data-group=\"{index}\" data-expanded=\"true\">"
            );
            let _ = writeln!(
                html,
                "<button type=\"button\" class=\"nav-group-toggle\" data-group-toggle=\"{index}\" \
                 aria-expanded=\"true\">{}</button>",
                escape(&group.title)
            );
        } else {
            let _ = writeln!(
                html,
                "<div class=\"nav-group\" data-group=\"{index}\" data-expanded=\"true\">"
            );
            let _ = writeln!(html, "<p class=\"nav-group-title\">{}</p>", escape(&group.title));
        }
        html.push_str("<ul class=\"nav-group-items\">\n");
        render_nav_items(html, &group.items);
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</nav>\n</aside>\n");
}

fn render_nav_items(html: &mut String, items: &[NavItemData]) {
    for item in items {
        html.push_str("<li>");
        let (class, current) = if item.is_active {
            ("nav-link active", " aria-current=\"page\"")
        } else {
            ("nav-link", "")
        };
        let _ = write!(
            html,
            "<a href=\"{}\" class=\"{class}\" data-topic=\"{}\" data-route=\"{}\"{current}>{}</a>",
            escape(&item.href),
            escape(&item.topic),
            escape(&item.route),
            escape(&item.title),
        );
        if !item.children.is_empty() {
            html.push_str("\n<ul class=\"nav-children\">\n");
            for child in &item.children {
                let _ = writeln!(
                    html,
                    "<li><a href=\"{}\" class=\"nav-child-link\" data-route=\"{}\">{}</a></li>",
                    escape(&child.href),
                    escape(&child.route),
                    escape(&child.title),
                );
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</li>\n");
    }
}

fn render_search(html: &mut String, items: &[SearchItemData]) {
    html.push_str(
        "<div id=\"search-overlay\" class=\"search-overlay\" hidden=\"hidden\">\n\
         <div class=\"search-backdrop\" data-search-backdrop=\"true\"></div>\n\
         <div class=\"search-panel\" role=\"dialog\" aria-modal=\"true\" aria-label=\"Search\">\n\
         <input id=\"search-input\" class=\"search-input\" type=\"search\" \
         placeholder=\"Search documentation...\" autocomplete=\"off\" />\n\
         <ul class=\"search-results\">\n",
    );
    for item in items {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\" class=\"search-result\" data-route=\"{}\">\
             <span class=\"search-result-label\">{}</span>\
             <span class=\"search-result-topic\">{}</span></a></li>",
            escape(&item.href),
            escape(&item.route),
            escape(&item.label),
            escape(&item.topic_label),
        );
    }
    html.push_str("</ul>\n</div>\n</div>\n");
}
