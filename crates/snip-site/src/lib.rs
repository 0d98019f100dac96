//! Static site generation for snipdocs.
//!
//! [`StaticSiteBuilder`] writes one HTML page per topic plus the shared
//! stylesheet. Pages work without scripting; the optional browser runtime
//! layers the interactive shell on top.

mod builder;
mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, StaticSiteBuilder};
pub use template::{
    NavGroupData, NavItemData, PageData, RuntimeData, SearchItemData, content_inner, render_page,
    render_toc,
};
