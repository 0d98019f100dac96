//! Content model for snipdocs.
//!
//! Guides are compiled into the binary as YAML and parsed once at startup
//! into an immutable [`Library`]. Each [`Topic`] owns a
//! [`DocumentCollection`] that the renderer turns into one page.
//!
//! # Example
//!
//! ```
//! use snip_content::Library;
//!
//! let library = Library::builtin().unwrap();
//! let react = library.topic("react").unwrap();
//! assert!(react.documents.section_count() > 0);
//! ```

mod error;
mod library;
mod model;
mod navigation;

pub use error::ContentError;
pub use library::Library;
pub use model::{Document, DocumentCollection, Section, Topic};
pub use navigation::{NavGroupConfig, NavigationConfig};
