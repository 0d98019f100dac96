//! "On this page" outline and scroll-spy for snipdocs.
//!
//! The outline is derived from the content model, so it never depends on
//! render timing. [`ScrollSpy`] is a platform-free state machine: the browser
//! runtime feeds it observer notifications, tests feed it geometry.
//!
//! # Example
//!
//! ```
//! use snip_content::Library;
//! use snip_outline::{FocusBand, HeadingRect, Outline, ScrollSpy};
//!
//! let library = Library::builtin().unwrap();
//! let outline = Outline::from_collection(&library.topic("react").unwrap().documents);
//!
//! let mut spy = ScrollSpy::new(FocusBand::default());
//! spy.observe(outline.entries(), |_| true);
//!
//! let first = &outline.entries()[0].id;
//! let active = spy.sample(&[HeadingRect::new(first.clone(), 410.0, 440.0)], 1000.0);
//! assert_eq!(active, Some(first.as_str()));
//! ```

mod band;
mod outline;
mod spy;

pub use band::{BandError, BandSpan, DEFAULT_FOCUS_BOTTOM, DEFAULT_FOCUS_TOP, FocusBand, HeadingRect};
pub use outline::{Outline, OutlineChange, OutlineCollector};
pub use spy::{IntersectionEntry, ScrollSpy, ScrollThrottle};
