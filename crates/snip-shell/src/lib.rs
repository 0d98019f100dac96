//! Navigation shell for snipdocs.
//!
//! Platform-free state for the chrome around the rendered content: the
//! search overlay, the grouped sidebar, the mobile menu and copy-button
//! feedback. The browser runtime translates DOM events into calls here and
//! reflects the resulting state back into the page.

mod copy;
mod keys;
mod menu;
mod nav;
mod search;
mod state;

pub use copy::{
    Clipboard, ClipboardError, CopyFeedback, CopyRegistry, CopyTicket, DEFAULT_FEEDBACK,
};
pub use keys::KeyChord;
pub use menu::MobileMenu;
pub use nav::{NavGroup, NavItem, NavTarget, Sidebar};
pub use search::{KeyResponse, SearchItem, SearchOverlay};
pub use state::ShellState;
