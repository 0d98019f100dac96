use snip_content::Library;

use crate::keys::KeyChord;
use crate::menu::MobileMenu;
use crate::nav::{NavTarget, Sidebar};
use crate::search::{KeyResponse, SearchOverlay};

/// All interactive chrome around the content area.
#[derive(Clone, Debug, Default)]
pub struct ShellState {
    pub search: SearchOverlay,
    pub sidebar: Sidebar,
    pub mobile: MobileMenu,
}

impl ShellState {
    pub fn from_library(library: &Library) -> Self {
        Self {
            search: SearchOverlay::from_library(library),
            sidebar: Sidebar::from_library(library),
            mobile: MobileMenu::default(),
        }
    }

    /// Route a global key press.
    pub fn on_key(&mut self, chord: &KeyChord) -> KeyResponse {
        self.search.handle_key(chord)
    }

    /// A navigation link was followed: dismiss transient chrome and reveal
    /// the target in the sidebar.
    pub fn on_navigate(&mut self, target: &NavTarget) {
        self.search.close();
        self.mobile.close();
        self.sidebar.reveal(&target.topic);
    }
}
