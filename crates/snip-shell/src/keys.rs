/// Platform-neutral snapshot of a key press.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    /// `KeyboardEvent.key` value, e.g. `"k"` or `"Escape"`.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    /// A key with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl+K or Cmd+K, regardless of case.
    pub fn is_search_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case("k")
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}
