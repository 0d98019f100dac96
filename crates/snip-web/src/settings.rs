//! Runtime settings read from `<body>` data attributes.

use std::time::Duration;

use snip_outline::FocusBand;
use snip_shell::DEFAULT_FEEDBACK;

/// Settings the static page hands to the runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuntimeSettings {
    pub band: FocusBand,
    pub sticky: bool,
    pub feedback: Duration,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            band: FocusBand::default(),
            sticky: false,
            feedback: DEFAULT_FEEDBACK,
        }
    }
}

impl RuntimeSettings {
    /// Parse settings from a dataset lookup (`focusTop`, `focusBottom`,
    /// `sticky`, `feedbackMs`).
    ///
    /// Missing or malformed values fall back to defaults; an invalid band
    /// falls back to the default band as a whole.
    pub fn from_dataset<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str| get(key).and_then(|v| v.trim().parse::<f64>().ok());

        let band = match (number("focusTop"), number("focusBottom")) {
            (None, None) => defaults.band,
            (top, bottom) => FocusBand::new(
                top.unwrap_or(defaults.band.top()),
                bottom.unwrap_or(defaults.band.bottom()),
            )
            .unwrap_or(defaults.band),
        };
        let sticky = get("sticky").is_some_and(|v| v == "true");
        let feedback = get("feedbackMs")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map_or(defaults.feedback, Duration::from_millis);

        Self {
            band,
            sticky,
            feedback,
        }
    }
}
