//! Viewport focus band.
//!
//! The band is the horizontal strip of the viewport left after excluding a
//! fraction from the top and another from the bottom. A heading is "in view"
//! for outline purposes only while it overlaps the band.

/// Default fraction excluded from the top of the viewport.
pub const DEFAULT_FOCUS_TOP: f64 = 0.40;

/// Default fraction excluded from the bottom of the viewport.
pub const DEFAULT_FOCUS_BOTTOM: f64 = 0.55;

/// Invalid band fractions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BandError {
    #[error("{edge} fraction must be within [0, 1), got {value}")]
    OutOfRange { edge: &'static str, value: f64 },
    #[error("Band is empty: top ({top}) + bottom ({bottom}) must be less than 1")]
    Empty { top: f64, bottom: f64 },
}

/// Viewport-relative geometry of one heading.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadingRect {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

impl HeadingRect {
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            id: id.into(),
            top,
            bottom,
        }
    }
}

/// Pixel extent of the band for a concrete viewport height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandSpan {
    pub start: f64,
    pub end: f64,
}

/// Fractions of the viewport excluded from the top and bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusBand {
    top: f64,
    bottom: f64,
}

impl FocusBand {
    /// Create a band, rejecting fractions that leave no visible strip.
    ///
    /// # Errors
    ///
    /// Returns [`BandError`] if either fraction is outside `[0, 1)` or the two
    /// together cover the whole viewport.
    pub fn new(top: f64, bottom: f64) -> Result<Self, BandError> {
        check_fraction("top", top)?;
        check_fraction("bottom", bottom)?;
        if top + bottom >= 1.0 {
            return Err(BandError::Empty { top, bottom });
        }
        Ok(Self { top, bottom })
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Observer root margin shrinking the viewport to the band.
    ///
    /// ```
    /// use snip_outline::FocusBand;
    ///
    /// assert_eq!(FocusBand::default().root_margin(), "-40% 0px -55% 0px");
    /// ```
    pub fn root_margin(&self) -> String {
        format!("-{}% 0px -{}% 0px", percent(self.top), percent(self.bottom))
    }

    /// Band extent in pixels for a viewport of `viewport_height`.
    pub fn span(&self, viewport_height: f64) -> BandSpan {
        BandSpan {
            start: viewport_height * self.top,
            end: viewport_height * (1.0 - self.bottom),
        }
    }

    /// Whether `rect` overlaps the band.
    ///
    /// Overlap is half-open: a heading whose bottom edge sits exactly on the
    /// band's top edge is outside.
    pub fn intersects(&self, rect: &HeadingRect, viewport_height: f64) -> bool {
        let span = self.span(viewport_height);
        rect.top < span.end && rect.bottom > span.start
    }
}

impl Default for FocusBand {
    fn default() -> Self {
        Self {
            top: DEFAULT_FOCUS_TOP,
            bottom: DEFAULT_FOCUS_BOTTOM,
        }
    }
}

fn check_fraction(edge: &'static str, value: f64) -> Result<(), BandError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(BandError::OutOfRange { edge, value })
    }
}

/// Fraction as a percentage, rounded to two decimals.
fn percent(fraction: f64) -> f64 {
    // Signed zero would format as "-0" and yield "--0%".
    ((fraction * 10_000.0).round() / 100.0).abs()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_root_margin() {
        assert_eq!(FocusBand::default().root_margin(), "-40% 0px -55% 0px");
    }

    #[test]
    fn test_custom_root_margin() {
        let band = FocusBand::new(0.125, 0.3).unwrap();
        assert_eq!(band.root_margin(), "-12.5% 0px -30% 0px");
        assert_eq!(FocusBand::new(0.0, 0.0).unwrap().root_margin(), "-0% 0px -0% 0px");
    }

    #[test]
    fn test_negative_zero_root_margin() {
        let band = FocusBand::new(-0.0, 0.5).unwrap();
        assert_eq!(band.root_margin(), "-0% 0px -50% 0px");
    }

    #[test]
    fn test_span() {
        let span = FocusBand::default().span(1000.0);
        assert!((span.start - 400.0).abs() < 1e-9);
        assert!((span.end - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_intersects_half_open() {
        let band = FocusBand::default();
        assert!(band.intersects(&HeadingRect::new("a", 420.0, 440.0), 1000.0));
        assert!(band.intersects(&HeadingRect::new("a", 380.0, 410.0), 1000.0));
        assert!(band.intersects(&HeadingRect::new("a", 300.0, 600.0), 1000.0));
        assert!(!band.intersects(&HeadingRect::new("a", 370.0, 400.0), 1000.0));
        assert!(!band.intersects(&HeadingRect::new("a", 450.0, 480.0), 1000.0));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            FocusBand::new(-0.1, 0.5),
            Err(BandError::OutOfRange {
                edge: "top",
                value: -0.1
            })
        );
        assert!(matches!(
            FocusBand::new(0.2, 1.0),
            Err(BandError::OutOfRange { edge: "bottom", .. })
        ));
        assert!(FocusBand::new(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_rejects_empty_band() {
        assert!(matches!(FocusBand::new(0.5, 0.5), Err(BandError::Empty { .. })));
        assert!(FocusBand::new(0.5, 0.49).is_ok());
    }
}
