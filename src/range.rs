/*!
Ranges and seasonal windows over partial date/times.
*/

use crate::value::PartialDateTime;

/// An inclusive range between two partial date/times, either end of which
/// may be open.
///
/// The range is a plain data carrier: it does not enforce that the start
/// precedes the end, since either side may have been assembled at a
/// different precision, or not at all.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeRange {
    start: Option<PartialDateTime>,
    end: Option<PartialDateTime>,
}

impl DateTimeRange {
    /// Creates a range from optional start and end values. `None` leaves
    /// that side of the range open.
    pub fn new(
        start: Option<PartialDateTime>,
        end: Option<PartialDateTime>,
    ) -> DateTimeRange {
        DateTimeRange { start, end }
    }

    /// The start of the range, when bounded.
    pub fn start(&self) -> Option<&PartialDateTime> {
        self.start.as_ref()
    }

    /// The end of the range, when bounded.
    pub fn end(&self) -> Option<&PartialDateTime> {
        self.end.as_ref()
    }

    /// Returns true when both ends of the range are bounded.
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// A within-year window, bounded by month/day pairs.
///
/// Windows describe recurring seasons ("April 1 through September 30")
/// rather than spans of absolute time, and may wrap the end of the year
/// ("November 15 through March 1"). A window with no bounds contains every
/// date.
///
/// # Example
///
/// ```
/// use timefmt::range::DateTimeWindow;
///
/// let irrigation = DateTimeWindow::new(Some((4, 1)), Some((9, 30)));
/// assert!(irrigation.contains(6, 15));
/// assert!(!irrigation.contains(11, 15));
///
/// // Wrapping the year boundary works too.
/// let winter = DateTimeWindow::new(Some((11, 15)), Some((3, 1)));
/// assert!(winter.contains(1, 20));
/// assert!(!winter.contains(6, 15));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeWindow {
    start: Option<(i8, i8)>,
    end: Option<(i8, i8)>,
}

impl DateTimeWindow {
    /// Creates a window from optional `(month, day)` bounds, both
    /// inclusive.
    pub fn new(
        start: Option<(i8, i8)>,
        end: Option<(i8, i8)>,
    ) -> DateTimeWindow {
        DateTimeWindow { start, end }
    }

    /// The inclusive `(month, day)` start, when bounded.
    pub fn start(&self) -> Option<(i8, i8)> {
        self.start
    }

    /// The inclusive `(month, day)` end, when bounded.
    pub fn end(&self) -> Option<(i8, i8)> {
        self.end
    }

    /// Returns true when the given month and day fall inside the window.
    ///
    /// A missing bound is treated as unconstrained on that side. When the
    /// start falls after the end, the window wraps the end of the year.
    pub fn contains(&self, month: i8, day: i8) -> bool {
        // Compare month/day pairs as ordinals so that wrapping reduces to
        // one comparison per side.
        let ord = |(m, d): (i8, i8)| i16::from(m) * 100 + i16::from(d);
        let probe = ord((month, day));
        match (self.start, self.end) {
            (None, None) => true,
            (Some(start), None) => probe >= ord(start),
            (None, Some(end)) => probe <= ord(end),
            (Some(start), Some(end)) => {
                let (start, end) = (ord(start), ord(end));
                if start <= end {
                    start <= probe && probe <= end
                } else {
                    probe >= start || probe <= end
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_accessors() {
        let mut start = PartialDateTime::new();
        start.set_year(2020).unwrap();
        let range = DateTimeRange::new(Some(start.clone()), None);
        assert_eq!(range.start(), Some(&start));
        assert_eq!(range.end(), None);
        assert!(!range.is_bounded());
        assert!(DateTimeRange::default().start().is_none());
    }

    #[test]
    fn window_contains() {
        let w = DateTimeWindow::new(Some((4, 1)), Some((9, 30)));
        assert!(w.contains(4, 1));
        assert!(w.contains(9, 30));
        assert!(w.contains(7, 4));
        assert!(!w.contains(3, 31));
        assert!(!w.contains(10, 1));
    }

    #[test]
    fn window_wraps_year_end() {
        let w = DateTimeWindow::new(Some((11, 15)), Some((3, 1)));
        assert!(w.contains(11, 15));
        assert!(w.contains(12, 31));
        assert!(w.contains(1, 1));
        assert!(w.contains(3, 1));
        assert!(!w.contains(3, 2));
        assert!(!w.contains(11, 14));
        assert!(!w.contains(7, 4));
    }

    #[test]
    fn open_windows() {
        assert!(DateTimeWindow::default().contains(6, 15));
        let from_june = DateTimeWindow::new(Some((6, 1)), None);
        assert!(from_june.contains(6, 1));
        assert!(!from_june.contains(5, 31));
        let to_june = DateTimeWindow::new(None, Some((6, 1)));
        assert!(to_june.contains(1, 1));
        assert!(!to_june.contains(6, 2));
    }
}
