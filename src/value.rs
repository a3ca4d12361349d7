/*!
Partial date/time values.

A [`PartialDateTime`] is the thing format parsing writes into: six civil
fields (year through second) that are each either set or unset, a
[`Precision`] recording the finest field that carries meaning, and a
[`Validation`] mode that decides how much the setters are allowed to
enforce.

# Design

A datetime assembled field by field from a format string cannot be validated
field by field: the day may be parsed before the month, and a day of `31`
is only wrong once a `4` lands in the month. So a value starts out
[`Validation::Permissive`], where setters record anything, and is flipped to
[`Validation::Validated`] once assembly is complete. From then on the
setters enforce field ranges and day-in-month consistency against whatever
else is set. The flip itself re-checks nothing; it only changes what
subsequent mutations are allowed to do.
*/

use crate::{
    error::{value as value_err, Error},
    util::common,
};

/// The granularity of the finest civil field that carries meaning in a
/// [`PartialDateTime`].
///
/// Precisions are ordered by fineness: a precision that covers a smaller
/// interval of time compares greater. That is,
/// `Precision::Year < Precision::Second`.
///
/// # Example
///
/// ```
/// use timefmt::Precision;
///
/// assert!(Precision::Minute > Precision::Day);
/// assert!(Precision::Minute.finer_than(Precision::Day));
/// ```
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// Only the year is meaningful.
    #[default]
    Year,
    /// Meaningful down to the month.
    Month,
    /// Meaningful down to the day.
    Day,
    /// Meaningful down to the hour.
    Hour,
    /// Meaningful down to the minute.
    Minute,
    /// Meaningful down to the second.
    Second,
}

impl Precision {
    /// Returns true when this precision covers a smaller interval of time
    /// than `other`.
    #[inline]
    pub fn finer_than(self, other: Precision) -> bool {
        self > other
    }

    /// A human readable label for this precision.
    pub fn name(self) -> &'static str {
        match self {
            Precision::Year => "year",
            Precision::Month => "month",
            Precision::Day => "day",
            Precision::Hour => "hour",
            Precision::Minute => "minute",
            Precision::Second => "second",
        }
    }
}

impl core::fmt::Display for Precision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Controls how much the field setters of a [`PartialDateTime`] enforce.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validation {
    /// Setters record whatever they are given. Used while a value is being
    /// assembled field by field and cross-field constraints cannot hold
    /// yet.
    #[default]
    Permissive,
    /// Setters enforce field ranges and day-in-month consistency against
    /// the fields that are currently set.
    Validated,
}

/// A date/time value assembled one field at a time.
///
/// Every field is either set or unset; the unset state is observable
/// through the `Option` returning getters and is distinct from any set
/// value. The value also carries a [`Precision`] and a [`Validation`] mode;
/// see the [module documentation](self) for how the two interact during
/// format parsing.
///
/// # Example
///
/// ```
/// use timefmt::{PartialDateTime, Validation};
///
/// let mut dt = PartialDateTime::new();
/// assert_eq!(dt.year(), None);
///
/// // Permissive values accept anything, even a month of 99.
/// dt.set_month(99)?;
/// // Validated values do not.
/// dt.set_validation(Validation::Validated);
/// assert!(dt.set_month(99).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialDateTime {
    year: Option<i16>,
    month: Option<i8>,
    day: Option<i8>,
    hour: Option<i8>,
    minute: Option<i8>,
    second: Option<i8>,
    precision: Precision,
    validation: Validation,
}

impl PartialDateTime {
    /// Creates a value with every field unset, year precision and
    /// permissive validation. Equivalent to `PartialDateTime::default()`.
    #[inline]
    pub fn new() -> PartialDateTime {
        PartialDateTime::default()
    }

    /// Returns every field to the unset state, with year precision and
    /// permissive validation.
    ///
    /// Format parsing calls this on a supplied target before populating
    /// it, so any prior field values are discarded.
    #[inline]
    pub fn reset(&mut self) {
        *self = PartialDateTime::new();
    }

    /// The year, if set.
    #[inline]
    pub fn year(&self) -> Option<i16> {
        self.year
    }

    /// The month, if set.
    #[inline]
    pub fn month(&self) -> Option<i8> {
        self.month
    }

    /// The day of the month, if set.
    #[inline]
    pub fn day(&self) -> Option<i8> {
        self.day
    }

    /// The hour on a 24-hour clock, if set.
    #[inline]
    pub fn hour(&self) -> Option<i8> {
        self.hour
    }

    /// The minute, if set.
    #[inline]
    pub fn minute(&self) -> Option<i8> {
        self.minute
    }

    /// The second, if set.
    #[inline]
    pub fn second(&self) -> Option<i8> {
        self.second
    }

    /// Sets the year.
    ///
    /// # Errors
    ///
    /// In validated mode, returns an error unless the year is in
    /// `-9999..=9999`.
    pub fn set_year(&mut self, year: i16) -> Result<(), Error> {
        if self.validation == Validation::Validated
            && !(-9999..=9999).contains(&year)
        {
            return Err(Error::range("year", year, -9999, 9999));
        }
        self.year = Some(year);
        Ok(())
    }

    /// Sets the month.
    ///
    /// # Errors
    ///
    /// In validated mode, returns an error unless the month is in `1..=12`
    /// and any currently set day fits within it.
    pub fn set_month(&mut self, month: i8) -> Result<(), Error> {
        if self.validation == Validation::Validated {
            if !(1..=12).contains(&month) {
                return Err(Error::range("month", month, 1, 12));
            }
            if let Some(day) = self.day {
                self.check_day_in_month(day, month)?;
            }
        }
        self.month = Some(month);
        Ok(())
    }

    /// Sets the day of the month.
    ///
    /// # Errors
    ///
    /// In validated mode, returns an error unless the day is in `1..=31`
    /// and, when a month is set, no bigger than that month's length. The
    /// length of February is decided by the set year, or a leap year when
    /// no year is set.
    pub fn set_day(&mut self, day: i8) -> Result<(), Error> {
        if self.validation == Validation::Validated {
            if !(1..=31).contains(&day) {
                return Err(Error::range("day", day, 1, 31));
            }
            if let Some(month) = self.month {
                self.check_day_in_month(day, month)?;
            }
        }
        self.day = Some(day);
        Ok(())
    }

    /// Sets the hour on a 24-hour clock.
    ///
    /// # Errors
    ///
    /// In validated mode, returns an error unless the hour is in `0..=23`.
    pub fn set_hour(&mut self, hour: i8) -> Result<(), Error> {
        if self.validation == Validation::Validated
            && !(0..=23).contains(&hour)
        {
            return Err(Error::range("hour", hour, 0, 23));
        }
        self.hour = Some(hour);
        Ok(())
    }

    /// Sets the minute.
    ///
    /// # Errors
    ///
    /// In validated mode, returns an error unless the minute is in
    /// `0..=59`.
    pub fn set_minute(&mut self, minute: i8) -> Result<(), Error> {
        if self.validation == Validation::Validated
            && !(0..=59).contains(&minute)
        {
            return Err(Error::range("minute", minute, 0, 59));
        }
        self.minute = Some(minute);
        Ok(())
    }

    /// Sets the second.
    ///
    /// # Errors
    ///
    /// In validated mode, returns an error unless the second is in
    /// `0..=59`.
    pub fn set_second(&mut self, second: i8) -> Result<(), Error> {
        if self.validation == Validation::Validated
            && !(0..=59).contains(&second)
        {
            return Err(Error::range("second", second, 0, 59));
        }
        self.second = Some(second);
        Ok(())
    }

    fn check_day_in_month(&self, day: i8, month: i8) -> Result<(), Error> {
        // Without a year, assume a leap year so that February 29 is not
        // rejected on the basis of a field that was never parsed.
        let days = common::days_in_month(self.year.unwrap_or(0), month);
        // A zero means the month itself is out of bounds, which can only
        // happen if it was recorded permissively. That is the month's
        // problem, not the day's.
        if days != 0 && day > days {
            return Err(value_err::Error::DayOutOfBoundsForMonth {
                day,
                month,
                days,
            }
            .into());
        }
        Ok(())
    }

    /// The finest precision that carries meaning in this value.
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Sets the precision.
    #[inline]
    pub fn set_precision(&mut self, precision: Precision) {
        self.precision = precision;
    }

    /// The current validation mode.
    #[inline]
    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Switches the validation mode.
    ///
    /// Switching re-checks nothing: fields recorded permissively stay as
    /// they are. Only subsequent setter calls observe the new mode.
    #[inline]
    pub fn set_validation(&mut self, validation: Validation) {
        self.validation = validation;
    }

    /// Returns true when the field at the given precision is set.
    pub fn is_set(&self, precision: Precision) -> bool {
        match precision {
            Precision::Year => self.year.is_some(),
            Precision::Month => self.month.is_some(),
            Precision::Day => self.day.is_some(),
            Precision::Hour => self.hour.is_some(),
            Precision::Minute => self.minute.is_some(),
            Precision::Second => self.second.is_some(),
        }
    }
}

impl core::fmt::Display for PartialDateTime {
    /// Renders the fields down to this value's precision, with unset
    /// fields rendered as zero.
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:04}", self.year.unwrap_or(0))?;
        if self.precision >= Precision::Month {
            write!(f, "-{:02}", self.month.unwrap_or(0))?;
        }
        if self.precision >= Precision::Day {
            write!(f, "-{:02}", self.day.unwrap_or(0))?;
        }
        if self.precision >= Precision::Hour {
            write!(f, " {:02}", self.hour.unwrap_or(0))?;
        }
        if self.precision >= Precision::Minute {
            write!(f, ":{:02}", self.minute.unwrap_or(0))?;
        }
        if self.precision >= Precision::Second {
            write!(f, ":{:02}", self.second.unwrap_or(0))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn precision_ordering() {
        let ordered = [
            Precision::Year,
            Precision::Month,
            Precision::Day,
            Precision::Hour,
            Precision::Minute,
            Precision::Second,
        ];
        for window in ordered.windows(2) {
            assert!(window[1].finer_than(window[0]));
            assert!(!window[0].finer_than(window[1]));
        }
    }

    #[test]
    fn permissive_records_anything() {
        let mut dt = PartialDateTime::new();
        dt.set_year(-12345).unwrap();
        dt.set_month(99).unwrap();
        dt.set_day(77).unwrap();
        dt.set_hour(-5).unwrap();
        assert_eq!(dt.month(), Some(99));
        assert_eq!(dt.day(), Some(77));
    }

    #[test]
    fn validated_enforces_ranges() {
        let mut dt = PartialDateTime::new();
        dt.set_validation(Validation::Validated);
        assert!(dt.set_month(0).is_err());
        assert!(dt.set_month(13).is_err());
        assert!(dt.set_day(0).is_err());
        assert!(dt.set_day(32).is_err());
        assert!(dt.set_hour(24).is_err());
        assert!(dt.set_minute(60).is_err());
        assert!(dt.set_second(60).is_err());
        assert!(dt.set_year(10_000).is_err());

        assert!(dt.set_month(12).is_ok());
        assert!(dt.set_day(31).is_ok());
        assert!(dt.set_hour(23).is_ok());
    }

    #[test]
    fn validated_enforces_day_in_month() {
        let mut dt = PartialDateTime::new();
        dt.set_validation(Validation::Validated);
        dt.set_year(2023).unwrap();
        dt.set_month(2).unwrap();
        assert!(dt.set_day(29).is_err());
        assert!(dt.set_day(28).is_ok());

        // And the other way around: the day constrains the month.
        let mut dt = PartialDateTime::new();
        dt.set_validation(Validation::Validated);
        dt.set_day(31).unwrap();
        assert!(dt.set_month(4).is_err());
        assert!(dt.set_month(3).is_ok());
    }

    #[test]
    fn day_in_month_without_year_assumes_leap() {
        let mut dt = PartialDateTime::new();
        dt.set_validation(Validation::Validated);
        dt.set_month(2).unwrap();
        assert!(dt.set_day(29).is_ok());
        assert!(dt.set_day(30).is_err());
    }

    #[test]
    fn mode_switch_rechecks_nothing() {
        let mut dt = PartialDateTime::new();
        dt.set_month(99).unwrap();
        dt.set_validation(Validation::Validated);
        // The bogus month is still there. Only new mutations see the mode.
        assert_eq!(dt.month(), Some(99));
    }

    #[test]
    fn reset_returns_to_default() {
        let mut dt = PartialDateTime::new();
        dt.set_year(2024).unwrap();
        dt.set_precision(Precision::Second);
        dt.set_validation(Validation::Validated);
        dt.reset();
        assert_eq!(dt, PartialDateTime::new());
        assert_eq!(dt.validation(), Validation::Permissive);
    }

    #[test]
    fn display_follows_precision() {
        let mut dt = PartialDateTime::new();
        dt.set_year(2013).unwrap();
        assert_eq!(dt.to_string(), "2013");

        dt.set_month(7).unwrap();
        dt.set_precision(Precision::Month);
        assert_eq!(dt.to_string(), "2013-07");

        dt.set_day(4).unwrap();
        dt.set_precision(Precision::Day);
        assert_eq!(dt.to_string(), "2013-07-04");

        dt.set_hour(12).unwrap();
        dt.set_minute(30).unwrap();
        dt.set_second(45).unwrap();
        dt.set_precision(Precision::Second);
        assert_eq!(dt.to_string(), "2013-07-04 12:30:45");
    }
}
