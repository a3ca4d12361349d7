/*!
Year conventions for aggregating time series data.

Hydrology rarely sums over the calendar year: a "water year" runs October
through September so that a winter's snowpack and the spring melt it feeds
land in the same year. [`YearType`] names the conventions and knows where
each one starts and ends.
*/

use crate::error::{err, Error};

/// A twelve month span used as the unit of annual aggregation.
///
/// A year type whose span begins before January is labeled by the calendar
/// year it ends in. For example, water year 2024 runs from October 2023
/// through September 2024.
///
/// # Example
///
/// ```
/// use timefmt::year::YearType;
///
/// let water = YearType::from_name("water").unwrap();
/// assert_eq!(water.start_month(), 10);
/// assert_eq!(water.end_month(), 9);
/// // October of water year 2024 falls in calendar year 2023.
/// assert_eq!(water.start_year_offset(), -1);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YearType {
    /// January through December.
    Calendar,
    /// November through October, ending in the labeled year.
    NovToOct,
    /// October through September, ending in the labeled year.
    Water,
    /// May through April, starting in the labeled year.
    MayToApr,
}

const ALIASES: &[(&str, YearType)] = &[
    ("Calendar", YearType::Calendar),
    ("CalendarYear", YearType::Calendar),
    ("CYR", YearType::Calendar),
    ("NovToOct", YearType::NovToOct),
    ("YearNovToOct", YearType::NovToOct),
    ("Water", YearType::Water),
    ("WaterYear", YearType::Water),
    ("WYR", YearType::Water),
    ("MayToApr", YearType::MayToApr),
    ("YearMayToApr", YearType::MayToApr),
];

impl YearType {
    /// The short display name.
    pub fn name(self) -> &'static str {
        match self {
            YearType::Calendar => "Calendar",
            YearType::NovToOct => "NovToOct",
            YearType::Water => "Water",
            YearType::MayToApr => "MayToApr",
        }
    }

    /// The verbose display name.
    pub fn verbose_name(self) -> &'static str {
        match self {
            YearType::Calendar => "calendar year (January through December)",
            YearType::NovToOct => "year running November through October",
            YearType::Water => "water year (October through September)",
            YearType::MayToApr => "year running May through April",
        }
    }

    /// Resolves a short or verbose alias, case-insensitively. Returns
    /// `None` when the name matches no alias.
    pub fn from_name(name: &str) -> Option<YearType> {
        let (_, ty) = ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))?;
        Some(*ty)
    }

    /// The calendar month (1-12) this year type starts in.
    pub fn start_month(self) -> i8 {
        match self {
            YearType::Calendar => 1,
            YearType::NovToOct => 11,
            YearType::Water => 10,
            YearType::MayToApr => 5,
        }
    }

    /// The calendar month (1-12) this year type ends in.
    pub fn end_month(self) -> i8 {
        match self {
            YearType::Calendar => 12,
            YearType::NovToOct => 10,
            YearType::Water => 9,
            YearType::MayToApr => 4,
        }
    }

    /// The offset from the labeled year to the calendar year the span
    /// starts in: `0` when the span starts in the labeled year, `-1` when
    /// it starts in the year before.
    pub fn start_year_offset(self) -> i8 {
        match self {
            YearType::Calendar | YearType::MayToApr => 0,
            YearType::NovToOct | YearType::Water => -1,
        }
    }

    /// The calendar year that the given month of labeled year `year`
    /// falls in.
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::year::YearType;
    ///
    /// // Water year 2024: October 2023 .. September 2024.
    /// assert_eq!(YearType::Water.calendar_year_for(2024, 10), 2023);
    /// assert_eq!(YearType::Water.calendar_year_for(2024, 9), 2024);
    /// assert_eq!(YearType::Calendar.calendar_year_for(2024, 9), 2024);
    /// ```
    pub fn calendar_year_for(self, year: i16, month: i8) -> i16 {
        let start = year + i16::from(self.start_year_offset());
        if month >= self.start_month() {
            start
        } else {
            start + 1
        }
    }
}

impl core::fmt::Display for YearType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for YearType {
    type Err = Error;

    fn from_str(s: &str) -> Result<YearType, Error> {
        YearType::from_name(s)
            .ok_or_else(|| err!("unrecognized year type {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliases() {
        for (alias, expected) in ALIASES {
            assert_eq!(YearType::from_name(alias), Some(*expected));
            assert_eq!(
                YearType::from_name(&alias.to_lowercase()),
                Some(*expected),
            );
        }
        assert_eq!(YearType::from_name("fiscal"), None);
        assert!("fiscal".parse::<YearType>().is_err());
    }

    #[test]
    fn spans_are_twelve_months() {
        for ty in [
            YearType::Calendar,
            YearType::NovToOct,
            YearType::Water,
            YearType::MayToApr,
        ] {
            let start = ty.start_month();
            let end = ty.end_month();
            let months = if start <= end {
                end - start + 1
            } else {
                12 - start + 1 + end
            };
            assert_eq!(months, 12, "{ty}");
        }
    }

    #[test]
    fn water_year_boundaries() {
        assert_eq!(YearType::Water.calendar_year_for(2024, 10), 2023);
        assert_eq!(YearType::Water.calendar_year_for(2024, 12), 2023);
        assert_eq!(YearType::Water.calendar_year_for(2024, 1), 2024);
        assert_eq!(YearType::Water.calendar_year_for(2024, 9), 2024);
        assert_eq!(YearType::MayToApr.calendar_year_for(2024, 5), 2024);
        // April of the May-April year 2024 falls in calendar year 2025.
        assert_eq!(YearType::MayToApr.calendar_year_for(2024, 4), 2025);
    }
}
