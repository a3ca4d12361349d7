/*!
Classification of how a series value relates to its interval of time.
*/

use crate::error::{err, Error};

/// How a recorded value relates to the interval it is recorded over.
///
/// This is metadata that travels alongside time series data: a monthly
/// value of `31.2` means something different depending on whether it was
/// accumulated over the month, sampled at an instant, or averaged.
///
/// # Name resolution
///
/// Every variant has a short name and a verbose name, and
/// [`TimeScale::from_name`] resolves either, case-insensitively. Use the
/// [`FromStr`](core::str::FromStr) implementation instead when an
/// unrecognized name should be a hard error.
///
/// # Example
///
/// ```
/// use timefmt::scale::TimeScale;
///
/// assert_eq!(TimeScale::from_name("accm"), Some(TimeScale::Accumulated));
/// assert_eq!(TimeScale::from_name("Mean"), Some(TimeScale::Mean));
/// assert_eq!(TimeScale::from_name("unknown"), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeScale {
    /// The value accumulates over the interval (e.g. rainfall totals).
    Accumulated,
    /// The value is a sample taken at an instant (e.g. a gauge reading).
    Instantaneous,
    /// The value is the mean over the interval (e.g. average flow).
    Mean,
}

/// Every accepted spelling, mapped to its variant.
const ALIASES: &[(&str, TimeScale)] = &[
    ("ACCM", TimeScale::Accumulated),
    ("Accumulated", TimeScale::Accumulated),
    ("INST", TimeScale::Instantaneous),
    ("Instantaneous", TimeScale::Instantaneous),
    ("MEAN", TimeScale::Mean),
    ("Mean", TimeScale::Mean),
];

impl TimeScale {
    /// The short display name, e.g. `ACCM`.
    pub fn name(self) -> &'static str {
        match self {
            TimeScale::Accumulated => "ACCM",
            TimeScale::Instantaneous => "INST",
            TimeScale::Mean => "MEAN",
        }
    }

    /// The verbose display name, e.g. `Accumulated`.
    pub fn verbose_name(self) -> &'static str {
        match self {
            TimeScale::Accumulated => "Accumulated",
            TimeScale::Instantaneous => "Instantaneous",
            TimeScale::Mean => "Mean",
        }
    }

    /// Resolves a short or verbose name, case-insensitively. Returns
    /// `None` when the name matches no alias, leaving the caller to decide
    /// whether that is fatal.
    pub fn from_name(name: &str) -> Option<TimeScale> {
        let (_, scale) = ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))?;
        Some(*scale)
    }
}

impl core::fmt::Display for TimeScale {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for TimeScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<TimeScale, Error> {
        TimeScale::from_name(s)
            .ok_or_else(|| err!("unrecognized time scale {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_all_aliases_case_insensitively() {
        for (alias, expected) in ALIASES {
            assert_eq!(TimeScale::from_name(alias), Some(*expected));
            assert_eq!(
                TimeScale::from_name(&alias.to_uppercase()),
                Some(*expected),
            );
            assert_eq!(
                TimeScale::from_name(&alias.to_lowercase()),
                Some(*expected),
            );
        }
    }

    #[test]
    fn unknown_names() {
        assert_eq!(TimeScale::from_name(""), None);
        assert_eq!(TimeScale::from_name("median"), None);
        assert!("median".parse::<TimeScale>().is_err());
    }
}
