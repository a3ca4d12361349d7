/*!
Time zone interpretation policy and abbreviation-change records.

This crate's parser extracts civil fields only; it never attaches a zone.
[`TzDefault`] names the policy a caller applies to the result, and
[`TzChange`] records the kind of historical renaming (e.g. a network
switching its gauges from one abbreviation to another) that such a policy
has to contend with.
*/

use alloc::string::String;

use crate::error::{err, Error};

/// The policy for interpreting a date/time that carries no explicit time
/// zone.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TzDefault {
    /// Leave the value zoneless.
    None,
    /// Interpret in the local time of the host.
    Local,
    /// Interpret as UTC.
    Utc,
}

const ALIASES: &[(&str, TzDefault)] = &[
    ("None", TzDefault::None),
    ("Local", TzDefault::Local),
    ("LocalComputer", TzDefault::Local),
    ("UTC", TzDefault::Utc),
    ("GMT", TzDefault::Utc),
];

impl TzDefault {
    /// The short display name.
    pub fn name(self) -> &'static str {
        match self {
            TzDefault::None => "None",
            TzDefault::Local => "Local",
            TzDefault::Utc => "UTC",
        }
    }

    /// The verbose display name.
    pub fn verbose_name(self) -> &'static str {
        match self {
            TzDefault::None => "no default time zone",
            TzDefault::Local => "local time of the host",
            TzDefault::Utc => "Coordinated Universal Time",
        }
    }

    /// Resolves an alias, case-insensitively. Returns `None` when the
    /// name matches no alias.
    pub fn from_name(name: &str) -> Option<TzDefault> {
        let (_, tz) = ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))?;
        Some(*tz)
    }
}

impl core::fmt::Display for TzDefault {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for TzDefault {
    type Err = Error;

    fn from_str(s: &str) -> Result<TzDefault, Error> {
        TzDefault::from_name(s)
            .ok_or_else(|| err!("unrecognized time zone default {s:?}"))
    }
}

/// A record of a time zone abbreviation change taking effect at a given
/// year.
///
/// Data providers occasionally rename the zone their records are stamped
/// with without restating history. Keeping the change as data lets readers
/// of old records pick the abbreviation that was in force when a record
/// was written.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TzChange {
    effective_year: i16,
    from: String,
    to: String,
}

impl TzChange {
    /// Creates a record stating that `from` became `to` at the start of
    /// `effective_year`.
    pub fn new(
        effective_year: i16,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> TzChange {
        TzChange { effective_year, from: from.into(), to: to.into() }
    }

    /// The first year the new abbreviation is in force.
    pub fn effective_year(&self) -> i16 {
        self.effective_year
    }

    /// The abbreviation in force before the change.
    pub fn from_zone(&self) -> &str {
        &self.from
    }

    /// The abbreviation in force from the effective year on.
    pub fn to_zone(&self) -> &str {
        &self.to
    }

    /// The abbreviation in force in the given year.
    pub fn zone_for_year(&self, year: i16) -> &str {
        if year >= self.effective_year {
            &self.to
        } else {
            &self.from
        }
    }
}

impl core::fmt::Display for TzChange {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{from} becomes {to} in {year}",
            from = self.from,
            to = self.to,
            year = self.effective_year,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn resolves_aliases() {
        assert_eq!(TzDefault::from_name("gmt"), Some(TzDefault::Utc));
        assert_eq!(TzDefault::from_name("localcomputer"), Some(TzDefault::Local));
        assert_eq!(TzDefault::from_name("none"), Some(TzDefault::None));
        assert_eq!(TzDefault::from_name("PST"), None);
        assert!("PST".parse::<TzDefault>().is_err());
    }

    #[test]
    fn change_picks_zone_by_year() {
        let change = TzChange::new(1987, "EST", "EDT");
        assert_eq!(change.zone_for_year(1986), "EST");
        assert_eq!(change.zone_for_year(1987), "EDT");
        assert_eq!(change.zone_for_year(1990), "EDT");
        assert_eq!(change.to_string(), "EST becomes EDT in 1987");
    }
}
