use crate::{
    error::{
        fmt::{Error as E, ParseError as PE},
        Error, ErrorContext,
    },
    util::parse,
    value::{PartialDateTime, Precision},
};

pub(super) struct Parser<'f, 'i, 't> {
    pub(super) fmt: &'f [u8],
    pub(super) inp: &'i [u8],
    pub(super) tm: &'t mut PartialDateTime,
    pub(super) century: i16,
    pub(super) year2: i16,
    pub(super) finest: Precision,
}

impl<'f, 'i, 't> Parser<'f, 'i, 't> {
    pub(super) fn parse(&mut self) -> Result<(), Error> {
        let fail = |directive| E::DirectiveFailure { directive };

        while !self.fmt.is_empty() {
            if self.f() != b'%' {
                self.parse_literal();
                continue;
            }
            if !self.bump_fmt() {
                // A trailing `%` with no directive letter ends the scan.
                break;
            }
            match self.f() {
                b'b' => self.parse_month_abbrev().context(fail(b'b'))?,
                b'd' => self.parse_day().context(fail(b'd'))?,
                b'H' => self.parse_hour().context(fail(b'H'))?,
                b'M' => self.parse_minute().context(fail(b'M'))?,
                b'm' => self.parse_month().context(fail(b'm'))?,
                b'S' => self.parse_second().context(fail(b'S'))?,
                b'Y' => self.parse_year().context(fail(b'Y'))?,
                b'y' => self.parse_year2().context(fail(b'y'))?,
                // Everything else after a `%` is inert: recognized,
                // extracts nothing, and the input cursor does not move.
                _ => {
                    self.bump_fmt();
                }
            }
        }
        Ok(())
    }

    /// Returns the byte at the current position of the format string.
    ///
    /// # Panics
    ///
    /// This panics when the entire format string has been consumed.
    fn f(&self) -> u8 {
        self.fmt[0]
    }

    /// Bumps the position of the format string.
    ///
    /// This returns true in precisely the cases where `self.f()` will not
    /// panic. i.e., When the end of the format string hasn't been reached
    /// yet.
    fn bump_fmt(&mut self) -> bool {
        self.fmt = &self.fmt[1..];
        !self.fmt.is_empty()
    }

    /// Records that a directive populated a field at the given precision.
    fn touch(&mut self, precision: Precision) {
        if precision.finer_than(self.finest) {
            self.finest = precision;
        }
    }

    // We write out a parsing routine for each directive below. Each
    // assumes that the parser is positioned on the directive letter, and
    // finishes by bumping the format cursor past it.

    /// Consumes a literal: one byte of format, one byte of input.
    ///
    /// The input byte is a placeholder and is never compared against the
    /// format byte. Once the input is exhausted, literals consume format
    /// only.
    fn parse_literal(&mut self) {
        if !self.inp.is_empty() {
            self.inp = &self.inp[1..];
        }
        self.fmt = &self.fmt[1..];
    }

    /// Parses `%d`, the day of the month, from two digits.
    fn parse_day(&mut self) -> Result<(), Error> {
        let (day, inp) =
            parse::fixed_width_i64(self.inp, 2).context(PE::ParseDay)?;
        self.inp = inp;
        self.tm.set_day(day as i8)?;
        self.touch(Precision::Day);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%H`, the hour on a 24-hour clock, from two digits.
    fn parse_hour(&mut self) -> Result<(), Error> {
        let (hour, inp) =
            parse::fixed_width_i64(self.inp, 2).context(PE::ParseHour)?;
        self.inp = inp;
        self.tm.set_hour(hour as i8)?;
        self.touch(Precision::Hour);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%M`, the minute, from two digits.
    fn parse_minute(&mut self) -> Result<(), Error> {
        let (minute, inp) =
            parse::fixed_width_i64(self.inp, 2).context(PE::ParseMinute)?;
        self.inp = inp;
        self.tm.set_minute(minute as i8)?;
        self.touch(Precision::Minute);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%m`, the month, from two digits.
    fn parse_month(&mut self) -> Result<(), Error> {
        let (month, inp) =
            parse::fixed_width_i64(self.inp, 2).context(PE::ParseMonth)?;
        self.inp = inp;
        self.tm.set_month(month as i8)?;
        self.touch(Precision::Month);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%S`, the second, from two digits.
    fn parse_second(&mut self) -> Result<(), Error> {
        let (second, inp) =
            parse::fixed_width_i64(self.inp, 2).context(PE::ParseSecond)?;
        self.inp = inp;
        self.tm.set_second(second as i8)?;
        self.touch(Precision::Second);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%b`, an abbreviated month name.
    fn parse_month_abbrev(&mut self) -> Result<(), Error> {
        let (index, inp) = parse_month_name_abbrev(self.inp)?;
        self.inp = inp;
        // OK because 0 <= index <= 11.
        self.tm.set_month(index as i8 + 1)?;
        self.touch(Precision::Month);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%Y`, a four digit year, used directly.
    fn parse_year(&mut self) -> Result<(), Error> {
        let (year, inp) =
            parse::fixed_width_i64(self.inp, 4).context(PE::ParseYear)?;
        self.inp = inp;
        self.tm.set_year(year as i16)?;
        self.touch(Precision::Year);
        self.bump_fmt();
        Ok(())
    }

    /// Parses `%y`, a two digit year, expanded through the century
    /// context.
    fn parse_year2(&mut self) -> Result<(), Error> {
        let (year2, inp) = parse::fixed_width_i64(self.inp, 2)
            .context(PE::ParseYearTwoDigit)?;
        self.inp = inp;

        // A two-digit year beyond the pivot's final two digits is taken
        // to fall in the century before the pivot, not after it.
        let year2 = year2 as i16;
        let mut year = self.century + year2;
        if year2 > self.year2 {
            year -= 100;
        }
        self.tm.set_year(year)?;
        self.touch(Precision::Year);
        self.bump_fmt();
        Ok(())
    }
}

/// Parses a three byte month name abbreviation, ASCII case insensitively.
///
/// On success, the zero based month index is returned, along with any
/// remaining unparsed input.
fn parse_month_name_abbrev<'i>(
    input: &'i [u8],
) -> Result<(usize, &'i [u8]), Error> {
    if input.len() < 3 {
        return Err(Error::from(PE::ExpectedMonthAbbreviationTooShort));
    }
    let (x, input) = input.split_at(3);
    let candidate = &[
        x[0].to_ascii_lowercase(),
        x[1].to_ascii_lowercase(),
        x[2].to_ascii_lowercase(),
    ];
    let index = match candidate {
        b"jan" => 0,
        b"feb" => 1,
        b"mar" => 2,
        b"apr" => 3,
        b"may" => 4,
        b"jun" => 5,
        b"jul" => 6,
        b"aug" => 7,
        b"sep" => 8,
        b"oct" => 9,
        b"nov" => 10,
        b"dec" => 11,
        _ => return Err(Error::from(PE::ExpectedMonthAbbreviation)),
    };
    Ok((index, input))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{
        fmt::{DateTimeParser, FormatterType},
        value::{PartialDateTime, Precision, Validation},
    };

    fn parser(format: &str) -> DateTimeParser {
        DateTimeParser::with_pivot(FormatterType::C, format, 2025).unwrap()
    }

    #[test]
    fn ok_parse_date() {
        let dt = parser("%Y-%m-%d").parse("2013-07-04").unwrap();
        assert_eq!(dt.year(), Some(2013));
        assert_eq!(dt.month(), Some(7));
        assert_eq!(dt.day(), Some(4));
        assert_eq!(dt.precision(), Precision::Day);
        assert_eq!(dt.validation(), Validation::Validated);
        assert_eq!(dt.hour(), None);
    }

    #[test]
    fn ok_parse_datetime() {
        let dt = parser("%Y-%m-%d %H:%M:%S")
            .parse("2013-07-04 12:30:45")
            .unwrap();
        assert_eq!(dt.to_string(), "2013-07-04 12:30:45");
        assert_eq!(dt.precision(), Precision::Second);
    }

    #[test]
    fn ok_directive_order_does_not_matter() {
        let dt = parser("%d/%m/%Y").parse("04/07/2013").unwrap();
        assert_eq!(dt.to_string(), "2013-07-04");
    }

    #[test]
    fn two_digit_year_window() {
        // Pivot 2025: century 2000, final two digits 25.
        let p = parser("%y");
        // Not greater than 25: stays in the current century.
        assert_eq!(p.parse("24").unwrap().year(), Some(2024));
        assert_eq!(p.parse("25").unwrap().year(), Some(2025));
        assert_eq!(p.parse("00").unwrap().year(), Some(2000));
        // Greater than 25: rolls back a century.
        assert_eq!(p.parse("99").unwrap().year(), Some(1999));
        assert_eq!(p.parse("26").unwrap().year(), Some(1926));
    }

    #[test]
    fn two_digit_year_window_other_pivots() {
        let p = DateTimeParser::with_pivot(FormatterType::C, "%y", 1999)
            .unwrap();
        assert_eq!(p.parse("99").unwrap().year(), Some(1999));
        assert_eq!(p.parse("00").unwrap().year(), Some(1900));

        let p = DateTimeParser::with_pivot(FormatterType::C, "%y", 2000)
            .unwrap();
        assert_eq!(p.parse("00").unwrap().year(), Some(2000));
        assert_eq!(p.parse("01").unwrap().year(), Some(1901));
    }

    #[test]
    fn precision_tracks_finest_directive() {
        assert_eq!(
            parser("%Y").parse("2013").unwrap().precision(),
            Precision::Year,
        );
        assert_eq!(
            parser("%Y-%m").parse("2013-07").unwrap().precision(),
            Precision::Month,
        );
        assert_eq!(
            parser("%Y-%m-%d").parse("2013-07-04").unwrap().precision(),
            Precision::Day,
        );
        assert_eq!(
            parser("%H:%M").parse("12:30").unwrap().precision(),
            Precision::Minute,
        );
        // The finest directive wins regardless of position.
        assert_eq!(
            parser("%S %Y").parse("59 2013").unwrap().precision(),
            Precision::Second,
        );
    }

    #[test]
    fn parse_into_resets_target() {
        let mut target = PartialDateTime::new();
        let p = parser("%Y-%m-%d");
        p.parse_into(&mut target, "2013-07-04").unwrap();
        let first = target.clone();
        // Parsing again into the same target, same input, gives identical
        // fields: nothing accumulates across calls.
        p.parse_into(&mut target, "2013-07-04").unwrap();
        assert_eq!(target, first);

        // And a reused target drops everything from the previous parse,
        // including fields the new format never touches.
        let hours = parser("%H:%M");
        hours.parse_into(&mut target, "12:30").unwrap();
        assert_eq!(target.year(), None);
        assert_eq!(target.hour(), Some(12));
    }

    #[test]
    fn month_abbreviations() {
        let p = parser("%b");
        assert_eq!(p.parse("Jan").unwrap().month(), Some(1));
        assert_eq!(p.parse("jul").unwrap().month(), Some(7));
        assert_eq!(p.parse("DEC").unwrap().month(), Some(12));
        assert_eq!(p.parse("Jan").unwrap().precision(), Precision::Month);

        let err = p.parse("Zzz").unwrap_err();
        assert!(err.is_malformed_input());
        // Too short for an abbreviation at all.
        let err = p.parse("Ja").unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn input_too_short() {
        let err = parser("%Y-%m-%d").parse("2013-07").unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("%d"));
    }

    #[test]
    fn non_digit_input() {
        let err = parser("%Y-%m-%d").parse("2013-ab-04").unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("%m"));
    }

    #[test]
    fn fixed_width_is_not_greedy() {
        // A greedy strptime would accept a one digit month here. The
        // fixed-width read swallows `7/` and fails on the slash.
        let err = parser("%m/%d").parse("7/04").unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn literals_are_placeholders() {
        // Literal bytes consume input without being compared to it.
        let dt = parser("%Y/%m/%d").parse("2013-07-04").unwrap();
        assert_eq!(dt.to_string(), "2013-07-04");
    }

    #[test]
    fn trailing_percent_stops_scan() {
        let dt = parser("%Y %").parse("2013 ").unwrap();
        assert_eq!(dt.year(), Some(2013));
        assert_eq!(dt.precision(), Precision::Year);
    }

    #[test]
    fn inert_directive_consumes_no_input() {
        // `%a` extracts nothing and leaves the input cursor alone, so
        // `%d` starts right where `%a` did.
        let dt = parser("%a%d").parse("07 Mon").unwrap();
        assert_eq!(dt.day(), Some(7));
    }

    #[test]
    fn inert_directive_misaligns_following_literals() {
        // After the zero-consumption `%a`, the literal `-` eats the `x`
        // and `%d` is left staring at `y-`. The misalignment is permanent.
        let err = parser("%a-%d").parse("xy-07").unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn malformed_input_leaves_partial_target() {
        let mut target = PartialDateTime::new();
        let err = parser("%Y-%m-%d")
            .parse_into(&mut target, "2013-07")
            .unwrap_err();
        assert!(err.is_malformed_input());
        // No rollback: the fields parsed before the failure are visible,
        // and the target never reached validated mode.
        assert_eq!(target.year(), Some(2013));
        assert_eq!(target.month(), Some(7));
        assert_eq!(target.day(), None);
        assert_eq!(target.validation(), Validation::Permissive);
    }

    #[test]
    fn out_of_range_fields_parse_permissively() {
        // The scan records fields without validation; `99` is stored as
        // the month even though no such month exists. Validation applies
        // to mutations made after the parse.
        let dt = parser("%m").parse("99").unwrap();
        assert_eq!(dt.month(), Some(99));
    }

    #[test]
    fn second_sixty_is_recorded() {
        let dt = parser("%S").parse("60").unwrap();
        assert_eq!(dt.second(), Some(60));
    }

    #[test]
    fn trailing_input_is_ignored() {
        // The format drives the scan; input beyond it is left alone.
        let dt = parser("%Y").parse("2013-07-04").unwrap();
        assert_eq!(dt.year(), Some(2013));
        assert_eq!(dt.month(), None);
    }

    quickcheck::quickcheck! {
        fn prop_roundtrip_date(
            year: u16,
            month: u8,
            day: u8
        ) -> quickcheck::TestResult {
            use alloc::format;

            let year = i16::try_from(year % 10_000).unwrap();
            let month = i8::try_from(month % 12 + 1).unwrap();
            let days =
                crate::util::common::days_in_month(year, month);
            let day = i8::try_from(day % (days as u8) + 1).unwrap();

            let input = format!("{year:04}-{month:02}-{day:02}");
            let dt = parser("%Y-%m-%d").parse(&input).unwrap();
            quickcheck::TestResult::from_bool(
                dt.year() == Some(year)
                    && dt.month() == Some(month)
                    && dt.day() == Some(day),
            )
        }

        fn prop_parse_is_idempotent(
            year: u16,
            month: u8,
            day: u8
        ) -> quickcheck::TestResult {
            use alloc::format;

            let year = year % 10_000;
            let month = month % 12 + 1;
            let day = day % 28 + 1;
            let input = format!("{year:04}-{month:02}-{day:02}");

            let p = parser("%Y-%m-%d");
            let mut target = PartialDateTime::new();
            p.parse_into(&mut target, &input).unwrap();
            let once = target.clone();
            p.parse_into(&mut target, &input).unwrap();
            quickcheck::TestResult::from_bool(target == once)
        }
    }
}
