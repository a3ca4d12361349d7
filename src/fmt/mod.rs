/*!
Support for "printf" style date/time parsing.

The entry point is [`DateTimeParser`]: it compiles a format string in the C
`strftime` family once, then extracts fields from any number of input
strings into [`PartialDateTime`](crate::PartialDateTime) values.

# Format strings

A format string is a sequence of literal bytes and directives. The format
and the input are walked in lockstep: each directive consumes a fixed
number of input bytes, and each literal consumes exactly one input byte
*without comparing it to the format byte* - literals are placeholders, not
assertions.

| Directive | Input width | Field |
| --------- | ----------- | ----- |
| `%Y` | 4 | year |
| `%y` | 2 | two-digit year, expanded (see below) |
| `%m` | 2 | month |
| `%b` | 3 | abbreviated month name (`Jan`, `feb`, ...) |
| `%d` | 2 | day |
| `%H` | 2 | hour (24-hour clock) |
| `%M` | 2 | minute |
| `%S` | 2 | second |

`%` followed by any other byte is an *inert* directive: it is recognized
and skipped, extracts nothing, and consumes **zero** bytes of input. Any
literal text following an inert directive is therefore matched against
input that has not moved, which permanently misaligns the two cursors.
This mirrors the behavior of C toolkits this format family descends from;
use [`DateTimeParser::strict`] to reject such formats at construction
instead. A `%` at the very end of the format simply stops the scan.

Numeric directives are strict fixed-width reads: `%m` against `7/` fails
where a greedy `strptime` would accept it. Zero padding is required.

# Two-digit years

`%y` expands through a sliding 100-year window anchored to a pivot year:
with pivot 2025, `24` becomes 2024 while `99` becomes 1999 (a two-digit
year greater than the pivot's last two digits is taken to fall in the
previous century). The pivot is captured from the wall clock at
construction, or injected with the `*_pivot` constructors for
deterministic behavior.

# Example

```
use timefmt::{fmt, Precision};

let dt = fmt::parse("%Y-%m-%d %H:%M", "2013-07-04 12:30")?;
assert_eq!(dt.to_string(), "2013-07-04 12:30");
assert_eq!(dt.precision(), Precision::Minute);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use alloc::boxed::Box;

use crate::{
    error::{err, fmt::ConfigError, Error},
    util::escape,
    value::PartialDateTime,
};

mod parse;

/// Parse the given `input` according to the given `spec` string.
///
/// The spec takes the form `"<type>:<format>"`, where `<type>` selects a
/// [`FormatterType`] by any of its names. When the prefix matches no known
/// type (times contain colons too), or no colon is present, the entire
/// spec is the format string under the default `C` type.
///
/// This routine is the same as building a [`DateTimeParser`] via
/// [`DateTimeParser::from_spec`] and calling
/// [`parse`](DateTimeParser::parse) on it, but may be more convenient to
/// call when a parser is not worth keeping around.
///
/// # Errors
///
/// This returns an error when the spec selects a formatter type other
/// than `C`, when the format string is empty, or when the input does not
/// match the format.
///
/// # Example
///
/// ```
/// use timefmt::fmt;
///
/// let dt = fmt::parse("C:%Y-%m-%d", "2013-07-04")?;
/// assert_eq!(dt.year(), Some(2013));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "std")]
pub fn parse(spec: &str, input: &str) -> Result<PartialDateTime, Error> {
    DateTimeParser::from_spec(spec)?.parse(input)
}

/// A family of format string syntax.
///
/// Only the C family (the `strftime` subset described in the [module
/// documentation](self)) is executable by the parsing engine; the other
/// variants are recognized in specs so that callers get a precise error
/// naming what they asked for, rather than a failed prefix match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatterType {
    /// The C `strftime` family. The only type the engine executes.
    C,
    /// ISO 8601 formats. Recognized, not executable.
    Iso,
    /// Microsoft-style formats. Recognized, not executable.
    Ms,
}

const TYPE_ALIASES: &[(&str, FormatterType)] = &[
    ("C", FormatterType::C),
    ("C/strftime", FormatterType::C),
    ("ISO", FormatterType::Iso),
    ("ISO 8601", FormatterType::Iso),
    ("MS", FormatterType::Ms),
    ("Microsoft", FormatterType::Ms),
];

impl FormatterType {
    /// The short display name.
    pub fn name(self) -> &'static str {
        match self {
            FormatterType::C => "C",
            FormatterType::Iso => "ISO",
            FormatterType::Ms => "MS",
        }
    }

    /// The verbose display name.
    pub fn verbose_name(self) -> &'static str {
        match self {
            FormatterType::C => "C/strftime",
            FormatterType::Iso => "ISO 8601",
            FormatterType::Ms => "Microsoft",
        }
    }

    /// Resolves a short or verbose name, case-insensitively. Returns
    /// `None` when the name matches no alias.
    pub fn from_name(name: &str) -> Option<FormatterType> {
        let (_, ty) = TYPE_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))?;
        Some(*ty)
    }
}

impl core::fmt::Display for FormatterType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for FormatterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<FormatterType, Error> {
        FormatterType::from_name(s)
            .ok_or_else(|| err!("unrecognized formatter type {s:?}"))
    }
}

/// A compiled date/time format.
///
/// A parser is immutable after construction: the format string, the
/// formatter type and the century context used for two-digit years are all
/// frozen. It is therefore freely shareable across threads, and
/// [`parse`](DateTimeParser::parse) may be called any number of times.
///
/// # Century context
///
/// The constructors capture a pivot year - by default the current year
/// read from the wall clock once, never re-read - from which the parser
/// derives a century (the pivot rounded down to a multiple of 100) and the
/// pivot's final two digits. `%y` directives expand against this frozen
/// context; see the [module documentation](self).
///
/// # Example
///
/// ```
/// use timefmt::{DateTimeParser, FormatterType};
///
/// let parser = DateTimeParser::new(FormatterType::C, "%m/%d/%Y")?;
/// let dt = parser.parse("07/04/2013")?;
/// assert_eq!(dt.to_string(), "2013-07-04");
///
/// // The same parser can be reused against a caller-owned target.
/// let mut target = timefmt::PartialDateTime::new();
/// parser.parse_into(&mut target, "12/25/1999")?;
/// assert_eq!(target.to_string(), "1999-12-25");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct DateTimeParser {
    ty: FormatterType,
    fmt: Box<[u8]>,
    century: i16,
    year2: i16,
    strict: bool,
}

impl DateTimeParser {
    /// Creates a parser for the given formatter type and format string,
    /// with the two-digit-year pivot captured from the wall clock.
    ///
    /// # Errors
    ///
    /// This returns an error when `ty` is any type other than
    /// [`FormatterType::C`] (the only type the engine executes), or when
    /// the format string is empty.
    #[cfg(feature = "std")]
    pub fn new(
        ty: FormatterType,
        format: &str,
    ) -> Result<DateTimeParser, Error> {
        DateTimeParser::with_pivot(ty, format, wall_clock_year())
    }

    /// Creates a parser from a combined `"<type>:<format>"` spec, with the
    /// two-digit-year pivot captured from the wall clock.
    ///
    /// When the prefix before the first `:` matches no known formatter
    /// type name, or no `:` is present, the entire spec is treated as the
    /// format string under the default `C` type.
    ///
    /// # Errors
    ///
    /// Same as [`DateTimeParser::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::DateTimeParser;
    ///
    /// // Explicit type prefix.
    /// let parser = DateTimeParser::from_spec("C:%Y")?;
    /// assert_eq!(parser.parse("2013")?.year(), Some(2013));
    ///
    /// // A recognized but unsupported type is a construction error.
    /// assert!(DateTimeParser::from_spec("ISO:%Y").is_err());
    ///
    /// // An unrecognized prefix means the whole spec is the format.
    /// let parser = DateTimeParser::from_spec("%H:%M")?;
    /// assert_eq!(parser.parse("12:30")?.minute(), Some(30));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[cfg(feature = "std")]
    pub fn from_spec(spec: &str) -> Result<DateTimeParser, Error> {
        DateTimeParser::from_spec_with_pivot(spec, wall_clock_year())
    }

    /// Like [`DateTimeParser::new`], but with an explicit pivot year
    /// instead of the wall clock.
    ///
    /// Injecting the pivot makes two-digit-year expansion deterministic,
    /// which tests and replay of historical data both want.
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::{DateTimeParser, FormatterType};
    ///
    /// let parser =
    ///     DateTimeParser::with_pivot(FormatterType::C, "%y", 2025)?;
    /// assert_eq!(parser.parse("24")?.year(), Some(2024));
    /// assert_eq!(parser.parse("99")?.year(), Some(1999));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_pivot(
        ty: FormatterType,
        format: &str,
        pivot_year: i16,
    ) -> Result<DateTimeParser, Error> {
        if ty != FormatterType::C {
            return Err(ConfigError::UnsupportedFormatter { got: ty }.into());
        }
        if format.is_empty() {
            return Err(ConfigError::MissingFormat.into());
        }
        let century = pivot_year - pivot_year.rem_euclid(100);
        let year2 = pivot_year - century;
        trace!(
            "compiled {ty} format {format:?} with century context {century}+{year2}",
            ty = ty.name(),
        );
        Ok(DateTimeParser {
            ty,
            fmt: format.as_bytes().into(),
            century,
            year2,
            strict: false,
        })
    }

    /// Like [`DateTimeParser::from_spec`], but with an explicit pivot year
    /// instead of the wall clock.
    pub fn from_spec_with_pivot(
        spec: &str,
        pivot_year: i16,
    ) -> Result<DateTimeParser, Error> {
        let (ty, format) = match spec.split_once(':') {
            Some((prefix, rest)) => match FormatterType::from_name(prefix) {
                Some(ty) => (ty, rest),
                None => {
                    trace!(
                        "prefix in {spec:?} is not a formatter type, \
                         treating the whole spec as a C format",
                    );
                    (FormatterType::C, spec)
                }
            },
            None => (FormatterType::C, spec),
        };
        DateTimeParser::with_pivot(ty, format, pivot_year)
    }

    /// Configures whether inert directives are rejected.
    ///
    /// An inert directive (`%` followed by anything outside the directive
    /// table) extracts nothing and consumes no input, so any literal text
    /// after one is matched against misaligned input. A strict parser
    /// refuses such formats up front.
    ///
    /// # Errors
    ///
    /// When `yes` is true and the format contains an inert directive, this
    /// returns an invalid-format error naming the directive.
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::{DateTimeParser, FormatterType};
    ///
    /// let parser = DateTimeParser::new(FormatterType::C, "%a %d")?;
    /// let err = parser.strict(true).unwrap_err();
    /// assert!(err.is_invalid_format());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strict(mut self, yes: bool) -> Result<DateTimeParser, Error> {
        if yes {
            reject_inert_directives(&self.fmt)?;
        }
        self.strict = yes;
        Ok(self)
    }

    /// The formatter type this parser was built with.
    pub fn formatter_type(&self) -> FormatterType {
        self.ty
    }

    /// The pivot year anchoring two-digit-year expansion.
    pub fn pivot_year(&self) -> i16 {
        self.century + self.year2
    }

    /// Returns true when this parser rejects inert directives.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parses the given input into a fresh [`PartialDateTime`].
    ///
    /// On success the result carries the finest precision that a directive
    /// populated (year level when nothing finer appeared) and is in
    /// validated mode.
    ///
    /// # Errors
    ///
    /// This returns an error when the input does not match the format: a
    /// fixed-width field runs past the end of the input, a numeric field
    /// contains a non-digit, or a month abbreviation is unrecognized.
    pub fn parse(&self, input: &str) -> Result<PartialDateTime, Error> {
        let mut target = PartialDateTime::new();
        self.parse_into(&mut target, input)?;
        Ok(target)
    }

    /// Parses the given input into a caller-supplied target.
    ///
    /// The target is first reset to the all-unset permissive state, so any
    /// prior field values are discarded. On success it is flipped to
    /// validated mode with the populated precision, exactly as
    /// [`parse`](DateTimeParser::parse) leaves its result.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](DateTimeParser::parse). After a failed parse the
    /// target may be partially populated and still permissive; there is no
    /// rollback, and callers should discard it.
    pub fn parse_into(
        &self,
        target: &mut PartialDateTime,
        input: &str,
    ) -> Result<(), Error> {
        use crate::{error::ErrorContext, value::Validation};

        target.reset();
        let mut p = parse::Parser {
            fmt: &self.fmt,
            inp: input.as_bytes(),
            tm: target,
            century: self.century,
            year2: self.year2,
            finest: crate::value::Precision::Year,
        };
        p.parse().context(crate::error::fmt::Error::FailedParse)?;
        let finest = p.finest;
        target.set_precision(finest);
        target.set_validation(Validation::Validated);
        Ok(())
    }
}

impl core::fmt::Debug for DateTimeParser {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("DateTimeParser")
            .field("type", &self.ty)
            .field("format", &escape::Bytes(&self.fmt))
            .field("pivot_year", &self.pivot_year())
            .field("strict", &self.strict)
            .finish()
    }
}

/// Returns an error for the first inert directive in the format, if any.
fn reject_inert_directives(mut fmt: &[u8]) -> Result<(), Error> {
    while !fmt.is_empty() {
        if fmt[0] != b'%' {
            fmt = &fmt[1..];
            continue;
        }
        fmt = &fmt[1..];
        let Some(&directive) = fmt.first() else { break };
        if !matches!(
            directive,
            b'b' | b'd' | b'H' | b'M' | b'm' | b'S' | b'Y' | b'y'
        ) {
            return Err(ConfigError::StrictInertDirective { directive }.into());
        }
        fmt = &fmt[1..];
    }
    Ok(())
}

/// Reads the current year from the system clock.
#[cfg(feature = "std")]
fn wall_clock_year() -> i16 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let seconds = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        // A clock set before 1970. Unlikely, but representable.
        Err(err) => -(err.duration().as_secs() as i64),
    };
    crate::util::common::year_of_unix_seconds(seconds)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn formatter_type_aliases() {
        for (alias, expected) in TYPE_ALIASES {
            assert_eq!(FormatterType::from_name(alias), Some(*expected));
            assert_eq!(
                FormatterType::from_name(&alias.to_lowercase()),
                Some(*expected),
            );
        }
        assert_eq!(FormatterType::from_name("POSIX"), None);
        assert!("POSIX".parse::<FormatterType>().is_err());
    }

    #[test]
    fn spec_resolution() {
        // Explicit type prefix, short and verbose, any case.
        let p = DateTimeParser::from_spec_with_pivot("C:%Y", 2025).unwrap();
        assert_eq!(p.formatter_type(), FormatterType::C);
        let p = DateTimeParser::from_spec_with_pivot("c/strftime:%Y", 2025)
            .unwrap();
        assert_eq!(p.formatter_type(), FormatterType::C);

        // Unknown prefix: the whole spec is the format. A parser built
        // this way matches one built from the explicit pair.
        let combined =
            DateTimeParser::from_spec_with_pivot("%H:%M", 2025).unwrap();
        let explicit =
            DateTimeParser::with_pivot(FormatterType::C, "%H:%M", 2025)
                .unwrap();
        let dt1 = combined.parse("12:30").unwrap();
        let dt2 = explicit.parse("12:30").unwrap();
        assert_eq!(dt1, dt2);

        // No colon at all.
        let p = DateTimeParser::from_spec_with_pivot("%Y", 2025).unwrap();
        assert_eq!(p.parse("2013").unwrap().year(), Some(2013));
    }

    #[test]
    fn unsupported_formatter() {
        let err =
            DateTimeParser::from_spec_with_pivot("ISO:2013-07-04", 2025)
                .unwrap_err();
        assert!(err.is_unsupported_formatter());
        assert!(err.to_string().contains("ISO"));

        let err =
            DateTimeParser::with_pivot(FormatterType::Ms, "%Y", 2025)
                .unwrap_err();
        assert!(err.is_unsupported_formatter());
    }

    #[test]
    fn missing_format() {
        let err = DateTimeParser::with_pivot(FormatterType::C, "", 2025)
            .unwrap_err();
        assert!(err.is_invalid_format());
        // A spec that resolves to an empty format is the same error.
        let err =
            DateTimeParser::from_spec_with_pivot("C:", 2025).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn strict_rejects_inert_directives() {
        let p = DateTimeParser::with_pivot(FormatterType::C, "%a-%d", 2025)
            .unwrap();
        let err = p.strict(true).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("%a"));

        // Strict mode on a clean format is fine, and so is turning it
        // back off.
        let p = DateTimeParser::with_pivot(FormatterType::C, "%Y-%m", 2025)
            .unwrap()
            .strict(true)
            .unwrap();
        assert!(p.is_strict());
        let p = p.strict(false).unwrap();
        assert!(!p.is_strict());
    }

    #[test]
    fn century_context() {
        let p =
            DateTimeParser::with_pivot(FormatterType::C, "%y", 2025).unwrap();
        assert_eq!(p.pivot_year(), 2025);
        let p =
            DateTimeParser::with_pivot(FormatterType::C, "%y", 1999).unwrap();
        assert_eq!(p.pivot_year(), 1999);
    }

    #[cfg(feature = "std")]
    #[test]
    fn wall_clock_constructors() {
        // No assertion on the specific year; just that the plumbing holds
        // together and yields a sane century context.
        let p = DateTimeParser::new(FormatterType::C, "%Y").unwrap();
        assert!(p.pivot_year() >= 2024);

        let dt = parse("%Y-%m-%d", "2013-07-04").unwrap();
        assert_eq!(dt.to_string(), "2013-07-04");
    }
}
