use crate::{error, fmt::FormatterType, util::escape};

/// Errors rejecting a parser configuration at construction time.
#[derive(Clone, Debug)]
pub(crate) enum ConfigError {
    UnsupportedFormatter { got: FormatterType },
    MissingFormat,
    StrictInertDirective { directive: u8 },
}

impl From<ConfigError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ConfigError) -> error::Error {
        error::ErrorKind::Config(err).into()
    }
}

impl error::IntoError for ConfigError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ConfigError::*;

        match *self {
            UnsupportedFormatter { got } => write!(
                f,
                "formatter type `{name}` ({verbose}) is recognized, \
                 but only the `{c}` formatter type can be used for parsing",
                name = got.name(),
                verbose = got.verbose_name(),
                c = FormatterType::C.name(),
            ),
            MissingFormat => {
                f.write_str("a format string must be provided and non-empty")
            }
            StrictInertDirective { directive } => write!(
                f,
                "directive `%{directive}` is recognized but extracts \
                 nothing and consumes no input, \
                 which a strict parser rejects",
                directive = escape::Byte(directive),
            ),
        }
    }
}

/// Scan-level failures, used as context around the root cause.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    DirectiveFailure { directive: u8 },
    FailedParse,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Fmt(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            DirectiveFailure { directive } => write!(
                f,
                "%{directive} failed",
                directive = escape::Byte(directive),
            ),
            FailedParse => f.write_str("format string parsing failed"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum ParseError {
    ExpectedMonthAbbreviation,
    ExpectedMonthAbbreviationTooShort,
    ParseDay,
    ParseHour,
    ParseMinute,
    ParseMonth,
    ParseSecond,
    ParseYear,
    ParseYearTwoDigit,
}

impl From<ParseError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseError) -> error::Error {
        error::ErrorKind::Parse(err).into()
    }
}

impl error::IntoError for ParseError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseError::*;

        match *self {
            ExpectedMonthAbbreviation => {
                f.write_str("unrecognized month name abbreviation")
            }
            ExpectedMonthAbbreviationTooShort => f.write_str(
                "expected to find month name abbreviation, \
                 but the remaining input is too short to contain one",
            ),
            ParseDay => f.write_str("failed to parse day number"),
            ParseHour => f.write_str("failed to parse hour number"),
            ParseMinute => f.write_str("failed to parse minute number"),
            ParseMonth => f.write_str("failed to parse month number"),
            ParseSecond => f.write_str("failed to parse second number"),
            ParseYear => f.write_str("failed to parse year"),
            ParseYearTwoDigit => f.write_str("failed to parse 2-digit year"),
        }
    }
}
