use alloc::sync::Arc;

pub(crate) mod fmt;
pub(crate) mod util;
pub(crate) mod value;

/// An error that can occur in this crate.
///
/// Most errors come from one of three places: asking for a formatter family
/// the parsing engine does not execute, handing the parser a format string
/// it cannot accept, or handing a parser input that does not match its
/// format. Field setters on a validated
/// [`PartialDateTime`](crate::PartialDateTime) produce errors as well.
///
/// # Introspection is limited
///
/// Other than implementing the [`std::error::Error`] trait when the `std`
/// feature is enabled, the [`core::fmt::Debug`] trait and the
/// [`core::fmt::Display`] trait, this error type provides a small set of
/// predicates ([`Error::is_unsupported_formatter`],
/// [`Error::is_invalid_format`], [`Error::is_malformed_input`]) that mirror
/// how callers are expected to branch on failure. The predicates are not
/// exhaustive: some errors return `false` for all of them.
///
/// # Design
///
/// One error type serves the whole crate. Finer grained public error types
/// compose poorly once errors start flowing through layers that each add
/// their own context, so the layering lives inside this type instead: every
/// error is a chain of structured kinds, displayed from the highest level
/// context down to the root cause.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// The `Arc` makes an `Error` cloneable, makes clones cheap and keeps
    /// the size of `Error` at one word.
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from Rust's
    /// standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// Callers should generally use their own error types. But in some
    /// circumstances, it can be convenient to manufacture an error value
    /// for this crate specifically.
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated from requesting a formatter
    /// family that the parsing engine does not execute.
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::DateTimeParser;
    ///
    /// let err = DateTimeParser::from_spec("ISO:%Y").unwrap_err();
    /// assert!(err.is_unsupported_formatter());
    /// ```
    pub fn is_unsupported_formatter(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Config(fmt::ConfigError::UnsupportedFormatter { .. })
        )
    }

    /// Returns true when this error originated from a format string that
    /// was rejected at construction time. This covers an empty format
    /// string, and, for strict parsers, a format containing an inert
    /// directive.
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::{DateTimeParser, FormatterType};
    ///
    /// let err = DateTimeParser::new(FormatterType::C, "").unwrap_err();
    /// assert!(err.is_invalid_format());
    /// ```
    pub fn is_invalid_format(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Config(
                fmt::ConfigError::MissingFormat
                    | fmt::ConfigError::StrictInertDirective { .. }
            )
        )
    }

    /// Returns true when this error originated from input that did not
    /// match the parser's format string: a fixed-width field ran past the
    /// end of the input, a numeric field contained a non-digit, or a month
    /// abbreviation was not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use timefmt::{DateTimeParser, FormatterType};
    ///
    /// let parser = DateTimeParser::new(FormatterType::C, "%Y-%m-%d")?;
    /// let err = parser.parse("2013-07").unwrap_err();
    /// assert!(err.is_malformed_input());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Parse(_) | ErrorKind::ParseInt(_)
        )
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "seconds")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(inner.cause.is_none(), "cause of consequence must be `None`");
        // OK because we just created this error so the Arc has one
        // reference.
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        // OK because `Error::chain` is guaranteed to return a non-empty
        // iterator.
        self.chain().last().unwrap()
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause. That is, the error closest to the point where something
    /// has gone wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f
                    .debug_struct("Error")
                    .field("kind", &"None")
                    .finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Config(fmt::ConfigError),
    Fmt(fmt::Error),
    Parse(fmt::ParseError),
    ParseInt(util::ParseIntError),
    Range(RangeError),
    Value(value::Error),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Config(ref err) => err.fmt(f),
            Fmt(ref err) => err.fmt(f),
            Parse(ref err) => err.fmt(f),
            ParseInt(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            Value(ref err) => err.fmt(f),
            Unknown => f.write_str("unknown timefmt error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Some(Arc::new(ErrorInner { kind, cause: None })) }
    }
}

/// A generic error message.
///
/// Structured kinds cover everything this crate produces on its own; this
/// exists to support the `Error::from_args` public API (and the internal
/// `err!` macro), which permits manufacturing an `Error` from an arbitrary
/// message.
struct AdhocError {
    message: alloc::boxed::Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and
/// maximum allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i64,
    min: i64,
    max: i64,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> RangeError {
        RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RangeError {}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make [`ErrorContext::context`] work
/// without needing to rely on public `From` impls, which would otherwise
/// pin the internal error kinds into the public API.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    ///
    /// Note that if an `Error` is given for `consequent`, then this panics
    /// if it has a cause. (Because the cause would otherwise be dropped. An
    /// error causal chain is just a linked list, not a tree.)
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful if the creation of the consequent error is not
    /// otherwise guarded and when error construction is potentially
    /// "costly" (i.e., it allocates). The closure avoids paying the cost of
    /// contextual error creation in the happy path.
    #[allow(dead_code)]
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    #[inline(always)]
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    #[inline(always)]
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::from_args(core::format_args!($($tt)*))
    }}
}

pub(crate) use err;
