use crate::{error, util::escape::Byte};

#[derive(Clone, Debug)]
pub(crate) enum ParseIntError {
    TooShort { expected: usize, remaining: usize },
    InvalidDigit(u8),
}

impl From<ParseIntError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseIntError) -> error::Error {
        error::ErrorKind::ParseInt(err).into()
    }
}

impl error::IntoError for ParseIntError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ParseIntError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseIntError::*;

        match *self {
            TooShort { expected, remaining } => write!(
                f,
                "expected {expected} digits, \
                 but only {remaining} bytes of input remain",
            ),
            InvalidDigit(got) => {
                write!(f, "invalid digit, expected 0-9 but got {}", Byte(got))
            }
        }
    }
}
