use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    DayOutOfBoundsForMonth { day: i8, month: i8, days: i8 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Value(err).into()
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
            DayOutOfBoundsForMonth { day, month, days } => write!(
                f,
                "day {day} is out of bounds for month {month}, \
                 which has {days} days",
            ),
        }
    }
}
