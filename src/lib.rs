/*!
A toolkit for "printf" style date/time parsing.

The centerpiece of this crate is [`DateTimeParser`](fmt::DateTimeParser): a
format-string interpreter in the C `strftime` family that walks a format
string and a data string in lockstep and extracts year, month, day, hour,
minute and second fields into a [`PartialDateTime`](value::PartialDateTime).
Unlike a full `strptime`, every numeric directive consumes a fixed number of
bytes, two-digit years are expanded with a sliding century window anchored to
"now", and the result keeps track of the finest field that was actually
populated.

Around the parser sit the small pieces such a toolkit needs: a partial
date/time value with a permissive/validated mode switch, alias-resolving
enumerations for selecting format families and classifying series data, and
plain value holders for ranges, seasonal windows and annotation events.

# Example

Parse a date and inspect the precision that was populated:

```
use timefmt::{DateTimeParser, FormatterType, Precision};

let parser = DateTimeParser::new(FormatterType::C, "%Y-%m-%d")?;
let dt = parser.parse("2013-07-04")?;
assert_eq!(dt.year(), Some(2013));
assert_eq!(dt.month(), Some(7));
assert_eq!(dt.day(), Some(4));
assert_eq!(dt.precision(), Precision::Day);

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **std** (enabled by default) - Enables the wall-clock constructors (which
  anchor the two-digit-year window to the current year) and the
  `std::error::Error` trait implementation. Without it, use the `*_pivot`
  constructors to supply the anchor year explicitly.
* **logging** - Routes internal diagnostics through the [`log`] crate.
* **serde** - Serialization support for the public value types.

[`log`]: https://docs.rs/log
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Like the error type, the compiled format lives on the heap. There is no
// non-alloc mode.
extern crate alloc;

pub use crate::{
    error::Error,
    fmt::{DateTimeParser, FormatterType},
    value::{PartialDateTime, Precision, Validation},
};

#[macro_use]
mod logging;

mod error;
pub mod event;
pub mod fmt;
pub mod range;
pub mod scale;
pub mod tz;
mod util;
pub mod value;
pub mod year;
