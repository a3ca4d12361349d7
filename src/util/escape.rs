/*!
Provides convenience routines for escaping raw bytes in error messages.
*/

/// Provides a convenient `Display` implementation for a `u8`.
///
/// The byte is treated as ASCII, and emitted in a human readable
/// representation. If the byte isn't printable ASCII, then it's emitted as a
/// hex escape sequence.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0 == b' ' {
            return write!(f, " ");
        }
        // 10 bytes is enough to cover any output from ascii::escape_default.
        let mut bytes = [0u8; 10];
        let mut len = 0;
        for (i, mut b) in core::ascii::escape_default(self.0).enumerate() {
            // capitalize \xab to \xAB
            if i >= 2 && b'a' <= b && b <= b'f' {
                b -= 32;
            }
            bytes[len] = b;
            len += 1;
        }
        write!(f, "{}", core::str::from_utf8(&bytes[..len]).unwrap())
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"")?;
        core::fmt::Display::fmt(self, f)?;
        write!(f, "\"")
    }
}

/// Provides a convenient `Display` implementation for `&[u8]`.
///
/// This works best when the bytes are predominantly ASCII, which is the
/// only thing the format machinery in this crate deals with. Anything
/// outside the printable ASCII range is emitted as escape sequences.
pub(crate) struct Bytes<'a>(pub &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for &byte in self.0 {
            if byte == b' ' {
                write!(f, " ")?;
            } else {
                write!(f, "{}", Byte(byte))?;
            }
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"")?;
        core::fmt::Display::fmt(self, f)?;
        write!(f, "\"")
    }
}
