use std::io::{Error, ErrorKind, Result};

/// `AsciiBuilder` appends ASCII characters and numbers to a caller-provided
/// buffer of fixed size.
///
/// Unix timestamps and RFC 2822 strings have a small known upper bound on their
/// length, so they can be assembled on the stack without going through
/// `fmt::Formatter`. A failed append leaves the builder unchanged.
pub struct AsciiBuilder<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl<'a> AsciiBuilder<'a> {
    pub fn new(buffer: &'a mut [u8]) -> AsciiBuilder<'a> {
        AsciiBuilder {
            buffer,
            position: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    fn reserve(&self, required: usize) -> Result<()> {
        if required > self.remaining() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "buffer is too small: remaining {}, required {required}",
                    self.remaining()
                ),
            ));
        }
        Ok(())
    }

    /// Appends `val` in decimal, with a leading `-` when negative.
    pub fn append_i64(&mut self, val: i64) -> Result<usize> {
        let mut digits = itoa::Buffer::new();
        self.append_bytes(digits.format(val).as_bytes())
    }

    /// Appends `val` as exactly `width` digits, zero-padded on the left.
    ///
    /// Fails if `val` needs more than `width` digits.
    pub fn append_padded(&mut self, val: u64, width: usize) -> Result<usize> {
        self.reserve(width)?;
        let mut rest = val;
        for i in (0..width).rev() {
            self.buffer[self.position + i] = b'0' + (rest % 10) as u8;
            rest /= 10;
        }
        if rest != 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("{val} does not fit in {width} digits"),
            ));
        }
        self.position += width;
        Ok(width)
    }

    pub fn append_char(&mut self, ch: u8) -> Result<usize> {
        self.reserve(1)?;
        self.buffer[self.position] = ch;
        self.position += 1;
        Ok(1)
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        self.reserve(bytes.len())?;
        self.buffer[self.position..self.position + bytes.len()].copy_from_slice(bytes);
        self.position += bytes.len();
        Ok(bytes.len())
    }

    pub fn len(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.position]
    }

    /// Returns the text written so far.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(self.as_bytes())
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::AsciiBuilder;

    #[test]
    fn test_append_padded() {
        let mut buf = [0u8; 16];
        let mut builder = AsciiBuilder::new(&mut buf);
        builder.append_padded(7, 2).unwrap();
        builder.append_char(b':').unwrap();
        builder.append_padded(2024, 4).unwrap();
        assert_eq!(builder.as_str().unwrap(), "07:2024");
        assert_eq!(builder.len(), 7);
    }

    #[test]
    fn test_append_padded_too_wide() {
        let mut buf = [0u8; 16];
        let mut builder = AsciiBuilder::new(&mut buf);
        assert!(builder.append_padded(123, 2).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_append_i64() {
        let mut buf = [0u8; 32];
        let mut builder = AsciiBuilder::new(&mut buf);
        builder.append_i64(i64::MIN).unwrap();
        assert_eq!(builder.as_str().unwrap(), "-9223372036854775808");
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 3];
        let mut builder = AsciiBuilder::new(&mut buf);
        builder.append_bytes(b"ab").unwrap();
        assert!(builder.append_bytes(b"cd").is_err());
        assert_eq!(builder.as_str().unwrap(), "ab");
        assert!(builder.append_i64(10).is_err());
        builder.append_char(b'c').unwrap();
        assert!(builder.append_char(b'd').is_err());
    }
}
