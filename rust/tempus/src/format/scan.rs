use crate::{error::Error, result::Result};

/// Cursor over parser input with byte positions for error reports.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Scanner<'a> {
        Scanner { input, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub fn error(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.pos, reason)
    }

    pub fn error_at(&self, pos: usize, reason: impl Into<String>) -> Error {
        Error::malformed(pos, reason)
    }

    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, byte: u8) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", byte as char)))
        }
    }

    /// Consumes `text` exactly.
    pub fn expect_str(&mut self, text: &str) -> Result<()> {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            Ok(())
        } else {
            Err(self.error(format!("expected {text:?}")))
        }
    }

    /// Consumes `word` ignoring ASCII case.
    pub fn eat_ignore_case(&mut self, word: &str) -> bool {
        match self.rest().get(..word.len()) {
            Some(head) if head.eq_ignore_ascii_case(word) => {
                self.pos += word.len();
                true
            }
            _ => false,
        }
    }

    pub fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    /// Consumes ASCII whitespace and returns how many bytes were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consumes a run of ASCII letters.
    pub fn word(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Reads between `min` and `max` decimal digits.
    pub fn digits(&mut self, min: usize, max: usize, what: &str) -> Result<u64> {
        let start = self.pos;
        let mut value = 0u64;
        while self.pos - start < max {
            match self.peek() {
                Some(b @ b'0'..=b'9') => {
                    value = value * 10 + (b - b'0') as u64;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let count = self.pos - start;
        if count < min {
            self.pos = start;
            return Err(if min == max {
                self.error(format!("expected {min} digits for {what}"))
            } else {
                self.error(format!("expected at least {min} digits for {what}"))
            });
        }
        Ok(value)
    }

    /// Reads 1 to 9 digits as a fraction of a second, in nanoseconds.
    /// Digits beyond the ninth are consumed and dropped.
    pub fn fraction(&mut self, min: usize, max: usize) -> Result<u32> {
        let start = self.pos;
        let value = self.digits(min, max.min(9), "fraction")?;
        let count = self.pos - start;
        if max > 9 {
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        Ok((value * 10u64.pow(9 - count as u32)) as u32)
    }

    /// Fails unless the whole input was consumed.
    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing input {:?}", self.rest())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Scanner;
    use crate::ErrorKind;

    #[test]
    fn test_digits() {
        let mut s = Scanner::new("2024x");
        assert_eq!(s.digits(1, 2, "month").unwrap(), 20);
        assert_eq!(s.digits(1, 4, "year").unwrap(), 24);
        let err = s.digits(1, 2, "day").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedInput { position: 4, .. }));
        assert!(s.finish().is_err());
        assert!(s.eat(b'x'));
        s.finish().unwrap();
    }

    #[test]
    fn test_fraction() {
        let mut s = Scanner::new("5");
        assert_eq!(s.fraction(1, 9).unwrap(), 500_000_000);
        let mut s = Scanner::new("1234567891234");
        assert_eq!(s.fraction(1, usize::MAX).unwrap(), 123_456_789);
        assert!(s.is_empty());
        let mut s = Scanner::new("12");
        assert!(s.fraction(3, 3).is_err());
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn test_words() {
        let mut s = Scanner::new("DEC 25");
        assert!(!s.eat_ignore_case("december"));
        assert!(s.eat_ignore_case("dec"));
        s.skip_spaces();
        assert_eq!(s.rest(), "25");
        let mut s = Scanner::new("Wednesday,");
        assert_eq!(s.word(), "Wednesday");
        s.expect(b',').unwrap();
    }
}
