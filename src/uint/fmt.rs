use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{U256, U512};

/// Error parsing a decimal or `0x`-prefixed hex literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ParseUintError {
    #[error("cannot parse integer from empty string")]
    Empty,
    #[error("invalid digit found in string")]
    InvalidDigit,
    #[error("literal too long for the target width")]
    TooLong,
}

macro_rules! impl_uint_fmt {
    ($name:ident, max_dec_digits: $max_dec:literal, max_hex_digits: $max_hex:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_zero() {
                    return f.write_str("0");
                }

                let ten = Self::from(10u64);
                let mut digits = [0u8; $max_dec];
                let mut at = digits.len();
                let mut x = *self;
                while !x.is_zero() {
                    let res = x.udivrem(ten);
                    at -= 1;
                    digits[at] = b'0' + res.rem.low_u64() as u8;
                    x = res.quot;
                }

                // SAFETY: every byte written above is an ASCII digit
                f.write_str(unsafe { std::str::from_utf8_unchecked(&digits[at..]) })
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if f.alternate() {
                    f.write_str("0x")?;
                }
                if self.is_zero() {
                    return f.write_str("0");
                }

                let words = self.to_words();
                let mut first = true;
                for word in words.iter().rev() {
                    if first && *word != 0 {
                        write!(f, "{word:x}")?;
                        first = false;
                    } else if !first {
                        write!(f, "{word:016x}")?;
                    }
                }
                Ok(())
            }
        }

        impl FromStr for $name {
            type Err = ParseUintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Some(hex) = s.strip_prefix("0x") {
                    if hex.is_empty() {
                        return Err(ParseUintError::Empty);
                    }
                    if hex.len() > $max_hex {
                        return Err(ParseUintError::TooLong);
                    }
                    let mut x = Self::ZERO;
                    for c in hex.bytes() {
                        let v = match c {
                            b'0'..=b'9' => c - b'0',
                            b'a'..=b'f' => c - b'a' + 10,
                            _ => return Err(ParseUintError::InvalidDigit),
                        };
                        x = (x << 4) | Self::from(v);
                    }
                    return Ok(x);
                }

                if s.is_empty() {
                    return Err(ParseUintError::Empty);
                }
                if s.len() > $max_dec {
                    return Err(ParseUintError::TooLong);
                }
                let ten = Self::from(10u64);
                let mut x = Self::ZERO;
                for c in s.bytes() {
                    if !c.is_ascii_digit() {
                        return Err(ParseUintError::InvalidDigit);
                    }
                    // a value that wraps within the length bound wraps
                    // silently, only the alphabet and length are checked
                    x = x.wrapping_mul(ten).wrapping_add(Self::from(c - b'0'));
                }
                Ok(x)
            }
        }
    };
}

impl_uint_fmt!(U256, max_dec_digits: 78, max_hex_digits: 64);
impl_uint_fmt!(U512, max_dec_digits: 155, max_hex_digits: 128);
