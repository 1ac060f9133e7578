//! Octal ASCII field codec
//!
//! tar stores every numeric header field as zero-padded octal text rather
//! than binary. A field of N bytes holds N-1 digits followed by a NUL.

use super::error::{HeaderError, HeaderResult};

/// Format `value` into `field` as zero-padded octal digits plus a
/// trailing NUL, filling the whole field.
///
/// # Errors
///
/// Returns [`HeaderError::FieldOverflow`] when `value` needs more digits
/// than the field provides.
pub fn format_into(field: &mut [u8], value: u64) -> HeaderResult<()> {
    let digits = field.len() - 1;
    let mut v = value;
    field[digits] = 0;
    for slot in field[..digits].iter_mut().rev() {
        *slot = b'0' + (v & 0o7) as u8;
        v >>= 3;
    }
    if v != 0 {
        return Err(HeaderError::FieldOverflow { value, digits });
    }
    Ok(())
}

/// Parse an octal field leniently, `strtol` style: leading spaces are
/// skipped, digits accumulate until the first non-octal byte, and an
/// empty field parses as 0.
pub fn parse(field: &[u8]) -> u64 {
    let mut value = 0u64;
    for b in field.iter().skip_while(|b| **b == b' ') {
        if !b.is_ascii_digit() || *b > b'7' {
            break;
        }
        value = (value << 3) | u64::from(b - b'0');
    }
    value
}
