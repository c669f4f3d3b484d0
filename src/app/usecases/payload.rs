use core::num::IntErrorKind;

use crate::domain::ports::PayloadParsing;

/// Parse a `dutycycle` payload. `None` means the payload is malformed.
pub(super) fn parse_duty_cycle(payload: &str, parsing: PayloadParsing) -> Option<i64> {
    match parsing {
        PayloadParsing::Strict => strict_integer(payload),
        PayloadParsing::Lenient => Some(leading_integer(payload)),
    }
}

/// Whole trimmed payload as an integer. Numbers past the `i64` range saturate
/// so they are reported as out of range, not malformed.
fn strict_integer(payload: &str) -> Option<i64> {
    match payload.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Leading base-10 integer of `payload`, zero when there is none.
///
/// Skips leading whitespace, takes an optional sign and stops at the first
/// non-digit. Saturates instead of overflowing.
fn leading_integer(payload: &str) -> i64 {
    let mut chars = payload.trim_start().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for digit in chars.map_while(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(i64::from(digit));
    }
    if negative { -value } else { value }
}
