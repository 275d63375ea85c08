/// Splits a literal into its sign, radix and digits.
///
/// Returns `None` when nothing but a sign or a bare `0x` prefix is left, or
/// when a character is not a digit of the selected radix.
fn split_literal(text: &str) -> Option<(bool, u32, &str)> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, rest),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    Some((negative, radix, digits))
}

/// Reads a literal as a signed 64-bit integer.
///
/// The magnitude must fit in `i64`; the sign is applied afterwards.
///
/// # Example
/// ```
/// use water::util::num::signed_reading;
///
/// assert_eq!(signed_reading("-0x10"), Some(-16));
/// assert_eq!(signed_reading("9223372036854775808"), None);
/// ```
#[must_use]
pub fn signed_reading(text: &str) -> Option<i64> {
    let (negative, radix, digits) = split_literal(text)?;
    let magnitude = i64::from_str_radix(digits, radix).ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

/// Reads a literal as an unsigned 64-bit integer.
///
/// A leading minus wraps the magnitude around, the way a two's complement
/// machine would store it.
#[must_use]
pub fn unsigned_reading(text: &str) -> Option<u64> {
    let (negative, radix, digits) = split_literal(text)?;
    let magnitude = u64::from_str_radix(digits, radix).ok()?;

    Some(if negative { magnitude.wrapping_neg() } else { magnitude })
}

/// Parses an integer literal, accepting it only when the signed and unsigned
/// readings both succeed and denote the same bit pattern.
///
/// # Parameters
/// - `text`: The literal as written in the source, sign included.
///
/// # Returns
/// - `Some(i64)`: The signed value of the literal.
/// - `None`: If either reading fails or the readings disagree.
///
/// # Example
/// ```
/// use water::util::num::parse_integer_literal;
///
/// assert_eq!(parse_integer_literal("+42"), Some(42));
/// assert_eq!(parse_integer_literal("0xff"), Some(255));
/// assert_eq!(parse_integer_literal("18446744073709551615"), None);
/// assert_eq!(parse_integer_literal("0x"), None);
/// ```
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn parse_integer_literal(text: &str) -> Option<i64> {
    let signed = signed_reading(text)?;
    let unsigned = unsigned_reading(text)?;

    (signed as u64 == unsigned).then_some(signed)
}

/// Converts a signed integer into an unsigned one if no information is lost.
///
/// # Example
/// ```
/// use water::util::num::i64_to_u64_checked;
///
/// assert_eq!(i64_to_u64_checked(7), Some(7));
/// assert_eq!(i64_to_u64_checked(-1), None);
/// ```
#[must_use]
pub fn i64_to_u64_checked(value: i64) -> Option<u64> {
    u64::try_from(value).ok()
}

/// Converts an unsigned count into a `usize` if it fits on this platform.
#[must_use]
pub fn u64_to_usize_checked(value: u64) -> Option<usize> {
    usize::try_from(value).ok()
}
