//! Short code encoding.
//!
//! Turns an allocated counter value plus a small salt into a compact base-62
//! token. Uniqueness comes entirely from the counter value: the salt only
//! occupies the three low decimal digits of the encoded number, so distinct ids
//! can never produce the same code regardless of the salts drawn.

use rand::Rng;
use std::fmt;

/// Digit alphabet, indexed by digit value.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Minimum width of an encoded code. Shorter renderings are left-padded with `'0'`.
pub const MIN_CODE_WIDTH: usize = 7;

/// Exclusive upper bound of a salt value.
pub const SALT_RANGE: u16 = 1000;

/// Salt mixed into the allocated id before encoding.
///
/// Always within `[0, SALT_RANGE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt(u16);

impl Salt {
    /// Returns `None` when `value` is outside `[0, SALT_RANGE)`.
    pub fn new(value: u16) -> Option<Self> {
        (value < SALT_RANGE).then_some(Self(value))
    }

    /// Draws a salt uniformly from `[0, SALT_RANGE)`.
    pub fn random() -> Self {
        Self(rand::rng().random_range(0..SALT_RANGE))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encodes `id` and `salt` into a short code.
///
/// Computes `id * 1000 + salt` and renders it in base 62, most significant
/// digit first, left-padded with `'0'` to [`MIN_CODE_WIDTH`] characters.
/// Pure and infallible: the arithmetic is done in 128 bits.
///
/// # Examples
///
/// ```
/// use url_shortener_core::utils::code_generator::{encode, Salt};
///
/// let salt = Salt::new(0).unwrap();
/// assert_eq!(encode(0, salt), "0000000");
/// assert_eq!(encode(1, salt), "00000G8");
/// ```
pub fn encode(id: u64, salt: Salt) -> String {
    let combined = u128::from(id) * u128::from(SALT_RANGE) + u128::from(salt.value());
    let digits = to_base62(combined);

    format!("{:0>width$}", digits, width = MIN_CODE_WIDTH)
}

/// Recovers `(id, salt)` from a code produced by [`encode`].
///
/// Returns `None` for codes containing characters outside the alphabet, empty
/// codes, or values that do not fit a `u64` id.
pub fn decode(code: &str) -> Option<(u64, Salt)> {
    if code.is_empty() {
        return None;
    }

    let mut value: u128 = 0;
    for byte in code.bytes() {
        let digit = digit_value(byte)?;
        value = value.checked_mul(62)?.checked_add(u128::from(digit))?;
    }

    let id = u64::try_from(value / u128::from(SALT_RANGE)).ok()?;
    let salt = Salt((value % u128::from(SALT_RANGE)) as u16);

    Some((id, salt))
}

fn to_base62(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::with_capacity(22);
    while value > 0 {
        buf.push(BASE62_ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    buf.reverse();

    // Alphabet is ASCII.
    buf.into_iter().map(char::from).collect()
}

fn digit_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'Z' => Some(byte - b'A' + 10),
        b'a'..=b'z' => Some(byte - b'a' + 36),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn salt(v: u16) -> Salt {
        Salt::new(v).unwrap()
    }

    #[test]
    fn test_encode_zero_is_padded_zero() {
        assert_eq!(encode(0, salt(0)), "0000000");
    }

    #[test]
    fn test_encode_is_deterministic() {
        assert_eq!(encode(123_456, salt(42)), encode(123_456, salt(42)));
    }

    #[test]
    fn test_encode_known_values() {
        // 1 * 1000 = 1000 = 16 * 62 + 8
        assert_eq!(encode(1, salt(0)), "00000G8");
        // 61 = 'z'
        assert_eq!(encode(0, salt(61)), "000000z");
        // 62 = "10"
        assert_eq!(encode(0, salt(62)), "0000010");
    }

    #[test]
    fn test_encode_respects_minimum_width() {
        for id in [0, 1, 7, 999, 62_u64.pow(3)] {
            let code = encode(id, salt(999));
            assert!(code.len() >= MIN_CODE_WIDTH, "{code} too short");
        }
    }

    #[test]
    fn test_encode_never_pads_with_spaces() {
        let code = encode(3, salt(5));
        assert!(!code.contains(' '));
        assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_encode_floor_value_has_no_padding() {
        let code = encode(56_800_235_584, salt(0));
        assert_eq!(code.len(), 8);
        assert!(!code.starts_with('0'));
    }

    #[test]
    fn test_encode_handles_max_id() {
        let code = encode(u64::MAX, salt(999));
        assert_eq!(decode(&code), Some((u64::MAX, salt(999))));
    }

    #[test]
    fn test_distinct_ids_never_collide_across_salts() {
        let mut codes = HashSet::new();
        for id in 100..300_u64 {
            for s in [0, 1, 500, 998, 999] {
                assert!(codes.insert(encode(id, salt(s))));
            }
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        assert_eq!(decode("00000G8"), Some((1, salt(0))));
        assert_eq!(
            decode(&encode(56_800_235_584, salt(731))),
            Some((56_800_235_584, salt(731)))
        );
    }

    #[test]
    fn test_decode_rejects_foreign_characters() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("abc-123"), None);
        assert_eq!(decode(" 000G8"), None);
    }

    #[test]
    fn test_salt_range() {
        assert!(Salt::new(0).is_some());
        assert!(Salt::new(999).is_some());
        assert!(Salt::new(1000).is_none());

        for _ in 0..1000 {
            assert!(Salt::random().value() < SALT_RANGE);
        }
    }
}
