use std::ops::RangeInclusive;

/// First printable ASCII character accepted by the shell (space, 32).
pub const FIRST_LEGAL_CHAR: char = ' ';

/// Last printable ASCII character accepted by the shell (`~`, 126).
pub const LAST_LEGAL_CHAR: char = '~';

/// Charset de démarrage : les chiffres.
pub const DEFAULT_CHARSET: &str = "0123456789";

/// Rendering needs at least two distinct characters.
pub const MIN_CHARSET_SIZE: usize = 2;

/// True for printable ASCII (32..=126).
///
/// # Example
/// ```
/// use at_core::charset::is_legal;
/// assert!(is_legal('a'));
/// assert!(is_legal(' '));
/// assert!(!is_legal('\n'));
/// assert!(!is_legal('é'));
/// ```
#[inline]
#[must_use]
pub fn is_legal(ch: char) -> bool {
    (FIRST_LEGAL_CHAR..=LAST_LEGAL_CHAR).contains(&ch)
}

/// The full legal range, `' '..='~'`.
#[must_use]
pub fn legal_range() -> RangeInclusive<char> {
    FIRST_LEGAL_CHAR..=LAST_LEGAL_CHAR
}

/// Inclusive range between two endpoints given in either order.
///
/// # Example
/// ```
/// use at_core::charset::ordered_range;
/// assert_eq!(ordered_range('z', 'a'), 'a'..='z');
/// assert_eq!(ordered_range('a', 'c').count(), 3);
/// ```
#[must_use]
pub fn ordered_range(a: char, b: char) -> RangeInclusive<char> {
    if a <= b { a..=b } else { b..=a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_range_has_95_chars() {
        assert_eq!(legal_range().count(), 95);
        assert!(legal_range().all(is_legal));
    }

    #[test]
    fn default_charset_is_legal() {
        assert!(DEFAULT_CHARSET.chars().all(is_legal));
        assert!(DEFAULT_CHARSET.chars().count() >= MIN_CHARSET_SIZE);
    }
}
