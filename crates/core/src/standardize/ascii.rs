//! Folding of accented Latin characters to plain ASCII.

use tracing::warn;

/// Accented characters grouped by the ASCII letter they fold to.
const ACCENT_TABLE: &[(char, &str)] = &[
    ('a', "àáâäæãåā"),
    ('c', "çćč"),
    ('e', "èéêëēėę"),
    ('i', "îïíīįì"),
    ('l', "ł"),
    ('n', "ñń"),
    ('o', "ôöòóœøōõ"),
    ('s', "ßśš"),
    ('u', "ûüùúū"),
    ('y', "ÿ"),
    ('z', "žźż"),
    ('A', "ÀÁÂÄÆÃÅĀ"),
    ('C', "ÇĆČ"),
    ('E', "ÈÉÊËĒĖĘ"),
    ('I', "ÎÏÍĪĮÌ"),
    ('L', "Ł"),
    ('N', "ÑŃ"),
    ('O', "ÔÖÒÓŒØŌÕ"),
    ('S', "ŚŠ"),
    ('U', "ÛÜÙÚŪ"),
    ('Y', "Ÿ"),
    ('Z', "ŽŹŻ"),
];

/// Typographic punctuation with a plain ASCII counterpart.
const PUNCTUATION_TABLE: &[(char, char)] = &[
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
    ('\u{2013}', '-'),
    ('\u{2014}', '-'),
    ('\u{2026}', '.'),
    ('\u{00A0}', ' '),
];

/// Looks up the ASCII equivalent of a single character.
///
/// ASCII characters map to themselves. Returns `None` for characters missing
/// from the table.
pub fn ascii_equivalent(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }

    if let Some((_, plain)) = PUNCTUATION_TABLE.iter().find(|(fancy, _)| *fancy == c) {
        return Some(*plain);
    }

    ACCENT_TABLE
        .iter()
        .find(|(_, accented)| accented.contains(c))
        .map(|(plain, _)| *plain)
}

/// Folds every character of `text` to ASCII.
///
/// Characters without an equivalent become a single space and are reported
/// through `tracing` so unusual inputs can be spotted in the logs.
pub fn fold_to_ascii(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    text.chars()
        .map(|c| {
            ascii_equivalent(c).unwrap_or_else(|| {
                warn!(character = %c, codepoint = %format!("U+{:04X}", c as u32), "no ASCII equivalent, replacing with space");
                ' '
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('ç', Some('c'))]
    #[case('é', Some('e'))]
    #[case('ñ', Some('n'))]
    #[case('ß', Some('s'))]
    #[case('Ø', Some('O'))]
    #[case('x', Some('x'))]
    #[case('\u{2019}', Some('\''))]
    #[case('中', None)]
    fn test_ascii_equivalent(#[case] input: char, #[case] expected: Option<char>) {
        assert_eq!(ascii_equivalent(input), expected);
    }

    #[test]
    fn test_fold_to_ascii() {
        assert_eq!(fold_to_ascii("Califørniå"), "California");
        assert_eq!(fold_to_ascii("Jean-Jacques Rousseau"), "Jean-Jacques Rousseau");
    }

    #[test]
    fn test_fold_replaces_unknown_with_space() {
        assert_eq!(fold_to_ascii("a中b"), "a b");
    }

    #[test]
    fn test_fold_output_is_ascii() {
        assert!(fold_to_ascii("Œuvre — Ünïcödé ☃").is_ascii());
    }
}
