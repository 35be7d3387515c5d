//! Display-name cleaning shared by registry construction and lookup

use unicode_normalization::UnicodeNormalization;

/// Byte sequences left behind when a UTF-8 right quote is decoded as Latin-1
const MISDECODED_APOSTROPHES: [&str; 2] = ["â€™", "Â€™"];

const STRIPPED: [char; 10] = ['-', '\'', '’', '*', ':', '%', '.', '(', ')', ' '];

/// Clean a display name into its registry key form.
///
/// `"Farfetch’d"`, `"farfetch'd"` and `"FARFETCHD"` all clean to `"FARFETCHD"`.
/// Returns `None` for absent or empty input, and for input with nothing left after cleaning.
///
/// Decomposition runs before stripping, so compatibility forms of the stripped
/// characters are removed as well and the result is a fixed point.
pub fn normalize(name: Option<&str>) -> Option<String> {
    let name = name.filter(|s| !s.is_empty())?;

    let mut raw = name.to_string();
    for sequence in MISDECODED_APOSTROPHES {
        raw = raw.replace(sequence, "");
    }

    let cleaned: String = raw
        .nfkd()
        .flat_map(char::to_uppercase)
        .filter(|c| !STRIPPED.contains(c))
        .filter(char::is_ascii)
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
