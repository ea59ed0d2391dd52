//! Bracket cipher.
//!
//! An angle-bracketed group that spells no number word still carries a value.
//! Each letter maps to a digit: the 0-based rank at which that letter first
//! appeared in the group (case-insensitive, wrapped into `0..=9`). The value is
//! the sum of those digits.
//!
//! ```text
//! <GaAiInSs>   g  a  a  i  i  n  s  s
//!              0  1  1  2  2  3  4  4   -> 17
//! ```

/// Decode the letters of a bracket group. Non-letters are ignored; a group
/// without letters has no value.
pub fn cipher_value(text: &str) -> Option<i64> {
    let mut seen: Vec<char> = Vec::new();
    let mut total = 0i64;

    for c in text.chars().filter(char::is_ascii_alphabetic).map(|c| c.to_ascii_lowercase()) {
        let rank = match seen.iter().position(|&s| s == c) {
            Some(rank) => rank,
            None => {
                seen.push(c);
                seen.len() - 1
            }
        };
        total += (rank % 10) as i64;
    }

    if seen.is_empty() { None } else { Some(total) }
}
