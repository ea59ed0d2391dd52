use crate::NumeralData;

/// Helper to create a digit-literal `NumeralData` with given `value`.
pub fn make_numeral(value: i64) -> NumeralData {
    NumeralData { value, grain: infer_grain(value), multipliable: false, spelled: false }
}

/// Create a NumeralData with explicit grain/multipliable/spelled flags.
pub fn make_numeral_with(value: i64, grain: Option<u32>, multipliable: bool, spelled: bool) -> NumeralData {
    NumeralData { value, grain, multipliable, spelled }
}

/// Parse a run of ASCII digits. Runs that overflow `i64` are not numbers.
pub fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Infer the power-of-ten "grain" for a value. For integers that end with at
/// least one zero, the grain is the count of trailing zeros; otherwise `None`.
pub fn infer_grain(value: i64) -> Option<u32> {
    if value == 0 {
        return None;
    }

    let mut n = value.unsigned_abs();
    let mut grain = 0u32;
    while n % 10 == 0 {
        grain += 1;
        n /= 10;
    }

    if grain > 0 { Some(grain) } else { None }
}

/// Fold runs of the same letter into one (`tweenntyy` -> `twenty`).
///
/// Both dictionary keys and scanned text go through this, so doubled-letter
/// noise can never change which word a run of fragments spells.
pub fn collapse_repeats(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = None;
    for c in s.chars() {
        if last != Some(c) {
            out.push(c);
        }
        last = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grain_counts_trailing_zeros() {
        assert_eq!(infer_grain(20), Some(1));
        assert_eq!(infer_grain(2000), Some(3));
        assert_eq!(infer_grain(25), None);
        assert_eq!(infer_grain(0), None);
        assert_eq!(infer_grain(-300), Some(2));
    }

    #[test]
    fn collapse_folds_only_adjacent_repeats() {
        assert_eq!(collapse_repeats("tweenntyy"), "twenty");
        assert_eq!(collapse_repeats("fiive"), "five");
        assert_eq!(collapse_repeats("lllooobbster"), "lobster");
        assert_eq!(collapse_repeats("seventeen"), "seventen");
        assert_eq!(collapse_repeats(""), "");
    }

    #[test]
    fn digits_reject_overflow_and_letters() {
        assert_eq!(parse_digits("0017"), Some(17));
        assert_eq!(parse_digits("99999999999999999999"), None);
        assert_eq!(parse_digits("1a"), None);
        assert_eq!(parse_digits(""), None);
    }
}
