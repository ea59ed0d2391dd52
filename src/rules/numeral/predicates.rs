use crate::NumeralData;

/// Returns true when the numeral value is positive (> 0).
pub fn is_positive(n: &NumeralData) -> bool {
    n.value > 0
}

/// Returns true when the numeral has a grain (power-of-ten information).
pub fn has_grain(n: &NumeralData) -> bool {
    n.grain.is_some()
}

/// Returns true when the numeral can be used as a multiplier in composite numbers.
pub fn is_multipliable(n: &NumeralData) -> bool {
    n.multipliable
}

/// Returns true when the numeral was spelled out rather than written in digits.
pub fn is_spelled(n: &NumeralData) -> bool {
    n.spelled
}
