use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{ComposeRule, NumeralData};

use crate::rules::numeral::{
    helpers::{collapse_repeats, infer_grain, make_numeral, make_numeral_with, parse_digits},
    predicates::{has_grain, is_multipliable, is_positive, is_spelled},
};

// Maps
/// Map of words for numbers 0..19 to their integer values.
static ZERO_NINETEEN_MAP: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("zero", 0),
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
    ])
});

/// Map of tens words (twenty, thirty, ...) to their numeric values.
static TENS_MAP: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fourty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ])
});

/// Map of power words to exponent values (e.g. "thousand" => 3).
static POWERS_OF_TENS_MAP: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| HashMap::from([("hundred", 2), ("thousand", 3)]));

/// Every number word keyed by its repeat-collapsed spelling.
static NUMBER_WORDS: Lazy<HashMap<String, NumeralData>> = Lazy::new(|| {
    let mut words = HashMap::new();
    for (word, value) in ZERO_NINETEEN_MAP.iter().chain(TENS_MAP.iter()) {
        words.insert(collapse_repeats(word), make_numeral_with(*value, infer_grain(*value), false, true));
    }
    for (word, exp) in POWERS_OF_TENS_MAP.iter() {
        words.insert(collapse_repeats(word), make_numeral_with(10i64.pow(*exp), Some(*exp), true, true));
    }
    words
});

/// Look up a repeat-collapsed letter run in the number dictionary.
pub fn lookup_word(collapsed: &str) -> Option<NumeralData> {
    NUMBER_WORDS.get(collapsed).copied()
}

/// Read a repeat-collapsed letter run as one number: a dictionary word, or
/// dictionary words written without separators that compose into a single
/// value (`twentyfive`, `onehundredten`).
pub fn read_number_word(collapsed: &str) -> Option<NumeralData> {
    lookup_word(collapsed).or_else(|| segment(None, collapsed))
}

/// Split `rest` into dictionary words, longest prefix first, folding each
/// piece into `acc` through the composition rules.
fn segment(acc: Option<NumeralData>, rest: &str) -> Option<NumeralData> {
    if rest.is_empty() {
        return acc;
    }
    (1..=rest.len()).rev().find_map(|len| {
        let piece = lookup_word(rest.get(..len)?)?;
        let next = match acc {
            Some(acc) => compose(&acc, &piece, false)?.1,
            None => piece,
        };
        segment(Some(next), &rest[len..])
    })
}

/// Read a raw alphanumeric run (`twenty5`, `17`, `fIfTeEn`) as one or more
/// number pieces. Returns `None` unless every letter/digit segment is a number.
pub fn read_run(run: &str) -> Option<Vec<NumeralData>> {
    let lower = run.to_ascii_lowercase();
    let mut pieces = Vec::new();
    for m in regex!(r"[a-z]+|[0-9]+").find_iter(&lower) {
        let part = m.as_str();
        let piece = match parse_digits(part) {
            Some(value) => make_numeral(value),
            None => read_number_word(&collapse_repeats(part))?,
        };
        pieces.push(piece);
    }
    if pieces.is_empty() { None } else { Some(pieces) }
}

/// Returns true when `run` reads entirely as digits and/or number words.
pub fn reads_as_number(run: &str) -> bool {
    read_run(run).is_some()
}

/// Returns true when a hyphen sits inside one number: some run of words
/// ending with `before[0]` and starting with `after[0]` reads as a single
/// number once joined (`twenty-five`, `fOuR-tEeN`, `sIx-Ty`, `tW-eN-tY-fIvE`).
///
/// `before` lists the words left of the hyphen nearest first, `after` the
/// words right of it in reading order.
pub fn splits_number_word(before: &[&str], after: &[&str]) -> bool {
    (1..=before.len()).any(|take| {
        let mut joined: String = before[..take].iter().rev().copied().collect();
        after.iter().any(|word| {
            joined.push_str(word);
            read_number_word(&collapse_repeats(&joined.to_ascii_lowercase())).is_some()
        })
    })
}

// Rules

/// Multiply the trailing part of the accumulated value by a magnitude word:
/// `five hundred`, `twenty five hundred`, `two thousand five hundred`.
fn rule_multiply() -> ComposeRule {
    compose_rule! {
        name: "compose by multiplication",
        left: is_positive,
        right: is_multipliable,
        prod: |l, r| {
            let low = l.value % r.value;
            if low == 0 {
                return None;
            }
            let value = low.checked_mul(r.value)?.checked_add(l.value - low)?;
            Some(make_numeral_with(value, r.grain, false, r.spelled))
        },
    }
}

/// Pieces written inside one raw word add up: `Twenty5` -> 25, `5Ten` -> 15.
fn rule_glued_sum() -> ComposeRule {
    compose_rule! {
        name: "glued pieces",
        left: |n: &NumeralData| !is_multipliable(n),
        right: |n: &NumeralData| !is_multipliable(n),
        glued: true,
        prod: |l, r| {
            let value = l.value.checked_add(r.value)?;
            Some(make_numeral_with(value, infer_grain(value), false, l.spelled && r.spelled))
        },
    }
}

/// Add a smaller spelled number into the free grain of a larger one:
/// `twenty five`, `one hundred twenty`, `two thousand fifteen`.
fn rule_sum() -> ComposeRule {
    compose_rule! {
        name: "intersect 2 numbers",
        left: |n: &NumeralData| has_grain(n) && is_spelled(n) && n.value >= 20,
        right: |n: &NumeralData| is_positive(n) && is_spelled(n) && !is_multipliable(n),
        prod: |l, r| {
            let grain = l.grain?;
            if 10i64.checked_pow(grain)? <= r.value {
                return None;
            }
            let value = l.value.checked_add(r.value)?;
            Some(make_numeral_with(value, infer_grain(value), false, true))
        },
    }
}

pub fn get() -> Vec<ComposeRule> {
    vec![rule_multiply(), rule_glued_sum(), rule_sum()]
}

/// Shared, immutable composition rule set.
pub static COMPOSE_RULES: Lazy<Vec<ComposeRule>> = Lazy::new(get);

/// Try to extend `left` with `right`. Returns the producing rule name and the
/// composed value.
pub fn compose(left: &NumeralData, right: &NumeralData, glued: bool) -> Option<(&'static str, NumeralData)> {
    COMPOSE_RULES
        .iter()
        .filter(|rule| !rule.glued || glued)
        .filter(|rule| (rule.left)(left) && (rule.right)(right))
        .find_map(|rule| (rule.production)(left, right).map(|value| (rule.name, value)))
}
