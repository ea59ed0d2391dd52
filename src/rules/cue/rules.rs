use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::engine::CueMask;
use crate::rules::numeral::helpers::collapse_repeats;
use crate::{CueRule, Operation};

// Maps
/// Cue words and the flags they raise, keyed by repeat-collapsed spelling.
static CUE_WORDS: Lazy<HashMap<String, CueMask>> = Lazy::new(|| {
    [
        // rate statements
        ("per", CueMask::RATE_WORD),
        ("every", CueMask::RATE_WORD),
        // questions asking for a total; also plain addition
        ("total", CueMask::TOTAL_WORD | CueMask::ADD_WORD),
        ("combined", CueMask::TOTAL_WORD | CueMask::ADD_WORD),
        // subtraction
        ("minus", CueMask::SUBTRACT_WORD),
        ("less", CueMask::SUBTRACT_WORD),
        ("difference", CueMask::SUBTRACT_WORD),
        ("subtract", CueMask::SUBTRACT_WORD),
        ("subtracts", CueMask::SUBTRACT_WORD),
        ("subtracted", CueMask::SUBTRACT_WORD),
        ("loses", CueMask::SUBTRACT_WORD),
        ("slows", CueMask::SUBTRACT_WORD),
        ("fewer", CueMask::SUBTRACT_WORD),
        // addition
        ("plus", CueMask::ADD_WORD),
        ("and", CueMask::ADD_WORD),
        ("sum", CueMask::ADD_WORD),
        ("adds", CueMask::ADD_WORD),
        ("added", CueMask::ADD_WORD),
    ]
    .into_iter()
    .map(|(word, mask)| (collapse_repeats(word), mask))
    .collect()
});

/// Look up a repeat-collapsed letter run in the cue dictionary.
pub fn lookup_cue(collapsed: &str) -> Option<CueMask> {
    CUE_WORDS.get(collapsed).copied()
}

// Rules

/// A rate statement plus a question for a total: the rate figure is context,
/// the enumerated quantities are summed.
fn rule_rate_total() -> CueRule {
    cue_rule! {
        name: "rate statement with total question",
        rank: 1,
        all: CueMask::RATE_WORD | CueMask::TOTAL_WORD,
        op: Operation::Rate,
    }
}

/// `-` glued to an operand (`5-3`, `-fifteen`).
fn rule_minus_glyph() -> CueRule {
    cue_rule! {
        name: "minus glyph",
        rank: 2,
        any: CueMask::MINUS_GLYPH,
        op: Operation::Subtract,
    }
}

/// `+` glued to an operand (`5+3`, `+fifteen`).
fn rule_plus_glyph() -> CueRule {
    cue_rule! {
        name: "plus glyph",
        rank: 4,
        any: CueMask::PLUS_GLYPH,
        op: Operation::Add,
    }
}

fn rule_subtract_words() -> CueRule {
    cue_rule! {
        name: "subtraction words",
        rank: 3,
        any: CueMask::SUBTRACT_WORD,
        op: Operation::Subtract,
    }
}

fn rule_add_words() -> CueRule {
    cue_rule! {
        name: "addition words",
        rank: 5,
        any: CueMask::ADD_WORD,
        op: Operation::Add,
    }
}

pub fn get() -> Vec<CueRule> {
    vec![rule_rate_total(), rule_minus_glyph(), rule_subtract_words(), rule_plus_glyph(), rule_add_words()]
}

/// Shared, immutable precedence table, ordered by rank.
pub static CUE_RULES: Lazy<Vec<CueRule>> = Lazy::new(|| {
    let mut rules = get();
    rules.sort_by_key(|rule| rule.rank);
    rules
});
