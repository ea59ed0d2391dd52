use crate::rules::numeral::rules::{compose, lookup_word, read_number_word, splits_number_word};
use crate::rules::numeral::helpers::{collapse_repeats, make_numeral, make_numeral_with};
use crate::{SolveError, parse};

/// Decode `input` as the first operand of an addition.
fn first_operand(input: &str) -> Vec<i64> {
    let challenge = parse(&format!("{input} plus one")).unwrap();
    challenge.numbers.iter().map(|n| n.value).collect()
}

#[test]
fn numeral_examples_matching() {
    // Array of (expected_value, input_string)
    let cases: Vec<(i64, &str)> = vec![
        (0, "zero"),
        (1, "OnE"),
        (3, "tHrEe"),
        (3, "thhreee"),
        (7, "sE vEn"),
        (7, "0007"),
        (11, "eLeVeN"),
        (12, "tW eL vE"),
        (13, "thirteen"),
        (14, "fOuRtEeN"),
        (14, "fOuR-tEeN"),
        (15, "fIfTeEn"),
        (15, "5Ten"),
        (16, "six teen"),
        (17, "17"),
        (17, "sE vE nT eE n"),
        (17, "sEvEn-TeEn"),
        (18, "eighteen"),
        (19, "nIneTeen"),
        (20, "tW]eNn-Tyy"),
        (25, "TwEnTy FiVe"),
        (25, "tWeN tY fIiV e"),
        (25, "twenty-five"),
        (25, "Twenty5"),
        (25, "twentyfive"),
        (25, "TwEnTyFiVe"),
        (25, "tW-eN-tY-fIvE"),
        (30, "thirty"),
        (40, "FoRtY"),
        (40, "fourty"),
        (42, "forty two"),
        (50, "fifty"),
        (60, "sIx-Ty"),
        (66, "sixty six"),
        (77, "seventy-seven"),
        (88, "eighty eight"),
        (99, "ninety nine"),
        (100, "hundred"),
        (100, "one hundred"),
        (105, "one hundred five"),
        (120, "one hundred twenty"),
        (125, "one hundred twenty five"),
        (500, "5 hundred"),
        (1000, "thousand"),
        (2000, "two thousand"),
        (2015, "two thousand fifteen"),
        (2500, "twenty five hundred"),
        (2525, "two thousand five hundred twenty five"),
        (2000, "twothousand"),
        (125, "onehundredtwentyfive"),
    ];

    for (expected, input) in cases {
        assert_eq!(first_operand(input), vec![expected, 1], "input: {input:?}");
    }
}

#[test]
fn flavor_words_never_carry_numbers() {
    let err = parse("lOoOobSsStEr claws and five").unwrap_err();
    assert!(matches!(err, SolveError::NoOperandsFound { found: 1, .. }));
}

#[test]
fn dictionary_lookup_uses_collapsed_spelling() {
    assert_eq!(lookup_word(&collapse_repeats("seventeen")).map(|n| n.value), Some(17));
    assert_eq!(lookup_word(&collapse_repeats("twwwennntyyy")).map(|n| n.value), Some(20));
    assert!(lookup_word("lobster").is_none());

    let hundred = lookup_word("hundred").unwrap();
    assert!(hundred.multipliable);
    assert_eq!(hundred.grain, Some(2));
}

#[test]
fn composition_rule_names() {
    let twenty = lookup_word("twenty").unwrap();
    let five = lookup_word("five").unwrap();
    let hundred = lookup_word("hundred").unwrap();

    assert_eq!(compose(&twenty, &five, false).map(|(rule, n)| (rule, n.value)), Some(("intersect 2 numbers", 25)));
    assert_eq!(compose(&five, &hundred, false).map(|(rule, n)| (rule, n.value)), Some(("compose by multiplication", 500)));
    assert_eq!(compose(&twenty, &make_numeral(5), true).map(|(rule, n)| (rule, n.value)), Some(("glued pieces", 25)));
}

#[test]
fn composition_refuses_unrelated_pieces() {
    let twenty = lookup_word("twenty").unwrap();
    let thirty = lookup_word("thirty").unwrap();
    let five = lookup_word("five").unwrap();

    // A digit literal only joins a word when glued to it.
    assert!(compose(&twenty, &make_numeral(5), false).is_none());
    assert!(compose(&five, &twenty, false).is_none());
    assert!(compose(&twenty, &thirty, false).is_none());
    assert!(compose(&make_numeral_with(0, None, false, true), &lookup_word("hundred").unwrap(), false).is_none());
}

#[test]
fn hyphen_inside_a_number_word_is_noise() {
    let challenge = parse("fOuR-tEeN pLuS fIvE").unwrap();
    assert_eq!(challenge.numbers.iter().map(|n| n.value).collect::<Vec<_>>(), vec![14, 5]);
    assert_eq!(challenge.answer().value(), 19);

    assert_eq!(parse("sIx-Ty pLuS tEn").unwrap().answer().value(), 70);
    assert_eq!(parse("sEvEn-TeEn lObStErS aNd FiVe").unwrap().answer().value(), 22);
}

#[test]
fn split_detection_needs_a_whole_number() {
    assert!(splits_number_word(&["four"], &["teen", "plus"]));
    assert!(splits_number_word(&["tY", "eN", "tW"], &["fIvE"]));
    assert!(splits_number_word(&["six"], &["t", "y"]));
    assert!(!splits_number_word(&["fifteen"], &["five", "lobsters"]));
    assert!(!splits_number_word(&["ten"], &["3"]));
}

#[test]
fn unseparated_words_must_compose() {
    assert_eq!(read_number_word("twentyfive").map(|n| n.value), Some(25));
    assert_eq!(read_number_word("fivehundred").map(|n| n.value), Some(500));
    assert!(read_number_word("fivetwenty").is_none());
    assert!(read_number_word("twentythirty").is_none());
    assert!(read_number_word("tenten").is_none());
    assert!(read_number_word("often").is_none());
}
