//! Fragment lexer.
//!
//! Obfuscation splits words with spaces and punctuation (`tWeN tY`, `fIiV e`)
//! and doubles letters (`tWeNnTyY`). The lexer therefore works on *fragments*:
//! maximal letter runs and digit runs inside each normalized word.
//!
//! At each letter fragment it tries the longest run of consecutive letter
//! fragments (bounded by `max_span`, never crossing a digit fragment, a glyph
//! or an angle-group boundary) whose repeat-collapsed concatenation is a
//! dictionary word. A number may also be several dictionary words written
//! without separators (`TwEnTyFiVe`), as long as they compose into one value.
//! Number words are tried before cue words so a cue can never be carved out
//! of the middle of a number (`thous and`).
//!
//! ```text
//! words:      "tw"  "enn"  "tyy"  "lobsters"  "plus"  "fiiv"  "e"
//! fragments:   0     1      2      3           4       5       6
//! lexemes:    [ numeral 20      ] [other   ]  [cue ]  [numeral 5 ]
//! ```

use crate::engine::{CueMask, NormKind, NormalizedText, Sign};
use crate::rules::cue::rules::lookup_cue;
use crate::rules::numeral::helpers::{collapse_repeats, make_numeral, parse_digits};
use crate::rules::numeral::rules::read_number_word;
use crate::{NumeralData, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FragmentKind {
    Letters,
    Digits,
    Glyph(Sign),
}

#[derive(Debug, Clone)]
struct Fragment<'a> {
    kind: FragmentKind,
    text: &'a str,
    range: Range,
    /// Index of the normalized token the fragment came from.
    token: usize,
    group: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexemeKind {
    Numeral(NumeralData),
    Cue(CueMask),
    Glyph(Sign),
    /// Fragment that is neither a number nor a cue (flavor text).
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexeme {
    pub kind: LexemeKind,
    pub range: Range,
    /// First and last normalized token covered by the lexeme.
    pub first_token: usize,
    pub last_token: usize,
    pub group: Option<usize>,
}

fn fragments(text: &NormalizedText) -> Vec<Fragment<'_>> {
    let mut out = Vec::new();
    for (idx, token) in text.tokens().iter().enumerate() {
        match &token.kind {
            NormKind::Word(word) => {
                for m in regex!(r"[a-z]+|[0-9]+").find_iter(word) {
                    let kind = if m.as_str().as_bytes()[0].is_ascii_digit() {
                        FragmentKind::Digits
                    } else {
                        FragmentKind::Letters
                    };
                    out.push(Fragment {
                        kind,
                        text: m.as_str(),
                        range: Range::new(token.range.start + m.start(), token.range.start + m.end()),
                        token: idx,
                        group: token.group,
                    });
                }
            }
            NormKind::Glyph { sign, .. } => out.push(Fragment {
                kind: FragmentKind::Glyph(*sign),
                text: "",
                range: token.range,
                token: idx,
                group: token.group,
            }),
        }
    }
    out
}

/// Longest run of letter fragments starting at `start` that `lookup` accepts.
/// Returns the value and the index of the last fragment consumed.
fn longest_match<T>(
    fragments: &[Fragment<'_>],
    start: usize,
    max_span: usize,
    lookup: impl Fn(&str) -> Option<T>,
) -> Option<(T, usize)> {
    let first = fragments.get(start)?;
    if first.kind != FragmentKind::Letters {
        return None;
    }

    let mut end = start;
    while end + 1 < fragments.len()
        && end + 1 - start < max_span.max(1)
        && fragments[end + 1].kind == FragmentKind::Letters
        && fragments[end + 1].group == first.group
    {
        end += 1;
    }

    (start..=end).rev().find_map(|last| {
        let joined: String = fragments[start..=last].iter().map(|f| f.text).collect();
        lookup(&collapse_repeats(&joined)).map(|value| (value, last))
    })
}

/// Split normalized text into numeral, cue, glyph and filler lexemes.
///
/// Cue words inside angle groups are not recognised: a bracketed group is a
/// literal operand, never an operator.
pub(crate) fn lex(text: &NormalizedText, max_span: usize) -> Vec<Lexeme> {
    let fragments = fragments(text);
    let mut lexemes = Vec::new();
    let mut idx = 0;

    while idx < fragments.len() {
        let frag = &fragments[idx];
        let (kind, last) = match frag.kind {
            FragmentKind::Glyph(sign) => (LexemeKind::Glyph(sign), idx),
            FragmentKind::Digits => match parse_digits(frag.text) {
                Some(value) => (LexemeKind::Numeral(make_numeral(value)), idx),
                None => (LexemeKind::Other, idx),
            },
            FragmentKind::Letters => {
                if let Some((data, last)) = longest_match(&fragments, idx, max_span, read_number_word) {
                    (LexemeKind::Numeral(data), last)
                } else if let Some((mask, last)) =
                    frag.group.is_none().then(|| longest_match(&fragments, idx, max_span, lookup_cue)).flatten()
                {
                    (LexemeKind::Cue(mask), last)
                } else {
                    (LexemeKind::Other, idx)
                }
            }
        };

        let end = &fragments[last];
        lexemes.push(Lexeme {
            kind,
            range: Range::new(frag.range.start, end.range.end),
            first_token: frag.token,
            last_token: end.token,
            group: frag.group,
        });
        idx = last + 1;
    }

    tracing::debug!(fragments = fragments.len(), lexemes = lexemes.len(), "lexed challenge");
    lexemes
}
