//! Token normalizer.
//!
//! Challenges arrive with scrambled casing, stray brackets of every style and
//! decorative punctuation (`A] lO^bSt-Er S[wImS aT/ tW]eNn-Tyy`). This stage
//! reduces them to a stream of lowercase alphanumeric words, each remembering
//! its byte span in the raw text.
//!
//! Two pieces of bracket/punctuation information survive cleaning:
//!
//! - **Angle groups.** A well-formed `<...>` pair (no nested `<`) marks its
//!   words with a group id. The extractor treats such a group as one literal
//!   operand.
//! - **Operator glyphs.** A `+` or `-` immediately touching a digit or a
//!   number word is kept as a `Glyph` token. Everywhere else it is noise. A
//!   hyphen inside a number (`twenty-five`, `fOuR-tEeN`, `sIx-Ty`) is noise
//!   too. A kept `-` is always an operator, never the sign of the operand it
//!   touches.
//!
//! The canonical rendering joins tokens with single spaces and keeps glyphs
//! glued to whatever side they touched in the raw text, so normalizing a
//! rendering again reproduces it.

use crate::rules::numeral::rules::{reads_as_number, splits_number_word};
use crate::{Range, SolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub(crate) fn as_char(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NormKind {
    /// Lowercased ASCII alphanumeric run.
    Word(String),
    /// A meaningful operator glyph and whether it touched the neighbouring
    /// word on each side.
    Glyph { sign: Sign, glued_left: bool, glued_right: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NormToken {
    pub kind: NormKind,
    pub range: Range,
    /// Index into `NormalizedText::groups` when inside an angle group.
    pub group: Option<usize>,
}

impl NormToken {
    pub(crate) fn word(&self) -> Option<&str> {
        match &self.kind {
            NormKind::Word(text) => Some(text),
            NormKind::Glyph { .. } => None,
        }
    }
}

/// Cleaned challenge text: token stream plus canonical rendering.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedText {
    raw: String,
    text: String,
    tokens: Vec<NormToken>,
    groups: Vec<Range>,
}

impl NormalizedText {
    /// Canonical rendering.
    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// The untouched input.
    pub(crate) fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn tokens(&self) -> &[NormToken] {
        &self.tokens
    }

    /// Inner spans (brackets excluded) of the angle groups, in order.
    pub(crate) fn groups(&self) -> &[Range] {
        &self.groups
    }

    /// Number of words that contain at least one letter.
    pub(crate) fn letter_words(&self) -> usize {
        self.tokens.iter().filter_map(NormToken::word).filter(|w| w.bytes().any(|b| b.is_ascii_alphabetic())).count()
    }
}

/// Words on each side of a hyphen considered when deciding whether it splits
/// one number.
const HYPHEN_JOIN_SPAN: usize = 4;

/// Clean `raw` into a `NormalizedText`.
///
/// Fails with `SolveError::MalformedChallenge` when fewer than two words with
/// letters are left: such text cannot hold two operands plus any context.
pub(crate) fn normalize(raw: &str) -> Result<NormalizedText, SolveError> {
    let groups: Vec<Range> = regex!(r"<([^<>]*)>")
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| Range::new(m.start(), m.end()))
        .collect();
    let group_of = |range: &Range| groups.iter().position(|g| g.contains(range));

    let words: Vec<(Range, &str)> =
        regex!(r"[A-Za-z0-9]+").find_iter(raw).map(|m| (Range::new(m.start(), m.end()), m.as_str())).collect();

    let mut tokens: Vec<NormToken> = words
        .iter()
        .map(|&(range, word)| NormToken {
            kind: NormKind::Word(word.to_ascii_lowercase()),
            range,
            group: group_of(&range),
        })
        .collect();

    let word_ending_at = |pos: usize| words.iter().find(|(r, _)| r.end == pos).map(|&(_, w)| w);
    let word_starting_at = |pos: usize| words.iter().find(|(r, _)| r.start == pos).map(|&(_, w)| w);

    for m in regex!(r"[+\-]").find_iter(raw) {
        let sign = if m.as_str() == "+" { Sign::Plus } else { Sign::Minus };
        let left = word_ending_at(m.start());
        let right = word_starting_at(m.end());

        let touches_number = left.is_some_and(reads_as_number) || right.is_some_and(reads_as_number);
        if !touches_number {
            continue;
        }
        if sign == Sign::Minus && left.is_some() && right.is_some() {
            let before: Vec<&str> =
                words.iter().rev().filter(|(r, _)| r.end <= m.start()).take(HYPHEN_JOIN_SPAN).map(|&(_, w)| w).collect();
            let after: Vec<&str> =
                words.iter().filter(|(r, _)| r.start >= m.end()).take(HYPHEN_JOIN_SPAN).map(|&(_, w)| w).collect();
            if splits_number_word(&before, &after) {
                continue;
            }
        }

        let range = Range::new(m.start(), m.end());
        tokens.push(NormToken {
            kind: NormKind::Glyph { sign, glued_left: left.is_some(), glued_right: right.is_some() },
            range,
            group: group_of(&range),
        });
    }

    tokens.sort_by_key(|t| t.range.start);

    let text = render(&tokens);
    let normalized = NormalizedText { raw: raw.to_string(), text, tokens, groups };

    tracing::debug!(
        normalized = normalized.as_str(),
        tokens = normalized.tokens.len(),
        groups = normalized.groups.len(),
        "normalized challenge"
    );

    if normalized.letter_words() < 2 {
        return Err(SolveError::MalformedChallenge { text: normalized.text });
    }

    Ok(normalized)
}

/// Join tokens with single spaces, keeping glyphs glued where they were.
fn render(tokens: &[NormToken]) -> String {
    let mut out = String::new();
    let mut glue_next = false;

    for (idx, token) in tokens.iter().enumerate() {
        let glue_prev = matches!(token.kind, NormKind::Glyph { glued_left: true, .. });
        if idx > 0 && !glue_prev && !glue_next {
            out.push(' ');
        }
        match &token.kind {
            NormKind::Word(word) => {
                out.push_str(word);
                glue_next = false;
            }
            NormKind::Glyph { sign, glued_right, .. } => {
                out.push(sign.as_char());
                glue_next = *glued_right;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &NormalizedText) -> Vec<&str> {
        text.tokens().iter().filter_map(NormToken::word).collect()
    }

    #[test]
    fn strips_noise_and_folds_case() {
        let text = normalize("A] lO^bSt-Er S[wImS aT/ tW]eNn-Tyy").unwrap();
        assert_eq!(text.as_str(), "a lo bst er s wims at tw enn tyy");
        assert_eq!(words(&text), vec!["a", "lo", "bst", "er", "s", "wims", "at", "tw", "enn", "tyy"]);
    }

    #[test]
    fn keeps_raw_spans() {
        let raw = "  TwEnTy ~~ FiVe";
        let text = normalize(raw).unwrap();
        let spans: Vec<&str> = text.tokens().iter().map(|t| &raw[t.range.start..t.range.end]).collect();
        assert_eq!(spans, vec!["TwEnTy", "FiVe"]);
    }

    #[test]
    fn remembers_angle_groups() {
        let text = normalize("gains <GaAiInSs> and {five}").unwrap();
        assert_eq!(text.as_str(), "gains gaaiinss and five");
        assert_eq!(text.groups().len(), 1);
        let grouped: Vec<Option<usize>> = text.tokens().iter().map(|t| t.group).collect();
        assert_eq!(grouped, vec![None, Some(0), None, None]);
    }

    #[test]
    fn unbalanced_angle_brackets_are_plain_noise() {
        let text = normalize("ten <lobster <claws> five").unwrap();
        assert_eq!(text.groups().len(), 1);
        assert_eq!(text.as_str(), "ten lobster claws five");
        let lobster = &text.tokens()[1];
        assert_eq!(lobster.group, None);
    }

    #[test]
    fn glyph_next_to_number_is_kept() {
        let text = normalize("twenty five -5 lobsters").unwrap();
        assert_eq!(text.as_str(), "twenty five -5 lobsters");
        assert!(text.tokens().iter().any(|t| matches!(t.kind, NormKind::Glyph { sign: Sign::Minus, .. })));

        let text = normalize("ten+three claws").unwrap();
        assert_eq!(text.as_str(), "ten+three claws");
    }

    #[test]
    fn decorative_glyphs_are_dropped() {
        let text = normalize("lOb-StEr + claw ~ - five").unwrap();
        assert_eq!(text.as_str(), "lob ster claw five");
        assert!(text.tokens().iter().all(|t| t.word().is_some()));
    }

    #[test]
    fn compound_hyphen_is_not_an_operator() {
        let text = normalize("twenty-five lobsters").unwrap();
        assert_eq!(text.as_str(), "twenty five lobsters");

        let text = normalize("fifteen-five lobsters").unwrap();
        assert_eq!(text.as_str(), "fifteen-five lobsters");
    }

    #[test]
    fn hyphen_splitting_one_number_word_is_noise() {
        assert_eq!(normalize("fOuR-tEeN pLuS fIvE").unwrap().as_str(), "four teen plus five");
        assert_eq!(normalize("sIx-Ty pLuS tEn").unwrap().as_str(), "six ty plus ten");
        assert_eq!(normalize("tW-eN-tY-fIvE claws").unwrap().as_str(), "tw en ty five claws");
        assert_eq!(normalize("twenty-5 plus three").unwrap().as_str(), "twenty-5 plus three");
    }

    #[test]
    fn normalizing_is_idempotent() {
        for raw in [
            "A] lO^bSt-Er S[wImS aT/ tW]eNn-Tyy",
            "TwEnTy FiVe plus Fifteen",
            "Twenty5 minus 5Ten",
            "gains <GaAiInSs> and five",
            "five ]-3 claws and 5+ -2 lobsters",
            "ten+three claws",
        ] {
            let once = normalize(raw).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            assert_eq!(once.as_str(), twice.as_str(), "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn too_little_content_is_malformed() {
        assert!(matches!(normalize(""), Err(SolveError::MalformedChallenge { .. })));
        assert!(matches!(normalize("[]{}<>^~"), Err(SolveError::MalformedChallenge { .. })));
        assert!(matches!(normalize("five + 3"), Err(SolveError::MalformedChallenge { .. })));
        assert!(normalize("five plus 3").is_ok());
    }
}
