//! Number extraction.
//!
//! Numeral lexemes that sit next to each other (same angle group, nothing but
//! noise between them) are folded left to right through the composition rules
//! in `rules/numeral/rules.rs`. A piece no rule accepts starts a new operand.
//!
//! Angle groups that produced no numeral at all are decoded with the bracket
//! cipher instead.

use crate::engine::{LexemeKind, NormalizedText, lex};
use crate::rules::numeral::cipher::cipher_value;
use crate::rules::numeral::rules::compose;
use crate::{NumberSource, NumberToken, NumeralData, Range, SolveError};

/// Operand being assembled from consecutive numeral lexemes.
#[derive(Debug)]
struct Pending {
    data: NumeralData,
    range: Range,
    last_token: usize,
    group: Option<usize>,
    words: bool,
    digits: bool,
}

impl Pending {
    fn absorb(&mut self, piece: &NumeralData) {
        self.words |= piece.spelled;
        self.digits |= !piece.spelled;
    }

    fn finish(self) -> Found {
        let source = match (self.words, self.digits) {
            (true, true) => NumberSource::Mixed,
            (true, false) => NumberSource::Words,
            _ => NumberSource::Digits,
        };
        Found { range: self.range, value: self.data.value, source, bracketed: self.group.is_some() }
    }
}

/// A finished operand, before ordering.
struct Found {
    range: Range,
    value: i64,
    source: NumberSource,
    bracketed: bool,
}

/// Recover the ordered operands of `text`.
///
/// Fails with `NoOperandsFound` when fewer than two operands are found.
pub(crate) fn extract(text: &NormalizedText, max_span: usize) -> Result<Vec<NumberToken>, SolveError> {
    let lexemes = lex(text, max_span);
    let mut found: Vec<Found> = Vec::new();
    let mut current: Option<Pending> = None;

    for lexeme in &lexemes {
        let LexemeKind::Numeral(piece) = lexeme.kind else {
            if let Some(done) = current.take() {
                found.push(done.finish());
            }
            continue;
        };

        if let Some(cur) = current.as_mut().filter(|cur| cur.group == lexeme.group) {
            let glued = cur.last_token == lexeme.first_token;
            if let Some((rule, data)) = compose(&cur.data, &piece, glued) {
                tracing::trace!(rule, left = cur.data.value, right = piece.value, value = data.value, "composed");
                cur.data = data;
                cur.range.end = lexeme.range.end;
                cur.last_token = lexeme.last_token;
                cur.absorb(&piece);
                continue;
            }
        }

        if let Some(done) = current.take() {
            found.push(done.finish());
        }
        let mut next = Pending {
            data: piece,
            range: lexeme.range,
            last_token: lexeme.last_token,
            group: lexeme.group,
            words: false,
            digits: false,
        };
        next.absorb(&piece);
        current = Some(next);
    }
    if let Some(done) = current.take() {
        found.push(done.finish());
    }

    let raw = text.raw();
    for (idx, inner) in text.groups().iter().enumerate() {
        let has_numeral =
            lexemes.iter().any(|l| l.group == Some(idx) && matches!(l.kind, LexemeKind::Numeral(_)));
        if has_numeral {
            continue;
        }
        if let Some(value) = cipher_value(&raw[inner.start..inner.end]) {
            // Include the angle brackets themselves.
            found.push(Found {
                range: Range::new(inner.start - 1, inner.end + 1),
                value,
                source: NumberSource::Cipher,
                bracketed: true,
            });
        }
    }

    found.sort_by_key(|f| f.range.start);

    let tokens: Vec<NumberToken> = found
        .into_iter()
        .enumerate()
        .map(|(position, f)| NumberToken {
            position,
            value: f.value,
            range: f.range,
            body: raw[f.range.start..f.range.end].to_string(),
            source: f.source,
            bracketed: f.bracketed,
            rate_figure: false,
        })
        .collect();

    tracing::debug!(values = ?tokens.iter().map(|t| t.value).collect::<Vec<_>>(), "extracted operands");

    if tokens.len() < 2 {
        return Err(SolveError::NoOperandsFound { found: tokens.len(), text: text.as_str().to_string() });
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalize;
    use pretty_assertions::assert_eq;

    fn values(raw: &str) -> Vec<i64> {
        extract(&normalize(raw).unwrap(), 6).unwrap().into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn compounds_become_one_operand() {
        assert_eq!(values("TwEnTy FiVe plus Fifteen"), vec![25, 15]);
        assert_eq!(values("tWeN tY fIiV e and 17"), vec![25, 17]);
        assert_eq!(values("twenty-five lobsters and three"), vec![25, 3]);
    }

    #[test]
    fn magnitudes_multiply_and_absorb_remainders() {
        assert_eq!(values("two thousand five hundred twenty five and one"), vec![2525, 1]);
        assert_eq!(values("three hundred and four"), vec![300, 4]);
        assert_eq!(values("one hundred five minus 5 hundred"), vec![105, 500]);
    }

    #[test]
    fn unrelated_neighbours_stay_apart() {
        assert_eq!(values("five twenty lobsters"), vec![5, 20]);
        assert_eq!(values("twenty thirty claws"), vec![20, 30]);
        assert_eq!(values("twenty 5 claws"), vec![20, 5]);
        assert_eq!(values("twenty lobsters five"), vec![20, 5]);
    }

    #[test]
    fn glued_pieces_add_up() {
        assert_eq!(values("Twenty5 minus 5Ten"), vec![25, 15]);
    }

    #[test]
    fn tokens_carry_position_span_and_source() {
        let raw = "A] TwEnTy5 claws ~ and <GaAiInSs> and 12";
        let tokens = extract(&normalize(raw).unwrap(), 6).unwrap();

        assert_eq!(tokens.iter().map(|t| t.position).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tokens.iter().map(|t| t.body.as_str()).collect::<Vec<_>>(), vec!["TwEnTy5", "<GaAiInSs>", "12"]);
        assert_eq!(
            tokens.iter().map(|t| t.source).collect::<Vec<_>>(),
            vec![NumberSource::Mixed, NumberSource::Cipher, NumberSource::Digits]
        );
        assert_eq!(tokens[1].value, 17);
    }

    #[test]
    fn bracketed_number_words_are_not_ciphered() {
        assert_eq!(values("gains <TwEnTy> and <fIvE>"), vec![20, 5]);
    }

    #[test]
    fn unseparated_compounds_in_brackets_are_not_ciphered() {
        let tokens = extract(&normalize("total force from <twentyfive> and <fifteen>").unwrap(), 6).unwrap();
        assert_eq!(tokens.iter().map(|t| t.value).collect::<Vec<_>>(), vec![25, 15]);
        assert!(tokens.iter().all(|t| t.bracketed && t.source == NumberSource::Words));
    }

    #[test]
    fn cipher_never_applies_outside_brackets() {
        let err = extract(&normalize("gains GaAiInSs and five").unwrap(), 6).unwrap_err();
        assert!(matches!(err, SolveError::NoOperandsFound { found: 1, .. }));
    }

    #[test]
    fn fewer_than_two_operands_fails() {
        let err = extract(&normalize("no numbers here").unwrap(), 6).unwrap_err();
        assert!(matches!(err, SolveError::NoOperandsFound { found: 0, .. }));
    }
}
