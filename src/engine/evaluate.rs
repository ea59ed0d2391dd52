use crate::{Answer, NumberToken, Operation, SolveError};

/// Fold the operands with `operation`.
///
/// The pipeline only calls this with a resolved operation and at least two
/// operands; anything else is reported as an `Evaluation` error rather than a
/// panic. Arithmetic is checked.
pub(crate) fn evaluate(tokens: &[NumberToken], operation: Option<Operation>) -> Result<Answer, SolveError> {
    let Some(operation) = operation else {
        return Err(SolveError::Evaluation { reason: "operation is unset".to_string() });
    };

    let operands: Vec<i64> = match operation {
        Operation::Rate => tokens.iter().filter(|t| !t.rate_figure).map(|t| t.value).collect(),
        Operation::Add | Operation::Subtract => tokens.iter().map(|t| t.value).collect(),
    };
    let [first, rest @ ..] = operands.as_slice() else {
        return Err(SolveError::Evaluation { reason: "no operands".to_string() });
    };
    if rest.is_empty() {
        return Err(SolveError::Evaluation { reason: format!("{operation} needs at least two operands, got 1") });
    }

    let step: fn(i64, i64) -> Option<i64> = match operation {
        Operation::Add | Operation::Rate => i64::checked_add,
        Operation::Subtract => i64::checked_sub,
    };
    let value = rest.iter().try_fold(*first, |acc, &next| step(acc, next)).ok_or_else(|| SolveError::Evaluation {
        reason: format!("{operation} overflowed i64"),
    })?;

    tracing::debug!(%operation, operands = ?operands, value, "evaluated");
    Ok(Answer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumberSource, Range};

    fn tokens(values: &[i64]) -> Vec<NumberToken> {
        values
            .iter()
            .enumerate()
            .map(|(position, &value)| NumberToken {
                position,
                value,
                range: Range::new(position * 3, position * 3 + 2),
                body: value.to_string(),
                source: NumberSource::Digits,
                bracketed: false,
                rate_figure: false,
            })
            .collect()
    }

    #[test]
    fn add_sums_in_order() {
        assert_eq!(evaluate(&tokens(&[25, 15]), Some(Operation::Add)).unwrap().value(), 40);
        assert_eq!(evaluate(&tokens(&[1, 2, 3]), Some(Operation::Add)).unwrap().value(), 6);
    }

    #[test]
    fn subtract_folds_from_the_left() {
        assert_eq!(evaluate(&tokens(&[25, 15]), Some(Operation::Subtract)).unwrap().value(), 10);
        assert_eq!(evaluate(&tokens(&[20, 5, 3]), Some(Operation::Subtract)).unwrap().value(), 12);
        assert_eq!(evaluate(&tokens(&[5, 20]), Some(Operation::Subtract)).unwrap().value(), -15);
    }

    #[test]
    fn rate_skips_rate_figures() {
        let mut ts = tokens(&[10, 25, 15]);
        ts[0].rate_figure = true;
        assert_eq!(evaluate(&ts, Some(Operation::Rate)).unwrap().value(), 40);
        assert_eq!(evaluate(&ts, Some(Operation::Add)).unwrap().value(), 50);
    }

    #[test]
    fn invariant_violations_are_errors() {
        assert!(matches!(evaluate(&tokens(&[1, 2]), None), Err(SolveError::Evaluation { .. })));
        assert!(matches!(evaluate(&tokens(&[1]), Some(Operation::Add)), Err(SolveError::Evaluation { .. })));
        assert!(matches!(evaluate(&[], Some(Operation::Add)), Err(SolveError::Evaluation { .. })));

        let mut ts = tokens(&[10, 25]);
        ts[0].rate_figure = true;
        assert!(matches!(evaluate(&ts, Some(Operation::Rate)), Err(SolveError::Evaluation { .. })));
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(matches!(evaluate(&tokens(&[i64::MAX, 1]), Some(Operation::Add)), Err(SolveError::Evaluation { .. })));
        assert!(matches!(
            evaluate(&tokens(&[i64::MIN, 1]), Some(Operation::Subtract)),
            Err(SolveError::Evaluation { .. })
        ));
    }
}
