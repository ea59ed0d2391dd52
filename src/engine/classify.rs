use crate::engine::{CueScan, NormalizedText};
use crate::rules::cue::rules::CUE_RULES;
use crate::{CueRule, Operation, SolveError};

/// Operation chosen for a challenge, with the rule that chose it.
#[derive(Debug, Clone)]
pub(crate) struct Classification {
    pub operation: Operation,
    pub rule: &'static str,
    pub scan: CueScan,
}

/// Pick exactly one operation from the cues in `text`.
///
/// The precedence table is walked by rank; the first rank holding a matching
/// rule decides. No cue at all, or two operations sharing the winning rank,
/// is an `AmbiguousOperation` error: the classifier never guesses.
pub(crate) fn classify(text: &NormalizedText, max_span: usize) -> Result<Classification, SolveError> {
    let scan = CueScan::scan(text, max_span);
    let rule = select(&CUE_RULES, &scan).map_err(|reason| SolveError::AmbiguousOperation {
        reason,
        text: text.as_str().to_string(),
    })?;

    tracing::debug!(rule = rule.name, operation = %rule.operation, "classified challenge");
    Ok(Classification { operation: rule.operation, rule: rule.name, scan })
}

fn select<'r>(rules: &'r [CueRule], scan: &CueScan) -> Result<&'r CueRule, String> {
    let Some(best) = rules.iter().filter(|rule| rule.matches(scan.mask)).min_by_key(|rule| rule.rank) else {
        return Err("no operation cue found".to_string());
    };

    let rivals: Vec<&CueRule> = rules
        .iter()
        .filter(|rule| rule.rank == best.rank && rule.matches(scan.mask) && rule.operation != best.operation)
        .collect();
    if let Some(rival) = rivals.first() {
        return Err(format!("conflicting cues of equal precedence: {} and {}", best.name, rival.name));
    }

    Ok(best)
}
