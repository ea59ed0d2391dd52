//! Cue scanning.
//!
//! Walks the lexemes of a normalized challenge and collects every operation
//! cue into a `CueMask`, keeping the span of each hit. The classifier only
//! looks at the mask; the spans let the pipeline locate the rate statement
//! and let the CLI report which words drove the decision.
//!
//! This is a coarse scan. Context such as "which number does `per` refer to"
//! is resolved later by the pipeline.

use crate::Range;
use crate::engine::{LexemeKind, NormalizedText, Sign, lex};

bitflags::bitflags! {
    /// Operation cues found in a challenge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CueMask: u8 {
        /// `per`, `every`.
        const RATE_WORD     = 1 << 0;
        /// `total`, `combined`.
        const TOTAL_WORD    = 1 << 1;
        const SUBTRACT_WORD = 1 << 2;
        const ADD_WORD      = 1 << 3;
        /// `-` glued to a number.
        const MINUS_GLYPH   = 1 << 4;
        /// `+` glued to a number.
        const PLUS_GLYPH    = 1 << 5;
    }
}

/// One cue occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CueHit {
    pub mask: CueMask,
    pub range: Range,
}

/// Cues detected in a normalized challenge.
#[derive(Debug, Clone, Default)]
pub(crate) struct CueScan {
    pub mask: CueMask,
    pub hits: Vec<CueHit>,
}

impl Default for CueMask {
    fn default() -> Self {
        CueMask::empty()
    }
}

impl CueScan {
    /// Scan `text` for cue words and operator glyphs.
    pub(crate) fn scan(text: &NormalizedText, max_span: usize) -> Self {
        let mut scan = CueScan::default();

        for lexeme in lex(text, max_span) {
            let mask = match lexeme.kind {
                LexemeKind::Cue(mask) => mask,
                LexemeKind::Glyph(Sign::Minus) => CueMask::MINUS_GLYPH,
                LexemeKind::Glyph(Sign::Plus) => CueMask::PLUS_GLYPH,
                LexemeKind::Numeral(_) | LexemeKind::Other => continue,
            };
            scan.mask |= mask;
            scan.hits.push(CueHit { mask, range: lexeme.range });
        }

        tracing::debug!(mask = ?scan.mask, hits = scan.hits.len(), "scanned cues");
        scan
    }

    /// First hit carrying any flag of `flag`.
    pub(crate) fn first(&self, flag: CueMask) -> Option<&CueHit> {
        self.hits.iter().find(|hit| hit.mask.intersects(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalize;

    fn scan(raw: &str) -> CueScan {
        CueScan::scan(&normalize(raw).unwrap(), 6)
    }

    #[test]
    fn collects_words_and_glyphs() {
        let s = scan("ten meters per second, total from five and -3");
        assert!(s.mask.contains(CueMask::RATE_WORD | CueMask::TOTAL_WORD | CueMask::ADD_WORD));
        assert!(s.mask.contains(CueMask::MINUS_GLYPH));
        assert!(!s.mask.contains(CueMask::SUBTRACT_WORD));
    }

    #[test]
    fn records_hit_spans_in_raw_text() {
        let raw = "five M^iNuS three";
        let s = scan(raw);
        let hit = s.first(CueMask::SUBTRACT_WORD).unwrap();
        assert_eq!(&raw[hit.range.start..hit.range.end], "M^iNuS");
    }

    #[test]
    fn no_cues_gives_empty_mask() {
        let s = scan("twenty lobsters five claws");
        assert!(s.mask.is_empty());
        assert!(s.hits.is_empty());
    }
}
