pub(crate) mod cue;
pub(crate) mod numeral;
