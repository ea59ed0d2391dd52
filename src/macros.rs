#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! compose_rule {
    (
        name: $name:expr,
        left: $left:expr,
        right: $right:expr
        $(, glued: $glued:expr)?
        , prod: |$l:ident, $r:ident| $body:block
        $(,)?
    ) => {{
        $crate::ComposeRule {
            name: $name,
            left: $left,
            right: $right,
            glued: { false $(|| $glued)? },
            production: |$l: &$crate::NumeralData, $r: &$crate::NumeralData| -> Option<$crate::NumeralData> { $body },
        }
    }};
}

#[macro_export]
macro_rules! cue_rule {
    (
        name: $name:expr,
        rank: $rank:expr
        $(, all: $all:expr)?
        $(, any: $any:expr)?
        , op: $op:expr
        $(,)?
    ) => {{
        $crate::CueRule {
            name: $name,
            rank: $rank,
            all: { $crate::engine::CueMask::empty() $(| $all)? },
            any: { $crate::engine::CueMask::empty() $(| $any)? },
            operation: $op,
        }
    }};
}
