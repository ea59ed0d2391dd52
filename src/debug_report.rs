use moltsolve::{Challenge, NumberToken, ParseResultVerbose, SolveError, TokenSummary};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, res: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    print_header(input, &palette);

    println!("\n{}", palette.paint("━━━ Normalized ━━━", ansi::GRAY));
    println!("  {}", palette.paint(&res.challenge.normalized, ansi::BLUE));
    print_tokens(&res.details.tokens, &palette);

    println!("\n{}", palette.paint("━━━ Operands ━━━", ansi::GRAY));
    print_operands(&res.challenge.numbers, &palette);

    println!("\n{}", palette.paint("━━━ Operation ━━━", ansi::GRAY));
    print_operation(&res.challenge, res.details.cues.len(), &palette);

    println!("\n{}", palette.paint("━━━ Answer ━━━", ansi::GRAY));
    println!(
        "  {}  {}",
        palette.bold(palette.paint(res.answer.to_string(), ansi::GREEN)),
        palette.dim(format!("(submitted as \"{}\")", res.answer.to_submission()))
    );

    let t = &res.details.timings;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Normalize: {}  │  Extract: {}  │  Classify: {}  │  Evaluate: {}",
        palette.paint(format!("{:?}", t.total), ansi::GREEN),
        palette.paint(format!("{:?}", t.normalize), ansi::CYAN),
        palette.paint(format!("{:?}", t.extract), ansi::CYAN),
        palette.paint(format!("{:?}", t.classify), ansi::CYAN),
        palette.dim(format!("{:?}", t.evaluate)),
    );
    println!();
}

pub fn print_failure(input: &str, err: &SolveError, color: bool) {
    let palette = ansi::Palette::new(color);
    print_header(input, &palette);

    println!("\n{}", palette.paint("━━━ Failed ━━━", ansi::GRAY));
    println!("  {}", palette.bold(palette.paint(err.kind(), ansi::RED)));
    println!("  {}", err);
    if let Some(text) = err.normalized_text() {
        println!("  {} {}", palette.dim("normalized:"), palette.paint(text, ansi::BLUE));
    }

    println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
    match err {
        SolveError::MalformedChallenge { .. } => {
            println!("  • Input is empty or only punctuation");
        }
        SolveError::NoOperandsFound { .. } => {
            println!("  • A number word is split into more fragments than the span limit");
            println!("  • Only the rate figure was found, and it is excluded from RATE challenges");
        }
        SolveError::AmbiguousOperation { .. } => {
            println!("  • No cue word (plus, minus, total, ...) or glued +/- glyph was recognised");
        }
        SolveError::Evaluation { .. } => {
            println!("  • Arithmetic overflow");
        }
    }
    println!("\n{}", palette.dim("  Tip: Set MOLTSOLVE_LOG=debug to see every stage"));
    println!();
}

fn print_header(input: &str, palette: &ansi::Palette) {
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Decoding: \"{}\"", input.trim()), ansi::CYAN)));
}

fn print_tokens(tokens: &[TokenSummary], palette: &ansi::Palette) {
    let rendered: Vec<String> = tokens
        .iter()
        .map(|t| match t.group {
            Some(group) => format!("{}{}", t.text, palette.dim(format!("<{group}>"))),
            None => t.text.clone(),
        })
        .collect();
    println!("  {} {}", palette.dim(format!("{} tokens:", tokens.len())), rendered.join(palette.dim(" · ").as_str()));
}

fn print_operands(numbers: &[NumberToken], palette: &ansi::Palette) {
    for n in numbers {
        let value = if n.rate_figure {
            palette.dim(format!("{} (context, not summed)", n.value))
        } else {
            palette.bold(palette.paint(n.value.to_string(), ansi::GREEN))
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", n.position), ansi::GRAY),
            value,
            palette.dim("│"),
            palette.paint(format!("span {}..{}", n.range.start, n.range.end), ansi::YELLOW),
        );
        println!(
            "      {} {}  {} {:?}",
            palette.dim("source:"),
            palette.paint(format!("{:?}", n.source).to_lowercase(), ansi::BLUE),
            palette.dim("│ body:"),
            n.body
        );
    }
}

fn print_operation(challenge: &Challenge, cues: usize, palette: &ansi::Palette) {
    println!(
        "  {} {} {}  {}",
        palette.bold(palette.paint(challenge.operation.to_string(), ansi::GREEN)),
        palette.dim("│ rule:"),
        palette.paint(&challenge.rule, ansi::CYAN),
        palette.dim(format!("({cues} cues)"))
    );
}
