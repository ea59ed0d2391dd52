mod debug_report;

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use moltsolve::logging::init_logging;
use moltsolve::{Answer, Challenge, Config, Options, SolveError, SubmissionError, VerificationClient};
use serde::Deserialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "moltsolve", about = "Decode and answer obfuscated arithmetic verification challenges", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a challenge and show how it was read
    Parse {
        /// Challenge text (quote it). Read from stdin when omitted.
        #[arg(allow_negative_numbers = true)]
        text: Vec<String>,

        /// Print JSON instead of the report
        #[arg(long)]
        json: bool,

        /// Force ANSI color output
        #[arg(long, conflicts_with = "no_color")]
        color: bool,

        /// Disable ANSI color output
        #[arg(long)]
        no_color: bool,

        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Compute the answer, optionally submitting it
    Solve {
        /// Challenge text (quote it). Read from stdin when omitted.
        #[arg(allow_negative_numbers = true)]
        text: Vec<String>,

        /// Verification code issued with the challenge
        #[arg(long)]
        code: Option<String>,

        /// Submit the answer to the verification endpoint
        #[arg(long, requires = "code")]
        submit: bool,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        decode: DecodeArgs,

        #[command(flatten)]
        api: ApiArgs,
    },
    /// Read a verification payload as JSON from stdin, solve it and submit
    Auto {
        /// Solve only, never submit
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Maximum noise-split fragments joined into one word
    #[arg(long, default_value_t = Options::default().max_fragment_span)]
    max_span: usize,
}

impl DecodeArgs {
    fn options(&self) -> Options {
        Options { max_fragment_span: self.max_span }
    }
}

#[derive(Args)]
struct ApiArgs {
    /// API key (default: $MOLTBOOK_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// API base URL (default: $MOLTBOOK_API_URL or the public endpoint)
    #[arg(long)]
    api_url: Option<String>,
}

impl ApiArgs {
    fn config(&self, payload_key: Option<String>) -> Config {
        Config::from_env().with_overrides(payload_key, None).with_overrides(self.api_key.clone(), self.api_url.clone())
    }
}

/// `auto` input, as returned by the API when a post needs verification.
#[derive(Debug, Deserialize)]
struct AutoInput {
    verification: VerificationPayload,
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerificationPayload {
    challenge_text: String,
    #[serde(default)]
    verification_code: Option<String>,
}

enum Failure {
    Usage(anyhow::Error),
    Decode { input: String, err: SolveError, json: bool },
    Submit(SubmissionError),
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Failure::Decode { .. } => 1,
            Failure::Usage(_) | Failure::Submit(SubmissionError::MissingCredential) => 2,
            Failure::Submit(_) => 3,
        }
    }

    fn report(&self) {
        match self {
            Failure::Usage(err) => eprintln!("error: {err:#}"),
            Failure::Decode { input, err, json: true } => {
                println!(
                    "{}",
                    json!({
                        "input": input,
                        "error": err.kind(),
                        "message": err.to_string(),
                        "normalized": err.normalized_text(),
                    })
                );
            }
            Failure::Decode { input, err, json: false } => {
                eprintln!("error: {}: {err}", err.kind());
                eprintln!("input: {:?}", input.trim());
            }
            Failure::Submit(err) => eprintln!("error: submission failed: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging("warn");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            failure.report();
            ExitCode::from(failure.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), Failure> {
    match cli.command {
        Commands::Parse { text, json, color, no_color, decode } => {
            let input = input_text(text)?;
            let color = if color {
                true
            } else if no_color {
                false
            } else {
                io::stdout().is_terminal()
            };

            match moltsolve::parse_verbose_with(&input, &decode.options()) {
                Ok(res) if json => print_json(&json!({ "challenge": res.challenge, "details": res.details })),
                Ok(res) => debug_report::print_run(&input, &res, color),
                Err(err) if json => return Err(Failure::Decode { input, err, json }),
                Err(err) => {
                    debug_report::print_failure(&input, &err, color);
                    return Err(Failure::Decode { input, err, json });
                }
            }
            Ok(())
        }
        Commands::Solve { text, code, submit, json, decode, api } => {
            let input = input_text(text)?;
            let challenge = decode_challenge(&input, &decode.options(), json)?;
            let answer = challenge.answer();

            let verdict = match code.as_deref() {
                Some(code) if submit => Some(submit_answer(&api.config(None), code, answer).await?),
                _ => None,
            };

            if json {
                print_json(&json!({ "challenge": challenge, "answer": answer.to_submission(), "verdict": verdict }));
            } else {
                println!("Answer: {}", answer.to_submission());
                if let Some(verdict) = verdict {
                    println!("Verified: {}", verdict.message.as_deref().unwrap_or("ok"));
                }
            }
            Ok(())
        }
        Commands::Auto { dry_run, api } => {
            let raw = read_stdin_input()?;
            let payload: AutoInput =
                serde_json::from_str(&raw).context("stdin is not a verification payload").map_err(Failure::Usage)?;

            let input = payload.verification.challenge_text;
            let challenge = decode_challenge(&input, &Options::default(), false)?;
            let answer = challenge.answer();
            println!("Answer: {}", answer.to_submission());

            let config = api.config(payload.api_key);
            match payload.verification.verification_code {
                Some(code) if !dry_run && config.api_key.is_some() => {
                    let verdict = submit_answer(&config, &code, answer).await?;
                    println!("Verified: {}", verdict.message.as_deref().unwrap_or("ok"));
                }
                Some(_) if !dry_run => {
                    tracing::warn!("no API key available, not submitting");
                }
                _ => {}
            }
            Ok(())
        }
    }
}

fn decode_challenge(input: &str, options: &Options, json: bool) -> Result<Challenge, Failure> {
    moltsolve::parse_with(input, options).map_err(|err| Failure::Decode { input: input.to_string(), err, json })
}

async fn submit_answer(config: &Config, code: &str, answer: Answer) -> Result<moltsolve::Verdict, Failure> {
    let client = VerificationClient::new(config).map_err(Failure::Submit)?;
    client.submit(code, answer).await.map_err(Failure::Submit)
}

fn input_text(args: Vec<String>) -> Result<String, Failure> {
    let input = if args.is_empty() { read_stdin_input()? } else { args.join(" ") };
    if input.trim().is_empty() {
        return Err(Failure::Usage(anyhow::anyhow!("no challenge text provided")));
    }
    Ok(input)
}

fn read_stdin_input() -> Result<String, Failure> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).context("failed to read stdin").map_err(Failure::Usage)?;
    Ok(buffer)
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("error: failed to render JSON: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("moltsolve").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn exit_codes_follow_the_failure_kind() {
        let decode = Failure::Decode {
            input: "no numbers here".into(),
            err: SolveError::NoOperandsFound { found: 0, text: "no numbers here".into() },
            json: false,
        };
        assert_eq!(decode.exit_code(), 1);
        assert_eq!(Failure::Usage(anyhow::anyhow!("no challenge text provided")).exit_code(), 2);
        assert_eq!(Failure::Submit(SubmissionError::MissingCredential).exit_code(), 2);
        assert_eq!(Failure::Submit(SubmissionError::Rejected { message: "Incorrect answer".into() }).exit_code(), 3);
        let status = SubmissionError::Status { status: 503, message: "busy".into(), retry_after: None };
        assert_eq!(Failure::Submit(status).exit_code(), 3);
    }

    #[test]
    fn submit_requires_a_code() {
        assert!(Cli::try_parse_from(["moltsolve", "solve", "--submit", "five plus three"]).is_err());
    }

    #[tokio::test]
    async fn undecodable_challenge_is_never_submitted() {
        // A reachable submission would fail as a transport error against this address.
        let args = cli(&[
            "solve",
            "--submit",
            "--code",
            "moltbook_verify_x",
            "--api-key",
            "moltbook_sk_test",
            "--api-url",
            "http://127.0.0.1:9/api/v1",
            "no numbers here",
        ]);

        let failure = run(args).await.unwrap_err();
        assert!(matches!(failure, Failure::Decode { err: SolveError::NoOperandsFound { .. }, .. }));
        assert_eq!(failure.exit_code(), 1);
    }

    #[tokio::test]
    async fn solve_without_submit_succeeds_offline() {
        assert!(run(cli(&["solve", "TwEnTy FiVe plus Fifteen"])).await.is_ok());
    }
}
