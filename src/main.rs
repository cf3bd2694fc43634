//! Purpose: `matchbook` CLI entry point.
//! Role: Binary crate root; parses args, renders the report, sets the exit code.
//! Invariants: The report is written to stdout; diagnostics go to stderr only.
//! Invariants: Errors are human-readable on a terminal and JSON otherwise.
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};

use matchbook::{Document, Error, ErrorKind, RenderOptions, to_exit_code, write_report};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

#[derive(Debug, Parser)]
#[command(
    name = "matchbook",
    version,
    about = "Print rule-match JSON dumps as readable reports",
    after_help = r#"EXAMPLES
  $ matchbook matches.json

INPUT
  A JSON object mapping rule names to JSON-encoded match strings:
    {"rule_one": "[1, 2, 3]", "rule_two": "{\"x\": true}"}

  Each value is decoded a second time and pretty-printed under the
  rule's underlined heading, in document order."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(help = "Path to the rule-match JSON file", value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                    print_clap_message(&err)?;
                    Ok(0)
                }
                ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    print_clap_message(&err)?;
                    Ok(2)
                }
                _ => Err(Error::new(ErrorKind::Usage, clap_error_summary(&err))
                    .with_hint("Usage: `matchbook <FILE>`; try `matchbook --help`.")),
            };
        }
    };

    print_report(&cli.file).map_err(with_default_hint)?;
    Ok(0)
}

fn print_clap_message(err: &clap::Error) -> Result<(), Error> {
    err.print()
        .map_err(|io_err| Error::new(ErrorKind::Io, "failed to write help").with_source(io_err))
}

fn print_report(path: &Path) -> Result<(), Error> {
    let text = read_input(path)?;
    let doc = Document::parse(&text)?;

    let opts = RenderOptions {
        color: io::stdout().is_terminal(),
        ..RenderOptions::default()
    };
    let mut out = io::stdout().lock();
    write_report(&doc, &opts, &mut out)?;
    out.flush()
        .map_err(|err| Error::new(ErrorKind::Io, "failed to flush report").with_source(err))
}

fn read_input(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|err| {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::Permission,
            _ => ErrorKind::Io,
        };
        Error::new(kind, "failed to read input file")
            .with_path(path)
            .with_source(err)
    })
}

fn with_default_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    let hint = match err.kind() {
        ErrorKind::NotFound => "Check the path; matchbook reads exactly one rule-match JSON file.",
        ErrorKind::Permission => "Check read access to the input file.",
        ErrorKind::Io => "Check the path and filesystem.",
        _ => return err,
    };
    err.with_hint(hint)
}

// Stderr label colors; red for the lead line, yellow for context.
const COLOR_ERROR: &str = "31";
const COLOR_NOTE: &str = "33";

fn colorize_label(label: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("\u{1b}[{code}m{label}\u{1b}[0m")
    } else {
        label.to_string()
    }
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err, true));
        return;
    }
    match serde_json::to_string(&error_json(err)) {
        Ok(line) => eprintln!("{line}"),
        Err(_) => eprintln!(r#"{{"error":{{"kind":"Internal","message":"json encode failed"}}}}"#),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    std::iter::successors(err.source(), |cause: &&dyn StdError| (*cause).source())
        .map(|cause| cause.to_string())
        .collect()
}

fn error_json(err: &Error) -> Value {
    let mut fields = Map::new();
    fields.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    fields.insert("message".to_string(), json!(err.message()));
    if let Some(rule) = err.rule() {
        fields.insert("rule".to_string(), json!(rule));
    }
    if let Some(path) = err.path() {
        fields.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(hint) = err.hint() {
        fields.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        fields.insert("causes".to_string(), json!(causes));
    }
    json!({ "error": fields })
}

// Labeled block: the lead line, then one context line per attached field,
// with the actionable hint last.
fn error_text(err: &Error, use_color: bool) -> String {
    let mut text = format!(
        "{} {}",
        colorize_label("error:", COLOR_ERROR, use_color),
        err.message()
    );
    if let Some(rule) = err.rule() {
        push_field(&mut text, "rule:", rule, use_color);
    }
    if let Some(path) = err.path() {
        push_field(&mut text, "path:", &path.display().to_string(), use_color);
    }
    if let Some(cause) = error_causes(err).first() {
        push_field(&mut text, "caused by:", cause, use_color);
    }
    if let Some(hint) = err.hint() {
        push_field(&mut text, "hint:", hint, use_color);
    }
    text
}

fn push_field(text: &mut String, label: &str, value: &str, use_color: bool) {
    text.push('\n');
    text.push_str(&colorize_label(label, COLOR_NOTE, use_color));
    text.push(' ');
    text.push_str(value);
}

fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error:").unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}
