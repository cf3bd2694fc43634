//! Purpose: Frame rule sections and drive full report rendering.
//! Exports: `write_report`, `render_report`, `heading`.
//! Role: The pure pipeline core; the binary only adds argv, file reads,
//! and process exit.
//! Invariants: Every section is name line, dash underline, blank line,
//! body, blank line; the last section keeps its trailing blank line.
//! Invariants: The first inner-decode failure aborts the run; sections
//! already written stay written.
use std::io::Write;

use crate::core::document::{Document, decode_matches};
use crate::core::error::{Error, ErrorKind};
use crate::core::pretty::{RenderOptions, pretty_json};

/// Stream the report for `doc` into `out`, section by section.
pub fn write_report<W: Write>(
    doc: &Document,
    opts: &RenderOptions,
    out: &mut W,
) -> Result<(), Error> {
    for (name, encoded) in doc.entries() {
        write_text(out, &heading(name))?;
        let matches = decode_matches(name, encoded)?;
        write_text(out, &pretty_json(&matches, opts))?;
        write_text(out, "\n\n")?;
    }
    Ok(())
}

/// Render the whole report to a string. Fails like `write_report`, with
/// nothing delivered on error.
pub fn render_report(doc: &Document, opts: &RenderOptions) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_report(doc, opts, &mut buf)?;
    String::from_utf8(buf).map_err(|err| {
        Error::new(ErrorKind::Internal, "rendered report is not valid UTF-8").with_source(err)
    })
}

/// Section heading: the rule name underlined with one dash per character,
/// then a blank line.
pub fn heading(name: &str) -> String {
    let underline = "-".repeat(name.chars().count());
    format!("{name}\n{underline}\n\n")
}

fn write_text<W: Write>(out: &mut W, text: &str) -> Result<(), Error> {
    out.write_all(text.as_bytes())
        .map_err(|err| Error::new(ErrorKind::Io, "failed to write report").with_source(err))
}
