//! Purpose: Shared core library behind the `matchbook` CLI and tests.
//! Exports: `core` (document decoding, report rendering, pretty JSON, errors).
//! Role: Keeps the report pipeline pure and testable; the binary owns argv,
//! file reads, and process exit.
//! Invariants: Core modules take explicit inputs and return explicit values;
//! no hidden process state.
pub mod core;

pub use crate::core::document::{Document, decode_matches};
pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::pretty::{DEFAULT_WIDTH, RenderOptions, pretty_json};
pub use crate::core::report::{heading, render_report, write_report};
