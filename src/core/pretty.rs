//! Purpose: Render decoded match data as width-aware pretty JSON text.
//! Exports: `RenderOptions`, `pretty_json`, `DEFAULT_WIDTH`.
//! Role: Pure formatter for report bodies; no I/O, deterministic output.
//! Invariants: Output re-parses as JSON regardless of options.
//! Invariants: ANSI escapes appear only when color is enabled and never
//! count toward the width budget.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

/// Width budget for keeping a container on a single line.
pub const DEFAULT_WIDTH: usize = 80;

// Conservative 8/16-color SGR palette. Punctuation stays uncolored and
// null is dimmed; match data is mostly read for its values.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "90";

#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    pub width: usize,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: false,
        }
    }
}

pub fn pretty_json(value: &Value, opts: &RenderOptions) -> String {
    let mut out = String::new();
    write_value(value, 0, 0, opts, &mut out);
    out
}

// `indent` is the nesting level at the start of the current line; `used`
// counts the columns already taken on it (indentation plus any key prefix).
fn write_value(value: &Value, indent: usize, used: usize, opts: &RenderOptions, out: &mut String) {
    match value {
        Value::Array(items) => {
            if fits_inline(value, used, opts) {
                write_inline(value, opts, out);
            } else {
                write_array(items, indent, opts, out);
            }
        }
        Value::Object(map) => {
            if fits_inline(value, used, opts) {
                write_inline(value, opts, out);
            } else {
                write_object(map, indent, opts, out);
            }
        }
        other => write_inline(other, opts, out),
    }
}

fn write_inline(value: &Value, opts: &RenderOptions, out: &mut String) {
    match value {
        Value::Null => push_colored("null", COLOR_NULL, opts.color, out),
        Value::Bool(flag) => {
            let text = if *flag { "true" } else { "false" };
            push_colored(text, COLOR_BOOL, opts.color, out);
        }
        Value::Number(num) => push_colored(&num.to_string(), COLOR_NUMBER, opts.color, out),
        Value::String(text) => push_colored(&encode_string(text), COLOR_STRING, opts.color, out),
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_inline(item, opts, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (idx, (key, item)) in map.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                push_colored(&encode_string(key), COLOR_KEY, opts.color, out);
                out.push_str(": ");
                write_inline(item, opts, out);
            }
            out.push('}');
        }
    }
}

fn write_array(items: &[Value], indent: usize, opts: &RenderOptions, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push_str("[\n");
    let child_used = (indent + 1) * INDENT.len();
    for (idx, item) in items.iter().enumerate() {
        push_indent(indent + 1, out);
        write_value(item, indent + 1, child_used, opts, out);
        if idx + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(indent, out);
    out.push(']');
}

fn write_object(map: &Map<String, Value>, indent: usize, opts: &RenderOptions, out: &mut String) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    let len = map.len();
    for (idx, (key, value)) in map.iter().enumerate() {
        push_indent(indent + 1, out);
        let encoded = encode_string(key);
        push_colored(&encoded, COLOR_KEY, opts.color, out);
        out.push_str(": ");
        let child_used = (indent + 1) * INDENT.len() + encoded.chars().count() + 2;
        write_value(value, indent + 1, child_used, opts, out);
        if idx + 1 < len {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(indent, out);
    out.push('}');
}

fn fits_inline(value: &Value, used: usize, opts: &RenderOptions) -> bool {
    measure(value, opts.width.saturating_sub(used)).is_some()
}

/// Compact single-line width of `value`, or None once it exceeds `budget`.
fn measure(value: &Value, budget: usize) -> Option<usize> {
    let mut total = 0usize;
    if add_measure(value, budget, &mut total) {
        Some(total)
    } else {
        None
    }
}

fn add_measure(value: &Value, budget: usize, total: &mut usize) -> bool {
    match value {
        Value::Null => add(total, 4, budget),
        Value::Bool(flag) => add(total, if *flag { 4 } else { 5 }, budget),
        Value::Number(num) => add(total, num.to_string().chars().count(), budget),
        Value::String(text) => add(total, encode_string(text).chars().count(), budget),
        Value::Array(items) => {
            if !add(total, 2, budget) {
                return false;
            }
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 && !add(total, 2, budget) {
                    return false;
                }
                if !add_measure(item, budget, total) {
                    return false;
                }
            }
            true
        }
        Value::Object(map) => {
            if !add(total, 2, budget) {
                return false;
            }
            for (idx, (key, item)) in map.iter().enumerate() {
                if idx > 0 && !add(total, 2, budget) {
                    return false;
                }
                if !add(total, encode_string(key).chars().count() + 2, budget) {
                    return false;
                }
                if !add_measure(item, budget, total) {
                    return false;
                }
            }
            true
        }
    }
}

fn add(total: &mut usize, amount: usize, budget: usize) -> bool {
    *total = total.saturating_add(amount);
    *total <= budget
}

fn encode_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

fn push_indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if use_color {
        out.push_str("\u{1b}[");
        out.push_str(color);
        out.push('m');
        out.push_str(text);
        out.push_str("\u{1b}[0m");
    } else {
        out.push_str(text);
    }
}
