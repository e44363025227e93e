//! Help text, usage line and value dumps, rendered from registry data only.

use std::io::{self, Write};

use crate::error::misuse;
use crate::option::{OptionDef, Value};
use crate::registry::Registry;
use crate::wrap::write_wrapped;

/// Column window for help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Total line width.
    pub width: usize,
    /// Column where the option synopsis starts.
    pub synopsis_indent: usize,
    /// Column where description text starts.
    pub description_indent: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        HelpLayout {
            width: 80,
            synopsis_indent: 2,
            description_indent: 8,
        }
    }
}

/// Continuation indent of a wrapped usage line, `len("Usage: ")`.
const USAGE_INDENT: usize = 7;

/// Placeholder for an option's value in synopses: the upper-cased name.
fn placeholder(opt: &OptionDef) -> String {
    opt.name().to_ascii_uppercase()
}

/// `-c COUNT, --count=COUNT`, `--count=COUNT`, `-v, --verbose` or `--verbose`.
pub fn synopsis(opt: &OptionDef) -> String {
    let mut s = String::new();
    if let Some(c) = opt.abbreviation() {
        s.push('-');
        s.push(c);
        if !opt.is_flag() {
            s.push(' ');
            s.push_str(&placeholder(opt));
        }
        s.push_str(", ");
    }
    s.push_str("--");
    s.push_str(opt.name());
    if !opt.is_flag() {
        s.push('=');
        s.push_str(&placeholder(opt));
    }
    s
}

/// Usage-line form: `-v|--verbose`, `-c COUNT|--count=COUNT`.
fn usage_item(opt: &OptionDef) -> String {
    let long = if opt.is_flag() {
        format!("--{}", opt.name())
    } else {
        format!("--{}={}", opt.name(), placeholder(opt))
    };
    match opt.abbreviation() {
        Some(c) if opt.is_flag() => format!("-{}|{}", c, long),
        Some(c) => format!("-{} {}|{}", c, placeholder(opt), long),
        None => long,
    }
}

fn logical_literal(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// `d.ddddddE+XX`: six fractional digits, signed exponent of at least two digits.
pub fn format_scientific(v: f64) -> String {
    let s = format!("{:.6E}", v);
    match s.split_once('E') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
        None => s,
    }
}

/// Value as shown by the value dump.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Integer { value, .. } => format!("{:>12}", value),
        Value::Real { value, .. } => format!("{:>15}", format_scientific(*value)),
        Value::Logical(b) | Value::Flag(b) => logical_literal(*b).to_string(),
        Value::String(s) => s.trim_end().to_string(),
    }
}

/// Default as appended to help text; flags have none worth showing.
fn default_text(value: &Value) -> Option<String> {
    match value {
        Value::Integer { value, .. } => Some(value.to_string()),
        Value::Real { value, .. } => Some(value.to_string()),
        Value::Logical(b) => Some(logical_literal(*b).to_string()),
        Value::Flag(_) => None,
        Value::String(s) => Some(format!("\"{}\"", s)),
    }
}

fn help_text(opt: &OptionDef) -> String {
    let mut text = opt.description().to_string();
    let mut append = |extra: &str| {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push(' ');
        }
        text.push_str(extra);
    };
    if opt.show_default {
        if let Some(d) = default_text(opt.default_value()) {
            append(&format!("(default: {})", d));
        }
    }
    if opt.is_required() {
        append("(required)");
    }
    text
}

fn write_option_help<W: Write>(out: &mut W, opt: &OptionDef, layout: &HelpLayout) -> io::Result<()> {
    writeln!(
        out,
        "{:indent$}{}",
        "",
        synopsis(opt),
        indent = layout.synopsis_indent
    )?;
    write_wrapped(
        out,
        &help_text(opt),
        layout.description_indent,
        layout.width,
    )
}

impl Registry {
    /// Help for every option, in definition order.
    pub fn print_options<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_options_with(out, &HelpLayout::default())
    }

    pub fn print_options_with<W: Write>(&self, out: &mut W, layout: &HelpLayout) -> io::Result<()> {
        for opt in self.options() {
            write_option_help(out, opt, layout)?;
        }
        Ok(())
    }

    /// Help for one option.
    ///
    /// # Panics
    ///
    /// If `name` is not defined.
    pub fn print_option<W: Write>(&self, out: &mut W, name: &str) -> io::Result<()> {
        write_option_help(out, self.lookup(name), &HelpLayout::default())
    }

    /// `name: value` for every option.
    pub fn print_option_values<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for opt in self.options() {
            writeln!(out, "{}: {}", opt.name(), format_value(opt.value()))?;
        }
        Ok(())
    }

    /// Positional arguments, numbered from 1.
    pub fn print_args<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, arg) in self.args().iter().enumerate() {
            writeln!(out, "{:>3}: {}", i + 1, arg)?;
        }
        Ok(())
    }

    /// One-line synopsis of the whole command, wrapped to `layout.width`.
    pub fn print_usage<W: Write>(
        &self,
        out: &mut W,
        program: &str,
        layout: &HelpLayout,
    ) -> io::Result<()> {
        if program.is_empty() {
            misuse("program name for the usage line must not be empty");
        }
        let mut line = format!("Usage: {}", program);
        let mut cur = line.chars().count();

        let items = self
            .options()
            .map(|opt| {
                if opt.is_required() {
                    usage_item(opt)
                } else {
                    format!("[{}]", usage_item(opt))
                }
            })
            .chain(std::iter::once("[ARG...]".to_string()));

        for item in items {
            let len = item.chars().count() + 1;
            if cur + len > layout.width && cur > USAGE_INDENT {
                writeln!(out, "{}", line)?;
                line = " ".repeat(USAGE_INDENT - 1);
                cur = USAGE_INDENT - 1;
            }
            line.push(' ');
            line.push_str(&item);
            cur += len;
        }
        writeln!(out, "{}", line)
    }
}
