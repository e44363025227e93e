//! Single-pass command-line parser.
//!
//! Walks the argument list once, left to right, with one token of lookahead
//! for options that take a value. Options are resolved against the
//! [`Registry`] and stored through its typed set step; everything else is
//! captured as a positional argument.

use crate::error::{Error, Result};
use crate::lexical;
use crate::option::{is_abbreviation_char, is_name_char};
use crate::registry::Registry;

/// Literal assigned to a flag that appears without a value.
const FLAG_PRESENT: &str = "true";

/// How a single raw token is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// `--` alone: everything after it is positional.
    EndOfOptions,
    /// `-abc`: one or more abbreviations.
    ShortCluster,
    /// `--name` or `--name=value`.
    LongOption,
    /// `-` followed by a digit, `.` or `-`: must be a real literal.
    Numeric,
    /// No leading dash, or the lone `-`.
    Positional,
    /// A dash followed by something no rule accepts.
    Invalid,
}

/// Classify one raw argument. Rules are tried in priority order.
pub fn classify(arg: &str) -> TokenClass {
    if arg == "--" {
        return TokenClass::EndOfOptions;
    }
    if arg == "-" || !arg.starts_with('-') {
        return TokenClass::Positional;
    }

    let mut chars = arg.chars().skip(1);
    let second = chars.next();
    let third = chars.next();
    match second {
        Some('-') if third.is_some_and(is_name_char) => TokenClass::LongOption,
        Some(c) if is_abbreviation_char(c) => TokenClass::ShortCluster,
        Some(c) if c.is_ascii_digit() || c == '.' || c == '-' => TokenClass::Numeric,
        _ => TokenClass::Invalid,
    }
}

/// Remaining raw arguments.
struct ArgCursor<'a> {
    args: &'a [String],
    next: usize,
}

impl<'a> ArgCursor<'a> {
    fn take(&mut self) -> Option<&'a str> {
        let arg = self.args.get(self.next)?;
        self.next += 1;
        Some(arg.as_str())
    }

    fn rest(&mut self) -> &'a [String] {
        let rest = &self.args[self.next..];
        self.next = self.args.len();
        rest
    }
}

/// Consume the next argument whole as the value of option `name`.
fn consume_next_value<'a>(cursor: &mut ArgCursor<'a>, name: &str) -> Result<&'a str> {
    cursor
        .take()
        .ok_or_else(|| Error::MissingValue(name.to_string()))
}

/// Strip one matching pair of surrounding quotes from a `--name=value` value.
fn unquote<'v>(value: &'v str, name: &str) -> Result<&'v str> {
    let is_quote = |c: char| c == '"' || c == '\'';
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(q), None) if is_quote(q) => Err(Error::BadQuote(name.to_string())),
        (Some(open), Some(close)) if is_quote(open) && open == close => {
            Ok(&value[1..value.len() - 1])
        }
        _ => Ok(value),
    }
}

impl Registry {
    /// Parse `args` (without the program name) into this registry.
    ///
    /// A failed parse leaves the options accepted so far in place; treat
    /// the whole command line as rejected.
    pub fn process_command_line<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let mut cursor = ArgCursor {
            args: &args,
            next: 0,
        };

        while let Some(arg) = cursor.take() {
            let class = classify(arg);
            tracing::debug!(arg, ?class, "classified argument");

            match class {
                TokenClass::EndOfOptions => {
                    for rest in cursor.rest() {
                        self.push_arg(rest);
                    }
                    break;
                }
                TokenClass::ShortCluster => self.short_cluster(&arg[1..], &mut cursor)?,
                TokenClass::LongOption => self.long_option(arg, &mut cursor)?,
                TokenClass::Numeric => {
                    if !lexical::is_real(arg) {
                        return Err(Error::Syntax(arg.to_string()));
                    }
                    self.push_arg(arg);
                }
                TokenClass::Positional => self.push_arg(arg),
                TokenClass::Invalid => return Err(Error::Syntax(arg.to_string())),
            }
        }

        Ok(())
    }

    /// `-abc`: flags anywhere, a value option only in last position.
    fn short_cluster(&mut self, cluster: &str, cursor: &mut ArgCursor<'_>) -> Result<()> {
        let mut chars = cluster.chars().peekable();
        while let Some(c) = chars.next() {
            let idx = self
                .find_by_abbreviation(c)
                .ok_or(Error::UnknownAbbreviation(c))?;
            let opt = self.option_mut(idx);
            tracing::trace!(abbreviation = %c, name = %opt.name(), "short option");

            if opt.is_flag() {
                opt.assign(FLAG_PRESENT)?;
                continue;
            }
            if chars.peek().is_some() {
                return Err(Error::ValueInCluster {
                    abbreviation: c,
                    name: opt.name().to_string(),
                });
            }
            let value = consume_next_value(cursor, opt.name())?;
            opt.assign(value)?;
            tracing::debug!(name = %opt.name(), value, "accepted value");
        }
        Ok(())
    }

    /// `--name`, `--name=value` or `--name value`.
    fn long_option(&mut self, arg: &str, cursor: &mut ArgCursor<'_>) -> Result<()> {
        let body = &arg.trim_end_matches(' ')[2..];
        let name_len: usize = body
            .chars()
            .take_while(|c| is_name_char(*c))
            .map(char::len_utf8)
            .sum();
        let (name, rest) = body.split_at(name_len);

        let inline = match rest.strip_prefix('=') {
            Some(value) => Some(unquote(value, name)?),
            None if rest.is_empty() => None,
            None => return Err(Error::Syntax(arg.to_string())),
        };

        let idx = self
            .find_by_name(name)
            .ok_or_else(|| Error::UnknownOption(name.to_string()))?;
        let opt = self.option_mut(idx);

        let value = match inline {
            Some(value) => value,
            None if opt.is_flag() => FLAG_PRESENT,
            None => consume_next_value(cursor, name)?,
        };
        opt.assign(value)?;
        tracing::debug!(name, value, "accepted value");
        Ok(())
    }
}
