//! Option records and the builder used to declare them.

use std::fmt;

use crate::error::{Error, Result};
use crate::lexical;

/// Characters allowed in an option name: printable ASCII except quotes,
/// `=`, `#`, `!`, `$` and blanks.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '"' | '\'' | '=' | '#' | '!' | '$')
}

/// Characters allowed as a one-letter abbreviation.
///
/// Digits and `. + -` are excluded so that `-3`, `-.5` and `--x` are never
/// mistaken for a short option.
pub fn is_abbreviation_char(c: char) -> bool {
    is_name_char(c) && !c.is_ascii_digit() && !matches!(c, '.' | '+' | '-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Integer,
    Real,
    Logical,
    Flag,
    String,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptionKind::Integer => "integer",
            OptionKind::Real => "real",
            OptionKind::Logical => "logical",
            OptionKind::Flag => "flag",
            OptionKind::String => "string",
        };
        f.write_str(s)
    }
}

/// Current value of an option, tagged by kind.
///
/// Numeric variants carry their inclusive bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer { value: i64, min: i64, max: i64 },
    Real { value: f64, min: f64, max: f64 },
    Logical(bool),
    Flag(bool),
    String(String),
}

impl Value {
    pub fn kind(&self) -> OptionKind {
        match self {
            Value::Integer { .. } => OptionKind::Integer,
            Value::Real { .. } => OptionKind::Real,
            Value::Logical(_) => OptionKind::Logical,
            Value::Flag(_) => OptionKind::Flag,
            Value::String(_) => OptionKind::String,
        }
    }
}

/// Conversion out of a stored [`Value`], used by `Registry::get`.
pub trait FromValue: Sized {
    /// What the accessor expects, for the wrong-kind diagnostic.
    const EXPECTED: &'static str;

    fn from_value(v: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Integer { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "real";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Real { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "logical or flag";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Logical(b) | Value::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// A numeric bound as written in a declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Integer(i64),
    Real(f64),
}

impl From<i32> for Bound {
    fn from(v: i32) -> Self {
        Bound::Integer(v as i64)
    }
}

impl From<i64> for Bound {
    fn from(v: i64) -> Self {
        Bound::Integer(v)
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Bound::Real(v)
    }
}

// ============================================================================
// Opt: declaration builder
// ============================================================================

/// Declaration of one option, handed to `Registry::define`.
///
/// ```
/// use clopt::{Opt, Registry};
///
/// let mut reg = Registry::new();
/// reg.define(Opt::integer("count", 1).range(0, 10).short('c'));
/// reg.define(Opt::flag("verbose").short('v').description("Talk more."));
/// assert_eq!(reg.get_integer("count"), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Opt {
    pub(crate) name: String,
    pub(crate) abbreviation: Option<char>,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) show_default: bool,
    pub(crate) value: Value,
    pub(crate) range: Option<(Bound, Bound)>,
}

impl Opt {
    fn with_value(name: &str, value: Value) -> Self {
        Opt {
            name: name.to_string(),
            abbreviation: None,
            description: String::new(),
            required: false,
            show_default: false,
            value,
            range: None,
        }
    }

    /// Integer option; bounds default to the full `i64` range.
    pub fn integer(name: &str, default: i64) -> Self {
        Self::with_value(
            name,
            Value::Integer {
                value: default,
                min: i64::MIN,
                max: i64::MAX,
            },
        )
    }

    /// Real option; bounds default to the finite `f64` range.
    pub fn real(name: &str, default: f64) -> Self {
        Self::with_value(
            name,
            Value::Real {
                value: default,
                min: f64::MIN,
                max: f64::MAX,
            },
        )
    }

    pub fn logical(name: &str, default: bool) -> Self {
        Self::with_value(name, Value::Logical(default))
    }

    pub fn string(name: &str, default: &str) -> Self {
        Self::with_value(name, Value::String(default.to_string()))
    }

    /// Flag: false until it appears on the command line.
    pub fn flag(name: &str) -> Self {
        Self::with_value(name, Value::Flag(false))
    }

    pub fn short(mut self, c: char) -> Self {
        self.abbreviation = Some(c);
        self
    }

    /// Inclusive bounds for a numeric option.
    pub fn range(mut self, min: impl Into<Bound>, max: impl Into<Bound>) -> Self {
        self.range = Some((min.into(), max.into()));
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Append the default value to the help text.
    pub fn show_default(mut self) -> Self {
        self.show_default = true;
        self
    }
}

// ============================================================================
// OptionDef: a registered option
// ============================================================================

/// A registered option. Read-only outside the crate.
#[derive(Debug, Clone)]
pub struct OptionDef {
    pub(crate) name: String,
    pub(crate) abbreviation: Option<char>,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) show_default: bool,
    pub(crate) found: bool,
    pub(crate) raw_value: Option<String>,
    pub(crate) default: Value,
    pub(crate) value: Value,
}

impl OptionDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> Option<char> {
        self.abbreviation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> OptionKind {
        self.value.kind()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether a value was supplied on the command line.
    pub fn found(&self) -> bool {
        self.found
    }

    /// The literal the value came from, exactly as given.
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn is_flag(&self) -> bool {
        matches!(self.value, Value::Flag(_))
    }

    fn invalid(&self, literal: &str) -> Error {
        Error::InvalidValue {
            name: self.name.clone(),
            kind: self.kind(),
            value: literal.to_string(),
        }
    }

    fn overflow(&self, literal: &str) -> Error {
        Error::Overflow {
            name: self.name.clone(),
            kind: self.kind(),
            value: literal.to_string(),
        }
    }

    /// Validate `literal` against this option's grammar and bounds and store
    /// it. An option takes at most one value per parse; a rejected literal
    /// leaves the previous value in place.
    pub(crate) fn assign(&mut self, literal: &str) -> Result<()> {
        if self.found {
            return Err(Error::AlreadySet(self.name.clone()));
        }

        let next = match &self.value {
            Value::Integer { min, max, .. } => {
                if !lexical::is_integer(literal) {
                    return Err(self.invalid(literal));
                }
                let value = lexical::to_integer(literal).ok_or_else(|| self.overflow(literal))?;
                if value < *min || value > *max {
                    return Err(Error::OutOfRange {
                        name: self.name.clone(),
                        value: value.to_string(),
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                Value::Integer {
                    value,
                    min: *min,
                    max: *max,
                }
            }
            Value::Real { min, max, .. } => {
                if !lexical::is_real(literal) {
                    return Err(self.invalid(literal));
                }
                let value = lexical::to_real(literal).ok_or_else(|| self.overflow(literal))?;
                if value < *min || value > *max {
                    return Err(Error::OutOfRange {
                        name: self.name.clone(),
                        value: literal.trim_end().to_string(),
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                Value::Real {
                    value,
                    min: *min,
                    max: *max,
                }
            }
            Value::Logical(_) => {
                Value::Logical(lexical::parse_logical(literal).ok_or_else(|| self.invalid(literal))?)
            }
            Value::Flag(_) => {
                Value::Flag(lexical::parse_logical(literal).ok_or_else(|| self.invalid(literal))?)
            }
            Value::String(_) => Value::String(literal.to_string()),
        };

        self.value = next;
        self.found = true;
        self.raw_value = Some(literal.to_string());
        Ok(())
    }
}
